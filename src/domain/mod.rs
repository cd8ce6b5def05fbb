//! Domain models and types for Artex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Layer tree** ([`Layer`], [`LeafLayer`], [`GroupLayer`]) with the recursive
//!   visible-content check used to classify groups
//! - **Document** ([`Document`]) with crop box and ruler units
//! - **Layer identity** ([`LayerPath`])
//! - **Error types** ([`ArtexError`], [`HostError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use artex::domain::{Bounds, Document, GroupLayer, LeafLayer};
//!
//! let header = GroupLayer::new(
//!     "Header",
//!     vec![LeafLayer::new("logo", Some(Bounds::new(0.0, 0.0, 120.0, 40.0))).into()],
//! );
//! let home = GroupLayer::new("Home", vec![header.into()]);
//! let doc = Document::new("site", Bounds::new(0.0, 0.0, 1440.0, 900.0), vec![home.into()]);
//!
//! assert!(doc.layers[0].has_visible_content(1.0));
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod layer;
pub mod result;

pub use document::{Document, RulerUnits};
pub use errors::{ArtexError, HostError};
pub use ids::LayerPath;
pub use layer::{Bounds, ColorTag, GroupLayer, Layer, LeafLayer};
pub use result::Result;
