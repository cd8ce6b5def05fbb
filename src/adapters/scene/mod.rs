//! Scene documents
//!
//! A self-contained [`DocumentHost`](crate::adapters::host::DocumentHost)
//! implementation: documents are JSON files, leaves are solid rectangles,
//! rendering uses `image` and encoding uses `png`.
//!
//! ```rust,no_run
//! use artex::adapters::scene::SceneHost;
//! use artex::adapters::host::DocumentHost;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = SceneHost::open("designs/landing.json")?;
//! let document = host.active_document().expect("scene is open");
//! println!("{} top-level layers", document.layers.len());
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod render;

pub use host::{SceneHost, SCENE_HOST_VERSION};
