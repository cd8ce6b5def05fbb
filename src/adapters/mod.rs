//! External system integrations for Artex.
//!
//! - [`host`] - The document host abstraction (trait-based)
//! - [`scene`] - JSON scene documents, rendered in-process
//!
//! # Design Pattern
//!
//! The export engine only talks to a [`host::DocumentHost`]. Adapters isolate
//! the host application so the engine can be driven by a real editor bridge,
//! the bundled scene host, or a test double.

pub mod host;
pub mod scene;
