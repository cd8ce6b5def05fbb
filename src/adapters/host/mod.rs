//! Document host abstraction
//!
//! This module defines the trait an image-editing host must implement for the
//! export engine to drive it. The engine reads the layer tree through the host
//! and mutates it only through the trait's setters.

pub mod traits;

pub use traits::{DocumentHost, HostResult, PngExportOptions};
