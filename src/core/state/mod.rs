//! Document state capture and restoration
//!
//! A run mutates layer visibility, the crop box and the ruler unit of the live
//! document. [`StateGuard`] records all three before the first mutation and
//! puts them back when it goes out of scope.

pub mod guard;
pub mod snapshot;

pub use guard::{RestoreReport, StateGuard};
pub use snapshot::VisibilitySnapshot;
