//! RAII guard over the mutable document state
//!
//! The guard borrows the host mutably for its whole lifetime, so nothing else
//! can touch the document while a run is in progress. All access goes through
//! the guard (it dereferences to the host).
//!
//! Restoration happens either explicitly through [`StateGuard::restore`] or
//! implicitly on drop, which also covers early returns and panics.

use crate::adapters::host::DocumentHost;
use crate::core::state::snapshot::VisibilitySnapshot;
use crate::domain::document::RulerUnits;
use crate::domain::errors::ArtexError;
use crate::domain::layer::Bounds;
use crate::domain::Result;
use std::ops::{Deref, DerefMut};

/// Outcome of a restoration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Layers whose visibility flag was written back
    pub layers_restored: usize,

    /// Host calls that failed during restoration
    pub failures: usize,

    /// Layers whose visibility still differs from the snapshot afterwards
    pub drifted: usize,
}

impl RestoreReport {
    /// Whether every piece of state was put back
    pub fn is_clean(&self) -> bool {
        self.failures == 0 && self.drifted == 0
    }
}

/// Captured document state, restored when the guard is released
pub struct StateGuard<'h, H: DocumentHost + ?Sized> {
    host: &'h mut H,
    snapshot: VisibilitySnapshot,
    crop_box: Bounds,
    ruler_units: RulerUnits,
    restored: bool,
}

impl<'h, H: DocumentHost + ?Sized> StateGuard<'h, H> {
    /// Capture the active document's state and switch rulers to pixels
    ///
    /// # Errors
    ///
    /// Returns [`ArtexError::NoActiveDocument`] if the host has nothing open.
    /// If switching the ruler unit fails, the state is restored before the
    /// error is returned.
    pub fn acquire(host: &'h mut H) -> Result<Self> {
        let document = host
            .active_document()
            .ok_or(ArtexError::NoActiveDocument)?;

        let snapshot = VisibilitySnapshot::capture(document);
        let crop_box = document.crop_box;
        let ruler_units = document.ruler_units;

        tracing::debug!(
            layers = snapshot.len(),
            crop_box = %crop_box,
            ruler_units = %ruler_units,
            "Captured document state"
        );

        let mut guard = Self {
            host,
            snapshot,
            crop_box,
            ruler_units,
            restored: false,
        };
        guard.host.set_ruler_units(RulerUnits::Pixels)?;
        Ok(guard)
    }

    /// The visibility snapshot taken at acquisition
    pub fn snapshot(&self) -> &VisibilitySnapshot {
        &self.snapshot
    }

    /// Borrow the host mutably and the snapshot immutably at the same time
    pub fn split(&mut self) -> (&mut H, &VisibilitySnapshot) {
        (&mut *self.host, &self.snapshot)
    }

    /// Put the captured state back now and release the guard
    pub fn restore(mut self) -> RestoreReport {
        self.restore_state()
    }

    fn restore_state(&mut self) -> RestoreReport {
        let mut report = RestoreReport::default();

        for (path, visible) in self.snapshot.entries() {
            match self.host.set_layer_visible(path, *visible) {
                Ok(()) => report.layers_restored += 1,
                Err(e) => {
                    report.failures += 1;
                    tracing::warn!(
                        path = %path,
                        error = %e,
                        "Failed to restore layer visibility"
                    );
                }
            }
        }

        if let Err(e) = self.host.set_crop_box(self.crop_box) {
            report.failures += 1;
            tracing::warn!(error = %e, crop_box = %self.crop_box, "Failed to restore crop box");
        }

        if let Err(e) = self.host.set_ruler_units(self.ruler_units) {
            report.failures += 1;
            tracing::warn!(error = %e, ruler_units = %self.ruler_units, "Failed to restore ruler units");
        }

        self.restored = true;

        if let Some(document) = self.host.active_document() {
            let drifted = self.snapshot.changed_in(document);
            for path in &drifted {
                tracing::warn!(path = %path, "Layer visibility differs from the snapshot after restore");
            }
            report.drifted = drifted.len();
        }

        if report.is_clean() {
            tracing::debug!(layers = report.layers_restored, "Restored document state");
        } else {
            tracing::error!(
                layers = report.layers_restored,
                failures = report.failures,
                drifted = report.drifted,
                "Document state only partially restored"
            );
        }
        report
    }
}

impl<H: DocumentHost + ?Sized> Deref for StateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: DocumentHost + ?Sized> DerefMut for StateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: DocumentHost + ?Sized> Drop for StateGuard<'_, H> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if std::thread::panicking() {
            tracing::warn!("Restoring document state while unwinding");
        }
        self.restore_state();
    }
}
