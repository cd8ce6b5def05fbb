//! Layer visibility snapshot

use crate::domain::document::Document;
use crate::domain::ids::LayerPath;
use std::collections::HashMap;

/// Visibility of every layer in a document at one point in time
///
/// Entries are kept in pre-order (parents before their children). Every layer
/// of the captured tree has exactly one entry.
#[derive(Debug, Clone, Default)]
pub struct VisibilitySnapshot {
    entries: Vec<(LayerPath, bool)>,
    index: HashMap<LayerPath, usize>,
}

impl VisibilitySnapshot {
    /// Record the visibility flag of every layer in `document`
    pub fn capture(document: &Document) -> Self {
        let entries = document.visibility_map();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (path, _))| (path.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Captured entries, parents first
    pub fn entries(&self) -> &[(LayerPath, bool)] {
        &self.entries
    }

    /// Captured visibility of the layer at `path`
    pub fn visible(&self, path: &LayerPath) -> Option<bool> {
        self.index.get(path).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths whose visibility in `document` differs from the snapshot
    pub fn changed_in(&self, document: &Document) -> Vec<LayerPath> {
        self.entries
            .iter()
            .filter(|(path, visible)| {
                document
                    .layer(path)
                    .map(|layer| layer.visible() != *visible)
                    .unwrap_or(true)
            })
            .map(|(path, _)| path.clone())
            .collect()
    }
}
