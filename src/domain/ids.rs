//! Layer identity
//!
//! Layers are identified by their index path from the document root. The engine
//! never adds or removes layers, so a path stays valid for the whole run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index path of a layer inside a document
///
/// The first index selects a top-level layer, each following index selects a
/// child of the group selected so far. Index 0 is the top-most layer.
///
/// # Examples
///
/// ```
/// use artex::domain::ids::LayerPath;
/// use std::str::FromStr;
///
/// let path = LayerPath::top(1).child(3);
/// assert_eq!(path.to_string(), "1/3");
/// assert_eq!(LayerPath::from_str("1/3").unwrap(), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerPath(Vec<usize>);

impl LayerPath {
    /// Creates a path from raw indices
    ///
    /// Returns `Err` for an empty index list; the document root is not a layer.
    pub fn new(indices: Vec<usize>) -> Result<Self, String> {
        if indices.is_empty() {
            return Err("Layer path cannot be empty".to_string());
        }
        Ok(Self(indices))
    }

    /// Path of a top-level layer
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of the `index`-th child of this layer
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the enclosing group, `None` for top-level layers
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Nesting depth, 1 for top-level layers
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Raw indices
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for LayerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}

impl FromStr for LayerPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let indices = s
            .split('/')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid layer path segment '{part}' in '{s}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(indices)
    }
}
