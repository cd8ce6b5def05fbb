//! Document model
//!
//! A [`Document`] owns the layer tree plus the document-wide state the export
//! run temporarily changes: the crop box and the ruler unit.

use crate::domain::ids::LayerPath;
use crate::domain::layer::{Bounds, Layer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Measurement unit preference of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RulerUnits {
    #[default]
    Pixels,
    Inches,
    Centimeters,
    Millimeters,
    Points,
    Picas,
    Percent,
}

impl fmt::Display for RulerUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RulerUnits::Pixels => "pixels",
            RulerUnits::Inches => "inches",
            RulerUnits::Centimeters => "centimeters",
            RulerUnits::Millimeters => "millimeters",
            RulerUnits::Points => "points",
            RulerUnits::Picas => "picas",
            RulerUnits::Percent => "percent",
        };
        f.write_str(s)
    }
}

impl FromStr for RulerUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pixels" | "px" => Ok(RulerUnits::Pixels),
            "inches" | "in" => Ok(RulerUnits::Inches),
            "centimeters" | "cm" => Ok(RulerUnits::Centimeters),
            "millimeters" | "mm" => Ok(RulerUnits::Millimeters),
            "points" | "pt" => Ok(RulerUnits::Points),
            "picas" => Ok(RulerUnits::Picas),
            "percent" | "%" => Ok(RulerUnits::Percent),
            _ => Err(format!("Invalid ruler unit: {s}")),
        }
    }
}

/// An open layered document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,

    /// Folder the document was saved in; `None` for never-saved documents
    #[serde(skip)]
    pub folder: Option<PathBuf>,

    /// Current canvas region
    pub crop_box: Bounds,

    #[serde(default)]
    pub ruler_units: RulerUnits,

    /// Top-level layers, top-most first
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Document {
    pub fn new(name: impl Into<String>, crop_box: Bounds, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            folder: None,
            crop_box,
            ruler_units: RulerUnits::default(),
            layers,
        }
    }

    pub fn with_folder(mut self, folder: impl AsRef<Path>) -> Self {
        self.folder = Some(folder.as_ref().to_path_buf());
        self
    }

    /// Resolves a layer path
    pub fn layer(&self, path: &LayerPath) -> Option<&Layer> {
        let (first, rest) = path.indices().split_first()?;
        let mut current = self.layers.get(*first)?;
        for index in rest {
            current = current.children().get(*index)?;
        }
        Some(current)
    }

    /// Resolves a layer path for mutation
    pub fn layer_mut(&mut self, path: &LayerPath) -> Option<&mut Layer> {
        let (first, rest) = path.indices().split_first()?;
        let mut current = self.layers.get_mut(*first)?;
        for index in rest {
            current = current.children_mut()?.get_mut(*index)?;
        }
        Some(current)
    }

    /// Every layer in depth-first pre-order, with its path
    pub fn walk(&self) -> Vec<(LayerPath, &Layer)> {
        fn visit<'a>(layer: &'a Layer, path: LayerPath, out: &mut Vec<(LayerPath, &'a Layer)>) {
            let children = layer.children();
            out.push((path.clone(), layer));
            for (index, child) in children.iter().enumerate() {
                visit(child, path.child(index), out);
            }
        }

        let mut out = Vec::new();
        for (index, layer) in self.layers.iter().enumerate() {
            visit(layer, LayerPath::top(index), &mut out);
        }
        out
    }

    /// Visibility flag of every layer, in the order of [`Document::walk`]
    pub fn visibility_map(&self) -> Vec<(LayerPath, bool)> {
        self.walk()
            .into_iter()
            .map(|(path, layer)| (path, layer.visible()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layer::{GroupLayer, LeafLayer};

    fn sample() -> Document {
        let header = GroupLayer::new(
            "Header",
            vec![LeafLayer::new("logo", Some(Bounds::new(0.0, 0.0, 10.0, 10.0))).into()],
        );
        let footer = GroupLayer::new("Footer", vec![]).hidden();
        let home = GroupLayer::new("Home", vec![header.into(), footer.into()]);
        let background = LeafLayer::new("Background", Some(Bounds::new(0.0, 0.0, 100.0, 100.0)));
        Document::new(
            "site",
            Bounds::new(0.0, 0.0, 100.0, 100.0),
            vec![home.into(), background.into()],
        )
    }

    #[test]
    fn test_layer_lookup() {
        let doc = sample();
        assert_eq!(doc.layer(&LayerPath::top(0)).unwrap().name(), "Home");
        assert_eq!(
            doc.layer(&LayerPath::top(0).child(0).child(0)).unwrap().name(),
            "logo"
        );
        assert!(doc.layer(&LayerPath::top(0).child(7)).is_none());
        assert!(doc.layer(&LayerPath::top(1).child(0)).is_none());
    }

    #[test]
    fn test_layer_mut_toggles_visibility() {
        let mut doc = sample();
        let path = LayerPath::top(0).child(1);
        doc.layer_mut(&path).unwrap().set_visible(true);
        assert!(doc.layer(&path).unwrap().visible());
    }

    #[test]
    fn test_walk_is_preorder() {
        let doc = sample();
        let names: Vec<&str> = doc.walk().iter().map(|(_, l)| l.name()).collect();
        assert_eq!(names, vec!["Home", "Header", "logo", "Footer", "Background"]);
    }

    #[test]
    fn test_visibility_map_covers_every_layer_once() {
        let doc = sample();
        let map = doc.visibility_map();
        assert_eq!(map.len(), 5);
        let footer = map
            .iter()
            .find(|(p, _)| *p == LayerPath::top(0).child(1))
            .unwrap();
        assert!(!footer.1);
    }

    #[test]
    fn test_ruler_units_parse() {
        assert_eq!("px".parse::<RulerUnits>().unwrap(), RulerUnits::Pixels);
        assert_eq!("Inches".parse::<RulerUnits>().unwrap(), RulerUnits::Inches);
        assert!("furlongs".parse::<RulerUnits>().is_err());
    }
}
