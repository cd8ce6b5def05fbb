//! Layer tree model
//!
//! A document is a tree of [`Layer`] values. Leaves carry content and a
//! bounding box, groups carry ordered children. The first child of a group is
//! the top-most one.

use crate::domain::ids::LayerPath;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned bounding box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// True when the box is at most `threshold` pixels wide or high
    ///
    /// Non-finite edges count as empty.
    pub fn is_effectively_empty(&self, threshold: f64) -> bool {
        !(self.width() > threshold && self.height() > threshold)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Workflow color label attached to a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Gray,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Red => "red",
            ColorTag::Orange => "orange",
            ColorTag::Yellow => "yellow",
            ColorTag::Green => "green",
            ColorTag::Blue => "blue",
            ColorTag::Violet => "violet",
            ColorTag::Gray => "gray",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(ColorTag::Red),
            "orange" => Ok(ColorTag::Orange),
            "yellow" => Ok(ColorTag::Yellow),
            "green" => Ok(ColorTag::Green),
            "blue" => Ok(ColorTag::Blue),
            "violet" => Ok(ColorTag::Violet),
            "gray" | "grey" => Ok(ColorTag::Gray),
            other => Err(format!(
                "Invalid color tag '{other}'. Must be one of: red, orange, yellow, green, blue, violet, gray"
            )),
        }
    }
}

/// Reads a color tag without failing the whole document on a bad value
///
/// Unknown labels and `"none"` become `None`.
fn lenient_color_tag<'de, D>(deserializer: D) -> Result<Option<ColorTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        if value.trim().is_empty() || value.eq_ignore_ascii_case("none") {
            return None;
        }
        match value.parse() {
            Ok(tag) => Some(tag),
            Err(_) => {
                tracing::warn!(color_tag = %value, "Unknown color tag, treating as untagged");
                None
            }
        }
    }))
}

fn default_true() -> bool {
    true
}

/// A content layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafLayer {
    pub name: String,

    #[serde(default = "default_true")]
    pub visible: bool,

    /// Content bounds; `None` when the host could not determine them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    #[serde(
        default,
        deserialize_with = "lenient_color_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_tag: Option<ColorTag>,

    /// Solid RGBA fill, used by hosts that rasterize layers themselves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<[u8; 4]>,
}

impl LeafLayer {
    pub fn new(name: impl Into<String>, bounds: Option<Bounds>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            bounds,
            color_tag: None,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: [u8; 4]) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// A leaf without bounds is treated as empty
    pub fn is_effectively_empty(&self, threshold: f64) -> bool {
        self.bounds
            .map(|b| b.is_effectively_empty(threshold))
            .unwrap_or(true)
    }
}

/// A layer group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupLayer {
    pub name: String,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(
        default,
        deserialize_with = "lenient_color_tag",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_tag: Option<ColorTag>,

    /// Explicit frame, as carried by artboards; otherwise derived from content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,

    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl GroupLayer {
    pub fn new(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            color_tag: None,
            bounds: None,
            layers,
        }
    }

    pub fn with_color_tag(mut self, tag: ColorTag) -> Self {
        self.color_tag = Some(tag);
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// A node of the layer tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Leaf(LeafLayer),
    Group(GroupLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Leaf(leaf) => &leaf.name,
            Layer::Group(group) => &group.name,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Layer::Leaf(leaf) => leaf.visible,
            Layer::Group(group) => group.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Layer::Leaf(leaf) => leaf.visible = visible,
            Layer::Group(group) => group.visible = visible,
        }
    }

    pub fn color_tag(&self) -> Option<ColorTag> {
        match self {
            Layer::Leaf(leaf) => leaf.color_tag,
            Layer::Group(group) => group.color_tag,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Layer::Group(_))
    }

    /// Children of a group, empty for leaves
    pub fn children(&self) -> &[Layer] {
        match self {
            Layer::Group(group) => &group.layers,
            Layer::Leaf(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match self {
            Layer::Group(group) => Some(&mut group.layers),
            Layer::Leaf(_) => None,
        }
    }

    /// Bounding box of the layer's content
    ///
    /// Groups use their explicit frame when present, otherwise the union of
    /// every descendant leaf that has bounds, regardless of visibility.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Layer::Leaf(leaf) => leaf.bounds,
            Layer::Group(group) => group.bounds.or_else(|| {
                group
                    .layers
                    .iter()
                    .filter_map(Layer::bounds)
                    .reduce(|acc, b| acc.union(&b))
            }),
        }
    }

    /// Whether anything in this layer would render with the live visibility flags
    pub fn has_visible_content(&self, threshold: f64) -> bool {
        self.has_visible_content_by(&LayerPath::top(0), threshold, &|_: &LayerPath, layer: &Layer| {
            layer.visible()
        })
    }

    /// Visible-content check with an external source of visibility
    ///
    /// `path` is the path of `self`; `is_visible` is asked once per visited
    /// layer. A layer has visible content when it is visible and, for a leaf,
    /// is not effectively empty, or, for a group, some child has visible content.
    pub fn has_visible_content_by<F>(&self, path: &LayerPath, threshold: f64, is_visible: &F) -> bool
    where
        F: Fn(&LayerPath, &Layer) -> bool,
    {
        if !is_visible(path, self) {
            return false;
        }
        match self {
            Layer::Leaf(leaf) => !leaf.is_effectively_empty(threshold),
            Layer::Group(group) => group.layers.iter().enumerate().any(|(index, child)| {
                child.has_visible_content_by(&path.child(index), threshold, is_visible)
            }),
        }
    }
}

impl From<LeafLayer> for Layer {
    fn from(leaf: LeafLayer) -> Self {
        Layer::Leaf(leaf)
    }
}

impl From<GroupLayer> for Layer {
    fn from(group: GroupLayer) -> Self {
        Layer::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, w: f64, h: f64) -> Layer {
        LeafLayer::new(name, Some(Bounds::new(0.0, 0.0, w, h))).into()
    }

    #[test]
    fn test_bounds_threshold_is_inclusive() {
        assert!(Bounds::new(0.0, 0.0, 1.0, 50.0).is_effectively_empty(1.0));
        assert!(Bounds::new(0.0, 0.0, 50.0, 1.0).is_effectively_empty(1.0));
        assert!(!Bounds::new(0.0, 0.0, 1.5, 1.5).is_effectively_empty(1.0));
        assert!(Bounds::new(0.0, 0.0, f64::NAN, 10.0).is_effectively_empty(1.0));
    }

    #[test]
    fn test_leaf_without_bounds_is_empty() {
        let leaf = LeafLayer::new("ghost", None);
        assert!(leaf.is_effectively_empty(1.0));
    }

    #[test]
    fn test_group_content_requires_visible_nonempty_leaf() {
        let group: Layer = GroupLayer::new("g", vec![leaf("dot", 1.0, 1.0), leaf("big", 20.0, 20.0)]).into();
        assert!(group.has_visible_content(1.0));

        let group: Layer =
            GroupLayer::new("g", vec![leaf("dot", 1.0, 1.0), LeafLayer::new("big", Some(Bounds::new(0.0, 0.0, 20.0, 20.0))).hidden().into()]).into();
        assert!(!group.has_visible_content(1.0));
    }

    #[test]
    fn test_hidden_group_has_no_content() {
        let group: Layer = GroupLayer::new("g", vec![leaf("big", 20.0, 20.0)]).hidden().into();
        assert!(!group.has_visible_content(1.0));
    }

    #[test]
    fn test_nested_group_content() {
        let inner: Layer = GroupLayer::new("inner", vec![leaf("big", 20.0, 20.0)]).into();
        let outer: Layer = GroupLayer::new("outer", vec![inner]).into();
        assert!(outer.has_visible_content(1.0));
    }

    #[test]
    fn test_visibility_resolver_overrides_flags() {
        let group: Layer = GroupLayer::new("g", vec![leaf("big", 20.0, 20.0)]).hidden().into();
        let visible = group.has_visible_content_by(&LayerPath::top(0), 1.0, &|_, _| true);
        assert!(visible);
    }

    #[test]
    fn test_group_bounds_union_and_override() {
        let group = GroupLayer::new(
            "g",
            vec![
                LeafLayer::new("a", Some(Bounds::new(10.0, 10.0, 20.0, 20.0))).into(),
                LeafLayer::new("b", Some(Bounds::new(0.0, 15.0, 12.0, 40.0))).into(),
                LeafLayer::new("c", None).into(),
            ],
        );
        let layer: Layer = group.clone().into();
        assert_eq!(layer.bounds(), Some(Bounds::new(0.0, 10.0, 20.0, 40.0)));

        let framed: Layer = group.with_bounds(Bounds::new(0.0, 0.0, 100.0, 100.0)).into();
        assert_eq!(framed.bounds(), Some(Bounds::new(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_color_tag_parse() {
        assert_eq!("Red".parse::<ColorTag>().unwrap(), ColorTag::Red);
        assert_eq!("grey".parse::<ColorTag>().unwrap(), ColorTag::Gray);
        assert!("magenta".parse::<ColorTag>().is_err());
    }

    #[test]
    fn test_unknown_color_tag_deserializes_as_none() {
        let json = r#"{"kind": "group", "name": "g", "color_tag": "magenta", "layers": []}"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.color_tag(), None);

        let json = r#"{"kind": "group", "name": "g", "color_tag": "red"}"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.color_tag(), Some(ColorTag::Red));
        assert!(layer.visible());
    }
}
