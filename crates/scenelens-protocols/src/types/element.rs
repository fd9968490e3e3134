//! Semantic elements and their resolved form.

use serde::{Deserialize, Serialize, Serializer};

use super::{Bounds, ElementId, GraphKey, Point};

/// A tagged UI element registered by application code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticElement {
    pub id: ElementId,

    /// `button`, `text_field`, `menu_item`, ...
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub clickable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Paint order, higher is on top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,

    /// Bounds in the owning sub-graph's coordinate space.
    pub local_bounds: Bounds,

    pub owning_graph: GraphKey,

    /// Registration clock value; later registrations win ties.
    pub registered_at: u64,
}

impl SemanticElement {
    pub fn new(
        id: impl Into<ElementId>,
        kind: impl Into<String>,
        local_bounds: Bounds,
        owning_graph: impl Into<GraphKey>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            clickable: false,
            label: None,
            role: None,
            description: None,
            z_index: None,
            local_bounds,
            owning_graph: owning_graph.into(),
            registered_at: 0,
        }
    }

    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn registered_at(mut self, timestamp: u64) -> Self {
        self.registered_at = timestamp;
        self
    }
}

/// A semantic element placed in absolute viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement {
    pub element: SemanticElement,
    pub absolute_bounds: Bounds,
    /// `None` when the bounds cannot produce a center.
    pub absolute_center: Option<Point>,
    /// Set when an ancestor scales or rotates, or the offset is a fallback.
    pub position_approximate: bool,
}

impl ResolvedElement {
    pub fn id(&self) -> &ElementId {
        &self.element.id
    }
}

#[derive(Serialize)]
struct WireElement<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    bounds: &'a Bounds,
    center: Option<&'a Point>,
    clickable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    z_index: Option<i32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    position_approximate: bool,
}

/// Serializes to the wire element shape: absolute `bounds` and `center`.
impl Serialize for ResolvedElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let el = &self.element;
        WireElement {
            id: el.id.as_str(),
            kind: &el.kind,
            bounds: &self.absolute_bounds,
            center: self.absolute_center.as_ref(),
            clickable: el.clickable,
            label: el.label.as_deref(),
            role: el.role.as_deref(),
            description: el.description.as_deref(),
            z_index: el.z_index,
            position_approximate: self.position_approximate,
        }
        .serialize(serializer)
    }
}
