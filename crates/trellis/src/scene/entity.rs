//! Positioned entities produced by the scene builder.

use trellis_core::{
    catalog::{EdgeStyle, ShapeSpec},
    document::Field,
    draw::GroupPalette,
    geometry::{Bounds, Point},
};

use crate::layout::{CardinalityMark, EdgePath};

/// Box drawn around a group's resolvable members.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    pub(super) id: Option<String>,
    pub(super) bounds: Bounds,
    pub(super) label: Option<String>,
    pub(super) palette: GroupPalette,
}

impl GroupBox {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Outline of the group, including the reserved label strip.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Baseline start of the group label, inside the top-left corner.
    pub fn label_position(&self) -> Point {
        self.bounds.min_point().add_point(Point::new(16.0, 20.0))
    }

    pub fn palette(&self) -> &GroupPalette {
        &self.palette
    }
}

/// A routed, styled edge between two resolved nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeEntity {
    pub(super) id: String,
    pub(super) edge_type: String,
    pub(super) source: String,
    pub(super) target: String,
    pub(super) path: EdgePath,
    pub(super) style: EdgeStyle,
    pub(super) marks: Option<[CardinalityMark; 2]>,
}

impl EdgeEntity {
    /// Edge id. Edges without an id in the document get `edge-<index>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn edge_type(&self) -> &str {
        &self.edge_type
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &EdgePath {
        &self.path
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// ER notation glyphs, for relation edge types only.
    pub fn marks(&self) -> Option<&[CardinalityMark; 2]> {
        self.marks.as_ref()
    }
}

/// A node shape at its document position.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub(super) id: String,
    pub(super) node_type: String,
    pub(super) bounds: Bounds,
    pub(super) spec: ShapeSpec,
    pub(super) label: String,
    pub(super) sublabel: Option<String>,
    pub(super) fields: Vec<Field>,
    pub(super) clickable: bool,
}

impl NodeBox {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn spec(&self) -> &ShapeSpec {
        &self.spec
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sublabel(&self) -> Option<&str> {
        self.sublabel.as_deref()
    }

    /// Entity field rows; empty for every other shape.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether the node carries a wireframe payload.
    pub fn is_clickable(&self) -> bool {
        self.clickable
    }
}

/// Text placed in the label layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Boxed label at the middle of an edge.
    Edge {
        edge_id: String,
        bounds: Bounds,
        text: String,
        /// Text baseline center.
        anchor: Point,
    },
    /// Fixed-size note box.
    Annotation { bounds: Bounds, text: String },
}

impl Label {
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Edge { bounds, .. } | Self::Annotation { bounds, .. } => *bounds,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Edge { text, .. } | Self::Annotation { text, .. } => text,
        }
    }
}

/// Everything a renderer draws for one document, layer by layer.
///
/// Each layer keeps document order. Layers are drawn bottom to top:
/// groups, edges, nodes, labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub(super) bounds: Bounds,
    pub(super) groups: Vec<GroupBox>,
    pub(super) edges: Vec<EdgeEntity>,
    pub(super) nodes: Vec<NodeBox>,
    pub(super) labels: Vec<Label>,
}

impl Scene {
    /// Canvas extent; becomes the SVG `viewBox`.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn groups(&self) -> &[GroupBox] {
        &self.groups
    }

    pub fn edges(&self) -> &[EdgeEntity] {
        &self.edges
    }

    pub fn nodes(&self) -> &[NodeBox] {
        &self.nodes
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn node(&self, id: &str) -> Option<&NodeBox> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeEntity> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// First edge going from `source` to `target`. Direction matters.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&EdgeEntity> {
        self.edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
    }

    pub fn entity_count(&self) -> usize {
        self.groups.len() + self.edges.len() + self.nodes.len() + self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }
}
