//! Document to scene composition.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace, warn};

use trellis_core::{
    catalog::{EdgeStyleCatalog, ShapeCatalog},
    document::{DiagramDocument, Edge, Group, Node},
    draw::{GroupPalette, LabelMetrics, ShapeKind},
    geometry::{Bounds, Point, Size},
};

use super::entity::{EdgeEntity, GroupBox, Label, NodeBox, Scene};
use crate::layout::{self, GROUP_LABEL_HEIGHT, GROUP_PADDING};

/// Size of every annotation box.
pub const ANNOTATION_SIZE: Size = Size::new(200.0, 100.0);

/// Distance from an edge label's center to its text baseline.
const EDGE_LABEL_BASELINE: f32 = 4.0;

/// Progress of a [`SceneBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Nothing computed yet.
    Empty,
    /// Canvas bounds computed, entities not yet composed.
    Bounding,
    /// Scene complete.
    Composed,
}

/// Owned index from node id to document position.
///
/// Duplicate ids keep their first occurrence for lookups; every node is still
/// drawn and measured.
#[derive(Debug)]
struct NodeIndex<'a> {
    by_id: IndexMap<&'a str, &'a Node>,
}

impl<'a> NodeIndex<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        let mut by_id = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            match by_id.entry(node.id()) {
                Entry::Vacant(entry) => {
                    entry.insert(node);
                }
                Entry::Occupied(_) => {
                    warn!(node_id = node.id(); "Duplicate node id, references resolve to the first occurrence");
                }
            }
        }
        Self { by_id }
    }

    fn get(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }
}

/// Turns a [`DiagramDocument`] into a [`Scene`].
///
/// The builder is a small state machine: [`BuildPhase::Empty`] until
/// [`build`](Self::build) runs, [`BuildPhase::Bounding`] while the canvas is
/// measured and [`BuildPhase::Composed`] once every entity is placed. Entities
/// referencing unknown nodes are skipped with a warning; nothing here fails.
///
/// # Examples
///
/// ```
/// # use trellis::scene::{BuildPhase, SceneBuilder};
/// # use trellis_core::catalog::{EdgeStyleCatalog, ShapeCatalog};
/// # use trellis_core::document::{DiagramDocument, Edge, Node};
/// # use trellis_core::geometry::Point;
/// let doc = DiagramDocument::new()
///     .with_node(Node::new("A", "start"))
///     .with_node(Node::new("B", "end").with_position(Point::new(300.0, 0.0)))
///     .with_edge(Edge::new("e1", "A", "B"))
///     .with_edge(Edge::new("e2", "A", "missing"));
///
/// let shapes = ShapeCatalog::default();
/// let edges = EdgeStyleCatalog::default();
/// let mut builder = SceneBuilder::new(&doc, &shapes, &edges);
/// assert_eq!(builder.phase(), BuildPhase::Empty);
///
/// let scene = builder.build();
/// assert_eq!(builder.phase(), BuildPhase::Composed);
/// assert_eq!(scene.nodes().len(), 2);
/// assert_eq!(scene.edges().len(), 1);
/// ```
#[derive(Debug)]
pub struct SceneBuilder<'a> {
    document: &'a DiagramDocument,
    shapes: &'a ShapeCatalog,
    edge_styles: &'a EdgeStyleCatalog,
    label_metrics: LabelMetrics,
    minimum: Size,
    padding: f32,
    phase: BuildPhase,
}

impl<'a> SceneBuilder<'a> {
    /// Creates a builder with a 1200x800 minimum canvas and 50 units of padding.
    pub fn new(
        document: &'a DiagramDocument,
        shapes: &'a ShapeCatalog,
        edge_styles: &'a EdgeStyleCatalog,
    ) -> Self {
        Self {
            document,
            shapes,
            edge_styles,
            label_metrics: LabelMetrics::default(),
            minimum: Size::new(1200.0, 800.0),
            padding: 50.0,
            phase: BuildPhase::Empty,
        }
    }

    /// Sets the minimum canvas size and the padding around the content.
    pub fn with_canvas(mut self, minimum: Size, padding: f32) -> Self {
        self.minimum = minimum;
        self.padding = padding;
        self
    }

    /// Sets the heuristic used to size edge label boxes.
    pub fn with_label_metrics(mut self, metrics: LabelMetrics) -> Self {
        self.label_metrics = metrics;
        self
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    /// Canvas extent of the document's nodes.
    pub fn bounds(&self) -> Bounds {
        layout::diagram_bounds(
            self.document
                .nodes()
                .iter()
                .map(|node| layout::node_bounds(self.shapes, node)),
            self.minimum,
            self.padding,
        )
    }

    /// Builds the scene from scratch.
    ///
    /// Calling it again yields an identical scene.
    pub fn build(&mut self) -> Scene {
        self.phase = BuildPhase::Empty;
        let index = NodeIndex::new(self.document.nodes());

        self.phase = BuildPhase::Bounding;
        let bounds = self.bounds();
        debug!(
            min_x = bounds.min_x(),
            min_y = bounds.min_y(),
            width = bounds.width(),
            height = bounds.height();
            "Diagram bounds computed"
        );

        let groups = self.compose_groups(&index);
        let (edges, mut labels) = self.compose_edges(&index);
        let nodes = self.compose_nodes();
        labels.extend(self.compose_annotations());

        self.phase = BuildPhase::Composed;
        debug!(
            groups = groups.len(),
            edges = edges.len(),
            nodes = nodes.len(),
            labels = labels.len();
            "Scene composed"
        );

        Scene {
            bounds,
            groups,
            edges,
            nodes,
            labels,
        }
    }

    fn compose_groups(&self, index: &NodeIndex<'_>) -> Vec<GroupBox> {
        self.document
            .groups()
            .iter()
            .filter_map(|group| self.compose_group(group, index))
            .collect()
    }

    fn compose_group(&self, group: &Group, index: &NodeIndex<'_>) -> Option<GroupBox> {
        let members = group
            .nodes()
            .iter()
            .filter_map(|id| index.get(id))
            .map(|node| layout::node_bounds(self.shapes, node));

        let Some(bounds) = layout::group_bounds(members, GROUP_PADDING, GROUP_LABEL_HEIGHT) else {
            warn!(
                group_id = group.id().unwrap_or_default(),
                members = group.nodes().len();
                "Group has no resolvable member nodes, skipping"
            );
            return None;
        };

        trace!(group_id = group.id().unwrap_or_default(); "Group composed");
        Some(GroupBox {
            id: group.id().map(str::to_string),
            bounds,
            label: group.label().map(str::to_string),
            palette: GroupPalette::from_hint(group.color()),
        })
    }

    fn compose_edges(&self, index: &NodeIndex<'_>) -> (Vec<EdgeEntity>, Vec<Label>) {
        let mut edges = Vec::with_capacity(self.document.edges().len());
        let mut labels = Vec::new();

        for (position, edge) in self.document.edges().iter().enumerate() {
            let (Some(source), Some(target)) = (index.get(edge.source()), index.get(edge.target()))
            else {
                warn!(
                    edge_id = edge.id(),
                    source = edge.source(),
                    target = edge.target();
                    "Edge references unknown node, skipping"
                );
                continue;
            };

            let entity = self.compose_edge(position, edge, source, target);
            if let Some(text) = edge.label() {
                labels.push(self.edge_label(&entity, text));
            }
            trace!(edge_id = entity.id(); "Edge composed");
            edges.push(entity);
        }

        (edges, labels)
    }

    fn compose_edge(&self, position: usize, edge: &Edge, source: &Node, target: &Node) -> EdgeEntity {
        let style = self.edge_styles.style_of(edge.edge_type()).clone();
        let source_center = layout::node_center(self.shapes, source);

        let path = if edge.is_self_loop() {
            layout::self_loop(source_center, layout::node_size(self.shapes, source))
        } else {
            let target_center = layout::node_center(self.shapes, target);
            let start = self.connection_point(source, source_center, target_center);
            let end = self.connection_point(target, target_center, source_center);
            layout::edge_path(start, end, edge.routing().unwrap_or(style.routing()))
        };

        let marks = match style.cardinality() {
            Some(kind) if !edge.is_self_loop() => layout::cardinality_marks(
                path.start(),
                path.end(),
                EdgeStyleCatalog::relationship_of(kind),
            ),
            _ => None,
        };

        let id = if edge.id().is_empty() {
            format!("edge-{position}")
        } else {
            edge.id().to_string()
        };

        EdgeEntity {
            id,
            edge_type: edge.edge_type().to_string(),
            source: source.id().to_string(),
            target: target.id().to_string(),
            path,
            style,
            marks,
        }
    }

    fn connection_point(&self, node: &Node, center: Point, toward: Point) -> Point {
        let spec = self.shapes.shape_of(node.node_type());
        layout::connection_point(center, toward, spec.size(), spec.kind())
    }

    fn edge_label(&self, edge: &EdgeEntity, text: &str) -> Label {
        let center = edge.path().midpoint();
        Label::Edge {
            edge_id: edge.id().to_string(),
            bounds: Bounds::new_from_center(center, self.label_metrics.estimate(text)),
            text: text.to_string(),
            anchor: center.add_point(Point::new(0.0, EDGE_LABEL_BASELINE)),
        }
    }

    fn compose_nodes(&self) -> Vec<NodeBox> {
        self.document
            .nodes()
            .iter()
            .map(|node| {
                let spec = self.shapes.shape_of(node.node_type()).clone();
                let fields = if spec.kind() == ShapeKind::Entity {
                    node.fields().to_vec()
                } else {
                    Vec::new()
                };

                NodeBox {
                    id: node.id().to_string(),
                    node_type: node.node_type().to_string(),
                    bounds: Bounds::new_from_top_left(node.position(), spec.size()),
                    spec,
                    label: node.label().to_string(),
                    sublabel: node.sublabel().map(str::to_string),
                    fields,
                    clickable: node.wireframe().is_some(),
                }
            })
            .collect()
    }

    fn compose_annotations(&self) -> impl Iterator<Item = Label> + '_ {
        self.document
            .annotations()
            .iter()
            .map(|annotation| Label::Annotation {
                bounds: Bounds::new_from_top_left(annotation.position(), ANNOTATION_SIZE),
                text: annotation.text().to_string(),
            })
    }
}
