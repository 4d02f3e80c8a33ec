//! The diagram document model.
//!
//! A [`DiagramDocument`] is the JSON description a renderer consumes: nodes
//! with positions, directed edges between node ids, optional groups and free
//! text annotations. Every collection and every metadata string is optional,
//! and unknown JSON fields are ignored.
//!
//! The document is immutable once parsed. Dangling references (an edge or a
//! group naming a node id that does not exist) are not rejected here; they are
//! skipped later, one entity at a time, when the scene is built.
//!
//! ```
//! # use trellis_core::document::DiagramDocument;
//! let doc = DiagramDocument::from_json(r#"{
//!     "title": "Checkout",
//!     "nodes": [
//!         { "id": "A", "type": "start", "position": { "x": 0, "y": 0 } },
//!         { "id": "B", "type": "action", "label": "Pay" }
//!     ],
//!     "edges": [ { "id": "e1", "source": "A", "target": "B" } ]
//! }"#).unwrap();
//!
//! assert_eq!(doc.title(), Some("Checkout"));
//! assert_eq!(doc.nodes().len(), 2);
//! assert_eq!(doc.edges()[0].edge_type(), "flow");
//! ```

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{
    catalog::{DEFAULT_EDGE_TYPE, RoutingMode},
    geometry::Point,
};

/// Metadata key whose payload is surfaced on node click events.
pub const WIREFRAME_KEY: &str = "wireframe";

/// Root of a diagram description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    groups: Vec<Group>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
}

impl DiagramDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed JSON or for
    /// values of the wrong shape (e.g. a node without an `id`).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The document's `type` (`flowchart`, `er`, ...). Opaque to the engine.
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// A diagram vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    position: Point,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sublabel: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Point::default(),
            label: String::new(),
            sublabel: None,
            fields: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = Some(sublabel.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Catalog key of the node; empty when the document omits it.
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    /// Top-left corner in diagram space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sublabel(&self) -> Option<&str> {
        self.sublabel.as_deref()
    }

    /// Entity columns. Ignored for every shape except entities.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// The opaque `metadata.wireframe` payload, if present and not `null`.
    pub fn wireframe(&self) -> Option<&Value> {
        self.metadata
            .get(WIREFRAME_KEY)
            .filter(|value| !value.is_null())
    }
}

/// One column of an entity node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type", default)]
    field_type: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pk: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    fk: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            pk: false,
            fk: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.pk = true;
        self
    }

    pub fn foreign_key(mut self) -> Self {
        self.fk = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn is_primary_key(&self) -> bool {
        self.pk
    }

    pub fn is_foreign_key(&self) -> bool {
        self.fk
    }
}

/// A directed connection between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    id: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    target: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_routing",
        skip_serializing_if = "Option::is_none"
    )]
    routing: Option<RoutingMode>,
}

/// Unknown routing names fall back to the edge type's default.
fn lenient_routing<'de, D>(deserializer: D) -> Result<Option<RoutingMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| match name.parse() {
        Ok(mode) => Some(mode),
        Err(err) => {
            warn!(routing = name.as_str(); "{err}, using the edge type default");
            None
        }
    }))
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: None,
            label: None,
            routing: None,
        }
    }

    pub fn with_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_routing(mut self, routing: RoutingMode) -> Self {
        self.routing = Some(routing);
        self
    }

    /// Edge id; empty when the document omits it.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Source node id; empty when the document omits it.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Edge type, `flow` when absent.
    pub fn edge_type(&self) -> &str {
        self.edge_type.as_deref().unwrap_or(DEFAULT_EDGE_TYPE)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Per-edge routing override. `None` uses the edge type's default.
    pub fn routing(&self) -> Option<RoutingMode> {
        self.routing
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A labelled region drawn around a set of member nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    nodes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl Group {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Member node ids. Membership only; groups do not own nodes.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    /// Color hint: a palette name or any CSS color.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Free text anchored at a point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotation {
    position: Point,
    text: String,
}

impl Annotation {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
