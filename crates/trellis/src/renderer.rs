//! The public rendering API.
//!
//! A [`Renderer`] owns one document, one [`DrawingSurface`] and the
//! bookkeeping that links document ids to surface elements. Its lifecycle is
//! `Unloaded → Loaded → Rendered`: [`load`](Renderer::load) swaps the
//! document without touching the current drawing, [`render`](Renderer::render)
//! rebuilds the drawing from scratch.

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use serde::Serialize;

use trellis_core::{
    catalog::{EdgeStyleCatalog, ShapeCatalog, Symbol},
    color::Color,
    document::DiagramDocument,
    draw::{
        ENTITY_HEADER_HEIGHT, Paint, PathData, Primitive, RenderLayer, ShapeKind, ShapePart,
        StrokeDefinition, Theme,
    },
    geometry::{Bounds, Point},
};

use crate::{
    config::{AppConfig, RenderOptions},
    error::TrellisError,
    event::{DiagramEvent, EventEmitter, EventKind},
    export::SvgSurface,
    layout::{self, CardinalityMark},
    loader::DiagramSource,
    scene::{EdgeEntity, GroupBox, Label, NodeBox, Scene, SceneBuilder},
    surface::{DrawingSurface, ElementId, Interaction, Parent, Transform},
};

/// Class of every node group.
pub const NODE_CLASS: &str = "wf-diagram-node";
/// Class of every edge path.
pub const EDGE_CLASS: &str = "wf-diagram-edge";
/// Class toggled by [`Renderer::highlight_node`].
pub const NODE_HIGHLIGHT_CLASS: &str = "wf-diagram-node--highlighted";
/// Class toggled by [`Renderer::highlight_path`] on edges.
pub const EDGE_HIGHLIGHT_CLASS: &str = "wf-diagram-edge--highlighted";
/// Stroke width of an edge under the pointer.
pub const HOVER_STROKE_WIDTH: f32 = 3.0;

const FIELD_ROW_HEIGHT: f32 = 25.0;
const FIELD_INSET: f32 = 10.0;
const ANNOTATION_LINE_HEIGHT: f32 = 18.0;
const GROUP_CORNER_RADIUS: f32 = 8.0;
const LABEL_CORNER_RADIUS: f32 = 4.0;

/// Where a renderer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    /// No document yet.
    Unloaded,
    /// A document is loaded; the surface may still show a previous render.
    Loaded,
    /// The surface shows the loaded document.
    Rendered,
}

/// Summary of the loaded document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramInfo {
    id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    description: Option<String>,
    version: Option<String>,
    node_count: usize,
    edge_count: usize,
}

impl DiagramInfo {
    fn from_document(document: &DiagramDocument) -> Self {
        Self {
            id: document.id().map(str::to_string),
            kind: document.kind().map(str::to_string),
            title: document.title().map(str::to_string),
            description: document.description().map(str::to_string),
            version: document.version().map(str::to_string),
            node_count: document.nodes().len(),
            edge_count: document.edges().len(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

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

    /// Number of nodes in the document, including ones that were skipped.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// Loads diagram documents and draws them onto a [`DrawingSurface`].
///
/// # Examples
///
/// ```
/// use trellis::{Renderer, RendererState, config::RenderOptions};
/// use trellis_core::document::{DiagramDocument, Edge, Node};
/// use trellis_core::geometry::Point;
///
/// let document = DiagramDocument::new()
///     .with_node(Node::new("A", "start").with_label("Start"))
///     .with_node(Node::new("B", "action").with_position(Point::new(200.0, 0.0)))
///     .with_edge(Edge::new("e1", "A", "B"));
///
/// let mut renderer = Renderer::new(RenderOptions::default());
/// assert!(renderer.export_svg().is_none());
///
/// renderer.load(document)?.render();
/// assert_eq!(renderer.state(), RendererState::Rendered);
///
/// let svg = renderer.export_svg().unwrap();
/// assert!(svg.contains(r#"data-edge-id="e1""#));
/// # Ok::<(), trellis::TrellisError>(())
/// ```
#[derive(Debug)]
pub struct Renderer<S: DrawingSurface = SvgSurface> {
    surface: S,
    options: RenderOptions,
    shapes: ShapeCatalog,
    edge_styles: EdgeStyleCatalog,
    theme: Theme,
    document: Option<Rc<DiagramDocument>>,
    scene: Option<Scene>,
    node_elements: IndexMap<String, ElementId>,
    edge_elements: IndexMap<String, ElementId>,
    events: EventEmitter,
    state: RendererState,
}

impl Renderer<SvgSurface> {
    /// Creates a renderer drawing onto an in-memory SVG surface.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_surface(SvgSurface::new(), options)
    }

    /// Creates an SVG renderer with catalogs and theme taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] for invalid colors or edge overrides.
    pub fn from_config(config: &AppConfig) -> Result<Self, TrellisError> {
        Ok(Self::new(config.render.clone())
            .with_shapes(config.shape_catalog())
            .with_edge_styles(config.edge_catalog()?)
            .with_theme(config.theme()?))
    }
}

impl<S: DrawingSurface> Renderer<S> {
    pub fn with_surface(surface: S, options: RenderOptions) -> Self {
        Self {
            surface,
            options,
            shapes: ShapeCatalog::default(),
            edge_styles: EdgeStyleCatalog::default(),
            theme: Theme::default(),
            document: None,
            scene: None,
            node_elements: IndexMap::new(),
            edge_elements: IndexMap::new(),
            events: EventEmitter::default(),
            state: RendererState::Unloaded,
        }
    }

    pub fn with_shapes(mut self, shapes: ShapeCatalog) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn with_edge_styles(mut self, edge_styles: EdgeStyleCatalog) -> Self {
        self.edge_styles = edge_styles;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn document(&self) -> Option<&DiagramDocument> {
        self.document.as_deref()
    }

    /// The scene of the last render.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Subscribes `handler` to events of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&DiagramEvent) + 'static) {
        self.events.on(kind, handler);
    }

    /// Loads a document, replacing the current one.
    ///
    /// The surface keeps showing the previous render until the next
    /// [`render`](Self::render).
    ///
    /// # Errors
    ///
    /// Propagates read, transport and parse failures; the renderer is left
    /// exactly as it was.
    pub fn load(&mut self, source: impl Into<DiagramSource>) -> Result<&mut Self, TrellisError> {
        let source = source.into();
        info!(source = source.to_string(); "Loading diagram");

        let document = source.load()?;
        self.document = Some(Rc::new(document));
        self.state = RendererState::Loaded;
        Ok(self)
    }

    /// Rebuilds the drawing from the loaded document.
    ///
    /// Does nothing but log a warning when no document is loaded. Emits
    /// [`EventKind::Rendered`] on success.
    pub fn render(&mut self) -> &mut Self {
        let Some(document) = self.document.clone() else {
            warn!("No diagram loaded, nothing to render");
            return self;
        };

        let scene = SceneBuilder::new(&document, &self.shapes, &self.edge_styles)
            .with_canvas(self.options.minimum_size(), self.options.padding())
            .with_label_metrics(self.theme.label_metrics())
            .build();

        self.draw(&scene);
        info!(
            nodes = scene.nodes().len(),
            edges = scene.edges().len(),
            groups = scene.groups().len();
            "Diagram rendered"
        );

        self.scene = Some(scene);
        self.state = RendererState::Rendered;
        self.events.emit(&DiagramEvent::Rendered { diagram: document });
        self
    }

    /// Fits the view box to the drawn nodes.
    ///
    /// Only the view box changes; drawn entities are left alone. A document
    /// loaded since the last render is not considered.
    pub fn zoom_to_fit(&mut self) -> &mut Self {
        let Some(scene) = &self.scene else {
            warn!("Nothing rendered, cannot zoom to fit");
            return self;
        };

        let bounds = layout::diagram_bounds(
            scene.nodes().iter().map(NodeBox::bounds),
            self.options.minimum_size(),
            self.options.padding(),
        );
        debug!(width = bounds.width(), height = bounds.height(); "Zoomed to fit");
        self.surface.set_view_box(bounds);
        self
    }

    /// Toggles the highlight of one node. Returns `false` if the node is not drawn.
    pub fn highlight_node(&mut self, id: &str, on: bool) -> bool {
        match self.node_elements.get(id) {
            Some(element) => {
                self.surface.set_class(*element, NODE_HIGHLIGHT_CLASS, on);
                true
            }
            None => {
                debug!(node_id = id; "Cannot highlight unknown node");
                false
            }
        }
    }

    /// Toggles the highlight of every listed node and of each edge going from
    /// one listed node to the next.
    ///
    /// Edges are matched by direction only; missing edges are skipped.
    pub fn highlight_path<I>(&mut self, ids: &[I], on: bool)
    where
        I: AsRef<str>,
    {
        for id in ids {
            self.highlight_node(id.as_ref(), on);
        }

        let Some(scene) = &self.scene else {
            return;
        };
        for pair in ids.windows(2) {
            let (source, target) = (pair[0].as_ref(), pair[1].as_ref());
            let Some(edge) = scene.edge_between(source, target) else {
                trace!(source, target; "No edge on highlighted path");
                continue;
            };
            if let Some(element) = self.edge_elements.get(edge.id()) {
                self.surface.set_class(*element, EDGE_HIGHLIGHT_CLASS, on);
            }
        }
    }

    pub fn is_node_highlighted(&self, id: &str) -> bool {
        self.node_elements
            .get(id)
            .is_some_and(|element| self.surface.has_class(*element, NODE_HIGHLIGHT_CLASS))
    }

    pub fn is_edge_highlighted(&self, id: &str) -> bool {
        self.edge_elements
            .get(id)
            .is_some_and(|element| self.surface.has_class(*element, EDGE_HIGHLIGHT_CLASS))
    }

    /// Ids of highlighted nodes, in document order.
    pub fn highlighted_nodes(&self) -> Vec<&str> {
        self.node_elements
            .iter()
            .filter(|(_, element)| self.surface.has_class(**element, NODE_HIGHLIGHT_CLASS))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Ids of highlighted edges, in document order.
    pub fn highlighted_edges(&self) -> Vec<&str> {
        self.edge_elements
            .iter()
            .filter(|(_, element)| self.surface.has_class(**element, EDGE_HIGHLIGHT_CLASS))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Standalone markup of the current drawing, or `None` before the first render.
    pub fn export_svg(&self) -> Option<String> {
        self.scene.as_ref()?;
        self.surface.to_markup()
    }

    /// Summary of the loaded document, or `None` when nothing is loaded.
    pub fn info(&self) -> Option<DiagramInfo> {
        self.document
            .as_deref()
            .map(DiagramInfo::from_document)
    }

    /// Delivers a click on a node.
    ///
    /// Emits [`EventKind::NodeClick`] when the node carries a wireframe
    /// payload and returns whether an event was emitted.
    pub fn click_node(&mut self, id: &str) -> bool {
        if !self.receives(self.node_elements.get(id), Interaction::Click) {
            return false;
        }
        let Some(node) = self.document.as_ref().and_then(|document| document.node(id)) else {
            return false;
        };
        let Some(wireframe) = node.wireframe() else {
            trace!(node_id = id; "Clicked node has no wireframe");
            return false;
        };

        let event = DiagramEvent::NodeClick {
            node: node.clone(),
            wireframe: wireframe.clone(),
        };
        self.events.emit(&event);
        true
    }

    /// Delivers the pointer entering an edge; widens its stroke.
    pub fn pointer_enter_edge(&mut self, id: &str) {
        let element = self.edge_elements.get(id).copied();
        if let Some(element) = element.filter(|e| self.receives(Some(e), Interaction::PointerEnter)) {
            let width = HOVER_STROKE_WIDTH.to_string();
            self.surface.set_style(element, "stroke-width", Some(width.as_str()));
        }
    }

    /// Delivers the pointer leaving an edge; restores its stroke.
    pub fn pointer_leave_edge(&mut self, id: &str) {
        let element = self.edge_elements.get(id).copied();
        if let Some(element) = element.filter(|e| self.receives(Some(e), Interaction::PointerLeave)) {
            self.surface.set_style(element, "stroke-width", None);
        }
    }

    fn receives(&self, element: Option<&ElementId>, interaction: Interaction) -> bool {
        element.is_some_and(|element| self.surface.is_listening(*element, interaction))
    }

    fn draw(&mut self, scene: &Scene) {
        self.surface.clear();
        self.node_elements.clear();
        self.edge_elements.clear();

        self.surface.set_view_box(scene.bounds());
        self.surface.set_canvas_size(
            (!self.options.auto_size()).then(|| scene.bounds().to_size()),
        );
        self.surface.set_background(self.theme.background());
        self.surface
            .set_stylesheet(&highlight_stylesheet(self.theme.highlight()));
        for arrowhead in self.edge_styles.arrowheads() {
            self.surface.define_marker(arrowhead);
        }

        for group in scene.groups() {
            self.draw_group(group);
        }
        for edge in scene.edges() {
            self.draw_edge(edge);
        }
        for node in scene.nodes() {
            self.draw_node(node);
        }
        for label in scene.labels() {
            self.draw_label(label);
        }
        debug!(elements = self.node_elements.len() + self.edge_elements.len(); "Scene drawn");
    }

    fn draw_group(&mut self, group: &GroupBox) {
        let palette = group.palette();
        let element = self
            .surface
            .create_group(Parent::Layer(RenderLayer::Groups), None);
        self.surface.set_class(element, "wf-diagram-group", true);
        self.surface
            .set_class(element, &format!("wf-diagram-group--{}", palette.name()), true);
        if let Some(id) = group.id() {
            self.surface.set_attribute(element, "data-group-id", id);
        }

        self.surface.create_shape(
            Parent::Element(element),
            &ShapePart::new(
                Primitive::Rect {
                    bounds: group.bounds(),
                    corner_radius: GROUP_CORNER_RADIUS,
                },
                Paint::filled(palette.fill(), palette.stroke().clone()),
            ),
        );
        if let Some(label) = group.label() {
            self.surface.create_text(
                Parent::Element(element),
                group.label_position(),
                label,
                &self.theme.group_label().clone().with_color(palette.label()),
            );
        }
    }

    fn draw_edge(&mut self, edge: &EdgeEntity) {
        let style = edge.style();
        let parent = match edge.marks() {
            Some(_) => {
                let group = self
                    .surface
                    .create_group(Parent::Layer(RenderLayer::Edges), None);
                self.surface.set_class(group, "wf-diagram-relationship", true);
                Parent::Element(group)
            }
            None => Parent::Layer(RenderLayer::Edges),
        };

        let path = self.surface.create_shape(
            parent,
            &ShapePart::new(
                Primitive::Path {
                    data: edge.path().to_path_data(),
                },
                Paint::outline(style.stroke().clone()),
            ),
        );
        self.surface.set_class(path, EDGE_CLASS, true);
        self.surface
            .set_class(path, &format!("{EDGE_CLASS}--{}", edge.edge_type()), true);
        self.surface.set_attribute(path, "data-edge-id", edge.id());
        self.surface.set_attribute(path, "data-source", edge.source());
        self.surface.set_attribute(path, "data-target", edge.target());
        if let Some(arrowhead) = style.arrowhead() {
            self.surface
                .set_attribute(path, "marker-end", &format!("url(#{arrowhead})"));
        }
        if self.options.interactive() {
            self.surface.listen(path, Interaction::PointerEnter);
            self.surface.listen(path, Interaction::PointerLeave);
        }

        if let (Some(marks), Parent::Element(group)) = (edge.marks(), parent) {
            for mark in marks {
                self.draw_cardinality(group, mark);
            }
        }
        self.edge_elements.insert(edge.id().to_string(), path);
    }

    fn draw_cardinality(&mut self, parent: ElementId, mark: &CardinalityMark) {
        let group = self.surface.create_group(
            Parent::Element(parent),
            Some(Transform::translate(mark.position()).with_rotation(mark.angle())),
        );
        let primitive = match mark.symbol() {
            Symbol::One => Primitive::Line {
                from: Point::new(0.0, -8.0),
                to: Point::new(0.0, 8.0),
            },
            Symbol::Many => Primitive::Path {
                data: PathData::new()
                    .move_to(Point::new(10.0, -8.0))
                    .line_to(Point::new(0.0, 0.0))
                    .line_to(Point::new(10.0, 8.0)),
            },
        };
        self.surface.create_shape(
            Parent::Element(group),
            &ShapePart::new(primitive, Paint::outline(self.theme.cardinality().clone())),
        );
    }

    fn draw_node(&mut self, node: &NodeBox) {
        let spec = node.spec();
        let size = spec.size();
        let element = self.surface.create_group(
            Parent::Layer(RenderLayer::Nodes),
            Some(Transform::translate(node.bounds().min_point())),
        );
        self.surface.set_class(element, NODE_CLASS, true);
        self.surface
            .set_class(element, &format!("{NODE_CLASS}--{}", node.node_type()), true);
        self.surface.set_attribute(element, "data-node-id", node.id());

        for part in spec.kind().outline(size, spec.fill(), &spec.border_stroke()) {
            self.surface.create_shape(Parent::Element(element), &part);
        }

        let anchor = spec.kind().label_anchor(size);
        let label_style = self.theme.node_label().clone().with_color(spec.text_color());
        match node.sublabel() {
            Some(sublabel) => {
                self.surface.create_text(
                    Parent::Element(element),
                    anchor.add_point(Point::new(0.0, -8.0)),
                    node.label(),
                    &label_style,
                );
                self.surface.create_text(
                    Parent::Element(element),
                    anchor.add_point(Point::new(0.0, 12.0)),
                    sublabel,
                    self.theme.sublabel(),
                );
            }
            None if !node.label().is_empty() => {
                self.surface
                    .create_text(Parent::Element(element), anchor, node.label(), &label_style);
            }
            None => {}
        }

        if spec.kind() == ShapeKind::Entity {
            self.draw_fields(element, node);
        }

        if self.options.interactive() {
            self.surface.listen(element, Interaction::Click);
            if node.is_clickable() {
                self.surface
                    .set_class(element, &format!("{NODE_CLASS}--clickable"), true);
                self.surface.set_style(element, "cursor", Some("pointer"));
            }
        }
        self.node_elements
            .entry(node.id().to_string())
            .or_insert(element);
    }

    fn draw_fields(&mut self, parent: ElementId, node: &NodeBox) {
        let width = node.spec().size().width();
        for (row, field) in node.fields().iter().enumerate() {
            let baseline = ENTITY_HEADER_HEIGHT + FIELD_INSET + row as f32 * FIELD_ROW_HEIGHT + 15.0;
            let prefix = match (field.is_primary_key(), field.is_foreign_key()) {
                (true, _) => "PK ",
                (false, true) => "FK ",
                (false, false) => "",
            };

            let mut name_style = self.theme.field_name().clone();
            if field.is_primary_key() {
                name_style = name_style.with_font_weight(600);
            }
            self.surface.create_text(
                Parent::Element(parent),
                Point::new(FIELD_INSET, baseline),
                &format!("{prefix}{}", field.name()),
                &name_style,
            );
            self.surface.create_text(
                Parent::Element(parent),
                Point::new(width - FIELD_INSET, baseline),
                field.field_type(),
                self.theme.field_type(),
            );
        }
    }

    fn draw_label(&mut self, label: &Label) {
        match label {
            Label::Edge {
                edge_id,
                bounds,
                text,
                anchor,
            } => {
                let group = self
                    .surface
                    .create_group(Parent::Layer(RenderLayer::Labels), None);
                self.surface.set_class(group, "wf-diagram-edge-label", true);
                self.surface.set_attribute(group, "data-edge-id", edge_id);
                self.label_box(
                    group,
                    *bounds,
                    self.theme.edge_label_fill(),
                    self.theme.edge_label_border().clone(),
                );
                self.surface.create_text(
                    Parent::Element(group),
                    *anchor,
                    text,
                    self.theme.edge_label(),
                );
            }
            Label::Annotation { bounds, text } => {
                let group = self
                    .surface
                    .create_group(Parent::Layer(RenderLayer::Labels), None);
                self.surface.set_class(group, "wf-diagram-annotation", true);
                self.label_box(
                    group,
                    *bounds,
                    self.theme.annotation_fill(),
                    self.theme.annotation_border().clone(),
                );
                let origin = bounds.min_point().add_point(Point::new(FIELD_INSET, 24.0));
                for (line_number, line) in text.lines().enumerate() {
                    self.surface.create_text(
                        Parent::Element(group),
                        origin.add_point(Point::new(0.0, line_number as f32 * ANNOTATION_LINE_HEIGHT)),
                        line,
                        self.theme.annotation(),
                    );
                }
            }
        }
    }

    fn label_box(&mut self, parent: ElementId, bounds: Bounds, fill: Color, border: StrokeDefinition) {
        self.surface.create_shape(
            Parent::Element(parent),
            &ShapePart::new(
                Primitive::Rect {
                    bounds,
                    corner_radius: LABEL_CORNER_RADIUS,
                },
                Paint::filled(fill, border),
            ),
        );
    }
}

fn highlight_stylesheet(color: Color) -> String {
    format!(
        ".{NODE_HIGHLIGHT_CLASS} > :not(text) {{ stroke: {color}; stroke-width: 4px; }}\n\
         .{EDGE_HIGHLIGHT_CLASS} {{ stroke: {color}; stroke-width: 3px; }}"
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;
    use trellis_core::{
        document::{Annotation, Edge, Field, Group, Node},
        geometry::Size,
    };

    use super::*;

    fn flow() -> DiagramDocument {
        DiagramDocument::new()
            .with_id("checkout")
            .with_kind("flowchart")
            .with_title("Checkout")
            .with_node(Node::new("A", "start").with_label("Start"))
            .with_node(
                Node::new("B", "page")
                    .with_label("Cart")
                    .with_position(Point::new(200.0, 0.0))
                    .with_metadata("wireframe", json!("cart.html")),
            )
            .with_node(
                Node::new("C", "action")
                    .with_label("Pay")
                    .with_sublabel("stripe")
                    .with_position(Point::new(400.0, 0.0)),
            )
            .with_edge(Edge::new("e1", "A", "B").with_label("begin"))
            .with_edge(Edge::new("e2", "B", "C").with_type("conditional"))
            .with_group(Group::new(["B", "C"]).with_label("Store").with_color("blue"))
            .with_annotation(Annotation::new(Point::new(0.0, 200.0), "first line\nsecond line"))
    }

    fn rendered(document: DiagramDocument) -> Renderer {
        let mut renderer = Renderer::new(RenderOptions::default());
        renderer.load(document).unwrap().render();
        renderer
    }

    #[test]
    fn test_initial_state() {
        let mut renderer = Renderer::new(RenderOptions::default());
        assert_eq!(renderer.state(), RendererState::Unloaded);
        assert!(renderer.info().is_none());
        assert!(renderer.export_svg().is_none());

        renderer.render();
        assert_eq!(renderer.state(), RendererState::Unloaded);
        assert!(renderer.scene().is_none());
    }

    #[test]
    fn test_load_then_render_states() {
        let mut renderer = Renderer::new(RenderOptions::default());
        renderer.load(flow()).unwrap();
        assert_eq!(renderer.state(), RendererState::Loaded);
        assert!(renderer.export_svg().is_none());

        renderer.render();
        assert_eq!(renderer.state(), RendererState::Rendered);
    }

    #[test]
    fn test_load_keeps_previous_drawing() {
        let mut renderer = rendered(flow());
        let before = renderer.export_svg().unwrap();

        renderer.load(DiagramDocument::new()).unwrap();
        assert_eq!(renderer.state(), RendererState::Loaded);
        assert_eq!(renderer.export_svg().unwrap(), before);
    }

    #[test]
    fn test_failed_load_leaves_renderer_untouched() {
        let mut renderer = rendered(flow());
        let before = renderer.export_svg().unwrap();

        let result = renderer
            .load(DiagramSource::Json("{ not json".to_string()))
            .map(|_| ());
        assert!(matches!(result, Err(TrellisError::Parse { .. })));
        assert_eq!(renderer.state(), RendererState::Rendered);
        assert_eq!(renderer.info().unwrap().title(), Some("Checkout"));
        assert_eq!(renderer.export_svg().unwrap(), before);
    }

    #[test]
    fn test_info() {
        let mut renderer = Renderer::new(RenderOptions::default());
        renderer.load(flow()).unwrap();
        let info = renderer.info().unwrap();

        assert_eq!(info.id(), Some("checkout"));
        assert_eq!(info.kind(), Some("flowchart"));
        assert_eq!(info.node_count(), 3);
        assert_eq!(info.edge_count(), 2);
        assert!(info.version().is_none());

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "flowchart");
        assert_eq!(json["nodeCount"], 3);
        assert_eq!(json["edgeCount"], 2);
    }

    #[test]
    fn test_markup_classes() {
        let svg = rendered(flow()).export_svg().unwrap();

        assert!(svg.contains("wf-diagram-node wf-diagram-node--start"));
        assert!(svg.contains("wf-diagram-edge wf-diagram-edge--conditional"));
        assert!(svg.contains("wf-diagram-group wf-diagram-group--blue"));
        assert!(svg.contains(r#"marker-end="url(#arrowhead)""#));
        assert!(svg.contains("wf-diagram-node--clickable"));
        assert!(svg.contains("stripe"));
        assert!(svg.contains("second line"));
    }

    #[test]
    fn test_render_emits_event_each_time() {
        let count = Rc::new(RefCell::new(0));
        let mut renderer = Renderer::new(RenderOptions::default());
        let seen = Rc::clone(&count);
        renderer.on(EventKind::Rendered, move |event| {
            assert!(matches!(event, DiagramEvent::Rendered { diagram } if diagram.title() == Some("Checkout")));
            *seen.borrow_mut() += 1;
        });

        renderer.render();
        assert_eq!(*count.borrow(), 0);

        renderer.load(flow()).unwrap().render().render();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_click_node_with_wireframe() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = rendered(flow());
        let seen = Rc::clone(&clicks);
        renderer.on(EventKind::NodeClick, move |event| {
            if let DiagramEvent::NodeClick { node, wireframe } = event {
                seen.borrow_mut().push((node.id().to_string(), wireframe.clone()));
            }
        });

        assert!(renderer.click_node("B"));
        assert!(!renderer.click_node("A"));
        assert!(!renderer.click_node("missing"));
        assert_eq!(*clicks.borrow(), [("B".to_string(), json!("cart.html"))]);
    }

    #[test]
    fn test_non_interactive_ignores_pointer() {
        let mut renderer = Renderer::new(RenderOptions::default().with_interactive(false));
        renderer.load(flow()).unwrap().render();

        assert!(!renderer.click_node("B"));
        renderer.pointer_enter_edge("e1");
        let path = renderer.edge_elements["e1"];
        assert_eq!(renderer.surface().style(path, "stroke-width"), None);
        assert!(!renderer.export_svg().unwrap().contains("data-interaction"));
    }

    #[test]
    fn test_edge_hover_is_transient() {
        let mut renderer = rendered(flow());

        let path = renderer.edge_elements["e1"];

        renderer.pointer_enter_edge("e1");
        assert_eq!(renderer.surface().style(path, "stroke-width"), Some("3"));
        assert!(renderer.export_svg().unwrap().contains(r#"style="stroke-width: 3""#));

        renderer.pointer_leave_edge("e1");
        assert_eq!(renderer.surface().style(path, "stroke-width"), None);
        assert_eq!(renderer.surface().style(renderer.edge_elements["e2"], "stroke-width"), None);
    }

    #[test]
    fn test_highlight_node_toggle() {
        let mut renderer = rendered(flow());

        assert!(renderer.highlight_node("A", true));
        assert!(renderer.is_node_highlighted("A"));
        assert!(
            renderer
                .export_svg()
                .unwrap()
                .contains("wf-diagram-node--start wf-diagram-node--highlighted")
        );

        assert!(renderer.highlight_node("A", false));
        assert!(!renderer.is_node_highlighted("A"));
        assert!(!renderer.highlight_node("nope", true));
    }

    #[test]
    fn test_highlight_path_direction_only() {
        let mut renderer = rendered(flow());

        renderer.highlight_path(&["C", "B", "A"], true);
        assert_eq!(renderer.highlighted_nodes(), ["A", "B", "C"]);
        assert!(renderer.highlighted_edges().is_empty());

        renderer.highlight_path(&["A", "B", "C"], true);
        assert_eq!(renderer.highlighted_edges(), ["e1", "e2"]);

        renderer.highlight_path(&["A", "B", "C"], false);
        assert!(renderer.highlighted_nodes().is_empty());
        assert!(renderer.highlighted_edges().is_empty());
    }

    #[test]
    fn test_render_clears_highlights() {
        let mut renderer = rendered(flow());
        renderer.highlight_node("A", true);
        renderer.render();
        assert!(!renderer.is_node_highlighted("A"));
    }

    #[test]
    fn test_zoom_to_fit_before_render() {
        let mut renderer = Renderer::new(RenderOptions::default());
        renderer.load(flow()).unwrap().zoom_to_fit();
        assert!(renderer.surface().view_box().is_none());
    }

    #[test]
    fn test_zoom_to_fit_keeps_entities() {
        let mut renderer = rendered(flow());
        let elements = renderer.surface().element_count();

        renderer.zoom_to_fit();
        assert_eq!(renderer.surface().element_count(), elements);
        assert_eq!(
            renderer.surface().view_box(),
            renderer.scene().map(Scene::bounds)
        );
    }

    #[test]
    fn test_zoom_to_fit_tracks_drawn_scene_not_pending_load() {
        let mut renderer = rendered(flow());
        let drawn = renderer.scene().map(Scene::bounds);

        let moved = DiagramDocument::new()
            .with_node(Node::new("Z", "action").with_position(Point::new(5000.0, 4000.0)));
        renderer.load(moved).unwrap().zoom_to_fit();

        assert_eq!(renderer.state(), RendererState::Loaded);
        assert_eq!(renderer.surface().view_box(), drawn);
    }

    #[test]
    fn test_fixed_canvas_size() {
        let options = RenderOptions::default()
            .with_minimum_size(Size::new(640.0, 480.0))
            .with_auto_size(false);

        let mut renderer = Renderer::new(options.clone());
        renderer.load(flow()).unwrap().render();
        let svg = renderer.export_svg().unwrap();
        assert!(svg.contains(r#"width="640""#));
        assert!(svg.contains(r#"height="480""#));

        let wide = flow().with_node(Node::new("far", "action").with_position(Point::new(3000.0, 0.0)));
        let mut renderer = Renderer::new(options);
        renderer.load(wide).unwrap().render();

        let size = renderer.scene().unwrap().bounds().to_size();
        assert!(size.width() > 3000.0);
        let svg = renderer.export_svg().unwrap();
        assert!(svg.contains(&format!(r#"width="{}""#, size.width())), "{svg}");
        assert!(!svg.contains(r#"width="640""#), "{svg}");
    }

    #[test]
    fn test_entity_fields_drawn() {
        let document = DiagramDocument::new().with_node(
            Node::new("users", "entity")
                .with_label("users")
                .with_field(Field::new("id", "uuid").primary_key())
                .with_field(Field::new("org_id", "uuid").foreign_key())
                .with_field(Field::new("email", "text")),
        );
        let svg = rendered(document).export_svg().unwrap();

        assert!(svg.contains("PK id"));
        assert!(svg.contains("FK org_id"));
        assert!(svg.contains("\nemail\n"), "{svg}");
        assert!(svg.contains(r#"text-anchor="end""#));
    }

    #[test]
    fn test_relation_marks_drawn() {
        let document = DiagramDocument::new()
            .with_node(Node::new("users", "entity"))
            .with_node(Node::new("orders", "entity").with_position(Point::new(400.0, 0.0)))
            .with_edge(Edge::new("r1", "users", "orders").with_type("one-to-many"));
        let svg = rendered(document).export_svg().unwrap();

        assert!(svg.contains("wf-diagram-relationship"));
        assert!(svg.contains(r#"d="M 10 -8 L 0 0 L 10 8""#));
        assert!(svg.contains(r#"transform="translate(200, 50)""#));
    }
}
