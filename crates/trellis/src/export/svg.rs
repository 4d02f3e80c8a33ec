//! In-memory SVG drawing surface.

use indexmap::IndexMap;
use log::{debug, trace};
use svg::{Node, node::element as svg_element};

use trellis_core::{
    apply_stroke,
    catalog::Arrowhead,
    color::Color,
    draw::{LayeredOutput, Paint, Primitive, RenderLayer, ShapePart, SvgNode, TextDefinition},
    geometry::{Bounds, Point, Size},
};

use crate::surface::{DrawingSurface, ElementId, Interaction, Parent, Transform};

/// Class carried by the root `<svg>` element.
pub const ROOT_CLASS: &str = "wf-diagram-svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Group,
    Rect,
    Circle,
    Ellipse,
    Polygon,
    Line,
    Path,
    Text,
}

#[derive(Debug, Clone)]
struct Element {
    tag: Tag,
    content: Option<String>,
    paint: Option<Paint>,
    attributes: IndexMap<String, String>,
    classes: Vec<String>,
    styles: IndexMap<String, String>,
    interactions: Vec<Interaction>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            content: None,
            paint: None,
            attributes: IndexMap::new(),
            classes: Vec::new(),
            styles: IndexMap::new(),
            interactions: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_attribute(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

/// Fill and stroke attributes of `paint` applied to a typed SVG element.
macro_rules! apply_paint {
    ($element:expr, $paint:expr) => {{
        let paint: &Paint = $paint;
        let mut elem = match paint.fill() {
            Some(fill) => {
                let elem = $element.set("fill", fill.to_string());
                if fill.alpha() < 1.0 {
                    elem.set("fill-opacity", fill.alpha())
                } else {
                    elem
                }
            }
            None => $element.set("fill", "none"),
        };
        if let Some(stroke) = paint.stroke() {
            elem = apply_stroke!(elem, stroke);
        }
        elem
    }};
}

/// A [`DrawingSurface`] that keeps an element tree and serializes it as a
/// standalone SVG document.
///
/// # Examples
///
/// ```
/// # use trellis::export::SvgSurface;
/// # use trellis::surface::{DrawingSurface, Parent};
/// # use trellis_core::draw::{RenderLayer, TextDefinition};
/// # use trellis_core::geometry::{Bounds, Point, Size};
/// let mut surface = SvgSurface::new();
/// assert!(surface.to_markup().is_none());
///
/// surface.set_view_box(Bounds::new_from_top_left(Point::default(), Size::new(100.0, 50.0)));
/// surface.create_text(
///     Parent::Layer(RenderLayer::Labels),
///     Point::new(50.0, 25.0),
///     "hello",
///     &TextDefinition::new(),
/// );
///
/// let markup = surface.to_markup().unwrap();
/// assert!(markup.contains(r#"viewBox="0 0 100 50""#));
/// assert!(markup.contains("hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    elements: Vec<Element>,
    roots: Vec<(RenderLayer, ElementId)>,
    markers: IndexMap<String, Color>,
    view_box: Option<Bounds>,
    canvas_size: Option<Size>,
    background: Option<Color>,
    stylesheet: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements created since the last clear.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Top-level elements of `layer`, in creation order.
    pub fn layer_elements(&self, layer: RenderLayer) -> impl Iterator<Item = ElementId> + '_ {
        self.roots
            .iter()
            .filter(move |(root_layer, _)| *root_layer == layer)
            .map(|(_, id)| *id)
    }

    /// Direct children of a group.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id.index())
            .map_or(&[], |element| element.children.as_slice())
    }

    /// Text content of a text element.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id.index())?.content.as_deref()
    }

    /// Ids of the registered arrowhead markers.
    pub fn marker_ids(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }

    fn push(&mut self, parent: Parent, element: Element) -> ElementId {
        let id = ElementId::new(self.elements.len());
        self.elements.push(element);

        match parent {
            Parent::Layer(layer) => self.roots.push((layer, id)),
            Parent::Element(parent_id) => match self.elements.get_mut(parent_id.index()) {
                Some(parent) => parent.children.push(id),
                None => {
                    debug!(parent = parent_id.index(); "Unknown parent element, attaching to labels");
                    self.roots.push((RenderLayer::Labels, id));
                }
            },
        }
        id
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let element = self.elements.get_mut(id.index());
        if element.is_none() {
            trace!(element = id.index(); "Ignoring stale element handle");
        }
        element
    }

    fn shape_element(part: &ShapePart) -> Element {
        let element = match part.primitive() {
            Primitive::Rect {
                bounds,
                corner_radius,
            } => {
                let element = Element::new(Tag::Rect)
                    .with_attribute("x", bounds.min_x())
                    .with_attribute("y", bounds.min_y())
                    .with_attribute("width", bounds.width())
                    .with_attribute("height", bounds.height());
                if *corner_radius > 0.0 {
                    element.with_attribute("rx", corner_radius)
                } else {
                    element
                }
            }
            Primitive::Circle { center, radius } => Element::new(Tag::Circle)
                .with_attribute("cx", center.x())
                .with_attribute("cy", center.y())
                .with_attribute("r", radius),
            Primitive::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Element::new(Tag::Ellipse)
                .with_attribute("cx", center.x())
                .with_attribute("cy", center.y())
                .with_attribute("rx", radius_x)
                .with_attribute("ry", radius_y),
            Primitive::Polygon { points } => {
                Element::new(Tag::Polygon).with_attribute("points", polygon_points(points))
            }
            Primitive::Line { from, to } => Element::new(Tag::Line)
                .with_attribute("x1", from.x())
                .with_attribute("y1", from.y())
                .with_attribute("x2", to.x())
                .with_attribute("y2", to.y()),
            Primitive::Path { data } => Element::new(Tag::Path).with_attribute("d", data),
        };

        Element {
            paint: Some(part.paint().clone()),
            ..element
        }
    }

    fn render_element(&self, id: ElementId) -> SvgNode {
        let element = &self.elements[id.index()];
        let paint = element.paint.clone().unwrap_or_default();

        match element.tag {
            Tag::Group => self.finish(svg_element::Group::new(), element),
            Tag::Text => self.finish(
                svg_element::Text::new(element.content.clone().unwrap_or_default()),
                element,
            ),
            Tag::Rect => self.finish(apply_paint!(svg_element::Rectangle::new(), &paint), element),
            Tag::Circle => self.finish(apply_paint!(svg_element::Circle::new(), &paint), element),
            Tag::Ellipse => self.finish(apply_paint!(svg_element::Ellipse::new(), &paint), element),
            Tag::Polygon => self.finish(apply_paint!(svg_element::Polygon::new(), &paint), element),
            Tag::Line => self.finish(apply_paint!(svg_element::Line::new(), &paint), element),
            Tag::Path => self.finish(apply_paint!(svg_element::Path::new(), &paint), element),
        }
    }

    /// Applies attributes, classes, inline styles and children to `node`.
    fn finish<T: Node>(&self, mut node: T, element: &Element) -> SvgNode {
        for (name, value) in &element.attributes {
            node.assign(name.as_str(), value.clone());
        }
        if !element.classes.is_empty() {
            node.assign("class", element.classes.join(" "));
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            node.assign("style", style);
        }
        if !element.interactions.is_empty() {
            let names = element
                .interactions
                .iter()
                .map(Interaction::name)
                .collect::<Vec<_>>()
                .join(" ");
            node.assign("data-interaction", names);
        }
        for child in &element.children {
            node.append(self.render_element(*child));
        }
        Box::new(node)
    }

    fn marker_definitions(&self) -> svg_element::Definitions {
        self.markers
            .iter()
            .fold(svg_element::Definitions::new(), |defs, (id, color)| {
                let polygon = svg_element::Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", color.to_string());
                let marker = svg_element::Marker::new()
                    .set("id", id.as_str())
                    .set("markerWidth", 10)
                    .set("markerHeight", 7)
                    .set("refX", 9)
                    .set("refY", 3.5)
                    .set("orient", "auto")
                    .add(polygon);
                defs.add(marker)
            })
    }
}

impl DrawingSurface for SvgSurface {
    fn clear(&mut self) {
        self.elements.clear();
        self.roots.clear();
        self.markers.clear();
        self.view_box = None;
    }

    fn set_view_box(&mut self, bounds: Bounds) {
        self.view_box = Some(bounds);
    }

    fn view_box(&self) -> Option<Bounds> {
        self.view_box
    }

    fn set_canvas_size(&mut self, size: Option<Size>) {
        self.canvas_size = size;
    }

    fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    fn set_stylesheet(&mut self, css: &str) {
        self.stylesheet = css.to_string();
    }

    fn define_marker(&mut self, arrowhead: &Arrowhead) {
        self.markers
            .insert(arrowhead.id().to_string(), arrowhead.color());
    }

    fn create_group(&mut self, parent: Parent, transform: Option<Transform>) -> ElementId {
        let element = match transform {
            Some(transform) => Element::new(Tag::Group).with_attribute("transform", transform),
            None => Element::new(Tag::Group),
        };
        self.push(parent, element)
    }

    fn create_shape(&mut self, parent: Parent, part: &ShapePart) -> ElementId {
        self.push(parent, Self::shape_element(part))
    }

    fn create_text(
        &mut self,
        parent: Parent,
        position: Point,
        text: &str,
        style: &TextDefinition,
    ) -> ElementId {
        let mut element = Element::new(Tag::Text)
            .with_attribute("x", position.x())
            .with_attribute("y", position.y())
            .with_attribute("font-family", style.font_family())
            .with_attribute("font-size", style.font_size())
            .with_attribute("fill", style.color())
            .with_attribute("text-anchor", style.anchor().to_svg_value());
        if let Some(weight) = style.font_weight() {
            element = element.with_attribute("font-weight", weight);
        }
        element.content = Some(text.to_string());
        self.push(parent, element)
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(id.index())?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    fn set_class(&mut self, id: ElementId, class: &str, enabled: bool) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let present = element.classes.iter().any(|c| c == class);
        match (enabled, present) {
            (true, false) => element.classes.push(class.to_string()),
            (false, true) => element.classes.retain(|c| c != class),
            _ => {}
        }
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id.index())
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    fn set_style(&mut self, id: ElementId, property: &str, value: Option<&str>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        match value {
            Some(value) => {
                element
                    .styles
                    .insert(property.to_string(), value.to_string());
            }
            None => {
                element.styles.shift_remove(property);
            }
        }
    }

    fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements
            .get(id.index())?
            .styles
            .get(property)
            .map(String::as_str)
    }

    fn listen(&mut self, id: ElementId, interaction: Interaction) {
        if let Some(element) = self.element_mut(id) {
            if !element.interactions.contains(&interaction) {
                element.interactions.push(interaction);
            }
        }
    }

    fn is_listening(&self, id: ElementId, interaction: Interaction) -> bool {
        self.elements
            .get(id.index())
            .is_some_and(|element| element.interactions.contains(&interaction))
    }

    fn to_markup(&self) -> Option<String> {
        let view_box = self.view_box?;

        let mut doc = svg::Document::new().set("class", ROOT_CLASS).set(
            "viewBox",
            format!(
                "{} {} {} {}",
                view_box.min_x(),
                view_box.min_y(),
                view_box.width(),
                view_box.height()
            ),
        );
        if let Some(size) = self.canvas_size {
            doc = doc.set("width", size.width()).set("height", size.height());
        }

        if !self.markers.is_empty() {
            doc = doc.add(self.marker_definitions());
        }
        if !self.stylesheet.is_empty() {
            doc = doc.add(svg_element::Style::new(self.stylesheet.as_str()));
        }
        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", view_box.min_x())
                    .set("y", view_box.min_y())
                    .set("width", view_box.width())
                    .set("height", view_box.height())
                    .set("fill", background.to_string()),
            );
        }

        let mut output = LayeredOutput::new();
        for (layer, id) in &self.roots {
            output.add_to_layer(*layer, self.render_element(*id));
        }
        for layer in output.render() {
            doc = doc.add(layer);
        }

        Some(doc.to_string())
    }
}

fn polygon_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        draw::{PathData, StrokeDefinition, StrokeStyle, TextAnchor},
        geometry::Size,
    };

    use super::*;

    fn color(css: &str) -> Color {
        Color::new(css).unwrap()
    }

    fn canvas() -> SvgSurface {
        let mut surface = SvgSurface::new();
        surface.set_view_box(Bounds::new_from_top_left(
            Point::new(-50.0, -50.0),
            Size::new(1200.0, 800.0),
        ));
        surface
    }

    fn edge_part() -> ShapePart {
        ShapePart::new(
            Primitive::Path {
                data: PathData::new()
                    .move_to(Point::new(0.0, 0.0))
                    .line_to(Point::new(100.0, 0.0)),
            },
            Paint::outline(
                StrokeDefinition::new(color("#9ca3af"), 2.0)
                    .with_style(StrokeStyle::Custom("8,4".to_string()))
                    .rounded(),
            ),
        )
    }

    #[test]
    fn test_no_markup_before_view_box() {
        let mut surface = SvgSurface::new();
        surface.create_shape(Parent::Layer(RenderLayer::Edges), &edge_part());
        assert!(surface.to_markup().is_none());
    }

    #[test]
    fn test_root_attributes() {
        let markup = canvas().to_markup().unwrap();
        assert!(markup.contains(r#"class="wf-diagram-svg""#));
        assert!(markup.contains(r#"viewBox="-50 -50 1200 800""#));
        assert!(!markup.contains("width="));
    }

    #[test]
    fn test_canvas_size_sets_dimensions() {
        let mut surface = canvas();
        surface.set_canvas_size(Some(Size::new(1200.0, 800.0)));

        let markup = surface.to_markup().unwrap();
        assert!(markup.contains(r#"width="1200""#));
        assert!(markup.contains(r#"height="800""#));
    }

    #[test]
    fn test_path_paint() {
        let mut surface = canvas();
        surface.create_shape(Parent::Layer(RenderLayer::Edges), &edge_part());

        let markup = surface.to_markup().unwrap();
        assert!(markup.contains(r#"d="M 0 0 L 100 0""#));
        assert!(markup.contains(r#"fill="none""#));
        assert!(markup.contains(r#"stroke-dasharray="8,4""#));
        assert!(markup.contains(r#"stroke-linecap="round""#));
    }

    #[test]
    fn test_layers_emitted_bottom_first() {
        let mut surface = canvas();
        surface.create_text(
            Parent::Layer(RenderLayer::Labels),
            Point::default(),
            "label",
            &TextDefinition::new(),
        );
        surface.create_shape(Parent::Layer(RenderLayer::Edges), &edge_part());

        let markup = surface.to_markup().unwrap();
        let edges = markup.find(r#"data-layer="diagram-edges""#).unwrap();
        let labels = markup.find(r#"data-layer="diagram-labels""#).unwrap();
        assert!(edges < labels);
        assert!(!markup.contains("diagram-groups"));
    }

    #[test]
    fn test_group_children_and_transform() {
        let mut surface = canvas();
        let group = surface.create_group(
            Parent::Layer(RenderLayer::Nodes),
            Some(Transform::translate(Point::new(10.0, 20.0))),
        );
        let text = surface.create_text(
            Parent::Element(group),
            Point::new(70.0, 30.0),
            "Start",
            &TextDefinition::new().with_anchor(TextAnchor::Middle),
        );

        assert_eq!(surface.children(group), &[text]);
        assert_eq!(surface.layer_elements(RenderLayer::Nodes).count(), 1);
        assert_eq!(surface.text(text), Some("Start"));

        let markup = surface.to_markup().unwrap();
        assert!(markup.contains(r#"transform="translate(10, 20)""#));
        assert!(markup.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn test_classes_toggle() {
        let mut surface = canvas();
        let id = surface.create_group(Parent::Layer(RenderLayer::Nodes), None);

        surface.set_class(id, "wf-diagram-node", true);
        surface.set_class(id, "wf-diagram-node--highlighted", true);
        surface.set_class(id, "wf-diagram-node--highlighted", true);
        assert!(surface.has_class(id, "wf-diagram-node--highlighted"));
        assert!(
            surface
                .to_markup()
                .unwrap()
                .contains(r#"class="wf-diagram-node wf-diagram-node--highlighted""#)
        );

        surface.set_class(id, "wf-diagram-node--highlighted", false);
        assert!(!surface.has_class(id, "wf-diagram-node--highlighted"));
        assert!(surface.has_class(id, "wf-diagram-node"));
    }

    #[test]
    fn test_inline_styles() {
        let mut surface = canvas();
        let id = surface.create_shape(Parent::Layer(RenderLayer::Edges), &edge_part());

        surface.set_style(id, "stroke-width", Some("3"));
        assert_eq!(surface.style(id, "stroke-width"), Some("3"));
        assert!(surface.to_markup().unwrap().contains(r#"style="stroke-width: 3""#));

        surface.set_style(id, "stroke-width", None);
        assert_eq!(surface.style(id, "stroke-width"), None);
        assert!(!surface.to_markup().unwrap().contains("style="));
    }

    #[test]
    fn test_markers_and_stylesheet() {
        let mut surface = canvas();
        surface.define_marker(&Arrowhead::new("arrowhead", color("#6b7280")));
        surface.define_marker(&Arrowhead::new("arrowhead", color("#6b7280")));
        surface.set_stylesheet(".highlighted { stroke: orange; }");

        assert_eq!(surface.marker_ids().collect::<Vec<_>>(), ["arrowhead"]);
        let markup = surface.to_markup().unwrap();
        assert_eq!(markup.matches("<marker").count(), 1);
        assert!(markup.contains(r#"id="arrowhead""#));
        assert!(markup.contains(r#"orient="auto""#));
        assert!(markup.contains(".highlighted"));
    }

    #[test]
    fn test_interactions_recorded() {
        let mut surface = canvas();
        let id = surface.create_group(Parent::Layer(RenderLayer::Nodes), None);

        surface.listen(id, Interaction::Click);
        surface.listen(id, Interaction::Click);
        assert!(surface.is_listening(id, Interaction::Click));
        assert!(!surface.is_listening(id, Interaction::PointerEnter));
        assert!(
            surface
                .to_markup()
                .unwrap()
                .contains(r#"data-interaction="click""#)
        );
    }

    #[test]
    fn test_clear_resets_content() {
        let mut surface = canvas();
        surface.define_marker(&Arrowhead::new("arrowhead", color("#6b7280")));
        let id = surface.create_shape(Parent::Layer(RenderLayer::Edges), &edge_part());
        surface.clear();

        assert_eq!(surface.element_count(), 0);
        assert!(surface.view_box().is_none());
        assert!(surface.to_markup().is_none());
        assert!(surface.attribute(id, "d").is_none());
        surface.set_class(id, "ignored", true);
    }

    #[test]
    fn test_background_rect() {
        let mut surface = canvas();
        surface.set_background(Some(color("#ffffff")));
        assert!(surface.to_markup().unwrap().contains("<rect"));
    }
}
