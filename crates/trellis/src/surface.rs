//! Host abstraction the renderer draws onto.
//!
//! The renderer never builds markup itself. It creates groups, shapes and text
//! through a [`DrawingSurface`], tags them with attributes and classes, and
//! registers which interactions it wants to receive. A browser host would
//! back this with real DOM nodes; [`SvgSurface`](crate::export::SvgSurface)
//! keeps an in-memory element tree and serializes it to SVG markup.

use std::fmt;

use trellis_core::{
    catalog::Arrowhead,
    color::Color,
    draw::{RenderLayer, ShapePart, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// Handle to an element created on a surface.
///
/// Handles are only valid until the next [`DrawingSurface::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a new element is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// Top level of a render layer.
    Layer(RenderLayer),
    /// Child of a previously created group.
    Element(ElementId),
}

/// Translation followed by a rotation in degrees.
///
/// Displays as an SVG `transform` value:
///
/// ```
/// # use trellis::surface::Transform;
/// # use trellis_core::geometry::Point;
/// let transform = Transform::translate(Point::new(10.0, 20.0)).with_rotation(90.0);
/// assert_eq!(transform.to_string(), "translate(10, 20) rotate(90)");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    translate: Point,
    rotate: f32,
}

impl Transform {
    pub fn translate(offset: Point) -> Self {
        Self {
            translate: offset,
            rotate: 0.0,
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn offset(&self) -> Point {
        self.translate
    }

    pub fn rotation(&self) -> f32 {
        self.rotate
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({}, {})", self.translate.x(), self.translate.y())?;
        if self.rotate != 0.0 {
            write!(f, " rotate({})", self.rotate)?;
        }
        Ok(())
    }
}

/// Pointer interactions a host can deliver back to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interaction {
    Click,
    PointerEnter,
    PointerLeave,
}

impl Interaction {
    /// DOM event name of the interaction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }
}

/// A retained-mode canvas for one diagram.
///
/// Every render starts with [`clear`](Self::clear); elements created after
/// that belong to the current render only.
pub trait DrawingSurface {
    /// Removes every element, marker and handler.
    fn clear(&mut self);

    /// Sets the visible region in diagram coordinates.
    fn set_view_box(&mut self, bounds: Bounds);

    fn view_box(&self) -> Option<Bounds>;

    /// Fixed pixel size of the canvas, or `None` to scale with the container.
    fn set_canvas_size(&mut self, size: Option<Size>);

    fn set_background(&mut self, color: Option<Color>);

    /// Replaces the surface-wide stylesheet.
    fn set_stylesheet(&mut self, css: &str);

    /// Registers an arrowhead marker referenced as `url(#<id>)`.
    fn define_marker(&mut self, arrowhead: &Arrowhead);

    /// Creates an empty group, optionally transformed.
    fn create_group(&mut self, parent: Parent, transform: Option<Transform>) -> ElementId;

    /// Creates a painted primitive.
    fn create_shape(&mut self, parent: Parent, part: &ShapePart) -> ElementId;

    /// Creates a text element whose anchor point is `position`.
    fn create_text(
        &mut self,
        parent: Parent,
        position: Point,
        text: &str,
        style: &TextDefinition,
    ) -> ElementId;

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str);

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    /// Adds `class` when `enabled`, removes it otherwise.
    fn set_class(&mut self, id: ElementId, class: &str, enabled: bool);

    fn has_class(&self, id: ElementId, class: &str) -> bool;

    /// Sets an inline style property, or removes it when `value` is `None`.
    fn set_style(&mut self, id: ElementId, property: &str, value: Option<&str>);

    fn style(&self, id: ElementId, property: &str) -> Option<&str>;

    /// Asks the host to report `interaction` on the element.
    fn listen(&mut self, id: ElementId, interaction: Interaction);

    fn is_listening(&self, id: ElementId, interaction: Interaction) -> bool;

    /// Serialized markup of the current content, if the surface can produce it.
    fn to_markup(&self) -> Option<String>;
}
