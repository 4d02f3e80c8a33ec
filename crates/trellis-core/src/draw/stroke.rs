//! Stroke definitions for node borders, edge paths and cardinality marks.
//!
//! - [`StrokeDefinition`]: color, width, dash style, cap and join
//! - [`StrokeStyle`]: solid, preset dash patterns or a custom SVG dasharray
//! - [`StrokeCap`] / [`StrokeJoin`]: endpoint and corner rendering
//! - [`apply_stroke!`](crate::apply_stroke!): writes all stroke attributes onto an SVG element
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |
//! | `cap` | `stroke-linecap` |
//! | `join` | `stroke-linejoin` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// Edge styles use [`StrokeStyle::Custom`] for their dash arrays (`"8,4"` for
/// conditional flows, `"4,4"` for async messages).
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// `5,5`
    Dashed,
    /// `2,3`
    Dotted,
    /// Raw SVG dasharray, e.g. `"6,3"`.
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" | "" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern => Ok(Self::Custom(pattern.to_string())),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// How line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// How corners between path segments are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// Everything needed to stroke a primitive.
///
/// # Examples
///
/// ```
/// use trellis_core::color::Color;
/// use trellis_core::draw::{StrokeCap, StrokeDefinition, StrokeStyle};
///
/// let conditional = StrokeDefinition::new(Color::new("#9ca3af").unwrap(), 2.0)
///     .with_style(StrokeStyle::Custom("8,4".to_string()))
///     .rounded();
///
/// assert_eq!(conditional.style().to_svg_value().as_deref(), Some("8,4"));
/// assert_eq!(conditional.cap(), StrokeCap::Round);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Round caps and round joins, as used for every edge path.
    pub fn rounded(mut self) -> Self {
        self.cap = StrokeCap::Round;
        self.join = StrokeJoin::Round;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// ```
/// use trellis_core::color::Color;
/// use trellis_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("#374151").unwrap(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", -8)
///     .set("x2", 0)
///     .set("y2", 8);
///
/// let line = trellis_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-width", $stroke.width());

        if $stroke.color().alpha() < 1.0 {
            elem = elem.set("stroke-opacity", $stroke.color().alpha());
        }
        if $stroke.cap() != $crate::draw::StrokeCap::Butt {
            elem = elem.set("stroke-linecap", $stroke.cap().to_svg_value());
        }
        if $stroke.join() != $crate::draw::StrokeJoin::Miter {
            elem = elem.set("stroke-linejoin", $stroke.join().to_svg_value());
        }
        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
