//! Text styles and label size estimation.
//!
//! - [`TextDefinition`] - font, size, weight, color and anchor of a text run
//! - [`TextAnchor`] - horizontal alignment relative to the text position
//! - [`LabelMetrics`] - fixed per-character width estimate for label boxes
//!
//! Labels are never measured against real font metrics; box widths come from
//! [`LabelMetrics`], which keeps the engine independent of any font stack.

use crate::{color::Color, geometry::Size};

/// Horizontal anchoring of text around its x-coordinate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Visual style of a text run.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Indie Flower, cursive"` |
/// | Font size | `16` |
/// | Font weight | normal |
/// | Color | `#1f2937` |
/// | Anchor | middle |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    font_weight: Option<u16>,
    color: Color,
    anchor: TextAnchor,
}

impl TextDefinition {
    pub const DEFAULT_FONT_FAMILY: &'static str = "Indie Flower, cursive";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Numeric CSS font weight, e.g. `600` for group labels.
    pub fn with_font_weight(mut self, weight: u16) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_weight(&self) -> Option<u16> {
        self.font_weight
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: Self::DEFAULT_FONT_FAMILY.to_string(),
            font_size: 16.0,
            font_weight: None,
            color: Color::builtin("#1f2937"),
            anchor: TextAnchor::Middle,
        }
    }
}

/// Monospace-style label size estimate.
///
/// Width is `char_width * characters + padding`; height is fixed.
///
/// ```
/// # use trellis_core::draw::LabelMetrics;
/// let metrics = LabelMetrics::default();
/// let size = metrics.estimate("yes");
/// assert_eq!(size.width(), 40.0); // 3 * 8 + 16
/// assert_eq!(size.height(), 24.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    char_width: f32,
    padding: f32,
    height: f32,
}

impl LabelMetrics {
    pub fn new(char_width: f32, padding: f32, height: f32) -> Self {
        Self {
            char_width,
            padding,
            height,
        }
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Estimated box size for `text`, counted in characters rather than bytes.
    pub fn estimate(&self, text: &str) -> Size {
        let characters = text.chars().count() as f32;
        Size::new(self.char_width * characters + self.padding, self.height)
    }
}

impl Default for LabelMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0, 24.0)
    }
}
