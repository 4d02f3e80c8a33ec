//! Renderer configuration.
//!
//! Every field is optional; a missing section or an empty file yields the
//! defaults. The CLI reads this from TOML:
//!
//! ```toml
//! [render]
//! width = 1600
//! auto_size = false
//!
//! [style]
//! background_color = "#f9fafb"
//! label_char_width = 7.5
//!
//! [shapes.database]
//! fill = "#fde68a"
//!
//! [edges.async]
//! routing = "orthogonal"
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use trellis_core::{
    catalog::{EdgeOverride, EdgeStyleCatalog, ShapeCatalog, ShapeOverride},
    color::Color,
    draw::{LabelMetrics, Theme},
    geometry::Size,
};

use crate::error::TrellisError;

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas and interaction options
    #[serde(default)]
    pub render: RenderOptions,

    /// Text and background styling
    #[serde(default)]
    pub style: StyleConfig,

    /// Per node type shape overrides
    #[serde(default)]
    pub shapes: IndexMap<String, ShapeOverride>,

    /// Per edge type style overrides
    #[serde(default)]
    pub edges: IndexMap<String, EdgeOverride>,
}

impl AppConfig {
    /// Default shape catalog with the `[shapes.*]` overrides applied.
    pub fn shape_catalog(&self) -> ShapeCatalog {
        let mut catalog = ShapeCatalog::default();
        for (node_type, overrides) in &self.shapes {
            debug!(node_type = node_type.as_str(); "Applying shape override");
            catalog.apply(node_type, overrides);
        }
        catalog
    }

    /// Default edge catalog with the `[edges.*]` overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if an override names an unknown arrowhead.
    pub fn edge_catalog(&self) -> Result<EdgeStyleCatalog, TrellisError> {
        let mut catalog = EdgeStyleCatalog::default();
        for (edge_type, overrides) in &self.edges {
            catalog.apply(edge_type, overrides)?;
        }
        Ok(catalog)
    }

    /// Theme derived from the `[style]` section.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if a configured color does not parse.
    pub fn theme(&self) -> Result<Theme, TrellisError> {
        let style = &self.style;
        let mut theme = Theme::default()
            .with_background(style.background_color().map_err(TrellisError::Config)?)
            .with_label_metrics(style.label_metrics());

        if let Some(family) = &style.font_family {
            theme = theme.with_font_family(family);
        }
        if let Some(highlight) = style.highlight_color().map_err(TrellisError::Config)? {
            theme = theme.with_highlight(highlight);
        }
        Ok(theme)
    }
}

/// Canvas and interaction options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    width: f32,
    height: f32,
    padding: f32,
    /// Reserved; layout does not snap to it.
    grid_size: f32,
    auto_size: bool,
    interactive: bool,
}

impl RenderOptions {
    pub fn with_minimum_size(mut self, size: Size) -> Self {
        self.width = size.width();
        self.height = size.height();
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Smallest canvas the diagram is drawn on.
    pub fn minimum_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    /// When set, the SVG carries no pixel width or height and scales with its
    /// container.
    pub fn auto_size(&self) -> bool {
        self.auto_size
    }

    /// Whether click and hover handlers are attached.
    pub fn interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 50.0,
            grid_size: 50.0,
            auto_size: true,
            interactive: true,
        }
    }
}

/// Style configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Default background color for diagrams
    background_color: Option<String>,

    /// Font family for every label
    font_family: Option<String>,

    /// Accent of highlighted nodes and edges
    highlight_color: Option<String>,

    /// Estimated width of one label character
    label_char_width: f32,

    /// Horizontal padding added to every label box
    label_padding: f32,
}

impl StyleConfig {
    /// Get the background color from configuration
    /// Returns None if no background color is configured
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    pub fn highlight_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.highlight_color.as_deref(), "highlight")
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn label_metrics(&self) -> LabelMetrics {
        let defaults = LabelMetrics::default();
        LabelMetrics::new(self.label_char_width, self.label_padding, defaults.height())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let metrics = LabelMetrics::default();
        Self {
            background_color: None,
            font_family: None,
            highlight_color: None,
            label_char_width: metrics.char_width(),
            label_padding: metrics.padding(),
        }
    }
}

fn parse_color(value: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} color in config: {err}"))
}
