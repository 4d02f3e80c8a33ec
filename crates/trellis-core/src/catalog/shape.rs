//! Node type registry.
//!
//! [`ShapeCatalog`] maps a node `type` string to a [`ShapeSpec`]: the shape
//! family, the fixed node size and the colors. Sizes are static per type and
//! drive rendering, bounds and connection points alike. Lookup is total:
//! unknown types resolve to the fallback rectangle.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::{
    color::Color,
    draw::{ShapeKind, StrokeDefinition},
    geometry::Size,
};

/// Everything the engine needs to know about one node type.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    kind: ShapeKind,
    size: Size,
    fill: Color,
    border: Color,
    border_width: f32,
    text_color: Color,
}

impl ShapeSpec {
    /// Creates a spec with a 2px border and dark text.
    pub fn new(kind: ShapeKind, size: Size, fill: Color, border: Color) -> Self {
        Self {
            kind,
            size,
            fill,
            border,
            border_width: 2.0,
            text_color: Color::builtin("#1f2937"),
        }
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = width;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Border as a stroke definition.
    pub fn border_stroke(&self) -> StrokeDefinition {
        StrokeDefinition::new(self.border, self.border_width)
    }

    fn apply(&mut self, overrides: &ShapeOverride) {
        if let Some(kind) = overrides.shape {
            self.kind = kind;
        }
        if let Some(width) = overrides.width {
            self.size = Size::new(width, self.size.height());
        }
        if let Some(height) = overrides.height {
            self.size = Size::new(self.size.width(), height);
        }
        if let Some(fill) = overrides.fill {
            self.fill = fill;
        }
        if let Some(border) = overrides.border {
            self.border = border;
        }
        if let Some(width) = overrides.border_width {
            self.border_width = width;
        }
        if let Some(text_color) = overrides.text_color {
            self.text_color = text_color;
        }
    }
}

/// Partial [`ShapeSpec`] read from configuration.
///
/// ```toml
/// [shapes.database]
/// fill = "#fde68a"
/// width = 140
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeOverride {
    pub shape: Option<ShapeKind>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill: Option<Color>,
    pub border: Option<Color>,
    pub border_width: Option<f32>,
    pub text_color: Option<Color>,
}

/// Immutable-by-default registry of node types.
///
/// Built once and shared by reference with the geometry and scene code.
/// Per-instance themes go through [`ShapeCatalog::insert`] or
/// [`ShapeCatalog::apply`] before the catalog is handed to a renderer.
///
/// ```
/// # use trellis_core::catalog::ShapeCatalog;
/// # use trellis_core::draw::ShapeKind;
/// # use trellis_core::geometry::Size;
/// let catalog = ShapeCatalog::default();
///
/// assert_eq!(catalog.shape_of("start").kind(), ShapeKind::Circle);
/// assert_eq!(catalog.shape_of("decision").size(), Size::new(100.0, 100.0));
/// // Unknown types fall back to the plain rectangle.
/// assert_eq!(catalog.shape_of("nonexistent").size(), Size::new(140.0, 50.0));
/// ```
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    entries: IndexMap<String, ShapeSpec>,
    fallback: ShapeSpec,
}

impl ShapeCatalog {
    /// Catalog with no registered types; every lookup yields `fallback`.
    pub fn empty(fallback: ShapeSpec) -> Self {
        Self {
            entries: IndexMap::new(),
            fallback,
        }
    }

    /// Spec for `node_type`, or the fallback when the type is unknown.
    pub fn shape_of(&self, node_type: &str) -> &ShapeSpec {
        self.entries.get(node_type).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    pub fn fallback(&self) -> &ShapeSpec {
        &self.fallback
    }

    /// Registered type names, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registers or replaces a node type.
    pub fn insert(&mut self, node_type: impl Into<String>, spec: ShapeSpec) {
        self.entries.insert(node_type.into(), spec);
    }

    /// Patches a node type in place. Unknown types start from the fallback.
    pub fn apply(&mut self, node_type: &str, overrides: &ShapeOverride) {
        debug!(node_type; "Applying shape override");
        let fallback = self.fallback.clone();
        self.entries
            .entry(node_type.to_string())
            .or_insert(fallback)
            .apply(overrides);
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        let c = Color::builtin;
        let white_text = c("#ffffff");

        let action = ShapeSpec::new(
            ShapeKind::Rectangle,
            Size::new(140.0, 50.0),
            c("#e0e7ff"),
            c("#4f46e5"),
        );

        let mut catalog = Self::empty(action.clone());
        let mut add = |name: &str, spec: ShapeSpec| catalog.insert(name, spec);

        add(
            "start",
            ShapeSpec::new(ShapeKind::Circle, Size::new(60.0, 60.0), c("#22c55e"), c("#16a34a"))
                .with_text_color(white_text),
        );
        add(
            "end",
            ShapeSpec::new(ShapeKind::Circle, Size::new(60.0, 60.0), c("#ef4444"), c("#dc2626"))
                .with_text_color(white_text),
        );
        add(
            "page",
            ShapeSpec::new(ShapeKind::Page, Size::new(140.0, 60.0), c("#ccfbf1"), c("#0d9488")),
        );
        add(
            "decision",
            ShapeSpec::new(ShapeKind::Diamond, Size::new(100.0, 100.0), c("#fef3c7"), c("#d97706")),
        );
        add("action", action);
        add(
            "api",
            ShapeSpec::new(ShapeKind::Hexagon, Size::new(160.0, 50.0), c("#fef3c7"), c("#d97706")),
        );
        add(
            "database",
            ShapeSpec::new(ShapeKind::Cylinder, Size::new(120.0, 70.0), c("#dbeafe"), c("#2563eb")),
        );
        add(
            "service",
            ShapeSpec::new(ShapeKind::Rectangle, Size::new(140.0, 60.0), c("#f3e8ff"), c("#7c3aed")),
        );
        add(
            "data",
            ShapeSpec::new(
                ShapeKind::Parallelogram,
                Size::new(140.0, 50.0),
                c("#e0f2fe"),
                c("#0284c7"),
            ),
        );
        add(
            "entity",
            ShapeSpec::new(ShapeKind::Entity, Size::new(180.0, 100.0), c("#ffffff"), c("#374151")),
        );
        add(
            "state",
            ShapeSpec::new(ShapeKind::RoundedRect, Size::new(100.0, 50.0), c("#ffffff"), c("#374151"))
                .with_border_width(3.0),
        );
        add(
            "participant",
            ShapeSpec::new(ShapeKind::Rectangle, Size::new(120.0, 50.0), c("#ccfbf1"), c("#0d9488")),
        );
        add(
            "swimlane",
            ShapeSpec::new(ShapeKind::Rectangle, Size::new(800.0, 150.0), c("#f3f4f6"), c("#9ca3af")),
        );

        catalog
    }
}
