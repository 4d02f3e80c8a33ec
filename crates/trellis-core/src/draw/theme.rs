//! Colors and text styles for everything that is not a node or an edge.
//!
//! Node appearance lives in the shape catalog and edge appearance in the edge
//! catalog. [`Theme`] covers the rest: labels, entity field rows, annotation
//! boxes, ER marks, group palettes and the highlight accent.

use crate::{
    color::Color,
    draw::{LabelMetrics, StrokeDefinition, StrokeStyle, TextAnchor, TextDefinition},
};

/// Fill, outline and label color of a group box.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPalette {
    name: String,
    fill: Color,
    stroke: StrokeDefinition,
    label: Color,
}

impl GroupPalette {
    /// Palette names accepted as a group `color` hint.
    pub const NAMES: [&'static str; 7] = ["teal", "blue", "purple", "amber", "red", "green", "gray"];

    fn new(name: &str, accent: Color, label: Color) -> Self {
        Self {
            name: name.to_string(),
            fill: accent.with_alpha(0.05),
            stroke: StrokeDefinition::new(accent, 2.0)
                .with_style(StrokeStyle::Custom("8,4".to_string())),
            label,
        }
    }

    /// Built-in palette by name.
    pub fn named(name: &str) -> Option<Self> {
        let c = Color::builtin;
        let (accent, label) = match name {
            "teal" => ("#14b8a6", "#0d9488"),
            "blue" => ("#3b82f6", "#2563eb"),
            "purple" => ("#8b5cf6", "#7c3aed"),
            "amber" => ("#f59e0b", "#d97706"),
            "red" => ("#ef4444", "#dc2626"),
            "green" => ("#22c55e", "#16a34a"),
            "gray" => ("#6b7280", "#4b5563"),
            _ => return None,
        };
        Some(Self::new(name, c(accent), c(label)))
    }

    /// Resolves a group `color` hint.
    ///
    /// Palette names win; any other valid CSS color becomes a `custom`
    /// palette tinted from it; missing or unparsable hints fall back to teal.
    ///
    /// ```
    /// # use trellis_core::draw::GroupPalette;
    /// assert_eq!(GroupPalette::from_hint(None).name(), "teal");
    /// assert_eq!(GroupPalette::from_hint(Some("purple")).name(), "purple");
    /// assert_eq!(GroupPalette::from_hint(Some("#ff6600")).name(), "custom");
    /// assert_eq!(GroupPalette::from_hint(Some("???")).name(), "teal");
    /// ```
    pub fn from_hint(hint: Option<&str>) -> Self {
        let Some(hint) = hint else {
            return Self::default();
        };
        if let Some(palette) = Self::named(hint) {
            return palette;
        }
        match Color::new(hint) {
            Ok(color) => Self::new("custom", color, color),
            Err(_) => Self::default(),
        }
    }

    /// Palette name, used as the group's CSS class modifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn label(&self) -> Color {
        self.label
    }
}

impl Default for GroupPalette {
    fn default() -> Self {
        let c = Color::builtin;
        Self::new("teal", c("#14b8a6"), c("#0d9488"))
    }
}

/// Styles of labels, annotations and decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    background: Option<Color>,
    node_label: TextDefinition,
    sublabel: TextDefinition,
    group_label: TextDefinition,
    edge_label: TextDefinition,
    edge_label_fill: Color,
    edge_label_border: StrokeDefinition,
    field_name: TextDefinition,
    field_type: TextDefinition,
    annotation: TextDefinition,
    annotation_fill: Color,
    annotation_border: StrokeDefinition,
    cardinality: StrokeDefinition,
    highlight: Color,
    label_metrics: LabelMetrics,
}

impl Theme {
    /// Replaces the font family of every text style.
    pub fn with_font_family(mut self, family: &str) -> Self {
        for text in [
            &mut self.node_label,
            &mut self.sublabel,
            &mut self.group_label,
            &mut self.edge_label,
            &mut self.field_name,
            &mut self.field_type,
            &mut self.annotation,
        ] {
            *text = text.clone().with_font_family(family);
        }
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn with_label_metrics(mut self, metrics: LabelMetrics) -> Self {
        self.label_metrics = metrics;
        self
    }

    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = color;
        self
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Main node label. Its color is overridden per node type.
    pub fn node_label(&self) -> &TextDefinition {
        &self.node_label
    }

    pub fn sublabel(&self) -> &TextDefinition {
        &self.sublabel
    }

    /// Group label. Its color is overridden by the group palette.
    pub fn group_label(&self) -> &TextDefinition {
        &self.group_label
    }

    pub fn edge_label(&self) -> &TextDefinition {
        &self.edge_label
    }

    pub fn edge_label_fill(&self) -> Color {
        self.edge_label_fill
    }

    pub fn edge_label_border(&self) -> &StrokeDefinition {
        &self.edge_label_border
    }

    pub fn field_name(&self) -> &TextDefinition {
        &self.field_name
    }

    pub fn field_type(&self) -> &TextDefinition {
        &self.field_type
    }

    pub fn annotation(&self) -> &TextDefinition {
        &self.annotation
    }

    pub fn annotation_fill(&self) -> Color {
        self.annotation_fill
    }

    pub fn annotation_border(&self) -> &StrokeDefinition {
        &self.annotation_border
    }

    /// Stroke of ER cardinality glyphs.
    pub fn cardinality(&self) -> &StrokeDefinition {
        &self.cardinality
    }

    /// Accent of highlighted nodes and edges.
    pub fn highlight(&self) -> Color {
        self.highlight
    }

    /// Heuristic used to size edge label boxes.
    pub fn label_metrics(&self) -> LabelMetrics {
        self.label_metrics
    }
}

impl Default for Theme {
    fn default() -> Self {
        let c = Color::builtin;
        let text = TextDefinition::new();

        Self {
            background: None,
            node_label: text.clone(),
            sublabel: text.clone().with_font_size(12.0).with_color(c("#6b7280")),
            group_label: text
                .clone()
                .with_font_size(14.0)
                .with_font_weight(600)
                .with_anchor(TextAnchor::Start),
            edge_label: text.clone().with_font_size(14.0).with_color(c("#374151")),
            edge_label_fill: c("#ffffff"),
            edge_label_border: StrokeDefinition::new(c("#e5e7eb"), 1.0),
            field_name: text
                .clone()
                .with_font_size(14.0)
                .with_color(c("#374151"))
                .with_anchor(TextAnchor::Start),
            field_type: text
                .clone()
                .with_font_size(12.0)
                .with_color(c("#9ca3af"))
                .with_anchor(TextAnchor::End),
            annotation: text
                .with_font_size(14.0)
                .with_color(c("#78350f"))
                .with_anchor(TextAnchor::Start),
            annotation_fill: c("#fffbeb"),
            annotation_border: StrokeDefinition::new(c("#fcd34d"), 1.0)
                .with_style(StrokeStyle::Custom("4,2".to_string())),
            cardinality: StrokeDefinition::new(c("#374151"), 2.0),
            highlight: c("#f59e0b"),
            label_metrics: LabelMetrics::default(),
        }
    }
}
