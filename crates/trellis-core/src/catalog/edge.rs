//! Edge type registry and ER cardinality notation.
//!
//! [`EdgeStyleCatalog`] maps an edge `type` string to an [`EdgeStyle`]
//! (stroke, dash, arrowhead marker, default routing). Edge types that name a
//! [`Cardinality`] (`one-to-many`, ...) are ER relations: plain straight lines
//! with a [`Symbol`] drawn near each endpoint.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

use crate::{
    color::Color,
    draw::{StrokeDefinition, StrokeStyle},
};

/// Edge type used for unknown and missing edge types.
pub const DEFAULT_EDGE_TYPE: &str = "flow";

/// Path-shape algorithm for an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingMode {
    /// Direct line.
    Straight,
    /// Cubic S-curve biased along the dominant axis.
    #[default]
    Smooth,
    /// Quadratic bow off the chord.
    Curved,
    /// Three right-angle segments.
    Orthogonal,
}

impl RoutingMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Smooth => "smooth",
            Self::Curved => "curved",
            Self::Orthogonal => "orthogonal",
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "smooth" => Ok(Self::Smooth),
            "curved" => Ok(Self::Curved),
            "orthogonal" => Ok(Self::Orthogonal),
            _ => Err(format!(
                "invalid routing `{s}`, valid values: straight, smooth, curved, orthogonal"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for RoutingMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl serde::Serialize for RoutingMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// ER endpoint notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// `|`
    One,
    /// `<` (crow's foot)
    Many,
}

impl Symbol {
    pub fn glyph(&self) -> char {
        match self {
            Self::One => '|',
            Self::Many => '<',
        }
    }
}

/// ER relation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToOne => "many-to-one",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("invalid cardinality `{s}`"))
    }
}

/// Symbols drawn at the source and target ends of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relationship {
    source: Symbol,
    target: Symbol,
}

impl Relationship {
    pub fn source(&self) -> Symbol {
        self.source
    }

    pub fn target(&self) -> Symbol {
        self.target
    }
}

/// A named SVG arrowhead marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrowhead {
    id: String,
    color: Color,
}

impl Arrowhead {
    pub fn new(id: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            color,
        }
    }

    /// Marker id referenced by `marker-end="url(#id)"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Visual style of one edge type.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    stroke: StrokeDefinition,
    arrowhead: Option<String>,
    routing: RoutingMode,
    cardinality: Option<Cardinality>,
}

impl EdgeStyle {
    /// Rounded stroke, smooth routing, no arrowhead.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            stroke: StrokeDefinition::new(color, width).rounded(),
            arrowhead: None,
            routing: RoutingMode::default(),
            cardinality: None,
        }
    }

    pub fn with_dash(mut self, dasharray: &str) -> Self {
        self.stroke.set_style(StrokeStyle::Custom(dasharray.to_string()));
        self
    }

    pub fn with_arrowhead(mut self, id: impl Into<String>) -> Self {
        self.arrowhead = Some(id.into());
        self
    }

    pub fn with_routing(mut self, routing: RoutingMode) -> Self {
        self.routing = routing;
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// The stroke's dasharray, `None` for solid edges.
    pub fn dash_array(&self) -> Option<String> {
        self.stroke.style().to_svg_value()
    }

    pub fn arrowhead(&self) -> Option<&str> {
        self.arrowhead.as_deref()
    }

    /// Default routing mode for edges of this type.
    pub fn routing(&self) -> RoutingMode {
        self.routing
    }

    pub fn cardinality(&self) -> Option<Cardinality> {
        self.cardinality
    }
}

/// Partial [`EdgeStyle`] read from configuration.
///
/// `arrowhead = "none"` removes the marker.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdgeOverride {
    pub stroke: Option<Color>,
    pub width: Option<f32>,
    pub dash: Option<String>,
    pub arrowhead: Option<String>,
    pub routing: Option<RoutingMode>,
}

/// Errors raised while customizing an [`EdgeStyleCatalog`].
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("edge type `{edge_type}` references unknown arrowhead `{arrowhead}`")]
    UnknownArrowhead { edge_type: String, arrowhead: String },
}

/// Registry of edge types and arrowhead markers.
///
/// ```
/// # use trellis_core::catalog::{Cardinality, EdgeStyleCatalog, RoutingMode, Symbol};
/// let catalog = EdgeStyleCatalog::default();
///
/// assert_eq!(catalog.style_of("error").arrowhead(), Some("arrowhead-error"));
/// assert_eq!(catalog.style_of("conditional").dash_array().as_deref(), Some("8,4"));
/// assert_eq!(catalog.style_of("whatever"), catalog.style_of("flow"));
///
/// let rel = EdgeStyleCatalog::relationship_of(Cardinality::OneToMany);
/// assert_eq!((rel.source(), rel.target()), (Symbol::One, Symbol::Many));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeStyleCatalog {
    styles: IndexMap<String, EdgeStyle>,
    arrowheads: IndexMap<String, Arrowhead>,
    fallback: EdgeStyle,
}

impl EdgeStyleCatalog {
    /// Style for `edge_type`, or the `flow` style when the type is unknown.
    pub fn style_of(&self, edge_type: &str) -> &EdgeStyle {
        self.styles
            .get(edge_type)
            .or_else(|| self.styles.get(DEFAULT_EDGE_TYPE))
            .unwrap_or(&self.fallback)
    }

    /// Endpoint symbols of an ER relation.
    pub fn relationship_of(kind: Cardinality) -> Relationship {
        use Symbol::{Many, One};

        let (source, target) = match kind {
            Cardinality::OneToOne => (One, One),
            Cardinality::OneToMany => (One, Many),
            Cardinality::ManyToOne => (Many, One),
            Cardinality::ManyToMany => (Many, Many),
        };
        Relationship { source, target }
    }

    pub fn contains(&self, edge_type: &str) -> bool {
        self.styles.contains_key(edge_type)
    }

    /// Registered edge type names, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Arrowhead markers that must be defined on the drawing surface.
    pub fn arrowheads(&self) -> impl Iterator<Item = &Arrowhead> {
        self.arrowheads.values()
    }

    pub fn arrowhead(&self, id: &str) -> Option<&Arrowhead> {
        self.arrowheads.get(id)
    }

    pub fn insert_arrowhead(&mut self, arrowhead: Arrowhead) {
        self.arrowheads.insert(arrowhead.id().to_string(), arrowhead);
    }

    /// Registers or replaces an edge type.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownArrowhead`] if the style references a
    /// marker that has not been registered.
    pub fn insert(
        &mut self,
        edge_type: impl Into<String>,
        style: EdgeStyle,
    ) -> Result<(), CatalogError> {
        let edge_type = edge_type.into();
        self.check_arrowhead(&edge_type, style.arrowhead())?;
        self.styles.insert(edge_type, style);
        Ok(())
    }

    /// Patches an edge type in place. Unknown types start from the `flow` style.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownArrowhead`] if the override names an
    /// unregistered marker.
    pub fn apply(&mut self, edge_type: &str, overrides: &EdgeOverride) -> Result<(), CatalogError> {
        debug!(edge_type; "Applying edge style override");
        let mut style = self.style_of(edge_type).clone();

        if let Some(color) = overrides.stroke {
            style.stroke.set_color(color);
        }
        if let Some(width) = overrides.width {
            style.stroke.set_width(width);
        }
        if let Some(dash) = &overrides.dash {
            style.stroke.set_style(dash.parse().unwrap_or_default());
        }
        if let Some(arrowhead) = &overrides.arrowhead {
            style.arrowhead = (arrowhead != "none").then(|| arrowhead.clone());
        }
        if let Some(routing) = overrides.routing {
            style.routing = routing;
        }

        self.insert(edge_type, style)
    }

    fn check_arrowhead(&self, edge_type: &str, arrowhead: Option<&str>) -> Result<(), CatalogError> {
        match arrowhead {
            Some(id) if !self.arrowheads.contains_key(id) => Err(CatalogError::UnknownArrowhead {
                edge_type: edge_type.to_string(),
                arrowhead: id.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for EdgeStyleCatalog {
    fn default() -> Self {
        let c = Color::builtin;

        let flow = EdgeStyle::new(c("#6b7280"), 2.0).with_arrowhead("arrowhead");
        let relation = EdgeStyle::new(c("#374151"), 2.0).with_routing(RoutingMode::Straight);

        let mut styles = IndexMap::new();
        styles.insert(DEFAULT_EDGE_TYPE.to_string(), flow.clone());
        styles.insert(
            "conditional".to_string(),
            EdgeStyle::new(c("#9ca3af"), 2.0)
                .with_dash("8,4")
                .with_arrowhead("arrowhead"),
        );
        styles.insert(
            "data".to_string(),
            EdgeStyle::new(c("#3b82f6"), 3.0).with_arrowhead("arrowhead-data"),
        );
        styles.insert(
            "async".to_string(),
            EdgeStyle::new(c("#8b5cf6"), 2.0)
                .with_dash("4,4")
                .with_arrowhead("arrowhead"),
        );
        styles.insert(
            "error".to_string(),
            EdgeStyle::new(c("#ef4444"), 2.5).with_arrowhead("arrowhead-error"),
        );
        styles.insert("association".to_string(), relation.clone().with_routing(RoutingMode::Smooth));
        styles.insert(
            "dependency".to_string(),
            EdgeStyle::new(c("#6b7280"), 2.0)
                .with_dash("6,3")
                .with_arrowhead("arrowhead"),
        );

        // Sequence diagram messages.
        styles.insert(
            "message".to_string(),
            relation.clone().with_arrowhead("arrowhead"),
        );
        styles.insert(
            "response".to_string(),
            relation
                .clone()
                .with_dash("6,3")
                .with_arrowhead("arrowhead"),
        );

        for kind in Cardinality::ALL {
            styles.insert(
                kind.name().to_string(),
                relation.clone().with_cardinality(kind),
            );
        }

        let mut arrowheads = IndexMap::new();
        for (id, color) in [
            ("arrowhead", "#6b7280"),
            ("arrowhead-error", "#ef4444"),
            ("arrowhead-data", "#3b82f6"),
        ] {
            arrowheads.insert(id.to_string(), Arrowhead::new(id, c(color)));
        }

        Self {
            styles,
            arrowheads,
            fallback: flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_styles() {
        let catalog = EdgeStyleCatalog::default();

        let data = catalog.style_of("data");
        assert_eq!(data.stroke().width(), 3.0);
        assert_eq!(data.stroke().color(), Color::new("#3b82f6").unwrap());
        assert_eq!(data.arrowhead(), Some("arrowhead-data"));
        assert_eq!(data.dash_array(), None);

        let error = catalog.style_of("error");
        assert_eq!(error.stroke().width(), 2.5);
        assert_eq!(error.arrowhead(), Some("arrowhead-error"));

        assert_eq!(
            catalog.style_of("async").dash_array().as_deref(),
            Some("4,4")
        );
        assert_eq!(
            catalog.style_of("dependency").dash_array().as_deref(),
            Some("6,3")
        );
        assert_eq!(catalog.style_of("association").arrowhead(), None);
    }

    #[test]
    fn test_default_routing_is_smooth() {
        let catalog = EdgeStyleCatalog::default();
        for edge_type in ["flow", "conditional", "data", "async", "error", "dependency"] {
            assert_eq!(catalog.style_of(edge_type).routing(), RoutingMode::Smooth);
        }
        assert_eq!(
            catalog.style_of("one-to-many").routing(),
            RoutingMode::Straight
        );
        assert_eq!(catalog.style_of("message").routing(), RoutingMode::Straight);
    }

    #[test]
    fn test_unknown_type_uses_flow() {
        let catalog = EdgeStyleCatalog::default();
        assert_eq!(catalog.style_of("teleport"), catalog.style_of("flow"));
        assert_eq!(catalog.style_of(""), catalog.style_of("flow"));
    }

    #[test]
    fn test_relation_styles_carry_cardinality() {
        let catalog = EdgeStyleCatalog::default();
        for kind in Cardinality::ALL {
            let style = catalog.style_of(kind.name());
            assert_eq!(style.cardinality(), Some(kind));
            assert_eq!(style.arrowhead(), None);
            assert_eq!(style.stroke().color(), Color::new("#374151").unwrap());
        }
        assert_eq!(catalog.style_of("flow").cardinality(), None);
    }

    #[test]
    fn test_relationship_of() {
        let symbols = |kind| {
            let rel = EdgeStyleCatalog::relationship_of(kind);
            (rel.source().glyph(), rel.target().glyph())
        };
        assert_eq!(symbols(Cardinality::OneToOne), ('|', '|'));
        assert_eq!(symbols(Cardinality::OneToMany), ('|', '<'));
        assert_eq!(symbols(Cardinality::ManyToOne), ('<', '|'));
        assert_eq!(symbols(Cardinality::ManyToMany), ('<', '<'));
    }

    #[test]
    fn test_builtin_arrowheads() {
        let catalog = EdgeStyleCatalog::default();
        let ids: Vec<_> = catalog.arrowheads().map(Arrowhead::id).collect();
        assert_eq!(ids, ["arrowhead", "arrowhead-error", "arrowhead-data"]);
        assert_eq!(
            catalog.arrowhead("arrowhead-error").unwrap().color(),
            Color::new("#ef4444").unwrap()
        );

        // Every built-in style references a registered marker.
        for edge_type in catalog.types() {
            if let Some(id) = catalog.style_of(edge_type).arrowhead() {
                assert!(catalog.arrowhead(id).is_some(), "{edge_type} -> {id}");
            }
        }
    }

    #[test]
    fn test_apply_override() {
        let mut catalog = EdgeStyleCatalog::default();
        catalog
            .apply(
                "flow",
                &EdgeOverride {
                    routing: Some(RoutingMode::Orthogonal),
                    dash: Some("2,2".to_string()),
                    arrowhead: Some("none".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let flow = catalog.style_of("flow");
        assert_eq!(flow.routing(), RoutingMode::Orthogonal);
        assert_eq!(flow.dash_array().as_deref(), Some("2,2"));
        assert_eq!(flow.arrowhead(), None);
    }

    #[test]
    fn test_apply_override_unknown_arrowhead() {
        let mut catalog = EdgeStyleCatalog::default();
        let err = catalog
            .apply(
                "flow",
                &EdgeOverride {
                    arrowhead: Some("arrowhead-missing".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            CatalogError::UnknownArrowhead {
                edge_type: "flow".to_string(),
                arrowhead: "arrowhead-missing".to_string(),
            }
        );
        assert_eq!(catalog.style_of("flow").arrowhead(), Some("arrowhead"));
    }

    #[test]
    fn test_registered_arrowhead_can_be_referenced() {
        let mut catalog = EdgeStyleCatalog::default();
        let teal = Color::new("#14b8a6").unwrap();
        catalog.insert_arrowhead(Arrowhead::new("arrowhead-teal", teal));

        catalog
            .apply(
                "message",
                &EdgeOverride {
                    stroke: Some(teal),
                    arrowhead: Some("arrowhead-teal".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(catalog.arrowhead("arrowhead-teal").map(Arrowhead::color), Some(teal));
        assert_eq!(catalog.style_of("message").arrowhead(), Some("arrowhead-teal"));
    }

    #[test]
    fn test_routing_mode_parse() {
        assert_eq!(
            "orthogonal".parse::<RoutingMode>().unwrap(),
            RoutingMode::Orthogonal
        );
        assert!("zigzag".parse::<RoutingMode>().is_err());

        let mode: RoutingMode = serde_json::from_str(r#""curved""#).unwrap();
        assert_eq!(mode, RoutingMode::Curved);
        assert_eq!(serde_json::to_string(&mode).unwrap(), r#""curved""#);
    }

    #[test]
    fn test_cardinality_parse() {
        assert_eq!(
            "many-to-one".parse::<Cardinality>().unwrap(),
            Cardinality::ManyToOne
        );
        assert!("some-to-some".parse::<Cardinality>().is_err());
    }
}
