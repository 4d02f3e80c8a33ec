//! Registries that turn document type strings into visual styles.
//!
//! - [`ShapeCatalog`]: node `type` to shape family, size and colors
//! - [`EdgeStyleCatalog`]: edge `type` to stroke, arrowhead and routing
//!
//! Both lookups are total. Unknown node types resolve to the fallback
//! rectangle and unknown edge types to the `flow` style.

mod edge;
mod shape;

pub use edge::{
    Arrowhead, Cardinality, CatalogError, DEFAULT_EDGE_TYPE, EdgeOverride, EdgeStyle,
    EdgeStyleCatalog, Relationship, RoutingMode, Symbol,
};
pub use shape::{ShapeCatalog, ShapeOverride, ShapeSpec};
