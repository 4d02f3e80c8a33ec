//! Drawing vocabulary shared by the scene builder and drawing surfaces.
//!
//! Nothing here knows about a document; these types describe what to paint
//! and in which layer, leaving the "how" to a drawing surface.

mod layer;
mod path;
mod primitive;
mod shape;
mod stroke;
mod text;
mod theme;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use path::{PathCommand, PathData};
pub use primitive::{Paint, Primitive, ShapePart};
pub use shape::{ENTITY_HEADER_HEIGHT, ShapeKind};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{LabelMetrics, TextAnchor, TextDefinition};
pub use theme::{GroupPalette, Theme};
