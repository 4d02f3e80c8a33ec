//! Scene composition.
//!
//! A [`Scene`] is the fully positioned, fully styled content of one document,
//! split into the four render layers. It holds no references into the
//! document, so it can outlive the builder and be compared between renders.

mod builder;
mod entity;

pub use builder::{ANNOTATION_SIZE, BuildPhase, SceneBuilder};
pub use entity::{EdgeEntity, GroupBox, Label, NodeBox, Scene};
