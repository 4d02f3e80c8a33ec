//! Geometry engine: pure coordinate math over positioned nodes.
//!
//! Nodes are positioned by the document (top-left anchor); nothing here moves
//! them. This module answers the questions a scene needs:
//!
//! - where a node sits and how large it is ([`node_bounds`], [`node_center`])
//! - where an edge touches a node's outline ([`connection_point`])
//! - how an edge travels between two points ([`edge_path`], [`EdgePath`])
//! - how large a group box or the whole canvas is ([`group_bounds`], [`diagram_bounds`])
//!
//! Every function is total. Unknown node types resolve through the catalog
//! fallback, coincident points produce degenerate but finite geometry.

mod bounds;
mod connection;
mod routing;

pub use bounds::{GROUP_LABEL_HEIGHT, GROUP_PADDING, diagram_bounds, group_bounds};
pub use connection::{
    CIRCLE_RADIUS, DIAMOND_HALF_SIZE, connection_point, node_bounds, node_center, node_size,
};
pub use routing::{
    CARDINALITY_OFFSET, CURVE_OFFSET, CardinalityMark, EdgePath, LOOP_SIZE, cardinality_marks,
    edge_path, self_loop,
};
