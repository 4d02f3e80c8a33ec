//! Edge routing.
//!
//! [`edge_path`] turns two connection points and a [`RoutingMode`] into an
//! [`EdgePath`]. Self-referencing edges bypass routing and use [`self_loop`].
//! ER relations additionally get two [`CardinalityMark`]s near their ends.

use trellis_core::{
    catalog::{Relationship, RoutingMode, Symbol},
    draw::PathData,
    geometry::{Point, Size},
};

/// Perpendicular offset of the quadratic control point for curved edges.
pub const CURVE_OFFSET: f32 = 30.0;

/// Reach of a self loop beyond the node's right side.
pub const LOOP_SIZE: f32 = 40.0;

/// Distance of a cardinality mark from its endpoint.
pub const CARDINALITY_OFFSET: f32 = 20.0;

/// Vertical gap between the two ends of a self loop.
const LOOP_END_DROP: f32 = 20.0;

/// Geometry of one routed edge in diagram space.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgePath {
    Straight {
        start: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
    Quadratic {
        start: Point,
        control: Point,
        end: Point,
    },
    /// Start, two bends, end.
    Orthogonal {
        points: [Point; 4],
    },
    /// Cubic curve leaving and re-entering the same node.
    Loop {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match self {
            Self::Straight { start, .. }
            | Self::Cubic { start, .. }
            | Self::Quadratic { start, .. }
            | Self::Loop { start, .. } => *start,
            Self::Orthogonal { points } => points[0],
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Straight { end, .. }
            | Self::Cubic { end, .. }
            | Self::Quadratic { end, .. }
            | Self::Loop { end, .. } => *end,
            Self::Orthogonal { points } => points[3],
        }
    }

    /// Point halfway along the path, where edge labels are placed.
    ///
    /// Curves are evaluated at `t = 0.5`; orthogonal paths use the middle of
    /// their middle segment.
    pub fn midpoint(&self) -> Point {
        match self {
            Self::Straight { start, end } => start.midpoint(*end),
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            }
            | Self::Loop {
                start,
                control1,
                control2,
                end,
            } => start
                .add_point(control1.scale(3.0))
                .add_point(control2.scale(3.0))
                .add_point(*end)
                .scale(0.125),
            Self::Quadratic {
                start,
                control,
                end,
            } => start
                .add_point(control.scale(2.0))
                .add_point(*end)
                .scale(0.25),
            Self::Orthogonal { points } => points[1].midpoint(points[2]),
        }
    }

    /// Control points of curved paths, empty for polylines.
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Self::Cubic {
                control1, control2, ..
            }
            | Self::Loop {
                control1, control2, ..
            } => vec![*control1, *control2],
            Self::Quadratic { control, .. } => vec![*control],
            Self::Straight { .. } | Self::Orthogonal { .. } => Vec::new(),
        }
    }

    /// Line segments of polylines. Curves report their chord.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        match self {
            Self::Orthogonal { points } => points.windows(2).map(|w| (w[0], w[1])).collect(),
            _ => vec![(self.start(), self.end())],
        }
    }

    /// SVG path data for this edge.
    pub fn to_path_data(&self) -> PathData {
        let data = PathData::new().move_to(self.start());
        match self {
            Self::Straight { end, .. } => data.line_to(*end),
            Self::Cubic {
                control1,
                control2,
                end,
                ..
            }
            | Self::Loop {
                control1,
                control2,
                end,
                ..
            } => data.cubic_to(*control1, *control2, *end),
            Self::Quadratic { control, end, .. } => data.quad_to(*control, *end),
            Self::Orthogonal { points } => points[1..]
                .iter()
                .fold(data, |data, point| data.line_to(*point)),
        }
    }
}

/// Routes an edge between two connection points.
///
/// # Examples
///
/// ```
/// # use trellis::layout::{edge_path, EdgePath};
/// # use trellis_core::catalog::RoutingMode;
/// # use trellis_core::geometry::Point;
/// let path = edge_path(Point::new(0.0, 0.0), Point::new(100.0, 0.0), RoutingMode::Orthogonal);
///
/// let segments = path.segments();
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].0.x(), 50.0);
/// ```
pub fn edge_path(source: Point, target: Point, mode: RoutingMode) -> EdgePath {
    let delta = target.sub_point(source);
    let horizontal = delta.x().abs() > delta.y().abs();
    let mid = source.midpoint(target);

    match mode {
        RoutingMode::Straight => EdgePath::Straight {
            start: source,
            end: target,
        },
        RoutingMode::Smooth => {
            let (control1, control2) = if horizontal {
                (source.with_x(mid.x()), target.with_x(mid.x()))
            } else {
                (source.with_y(mid.y()), target.with_y(mid.y()))
            };
            EdgePath::Cubic {
                start: source,
                control1,
                control2,
                end: target,
            }
        }
        RoutingMode::Curved => {
            let offset = delta
                .normalize()
                .map(|unit| unit.perpendicular().scale(CURVE_OFFSET))
                .unwrap_or_default();
            EdgePath::Quadratic {
                start: source,
                control: mid.add_point(offset),
                end: target,
            }
        }
        RoutingMode::Orthogonal => {
            let (bend1, bend2) = if horizontal {
                (source.with_x(mid.x()), target.with_x(mid.x()))
            } else {
                (source.with_y(mid.y()), target.with_y(mid.y()))
            };
            EdgePath::Orthogonal {
                points: [source, bend1, bend2, target],
            }
        }
    }
}

/// Loop for an edge whose source and target are the same node.
///
/// Leaves the middle of the node's right side and re-enters slightly below.
pub fn self_loop(center: Point, size: Size) -> EdgePath {
    let start = center.add_point(Point::new(size.width() / 2.0, 0.0));
    let end = start.add_point(Point::new(0.0, LOOP_END_DROP));

    EdgePath::Loop {
        start,
        control1: start.add_point(Point::new(LOOP_SIZE, -LOOP_SIZE)),
        control2: end.add_point(Point::new(LOOP_SIZE, LOOP_SIZE)),
        end,
    }
}

/// One ER notation glyph placed on an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardinalityMark {
    position: Point,
    angle: f32,
    symbol: Symbol,
}

impl CardinalityMark {
    /// Where the glyph's local origin sits.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Rotation of the glyph in degrees, aligned with the edge.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

/// Source and target marks of an ER relation drawn from `source` to `target`.
///
/// Marks sit [`CARDINALITY_OFFSET`] units inside each end, both rotated by the
/// source-to-target angle. Returns `None` when the ends coincide.
pub fn cardinality_marks(
    source: Point,
    target: Point,
    relationship: Relationship,
) -> Option<[CardinalityMark; 2]> {
    let step = target
        .sub_point(source)
        .normalize()?
        .scale(CARDINALITY_OFFSET);
    let angle = source.angle_to_degrees(target);

    Some([
        CardinalityMark {
            position: source.add_point(step),
            angle,
            symbol: relationship.source(),
        },
        CardinalityMark {
            position: target.sub_point(step),
            angle,
            symbol: relationship.target(),
        },
    ])
}
