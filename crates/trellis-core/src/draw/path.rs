//! SVG path data.
//!
//! [`PathData`] is an ordered list of absolute path commands. It renders to
//! the `d` attribute syntax used throughout the diagram (`M x y L x y`,
//! `C x1 y1, x2 y2, x y`, `Q cx cy, x y`).

use std::fmt;

use crate::geometry::Point;

/// A single absolute path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic bezier: two control points, then the end point.
    CubicTo(Point, Point, Point),
    /// Quadratic bezier: control point, then the end point.
    QuadTo(Point, Point),
}

impl PathCommand {
    /// End point of the command.
    pub fn end(&self) -> Point {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::CubicTo(_, _, p) | Self::QuadTo(_, p) => p,
        }
    }
}

/// An SVG path built from absolute commands.
///
/// ```
/// # use trellis_core::draw::PathData;
/// # use trellis_core::geometry::Point;
/// let data = PathData::new()
///     .move_to(Point::new(0.0, 0.0))
///     .line_to(Point::new(100.0, 0.0));
///
/// assert_eq!(data.to_string(), "M 0 0 L 100 0");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn cubic_to(mut self, control1: Point, control2: Point, end: Point) -> Self {
        self.commands
            .push(PathCommand::CubicTo(control1, control2, end));
        self
    }

    pub fn quad_to(mut self, control: Point, end: Point) -> Self {
        self.commands.push(PathCommand::QuadTo(control, end));
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns a copy with every point moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        let shift = |p: Point| p.add_point(offset);
        let commands = self
            .commands
            .iter()
            .map(|command| match *command {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(shift(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(shift(p)),
                PathCommand::CubicTo(c1, c2, p) => {
                    PathCommand::CubicTo(shift(c1), shift(c2), shift(p))
                }
                PathCommand::QuadTo(c, p) => PathCommand::QuadTo(shift(c), shift(p)),
            })
            .collect();
        Self { commands }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x(), p.y())?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x(), p.y())?,
                PathCommand::CubicTo(c1, c2, p) => write!(
                    f,
                    "C {} {}, {} {}, {} {}",
                    c1.x(),
                    c1.y(),
                    c2.x(),
                    c2.y(),
                    p.x(),
                    p.y()
                )?,
                PathCommand::QuadTo(c, p) => {
                    write!(f, "Q {} {}, {} {}", c.x(), c.y(), p.x(), p.y())?
                }
            }
        }
        Ok(())
    }
}
