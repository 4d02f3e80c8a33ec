//! Host-independent drawing primitives.
//!
//! A [`Primitive`] is pure geometry; a [`Paint`] says how to fill and stroke
//! it. Drawing surfaces turn the pair into concrete elements (SVG tags, canvas
//! calls). [`ShapePart`] bundles both for multi-part node outlines.

use crate::{
    color::Color,
    draw::{PathData, StrokeDefinition},
    geometry::{Bounds, Point},
};

/// A piece of geometry in diagram (or node-local) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { bounds: Bounds, corner_radius: f32 },
    Circle { center: Point, radius: f32 },
    Ellipse { center: Point, radius_x: f32, radius_y: f32 },
    Polygon { points: Vec<Point> },
    Line { from: Point, to: Point },
    Path { data: PathData },
}

impl Primitive {
    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        match self {
            Self::Rect {
                bounds,
                corner_radius,
            } => Self::Rect {
                bounds: bounds.translate(offset),
                corner_radius: *corner_radius,
            },
            Self::Circle { center, radius } => Self::Circle {
                center: center.add_point(offset),
                radius: *radius,
            },
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => Self::Ellipse {
                center: center.add_point(offset),
                radius_x: *radius_x,
                radius_y: *radius_y,
            },
            Self::Polygon { points } => Self::Polygon {
                points: points.iter().map(|p| p.add_point(offset)).collect(),
            },
            Self::Line { from, to } => Self::Line {
                from: from.add_point(offset),
                to: to.add_point(offset),
            },
            Self::Path { data } => Self::Path {
                data: data.translate(offset),
            },
        }
    }

    /// Short tag name, matching the SVG element it maps to.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Polygon { .. } => "polygon",
            Self::Line { .. } => "line",
            Self::Path { .. } => "path",
        }
    }
}

/// Fill and stroke of a primitive. `None` means "not painted".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Paint {
    pub fn new(fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self { fill, stroke }
    }

    /// Filled and outlined.
    pub fn filled(fill: Color, stroke: StrokeDefinition) -> Self {
        Self::new(Some(fill), Some(stroke))
    }

    /// Outline only; the interior stays transparent.
    pub fn outline(stroke: StrokeDefinition) -> Self {
        Self::new(None, Some(stroke))
    }

    /// Fill only.
    pub fn solid(fill: Color) -> Self {
        Self::new(Some(fill), None)
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

/// One painted primitive of a composite outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePart {
    primitive: Primitive,
    paint: Paint,
}

impl ShapePart {
    pub fn new(primitive: Primitive, paint: Paint) -> Self {
        Self { primitive, paint }
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            primitive: self.primitive.translate(offset),
            paint: self.paint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Size;

    use super::*;

    #[test]
    fn test_primitive_translate() {
        let offset = Point::new(10.0, 20.0);

        let rect = Primitive::Rect {
            bounds: Bounds::new_from_top_left(Point::default(), Size::new(5.0, 5.0)),
            corner_radius: 8.0,
        };
        match rect.translate(offset) {
            Primitive::Rect {
                bounds,
                corner_radius,
            } => {
                assert_eq!(bounds.min_point(), offset);
                assert_eq!(corner_radius, 8.0);
            }
            other => panic!("unexpected primitive: {other:?}"),
        }

        let polygon = Primitive::Polygon {
            points: vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
        };
        assert_eq!(
            polygon.translate(offset),
            Primitive::Polygon {
                points: vec![Point::new(11.0, 21.0), Point::new(12.0, 22.0)],
            }
        );
    }

    #[test]
    fn test_primitive_tags() {
        let line = Primitive::Line {
            from: Point::default(),
            to: Point::new(0.0, 8.0),
        };
        assert_eq!(line.tag(), "line");
        assert_eq!(
            Primitive::Path {
                data: PathData::new()
            }
            .tag(),
            "path"
        );
    }

    #[test]
    fn test_paint_constructors() {
        let stroke = StrokeDefinition::new(Color::new("#374151").unwrap(), 2.0);

        let outline = Paint::outline(stroke.clone());
        assert!(outline.fill().is_none());
        assert_eq!(outline.stroke(), Some(&stroke));

        let solid = Paint::solid(Color::new("#ffffff").unwrap());
        assert!(solid.stroke().is_none());
        assert!(solid.fill().is_some());
    }
}
