//! Node shape outlines.
//!
//! [`ShapeKind`] names the visual family of a node. [`ShapeKind::outline`]
//! expands a kind and a size into painted primitives in node-local
//! coordinates, with the node's top-left corner at the origin.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};

use crate::{
    color::Color,
    draw::{Paint, PathData, Primitive, ShapePart, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

/// Corner radius of plain rectangles.
const RECT_CORNER_RADIUS: f32 = 8.0;
/// Corner radius of state pills.
const ROUNDED_CORNER_RADIUS: f32 = 25.0;
/// Horizontal inset of the hexagon's left and right tips.
const HEXAGON_INSET: f32 = 15.0;
/// Horizontal skew of the parallelogram.
const PARALLELOGRAM_SKEW: f32 = 15.0;
/// Vertical radius of the cylinder caps.
const CYLINDER_CAP: f32 = 10.0;
const ENTITY_CORNER_RADIUS: f32 = 4.0;

/// Height of an entity header band; field rows start below it.
pub const ENTITY_HEADER_HEIGHT: f32 = 35.0;

/// Visual family of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Diamond,
    Hexagon,
    Cylinder,
    Parallelogram,
    RoundedRect,
    /// Rectangle with a tab on top.
    Page,
    /// Rectangle with a header band and divider.
    Entity,
    #[default]
    Rectangle,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Diamond => "diamond",
            Self::Hexagon => "hexagon",
            Self::Cylinder => "cylinder",
            Self::Parallelogram => "parallelogram",
            Self::RoundedRect => "rounded-rect",
            Self::Page => "page",
            Self::Entity => "entity",
            Self::Rectangle => "rectangle",
        }
    }

    /// Expands the shape into painted primitives for a node of `size`.
    ///
    /// ```
    /// # use trellis_core::color::Color;
    /// # use trellis_core::draw::{Primitive, ShapeKind, StrokeDefinition};
    /// # use trellis_core::geometry::Size;
    /// let border = StrokeDefinition::new(Color::new("#d97706").unwrap(), 2.0);
    /// let parts = ShapeKind::Diamond.outline(Size::new(100.0, 100.0), Color::new("#fef3c7").unwrap(), &border);
    ///
    /// assert_eq!(parts.len(), 1);
    /// assert!(matches!(parts[0].primitive(), Primitive::Polygon { points } if points.len() == 4));
    /// ```
    pub fn outline(&self, size: Size, fill: Color, border: &StrokeDefinition) -> Vec<ShapePart> {
        let w = size.width();
        let h = size.height();
        let body = Paint::filled(fill, border.clone());
        let rect = |top_left: Point, rect_size: Size, corner_radius: f32| Primitive::Rect {
            bounds: Bounds::new_from_top_left(top_left, rect_size),
            corner_radius,
        };

        match self {
            Self::Rectangle => vec![ShapePart::new(
                rect(Point::default(), size, RECT_CORNER_RADIUS),
                body,
            )],
            Self::RoundedRect => vec![ShapePart::new(
                rect(Point::default(), size, ROUNDED_CORNER_RADIUS),
                body,
            )],
            Self::Circle => vec![ShapePart::new(
                Primitive::Circle {
                    center: size.half_extent(),
                    radius: (w / 2.0 - 2.0).max(0.0),
                },
                body,
            )],
            Self::Diamond => vec![ShapePart::new(
                Primitive::Polygon {
                    points: vec![
                        Point::new(w / 2.0, 0.0),
                        Point::new(w, h / 2.0),
                        Point::new(w / 2.0, h),
                        Point::new(0.0, h / 2.0),
                    ],
                },
                body,
            )],
            Self::Hexagon => vec![ShapePart::new(
                Primitive::Polygon {
                    points: vec![
                        Point::new(HEXAGON_INSET, 0.0),
                        Point::new(w - HEXAGON_INSET, 0.0),
                        Point::new(w, h / 2.0),
                        Point::new(w - HEXAGON_INSET, h),
                        Point::new(HEXAGON_INSET, h),
                        Point::new(0.0, h / 2.0),
                    ],
                },
                body,
            )],
            Self::Parallelogram => vec![ShapePart::new(
                Primitive::Polygon {
                    points: vec![
                        Point::new(PARALLELOGRAM_SKEW, 0.0),
                        Point::new(w, 0.0),
                        Point::new(w - PARALLELOGRAM_SKEW, h),
                        Point::new(0.0, h),
                    ],
                },
                body,
            )],
            Self::Cylinder => {
                let bottom = PathData::new()
                    .move_to(Point::new(0.0, h - CYLINDER_CAP))
                    .quad_to(
                        Point::new(w / 2.0, h + CYLINDER_CAP),
                        Point::new(w, h - CYLINDER_CAP),
                    );
                vec![
                    ShapePart::new(
                        rect(
                            Point::new(0.0, CYLINDER_CAP),
                            Size::new(w, (h - 2.0 * CYLINDER_CAP).max(0.0)),
                            0.0,
                        ),
                        body.clone(),
                    ),
                    ShapePart::new(
                        Primitive::Ellipse {
                            center: Point::new(w / 2.0, CYLINDER_CAP),
                            radius_x: w / 2.0,
                            radius_y: CYLINDER_CAP,
                        },
                        body,
                    ),
                    ShapePart::new(
                        Primitive::Path { data: bottom },
                        Paint::outline(border.clone()),
                    ),
                ]
            }
            Self::Page => vec![
                ShapePart::new(
                    rect(
                        Point::new(10.0, -8.0),
                        Size::new((w - 20.0).max(0.0), 10.0),
                        4.0,
                    ),
                    body.clone(),
                ),
                ShapePart::new(rect(Point::default(), size, RECT_CORNER_RADIUS), body),
            ],
            Self::Entity => vec![
                ShapePart::new(rect(Point::default(), size, ENTITY_CORNER_RADIUS), body),
                ShapePart::new(
                    rect(
                        Point::default(),
                        Size::new(w, ENTITY_HEADER_HEIGHT.min(h)),
                        ENTITY_CORNER_RADIUS,
                    ),
                    Paint::solid(Color::builtin("#ccfbf1")),
                ),
                ShapePart::new(
                    Primitive::Line {
                        from: Point::new(0.0, ENTITY_HEADER_HEIGHT),
                        to: Point::new(w, ENTITY_HEADER_HEIGHT),
                    },
                    Paint::outline(border.clone()),
                ),
            ],
        }
    }

    /// Baseline position of the node's main label, node-local.
    pub fn label_anchor(&self, size: Size) -> Point {
        match self {
            Self::Entity => Point::new(size.width() / 2.0, ENTITY_HEADER_HEIGHT / 2.0 + 6.0),
            _ => Point::new(size.width() / 2.0, size.height() / 2.0 + 5.0),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            "hexagon" => Ok(Self::Hexagon),
            "cylinder" => Ok(Self::Cylinder),
            "parallelogram" => Ok(Self::Parallelogram),
            "rounded-rect" | "rounded" => Ok(Self::RoundedRect),
            "page" => Ok(Self::Page),
            "entity" => Ok(Self::Entity),
            "rectangle" => Ok(Self::Rectangle),
            _ => Err(format!(
                "invalid shape `{s}`, valid values: circle, diamond, hexagon, cylinder, \
                 parallelogram, rounded-rect, page, entity, rectangle"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border() -> StrokeDefinition {
        StrokeDefinition::new(Color::new("#4f46e5").unwrap(), 2.0)
    }

    fn fill() -> Color {
        Color::new("#e0e7ff").unwrap()
    }

    #[test]
    fn test_rectangle_outline() {
        let parts = ShapeKind::Rectangle.outline(Size::new(140.0, 50.0), fill(), &border());
        assert_eq!(parts.len(), 1);
        match parts[0].primitive() {
            Primitive::Rect {
                bounds,
                corner_radius,
            } => {
                assert_eq!(bounds.to_size(), Size::new(140.0, 50.0));
                assert_eq!(*corner_radius, 8.0);
            }
            other => panic!("unexpected primitive: {other:?}"),
        }
        assert_eq!(parts[0].paint().fill(), Some(fill()));
    }

    #[test]
    fn test_circle_outline_insets_radius() {
        let parts = ShapeKind::Circle.outline(Size::new(60.0, 60.0), fill(), &border());
        assert_eq!(
            parts[0].primitive(),
            &Primitive::Circle {
                center: Point::new(30.0, 30.0),
                radius: 28.0,
            }
        );
    }

    #[test]
    fn test_hexagon_outline() {
        let parts = ShapeKind::Hexagon.outline(Size::new(160.0, 50.0), fill(), &border());
        match parts[0].primitive() {
            Primitive::Polygon { points } => {
                assert_eq!(points.len(), 6);
                assert_eq!(points[0], Point::new(15.0, 0.0));
                assert_eq!(points[2], Point::new(160.0, 25.0));
            }
            other => panic!("unexpected primitive: {other:?}"),
        }
    }

    #[test]
    fn test_cylinder_outline_has_open_bottom_arc() {
        let parts = ShapeKind::Cylinder.outline(Size::new(120.0, 70.0), fill(), &border());
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2].primitive().tag(), "path");
        assert!(parts[2].paint().fill().is_none());

        match parts[2].primitive() {
            Primitive::Path { data } => assert_eq!(data.to_string(), "M 0 60 Q 60 80, 120 60"),
            other => panic!("unexpected primitive: {other:?}"),
        }
    }

    #[test]
    fn test_entity_outline_has_header_divider() {
        let parts = ShapeKind::Entity.outline(Size::new(180.0, 100.0), fill(), &border());
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[2].primitive(),
            &Primitive::Line {
                from: Point::new(0.0, 35.0),
                to: Point::new(180.0, 35.0),
            }
        );
    }

    #[test]
    fn test_page_outline_tab_above_body() {
        let parts = ShapeKind::Page.outline(Size::new(140.0, 60.0), fill(), &border());
        match parts[0].primitive() {
            Primitive::Rect { bounds, .. } => {
                assert_eq!(bounds.min_point(), Point::new(10.0, -8.0));
                assert_eq!(bounds.width(), 120.0);
            }
            other => panic!("unexpected primitive: {other:?}"),
        }
    }

    #[test]
    fn test_label_anchor() {
        let size = Size::new(140.0, 50.0);
        assert_eq!(
            ShapeKind::Rectangle.label_anchor(size),
            Point::new(70.0, 30.0)
        );
        assert_eq!(
            ShapeKind::Entity.label_anchor(Size::new(180.0, 100.0)),
            Point::new(90.0, 23.5)
        );
    }

    #[test]
    fn test_shape_kind_from_str() {
        assert_eq!("rounded".parse::<ShapeKind>().unwrap(), ShapeKind::RoundedRect);
        assert_eq!(
            "rounded-rect".parse::<ShapeKind>().unwrap(),
            ShapeKind::RoundedRect
        );
        assert_eq!("page".parse::<ShapeKind>().unwrap(), ShapeKind::Page);
        assert!("blob".parse::<ShapeKind>().is_err());

        for kind in [ShapeKind::Circle, ShapeKind::Cylinder, ShapeKind::Entity] {
            assert_eq!(kind.name().parse::<ShapeKind>().unwrap(), kind);
        }
    }
}
