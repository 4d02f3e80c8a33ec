//! Geometric primitives used for diagram placement and routing.
//!
//! - [`Point`] - a 2D coordinate in diagram space
//! - [`Size`] - width and height of a node or box
//! - [`Bounds`] - an axis-aligned box stored as min/max corners
//! - [`Insets`] - per-side padding
//!
//! Diagram space follows SVG conventions:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Node positions in a document name the top-left corner of the node box.

use serde::{Deserialize, Serialize};

/// A position in diagram space.
///
/// # Examples
///
/// ```
/// # use trellis_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 20.0);
///
/// assert_eq!(a.midpoint(b), Point::new(20.0, 20.0));
/// assert_eq!(a.distance(b), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate.
    pub fn y(self) -> f32 {
        self.y
    }

    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both coordinates are zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Component-wise addition.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Component-wise subtraction (`self - other`).
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
        }
    }

    /// Returns the vector scaled to unit length, or `None` for the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Point;
    /// let unit = Point::new(3.0, 4.0).normalize().unwrap();
    /// assert_eq!(unit, Point::new(0.6, 0.8));
    ///
    /// assert!(Point::default().normalize().is_none());
    /// ```
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        if length <= f32::EPSILON {
            return None;
        }
        Some(Self {
            x: self.x / length,
            y: self.y / length,
        })
    }

    /// Rotates the vector by 90 degrees: `(x, y)` becomes `(-y, x)`.
    ///
    /// In diagram space (Y down) this turns a rightward vector downward.
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Angle of the vector from `self` toward `other`, in degrees.
    ///
    /// Measured clockwise from +X because Y grows downward; this matches the
    /// SVG `rotate()` transform.
    pub fn angle_to_degrees(self, other: Point) -> f32 {
        let delta = other.sub_point(self);
        delta.y.atan2(delta.x).to_degrees()
    }

    /// Treats the point as a center and builds bounds of the given size around it.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows the size by the horizontal and vertical sums of `insets`.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Half the width and half the height, as a vector.
    pub fn half_extent(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned box described by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds of `size` centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half = size.half_extent();
        Self {
            min_x: center.x - half.x,
            min_y: center.y - half.y,
            max_x: center.x + half.x,
            max_y: center.y + half.y,
        }
    }

    /// Creates bounds of `size` whose top-left corner is `top_left`.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Top-left corner.
    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns `true` if `point` lies inside or on the edge of the bounds.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Smallest bounds enclosing both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Bounds, Point, Size};
    /// let start = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(60.0, 60.0));
    /// let action = Bounds::new_from_top_left(Point::new(300.0, 80.0), Size::new(140.0, 50.0));
    ///
    /// let both = start.merge(&action);
    /// assert_eq!(both.min_point(), Point::new(100.0, 80.0));
    /// assert_eq!(both.width(), 340.0);
    /// assert_eq!(both.height(), 80.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Folds an iterator of bounds into their union, `None` when empty.
    pub fn union_all(bounds: impl IntoIterator<Item = Bounds>) -> Option<Self> {
        bounds.into_iter().reduce(|acc, b| acc.merge(&b))
    }

    /// Moves the bounds by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grows the bounds outward by `insets` on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }

    /// Keeps the top-left corner and grows width and height to at least `minimum`.
    pub fn with_min_size(&self, minimum: Size) -> Self {
        Self {
            max_x: self.min_x + self.width().max(minimum.width),
            max_y: self.min_y + self.height().max(minimum.height),
            ..*self
        }
    }
}

/// Spacing around an element, one value per side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (point_strategy(), 1.0f32..500.0, 1.0f32..500.0)
            .prop_map(|(p, w, h)| Bounds::new_from_top_left(p, Size::new(w, h)))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// A normalized non-zero vector always has unit length.
    fn check_normalize_has_unit_length(p: Point) -> Result<(), TestCaseError> {
        prop_assume!(p.hypot() > 0.01);
        let unit = p.normalize().expect("non-zero vector");
        prop_assert!(approx_eq!(f32, unit.hypot(), 1.0, epsilon = 0.0001));
        Ok(())
    }

    /// The perpendicular vector is orthogonal and keeps its length.
    fn check_perpendicular_is_orthogonal(p: Point) -> Result<(), TestCaseError> {
        let perp = p.perpendicular();
        let dot = p.x() * perp.x() + p.y() * perp.y();
        prop_assert!(approx_eq!(f32, dot, 0.0, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, perp.hypot(), p.hypot(), epsilon = 0.01));
        Ok(())
    }

    /// The merged bounds enclose both inputs, whatever their order.
    fn check_merge_encloses_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        prop_assert_eq!(merged, b.merge(&a));
        for input in [a, b] {
            prop_assert!(merged.contains(input.min_point()));
            prop_assert!(merged.contains(Point::new(input.max_x(), input.max_y())));
        }
        Ok(())
    }

    /// Growing to a minimum size never shrinks and never moves the origin.
    fn check_min_size_never_shrinks(b: Bounds, w: f32, h: f32) -> Result<(), TestCaseError> {
        let grown = b.with_min_size(Size::new(w, h));
        prop_assert_eq!(grown.min_point(), b.min_point());
        prop_assert!(grown.width() >= b.width() && grown.width() >= w - 0.001);
        prop_assert!(grown.height() >= b.height() && grown.height() >= h - 0.001);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn normalize_has_unit_length(p in point_strategy()) {
            check_normalize_has_unit_length(p)?;
        }

        #[test]
        fn perpendicular_is_orthogonal(p in point_strategy()) {
            check_perpendicular_is_orthogonal(p)?;
        }

        #[test]
        fn merge_encloses_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_encloses_both(a, b)?;
        }

        #[test]
        fn min_size_never_shrinks(b in bounds_strategy(), w in 0.0f32..2000.0, h in 0.0f32..2000.0) {
            check_min_size_never_shrinks(b, w, h)?;
        }
    }
}
