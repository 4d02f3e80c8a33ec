//! Node placement and shape-aware boundary intersection.

use trellis_core::{
    catalog::ShapeCatalog,
    document::Node,
    draw::ShapeKind,
    geometry::{Bounds, Point, Size},
};

/// Radius used for edges attaching to circle nodes.
pub const CIRCLE_RADIUS: f32 = 30.0;

/// Half extent used for edges attaching to diamond nodes.
///
/// Fixed, independent of the node's configured size.
pub const DIAMOND_HALF_SIZE: f32 = 50.0;

const EPSILON: f32 = 1e-6;

/// Size of `node` according to its catalog entry.
pub fn node_size(catalog: &ShapeCatalog, node: &Node) -> Size {
    catalog.shape_of(node.node_type()).size()
}

/// Box of `node` in diagram space.
pub fn node_bounds(catalog: &ShapeCatalog, node: &Node) -> Bounds {
    Bounds::new_from_top_left(node.position(), node_size(catalog, node))
}

/// `position + size / 2`.
pub fn node_center(catalog: &ShapeCatalog, node: &Node) -> Point {
    node.position()
        .add_point(node_size(catalog, node).half_extent())
}

/// Point where the ray from `from` toward `toward` leaves a node outline.
///
/// `from` is the node's center. Circles use [`CIRCLE_RADIUS`]; diamonds snap
/// to the corner on the dominant axis at [`DIAMOND_HALF_SIZE`]; every other
/// shape is treated as its bounding rectangle. Coincident points return
/// `from` unchanged.
///
/// # Examples
///
/// ```
/// # use trellis::layout::connection_point;
/// # use trellis_core::draw::ShapeKind;
/// # use trellis_core::geometry::{Point, Size};
/// let point = connection_point(
///     Point::new(100.0, 100.0),
///     Point::new(300.0, 100.0),
///     Size::new(60.0, 60.0),
///     ShapeKind::Circle,
/// );
/// assert_eq!(point, Point::new(130.0, 100.0));
/// ```
pub fn connection_point(from: Point, toward: Point, size: Size, kind: ShapeKind) -> Point {
    let delta = toward.sub_point(from);
    let (dx, dy) = (delta.x(), delta.y());

    if dx.abs() < EPSILON && dy.abs() < EPSILON {
        return from;
    }

    match kind {
        ShapeKind::Circle => match delta.normalize() {
            Some(direction) => from.add_point(direction.scale(CIRCLE_RADIUS)),
            None => from,
        },
        ShapeKind::Diamond => {
            if dx.abs() > dy.abs() {
                from.add_point(Point::new(DIAMOND_HALF_SIZE.copysign(dx), 0.0))
            } else {
                from.add_point(Point::new(0.0, DIAMOND_HALF_SIZE.copysign(dy)))
            }
        }
        _ => rectangle_intersection(from, dx, dy, size),
    }
}

fn rectangle_intersection(center: Point, dx: f32, dy: f32, size: Size) -> Point {
    let half_width = size.width() / 2.0;
    let half_height = size.height() / 2.0;

    if dx.abs() * half_height > dy.abs() * half_width {
        // Left or right side.
        let x = half_width.copysign(dx);
        let y = dy / dx.abs() * half_width;
        center.add_point(Point::new(x, y))
    } else if dy.abs() >= EPSILON {
        // Top or bottom side.
        let x = dx / dy.abs() * half_height;
        let y = half_height.copysign(dy);
        center.add_point(Point::new(x, y))
    } else {
        // Zero-height box hit side-on.
        center.add_point(Point::new(half_width.copysign(dx), 0.0))
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1.0f32..400.0, 1.0f32..400.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Rectangle connection points lie on the box outline.
    fn check_rectangle_point_on_outline(
        center: Point,
        toward: Point,
        size: Size,
    ) -> Result<(), TestCaseError> {
        prop_assume!(center.distance(toward) > 0.01);

        let point = connection_point(center, toward, size, ShapeKind::Rectangle);
        let local = point.sub_point(center).abs();
        let half = size.half_extent();
        let tolerance = 0.01;

        prop_assert!(local.x() <= half.x() + tolerance);
        prop_assert!(local.y() <= half.y() + tolerance);
        let on_vertical_side = (local.x() - half.x()).abs() <= tolerance;
        let on_horizontal_side = (local.y() - half.y()).abs() <= tolerance;
        prop_assert!(on_vertical_side || on_horizontal_side);
        Ok(())
    }

    /// The connection point lies on the ray from the center toward the target.
    fn check_rectangle_point_on_ray(
        center: Point,
        toward: Point,
        size: Size,
    ) -> Result<(), TestCaseError> {
        prop_assume!(center.distance(toward) > 1.0);

        let point = connection_point(center, toward, size, ShapeKind::Rectangle);
        let ray = toward.sub_point(center);
        let offset = point.sub_point(center);

        // Same direction: cross product ~0 and dot product >= 0.
        let cross = ray.x() * offset.y() - ray.y() * offset.x();
        let dot = ray.x() * offset.x() + ray.y() * offset.y();
        prop_assert!(cross.abs() <= 0.01 * ray.hypot() * offset.hypot().max(1.0));
        prop_assert!(dot >= -0.01);
        Ok(())
    }

    /// Circle connection points sit at the fixed radius.
    fn check_circle_point_at_radius(center: Point, toward: Point) -> Result<(), TestCaseError> {
        prop_assume!(center.distance(toward) > 0.01);

        let point = connection_point(center, toward, Size::new(60.0, 60.0), ShapeKind::Circle);
        prop_assert!((point.distance(center) - CIRCLE_RADIUS).abs() < 0.01);
        Ok(())
    }

    proptest! {
        #[test]
        fn rectangle_point_on_outline(
            center in point_strategy(),
            toward in point_strategy(),
            size in size_strategy(),
        ) {
            check_rectangle_point_on_outline(center, toward, size)?;
        }

        #[test]
        fn rectangle_point_on_ray(
            center in point_strategy(),
            toward in point_strategy(),
            size in size_strategy(),
        ) {
            check_rectangle_point_on_ray(center, toward, size)?;
        }

        #[test]
        fn circle_point_at_radius(center in point_strategy(), toward in point_strategy()) {
            check_circle_point_at_radius(center, toward)?;
        }
    }
}
