//! Group boxes and canvas extent.

use trellis_core::geometry::{Bounds, Insets, Point, Size};

/// Space between a group's members and its outline.
pub const GROUP_PADDING: f32 = 30.0;

/// Extra space above a group's members reserved for its label.
pub const GROUP_LABEL_HEIGHT: f32 = 25.0;

/// Box enclosing `members`, padded on every side and taller on top.
///
/// Returns `None` when there are no members; such groups are not drawn.
///
/// ```
/// # use trellis::layout::{group_bounds, GROUP_LABEL_HEIGHT, GROUP_PADDING};
/// # use trellis_core::geometry::{Bounds, Point, Size};
/// let member = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(140.0, 50.0));
/// let group = group_bounds([member], GROUP_PADDING, GROUP_LABEL_HEIGHT).unwrap();
///
/// assert_eq!(group.min_point(), Point::new(70.0, 45.0));
/// assert_eq!(group.to_size(), Size::new(200.0, 135.0));
///
/// assert!(group_bounds([], GROUP_PADDING, GROUP_LABEL_HEIGHT).is_none());
/// ```
pub fn group_bounds(
    members: impl IntoIterator<Item = Bounds>,
    padding: f32,
    label_height: f32,
) -> Option<Bounds> {
    Bounds::union_all(members)
        .map(|content| content.add_padding(Insets::uniform(padding).with_top(padding + label_height)))
}

/// Canvas extent for a set of node boxes.
///
/// The origin is the content's top-left corner minus `padding`. Width and
/// height are `max(minimum, content + 2 * padding)`, so the canvas never
/// shrinks below the configured minimum. With no nodes the canvas is
/// `minimum` at the origin.
pub fn diagram_bounds(
    node_boxes: impl IntoIterator<Item = Bounds>,
    minimum: Size,
    padding: f32,
) -> Bounds {
    match Bounds::union_all(node_boxes) {
        Some(content) => content
            .add_padding(Insets::uniform(padding))
            .with_min_size(minimum),
        None => Bounds::new_from_top_left(Point::default(), minimum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_box(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_group_bounds_multiple_members() {
        let group = group_bounds(
            [node_box(0.0, 0.0, 140.0, 50.0), node_box(200.0, 100.0, 60.0, 60.0)],
            GROUP_PADDING,
            GROUP_LABEL_HEIGHT,
        )
        .unwrap();

        assert_eq!(group.min_x(), -30.0);
        assert_eq!(group.min_y(), -55.0);
        assert_eq!(group.max_x(), 290.0);
        assert_eq!(group.max_y(), 190.0);
    }

    #[test]
    fn test_group_bounds_empty() {
        assert!(group_bounds(Vec::new(), GROUP_PADDING, GROUP_LABEL_HEIGHT).is_none());
    }

    #[test]
    fn test_diagram_bounds_empty_uses_minimum() {
        let bounds = diagram_bounds(Vec::new(), Size::new(1200.0, 800.0), 50.0);
        assert_eq!(bounds.min_point(), Point::default());
        assert_eq!(bounds.to_size(), Size::new(1200.0, 800.0));
    }

    #[test]
    fn test_diagram_bounds_small_content_keeps_minimum() {
        let bounds = diagram_bounds(
            [node_box(100.0, 100.0, 140.0, 50.0)],
            Size::new(1200.0, 800.0),
            50.0,
        );
        assert_eq!(bounds.min_point(), Point::new(50.0, 50.0));
        assert_eq!(bounds.to_size(), Size::new(1200.0, 800.0));
    }

    #[test]
    fn test_diagram_bounds_large_content_grows() {
        let bounds = diagram_bounds(
            [node_box(-100.0, 0.0, 140.0, 50.0), node_box(1500.0, 900.0, 120.0, 70.0)],
            Size::new(1200.0, 800.0),
            50.0,
        );
        assert_eq!(bounds.min_point(), Point::new(-150.0, -50.0));
        assert_eq!(bounds.width(), 1720.0 + 100.0);
        assert_eq!(bounds.height(), 970.0 + 100.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn node_box_strategy() -> impl Strategy<Value = Bounds> {
        (
            -2000.0f32..2000.0,
            -2000.0f32..2000.0,
            10.0f32..800.0,
            10.0f32..800.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn minimum_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..2000.0, 0.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Canvas is at least the configured minimum and at least the padded content.
    fn check_diagram_bounds_monotonic(
        boxes: Vec<Bounds>,
        minimum: Size,
        padding: f32,
    ) -> Result<(), TestCaseError> {
        let bounds = diagram_bounds(boxes.iter().copied(), minimum, padding);
        let tolerance = 0.01;

        prop_assert!(bounds.width() + tolerance >= minimum.width());
        prop_assert!(bounds.height() + tolerance >= minimum.height());

        if let Some(content) = Bounds::union_all(boxes) {
            prop_assert!(bounds.width() + tolerance >= content.width() + 2.0 * padding);
            prop_assert!(bounds.height() + tolerance >= content.height() + 2.0 * padding);
            prop_assert!((bounds.min_x() - (content.min_x() - padding)).abs() <= tolerance);
            prop_assert!((bounds.min_y() - (content.min_y() - padding)).abs() <= tolerance);
        }
        Ok(())
    }

    /// Every member box fits inside its group box.
    fn check_group_encloses_members(boxes: Vec<Bounds>) -> Result<(), TestCaseError> {
        let group = group_bounds(boxes.iter().copied(), GROUP_PADDING, GROUP_LABEL_HEIGHT);
        prop_assert_eq!(group.is_some(), !boxes.is_empty());

        if let Some(group) = group {
            for member in boxes {
                prop_assert!(group.min_x() <= member.min_x() - GROUP_PADDING + 0.01);
                prop_assert!(
                    group.min_y() <= member.min_y() - GROUP_PADDING - GROUP_LABEL_HEIGHT + 0.01
                );
                prop_assert!(group.max_x() >= member.max_x() + GROUP_PADDING - 0.01);
                prop_assert!(group.max_y() >= member.max_y() + GROUP_PADDING - 0.01);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn diagram_bounds_monotonic(
            boxes in prop::collection::vec(node_box_strategy(), 0..12),
            minimum in minimum_strategy(),
            padding in 0.0f32..200.0,
        ) {
            check_diagram_bounds_monotonic(boxes, minimum, padding)?;
        }

        #[test]
        fn group_encloses_members(boxes in prop::collection::vec(node_box_strategy(), 0..8)) {
            check_group_encloses_members(boxes)?;
        }
    }
}
