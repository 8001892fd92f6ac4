//! Tests for canvas points, rectangles, sizes and grid subdivision

#[cfg(test)]
mod tests {
    use blockraster::MoveError;
    use blockraster::spatial::geometry::{Orientation, Point, Shape, Size};

    fn shape(x0: i32, y0: i32, x1: i32, y1: i32) -> Shape {
        Shape::new(Point::new(x0, y0), Point::new(x1, y1)).expect("valid rectangle")
    }

    // Tests that degenerate rectangles are rejected
    // Verified by accepting low == high on one axis
    #[test]
    fn test_shape_rejects_zero_area() {
        for (low, high) in [
            (Point::new(0, 0), Point::new(0, 10)),
            (Point::new(0, 0), Point::new(10, 0)),
            (Point::new(5, 5), Point::new(2, 8)),
        ] {
            assert!(matches!(
                Shape::new(low, high),
                Err(MoveError::InvalidGeometry { .. })
            ));
        }
    }

    // Tests extents and area of a rectangle away from the origin
    // Verified by computing width from high.x alone
    #[test]
    fn test_shape_extents() {
        let s = shape(10, 20, 50, 30);
        assert_eq!(s.width(), 40);
        assert_eq!(s.height(), 10);
        assert_eq!(s.area(), 400);
        assert_eq!(s.size(), Size::new(40, 10));
    }

    // Tests that strict containment excludes every edge
    // Verified by using <= on the low edge
    #[test]
    fn test_contains_strictly_excludes_edges() {
        let s = shape(0, 0, 400, 400);
        assert!(s.contains_strictly(Point::new(200, 100)));
        assert!(!s.contains_strictly(Point::new(0, 0)));
        assert!(!s.contains_strictly(Point::new(400, 200)));
        assert!(!s.contains_strictly(Point::new(200, 0)));
        assert!(!s.contains_strictly(Point::new(200, 400)));
    }

    // Tests half-open pixel coverage
    // Verified by including the high edge
    #[test]
    fn test_contains_pixel_half_open() {
        let s = shape(0, 0, 2, 2);
        assert!(s.contains_pixel(Point::new(0, 0)));
        assert!(s.contains_pixel(Point::new(1, 1)));
        assert!(!s.contains_pixel(Point::new(2, 1)));
        assert!(!s.contains_pixel(Point::new(-1, 0)));
    }

    // Tests that touching rectangles do not intersect
    // Verified by using <= in the overlap test
    #[test]
    fn test_intersects() {
        let a = shape(0, 0, 10, 10);
        assert!(a.intersects(&shape(5, 5, 15, 15)));
        assert!(!a.intersects(&shape(10, 0, 20, 10)));
        assert!(!a.intersects(&shape(0, 10, 10, 20)));
    }

    // Tests that the center rounds toward the low corner
    // Verified by rounding the half extent up
    #[test]
    fn test_center_rounds_down() {
        assert_eq!(shape(0, 0, 400, 400).center(), Point::new(200, 200));
        assert_eq!(shape(0, 0, 5, 3).center(), Point::new(2, 1));
        assert_eq!(shape(10, 10, 13, 17).center(), Point::new(11, 13));
    }

    // Tests congruence ignores position
    // Verified by comparing low corners
    #[test]
    fn test_is_congruent() {
        assert!(shape(0, 0, 10, 20).is_congruent(&shape(30, 40, 40, 60)));
        assert!(!shape(0, 0, 10, 20).is_congruent(&shape(0, 0, 20, 10)));
    }

    // Tests that a 2x2 grid splits at the center, bottom row first
    // Verified by emitting cells column-major
    #[test]
    fn test_grid_order_and_bounds() {
        let cells = shape(0, 0, 400, 400).grid(2, 2);
        assert_eq!(
            cells,
            vec![
                shape(0, 0, 200, 200),
                shape(200, 0, 400, 200),
                shape(0, 200, 200, 400),
                shape(200, 200, 400, 400),
            ]
        );
    }

    // Tests that a grid finer than the rectangle skips empty cells
    // Verified by keeping zero-width cells
    #[test]
    fn test_grid_finer_than_shape() {
        let s = shape(0, 0, 2, 2);
        let cells = s.grid(4, 4);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells.iter().map(Shape::area).sum::<u64>(), s.area());
    }

    // Tests that canvas bounds reject a zero extent
    // Verified by skipping the rectangle check in bounds
    #[test]
    fn test_size_bounds() {
        assert_eq!(
            Size::new(400, 300).bounds().expect("non-empty"),
            shape(0, 0, 400, 300)
        );
        assert!(Size::new(0, 10).bounds().is_err());
        assert_eq!(Size::new(400, 300).area(), 120_000);
    }

    // Tests axis labels used by the move log
    // Verified by swapping the axis characters
    #[test]
    fn test_orientation_axis_labels() {
        assert_eq!(Orientation::Vertical.axis(), 'x');
        assert_eq!(Orientation::Horizontal.axis(), 'y');
        assert_eq!(Orientation::from_axis("x"), Some(Orientation::Vertical));
        assert_eq!(Orientation::from_axis(" Y "), Some(Orientation::Horizontal));
        assert_eq!(Orientation::from_axis("z"), None);
    }

    // Tests display formats
    // Verified by dropping the separator
    #[test]
    fn test_display() {
        assert_eq!(Point::new(3, -4).to_string(), "[3,-4]");
        assert_eq!(shape(0, 0, 2, 2).to_string(), "[0,0]-[2,2]");
    }
}
