//! Tests for line and point cuts

#[cfg(test)]
mod tests {
    use blockraster::MoveError;
    use blockraster::moves::cut::{line_cut, line_cut_children, point_cut, point_cut_children};
    use blockraster::spatial::geometry::{Orientation, Point, Shape, Size};
    use blockraster::spatial::partition::{Block, BlockId, Color, Partition};

    fn canvas() -> Partition {
        Partition::new(Size::new(400, 400)).expect("valid canvas")
    }

    fn shape(x0: i32, y0: i32, x1: i32, y1: i32) -> Shape {
        Shape::new(Point::new(x0, y0), Point::new(x1, y1)).expect("valid rectangle")
    }

    // Tests a vertical cut splits along x with low side first
    // Verified by cutting along y for vertical orientation
    #[test]
    fn test_vertical_line_cut() {
        let result = line_cut(
            &canvas(),
            &BlockId::new("0"),
            Orientation::Vertical,
            Point::new(200, 100),
        )
        .expect("cut applies");

        assert_eq!(result.cost, 7);
        let left = result.partition.find(&BlockId::new("0.0")).expect("left child");
        let right = result.partition.find(&BlockId::new("0.1")).expect("right child");
        assert_eq!(left.shape, shape(0, 0, 200, 400));
        assert_eq!(right.shape, shape(200, 0, 400, 400));
        assert!(result.partition.find(&BlockId::new("0")).is_err());
        assert!(result.partition.verify_tiling().is_ok());
    }

    // Tests a horizontal cut splits along y
    // Verified by using point.x for horizontal cuts
    #[test]
    fn test_horizontal_line_cut() {
        let result = line_cut(
            &canvas(),
            &BlockId::new("0"),
            Orientation::Horizontal,
            Point::new(100, 150),
        )
        .expect("cut applies");

        let blocks = result.partition.blocks();
        assert_eq!(blocks[0].shape, shape(0, 0, 400, 150));
        assert_eq!(blocks[1].shape, shape(0, 150, 400, 400));
    }

    // Tests a point cut yields four quadrants in bl, br, tr, tl order
    // Verified by ordering quadrants row-major
    #[test]
    fn test_point_cut_quadrants() {
        let result = point_cut(&canvas(), &BlockId::new("0"), Point::new(200, 200)).expect("cut applies");

        assert_eq!(result.cost, 10);
        let shapes: Vec<Shape> = result.partition.blocks().iter().map(|b| b.shape).collect();
        assert_eq!(
            shapes,
            vec![
                shape(0, 0, 200, 200),
                shape(200, 0, 400, 200),
                shape(200, 200, 400, 400),
                shape(0, 200, 200, 400),
            ]
        );
        for (index, block) in result.partition.blocks().iter().enumerate() {
            assert_eq!(block.id, BlockId::new("0").child(index));
            assert_eq!(block.shape.area(), 40_000);
        }
    }

    // Tests cut points on or outside the boundary fail
    // Verified by accepting points on the block edge
    #[test]
    fn test_cut_boundary_points_rejected() {
        let partition = canvas();
        let id = BlockId::new("0");
        for point in [
            Point::new(0, 0),
            Point::new(400, 200),
            Point::new(200, 400),
            Point::new(-1, 200),
        ] {
            assert!(matches!(
                point_cut(&partition, &id, point),
                Err(MoveError::PointOutsideBlock { .. })
            ));
        }
        assert!(matches!(
            line_cut(&partition, &id, Orientation::Vertical, Point::new(200, 0)),
            Err(MoveError::PointOutsideBlock { .. })
        ));
        assert!(matches!(
            line_cut(&partition, &id, Orientation::Horizontal, Point::new(0, 200)),
            Err(MoveError::PointOutsideBlock { .. })
        ));
    }

    // Tests cutting a missing block
    // Verified by cutting the root block on a miss
    #[test]
    fn test_cut_missing_block() {
        assert_eq!(
            point_cut(&canvas(), &BlockId::new("3"), Point::new(200, 200)),
            Err(MoveError::BlockNotFound {
                id: BlockId::new("3")
            })
        );
    }

    // Tests cost scales with the size of the cut block
    // Verified by charging against the canvas instead of the block
    #[test]
    fn test_cut_child_cost() {
        let first = line_cut(
            &canvas(),
            &BlockId::new("0"),
            Orientation::Vertical,
            Point::new(200, 200),
        )
        .expect("cut applies");
        let second = point_cut(&first.partition, &BlockId::new("0.0"), Point::new(100, 100)).expect("cut applies");

        assert_eq!(second.cost, 20);
        assert_eq!(second.partition.len(), 5);
        assert!(second.partition.verify_tiling().is_ok());
    }

    // Tests children inherit the parent color
    // Verified by resetting children to the default color
    #[test]
    fn test_children_inherit_color() {
        let color = Color::new(1, 2, 3, 4);
        let parent = Block::new(BlockId::new("9"), shape(0, 0, 10, 10), color);

        let halves = line_cut_children(&parent, Orientation::Vertical, Point::new(3, 5)).expect("valid cut");
        let quarters = point_cut_children(&parent, Point::new(3, 5)).expect("valid cut");
        assert!(halves.iter().chain(quarters.iter()).all(|child| child.color == color));
        assert_eq!(halves[0].shape, shape(0, 0, 3, 10));
        assert_eq!(quarters[3].shape, shape(0, 5, 3, 10));
    }
}
