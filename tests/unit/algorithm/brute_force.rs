//! Tests for divisor-step cut candidates and the single-cut search

#[cfg(test)]
mod tests {
    use blockraster::algorithm::brute_force::{
        Candidate, candidates, cut_offsets, resolve, search_block, search_block_scored,
    };
    use blockraster::algorithm::executor::OptimizerConfig;
    use blockraster::analysis::target::TargetImage;
    use blockraster::moves::record::Move;
    use blockraster::spatial::geometry::{Orientation, Point, Shape, Size};
    use blockraster::spatial::partition::{Block, BlockId, Color};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    fn halves_target(side: u32, left: [u8; 4], right: [u8; 4]) -> TargetImage {
        let mut bytes = Vec::new();
        for _ in 0..side {
            for col in 0..side {
                bytes.extend_from_slice(if col < side / 2 { &left } else { &right });
            }
        }
        TargetImage::from_rgba(side, side, bytes).expect("valid buffer")
    }

    fn white_block(side: i32) -> Block {
        let shape = Shape::new(Point::new(0, 0), Point::new(side, side)).expect("valid");
        Block::new(BlockId::new("0"), shape, Color::from(WHITE))
    }

    // Tests offsets are multiples of divisors at least the minimum step
    // Verified by including divisors below the minimum
    #[test]
    fn test_cut_offsets() {
        let offsets = cut_offsets(400, 10);
        assert!(offsets.contains(&200));
        assert!(offsets.contains(&16));
        assert!(offsets.contains(&390));
        assert!(!offsets.contains(&5));
        assert!(!offsets.contains(&0) && !offsets.contains(&400));
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));

        assert_eq!(cut_offsets(40, 10), vec![10, 20, 30]);
        assert_eq!(cut_offsets(20, 10), vec![10]);
        assert!(cut_offsets(13, 10).is_empty());
    }

    // Tests candidate order: horizontal lines, vertical lines, then points
    // Verified by emitting point cuts first
    #[test]
    fn test_candidates_order() {
        let found = candidates(&white_block(20), 10);
        assert_eq!(
            found,
            vec![
                Candidate::LineCut {
                    orientation: Orientation::Horizontal,
                    point: Point::new(10, 10),
                },
                Candidate::LineCut {
                    orientation: Orientation::Vertical,
                    point: Point::new(10, 10),
                },
                Candidate::PointCut {
                    point: Point::new(10, 10),
                },
            ]
        );
    }

    // Tests candidates are offset from the block's low corner
    // Verified by using canvas-absolute offsets
    #[test]
    fn test_candidates_offset_block() {
        let shape = Shape::new(Point::new(100, 50), Point::new(120, 70)).expect("valid");
        let block = Block::new(BlockId::new("0.1"), shape, Color::default());
        for candidate in candidates(&block, 10) {
            let point = match candidate {
                Candidate::LineCut { point, .. } | Candidate::PointCut { point } => point,
            };
            assert!(shape.contains_strictly(point), "{candidate:?}");
        }
    }

    // Tests only sub-blocks that benefit are recolored
    // Verified by recoloring every child
    #[test]
    fn test_resolve_selective_recolor() {
        let target = halves_target(40, WHITE, RED);
        let candidate = Candidate::LineCut {
            orientation: Orientation::Vertical,
            point: Point::new(20, 20),
        };
        let scored = resolve(
            &white_block(40),
            candidate,
            &target,
            Size::new(40, 40),
            &OptimizerConfig::default(),
        )
        .expect("cut is valid");
        let outcome = &scored.outcome;

        assert_eq!(outcome.moves.len(), 2);
        assert!(matches!(&outcome.moves[1], Move::Color { block, .. } if block.as_str() == "0.1"));
        assert_eq!(outcome.blocks[0].color, Color::from(WHITE));
        assert_eq!(outcome.blocks[1].color, Color::from(RED));
        // Line cut 7, recolor 5 * 1600 / 800
        assert_eq!(outcome.cost, 17);
        assert_eq!(scored.score, outcome.score(&target));
    }

    // Tests the search picks the cut along the color boundary
    // Verified by scoring on move cost alone
    #[test]
    fn test_search_block_finds_boundary() {
        let target = halves_target(40, RED, BLUE);
        let outcome = search_block(&white_block(40), &target, Size::new(40, 40), &OptimizerConfig::default());

        assert!(matches!(
            outcome.moves[0],
            Move::LineCut {
                orientation: Orientation::Vertical,
                point,
                ..
            } if point.x == 20
        ));
        assert_eq!(outcome.score(&target), 27);
    }

    // Tests a block matching a uniform target yields no change
    // Verified by returning the best candidate unconditionally
    #[test]
    fn test_search_block_uniform_noop() {
        let target = TargetImage::uniform(Size::new(40, 40), WHITE).expect("valid");
        let block = white_block(40);
        let outcome = search_block(&block, &target, Size::new(40, 40), &OptimizerConfig::default());
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.blocks, vec![block]);
    }

    // Tests blocks with no divisor-step candidates are left alone
    // Verified by falling back to a unit step
    #[test]
    fn test_search_block_without_candidates() {
        let target = halves_target(13, RED, BLUE);
        let outcome = search_block(&white_block(13), &target, Size::new(13, 13), &OptimizerConfig::default());
        assert!(outcome.is_unchanged());
    }

    // Tests the cached search score matches a fresh rescoring of the result
    // Verified by dropping the inherited error of kept children
    #[test]
    fn test_search_block_scored_matches_rescore() {
        let side = 60_u32;
        let mut bytes = Vec::new();
        for row in 0..side {
            for col in 0..side {
                let value = ((row * 3 + col * 2) % 256) as u8;
                bytes.extend_from_slice(&[value, 255 - value, value / 3, 255]);
            }
        }
        let target = TargetImage::from_rgba(side, side, bytes).expect("valid buffer");
        let block = white_block(60);

        for candidate in candidates(&block, 10) {
            let scored = resolve(&block, candidate, &target, Size::new(60, 60), &OptimizerConfig::default())
                .expect("candidate is valid");
            assert_eq!(scored.score, scored.outcome.score(&target), "{candidate:?}");
        }

        let scored = search_block_scored(&block, &target, Size::new(60, 60), &OptimizerConfig::default());
        assert_eq!(scored.score, scored.outcome.score(&target));
        assert_eq!(
            scored.outcome,
            search_block(&block, &target, Size::new(60, 60), &OptimizerConfig::default())
        );
    }
}
