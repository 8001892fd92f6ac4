//! Tests for optimizer passes, strategy selection, cancellation and observers

#[cfg(test)]
mod tests {
    use blockraster::RasterError;
    use blockraster::algorithm::executor::{
        BlockOutcome, CancelToken, OptimizerConfig, PassObserver, Rasterizer, Strategy, combine,
    };
    use blockraster::analysis::target::TargetImage;
    use blockraster::moves::request::{MoveRequest, Session};
    use blockraster::spatial::geometry::Size;
    use blockraster::spatial::partition::Partition;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Vertical stripes of four colors with a noisy lower band
    fn striped_target(side: u32) -> TargetImage {
        let palette: [[u8; 4]; 4] = [[200, 30, 30, 255], [30, 200, 30, 255], [30, 30, 200, 255], [20, 20, 20, 255]];
        let mut bytes = Vec::new();
        for row in 0..side {
            for col in 0..side {
                let mut pixel = palette[(col * 4 / side) as usize];
                if row >= side * 3 / 4 {
                    pixel[0] = pixel[0].wrapping_add(((row * 7 + col * 13) % 40) as u8);
                }
                bytes.extend_from_slice(&pixel);
            }
        }
        TargetImage::from_rgba(side, side, bytes).expect("valid buffer")
    }

    #[derive(Default)]
    struct CountingObserver {
        passes: AtomicUsize,
        blocks: AtomicUsize,
        finished: AtomicUsize,
    }

    impl PassObserver for CountingObserver {
        fn pass_started(&self, _pass: usize, _blocks: usize) {
            self.passes.fetch_add(1, Ordering::Relaxed);
        }

        fn block_done(&self) {
            self.blocks.fetch_add(1, Ordering::Relaxed);
        }

        fn pass_finished(&self, _pass: usize, _moves: usize, _cost: u64) {
            self.finished.fetch_add(1, Ordering::Relaxed);
        }
    }

    // Tests configuration defaults
    // Verified by changing the default strategy
    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.strategy, Strategy::Combined);
        assert_eq!(config.min_cut_step, 10);
        assert_eq!(config.uniformity_grid, 4);
        assert!((config.uniformity_threshold - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.recolor_slack, 0);
    }

    // Tests optimization lowers the score and keeps an exact tiling
    // Verified by accepting outcomes that raise the score
    #[test]
    fn test_optimize_improves_score() {
        let target = striped_target(80);
        let session = Session::new(target.size()).expect("valid canvas");
        let baseline = session.score(&target);

        for strategy in [Strategy::Greedy, Strategy::BruteForce, Strategy::Combined] {
            let config = OptimizerConfig {
                strategy,
                ..OptimizerConfig::default()
            };
            let result = Rasterizer::new(config)
                .optimize(session.partition(), &target)
                .expect("optimization runs");

            assert!(result.partition.verify_tiling().is_ok(), "{strategy:?}");
            assert!(!result.moves.is_empty(), "{strategy:?}");

            let mut optimized = session.clone();
            optimized.absorb(result);
            assert!(optimized.score(&target) < baseline, "{strategy:?}");
        }
    }

    // Tests the logged moves replay to the same partition and cost
    // Verified by dropping recolor moves from the result
    #[test]
    fn test_optimize_moves_replay() {
        let target = striped_target(80);
        let partition = Partition::new(target.size()).expect("valid canvas");
        let result = Rasterizer::new(OptimizerConfig::default())
            .optimize(&partition, &target)
            .expect("optimization runs");

        let mut replayed = Session::new(target.size()).expect("valid canvas");
        for record in &result.moves {
            replayed.apply(&MoveRequest::from(record)).expect("logged move replays");
        }
        assert_eq!(replayed.partition(), &result.partition);
        assert_eq!(replayed.cost(), result.cost);
    }

    // Tests a target already matching the canvas needs no moves
    // Verified by always splitting the root block
    #[test]
    fn test_optimize_matching_target_noop() {
        let target = TargetImage::uniform(Size::new(50, 50), [255, 255, 255, 255]).expect("valid");
        let partition = Partition::new(target.size()).expect("valid canvas");
        let result = Rasterizer::new(OptimizerConfig::default())
            .optimize(&partition, &target)
            .expect("optimization runs");

        assert!(result.moves.is_empty());
        assert_eq!(result.cost, 0);
        assert_eq!(result.partition, partition);
    }

    // Tests the combined strategy scores no worse than either search alone
    // Verified by always taking the greedy outcome
    #[test]
    fn test_combined_no_worse_per_block() {
        let target = striped_target(80);
        let partition = Partition::new(target.size()).expect("valid canvas");
        let block = &partition.blocks()[0];

        let score = |strategy| {
            let config = OptimizerConfig {
                strategy,
                ..OptimizerConfig::default()
            };
            Rasterizer::new(config).optimize_block(block, &target, &partition).score(&target)
        };
        let combined = score(Strategy::Combined);
        assert!(combined <= score(Strategy::Greedy));
        assert!(combined <= score(Strategy::BruteForce));
    }

    // Tests mismatched target sizes are rejected
    // Verified by indexing the target without a size check
    #[test]
    fn test_run_pass_size_mismatch() {
        let target = TargetImage::uniform(Size::new(10, 10), [0, 0, 0, 255]).expect("valid");
        let partition = Partition::new(Size::new(20, 10)).expect("valid canvas");
        assert!(matches!(
            Rasterizer::new(OptimizerConfig::default()).run_pass(&partition, &target, 1),
            Err(RasterError::InvalidImage { .. })
        ));
    }

    // Tests a cancelled token stops the pass with an error
    // Verified by ignoring the token
    #[test]
    fn test_cancelled_pass() {
        let target = striped_target(40);
        let partition = Partition::new(target.size()).expect("valid canvas");
        let token = CancelToken::new();
        token.cancel();
        assert!(token.clone().is_cancelled());

        let result = Rasterizer::new(OptimizerConfig::default())
            .with_cancel_token(token)
            .optimize(&partition, &target);
        assert!(matches!(
            result,
            Err(RasterError::Cancelled { completed: 0, total: 1 })
        ));
    }

    // Tests the observer sees every pass and block
    // Verified by skipping block notifications
    #[test]
    fn test_observer_notified() {
        let target = striped_target(40);
        let partition = Partition::new(target.size()).expect("valid canvas");
        let observer = CountingObserver::default();

        let result = Rasterizer::new(OptimizerConfig::default())
            .with_observer(&observer)
            .run_pass(&partition, &target, 1)
            .expect("pass runs");

        assert_eq!(observer.passes.load(Ordering::Relaxed), 1);
        assert_eq!(observer.blocks.load(Ordering::Relaxed), 1);
        assert_eq!(observer.finished.load(Ordering::Relaxed), 1);
        assert!(result.partition.len() > 1);
    }

    // Tests outcomes are combined in block order with summed cost
    // Verified by combining in reverse order
    #[test]
    fn test_combine() {
        let target = striped_target(40);
        let partition = Partition::new(target.size()).expect("valid canvas");
        let rasterizer = Rasterizer::new(OptimizerConfig::default());
        let split = rasterizer
            .run_pass(&partition, &target, 1)
            .expect("pass runs")
            .partition;

        let outcomes: Vec<BlockOutcome> = split.blocks().iter().map(BlockOutcome::unchanged).collect();
        let combined = combine(&split, outcomes);
        assert_eq!(combined.partition, split);
        assert!(combined.moves.is_empty());
        assert_eq!(combined.cost, 0);
    }
}
