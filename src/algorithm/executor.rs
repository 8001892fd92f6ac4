//! Optimizer passes over a partition
//!
//! Each block is evaluated independently against the target: the pass fans
//! out over blocks with rayon, then concatenates the per-block outcomes in
//! block order into one partition, move log and cost. Passes repeat until one
//! produces no moves or the pass limit is reached.

use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

use crate::algorithm::brute_force::{search_block, search_block_scored};
use crate::algorithm::rasterize::quad_split;
use crate::analysis::similarity::{ColorStrategy, region_diff};
use crate::analysis::target::TargetImage;
use crate::io::configuration::{
    DEFAULT_GREEDY_DEPTH, DEFAULT_MAX_PASSES, MIN_CUT_STEP, RECOLOR_SLACK, UNIFORMITY_GRID,
    UNIFORMITY_THRESHOLD,
};
use crate::io::error::{RasterError, Result, invalid_image};
use crate::moves::record::{Move, MoveResult};
use crate::spatial::partition::{Block, Partition};

/// Which per-block search a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Quad-split at the center, quadrants colored from a 2x2 downsample
    Greedy,
    /// Best single line or point cut with selective recoloring
    BruteForce,
    /// Both searches per block, keeping the lower-scoring outcome
    #[default]
    Combined,
}

/// Tuning parameters for the optimizer
///
/// The thresholds are empirical; defaults come from
/// [`crate::io::configuration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Per-block search to run
    pub strategy: Strategy,
    /// Maximum number of passes over the partition
    pub max_passes: usize,
    /// Quad-split recursion depth within one pass (1 = single split)
    pub greedy_depth: usize,
    /// Max pairwise sampled distance below which a region is left alone
    pub uniformity_threshold: f64,
    /// Side of the sampling grid for the uniformity test
    pub uniformity_grid: u32,
    /// Smallest divisor used as a cut step by the candidate search
    pub min_cut_step: u32,
    /// Slack in the recolor acceptance test
    pub recolor_slack: u64,
    /// Color selection for candidate sub-blocks
    pub color_strategy: ColorStrategy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            max_passes: DEFAULT_MAX_PASSES,
            greedy_depth: DEFAULT_GREEDY_DEPTH,
            uniformity_threshold: UNIFORMITY_THRESHOLD,
            uniformity_grid: UNIFORMITY_GRID,
            min_cut_step: MIN_CUT_STEP,
            recolor_slack: RECOLOR_SLACK,
            color_strategy: ColorStrategy::default(),
        }
    }
}

/// What one block turned into during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// Replacement blocks, in collection order
    pub blocks: Vec<Block>,
    /// Moves that produced them
    pub moves: Vec<Move>,
    /// Sum of the move costs
    pub cost: u64,
}

impl BlockOutcome {
    /// Outcome that keeps the block as it is
    pub fn unchanged(block: &Block) -> Self {
        Self {
            blocks: vec![block.clone()],
            moves: Vec::new(),
            cost: 0,
        }
    }

    /// Whether any move was made
    pub const fn is_unchanged(&self) -> bool {
        self.moves.is_empty()
    }

    /// Move cost plus residual error of the resulting blocks
    pub fn score(&self, target: &TargetImage) -> u64 {
        self.cost
            + self
                .blocks
                .iter()
                .map(|block| region_diff(block, target))
                .sum::<u64>()
    }
}

/// A block outcome paired with its move cost plus residual error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredOutcome {
    /// What the block turned into
    pub outcome: BlockOutcome,
    /// Equal to `outcome.score(target)` for the target it was computed against
    pub score: u64,
}

/// Shared flag for stopping an in-flight optimization
///
/// Checked between block evaluations; clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Receives pass progress; called from worker threads
pub trait PassObserver: Sync {
    /// A pass over `blocks` blocks is starting
    fn pass_started(&self, pass: usize, blocks: usize);
    /// One block finished evaluating
    fn block_done(&self);
    /// A pass finished with `moves` moves costing `cost`
    fn pass_finished(&self, pass: usize, moves: usize, cost: u64);
}

/// Drives optimizer passes over partitions
pub struct Rasterizer<'a> {
    config: OptimizerConfig,
    cancel: CancelToken,
    observer: Option<&'a dyn PassObserver>,
}

impl<'a> Rasterizer<'a> {
    /// Create a rasterizer with the given tuning
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
            observer: None,
        }
    }

    /// Use `token` to allow cancelling passes from elsewhere
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Report progress to `observer`
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn PassObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Evaluate one block with the configured strategy
    pub fn optimize_block(&self, block: &Block, target: &TargetImage, partition: &Partition) -> BlockOutcome {
        let canvas = partition.size();
        match self.config.strategy {
            Strategy::Greedy => quad_split(block, target, canvas, &self.config),
            Strategy::BruteForce => search_block(block, target, canvas, &self.config),
            Strategy::Combined => {
                let greedy = quad_split(block, target, canvas, &self.config);
                let searched = search_block_scored(block, target, canvas, &self.config);
                let greedy_score = greedy.score(target);
                if searched.score < greedy_score
                    || (searched.score == greedy_score
                        && searched.outcome.moves.len() < greedy.moves.len())
                {
                    searched.outcome
                } else {
                    greedy
                }
            }
        }
    }

    /// Run one pass over every block of `partition`
    ///
    /// Blocks with no improving move pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target's size differs from the canvas ([`RasterError::InvalidImage`])
    /// - The cancel token was set during the pass ([`RasterError::Cancelled`])
    pub fn run_pass(&self, partition: &Partition, target: &TargetImage, pass: usize) -> Result<MoveResult> {
        check_target(partition, target)?;

        let total = partition.len();
        if let Some(observer) = self.observer {
            observer.pass_started(pass, total);
        }

        let completed = AtomicUsize::new(0);
        let outcomes: Vec<Option<BlockOutcome>> = partition
            .blocks()
            .par_iter()
            .map(|block| {
                if self.cancel.is_cancelled() {
                    return None;
                }
                let outcome = self.optimize_block(block, target, partition);
                completed.fetch_add(1, Ordering::Relaxed);
                if let Some(observer) = self.observer {
                    observer.block_done();
                }
                Some(outcome)
            })
            .collect();

        let Some(outcomes) = outcomes.into_iter().collect::<Option<Vec<_>>>() else {
            return Err(RasterError::Cancelled {
                completed: completed.load(Ordering::Relaxed),
                total,
            });
        };

        let result = combine(partition, outcomes);
        debug!(
            pass,
            blocks = result.partition.len(),
            moves = result.moves.len(),
            cost = result.cost,
            "pass finished"
        );
        if let Some(observer) = self.observer {
            observer.pass_finished(pass, result.moves.len(), result.cost);
        }
        Ok(result)
    }

    /// Run passes until one makes no move or the pass limit is reached
    ///
    /// # Errors
    ///
    /// Propagates the first failing pass's error; `partition` is unchanged
    pub fn optimize(&self, partition: &Partition, target: &TargetImage) -> Result<MoveResult> {
        let mut result = MoveResult::unchanged(partition.clone());

        for pass in 1..=self.config.max_passes {
            let step = self.run_pass(&result.partition, target, pass)?;
            if step.moves.is_empty() {
                break;
            }
            result = result.then(|_| Ok::<_, RasterError>(step))?;
        }

        info!(
            strategy = ?self.config.strategy,
            blocks = result.partition.len(),
            moves = result.moves.len(),
            cost = result.cost,
            "optimization finished"
        );
        Ok(result)
    }
}

fn check_target(partition: &Partition, target: &TargetImage) -> Result<()> {
    if target.size() == partition.size() {
        Ok(())
    } else {
        Err(invalid_image(&format!(
            "target is {}x{} but the canvas is {}x{}",
            target.size().width,
            target.size().height,
            partition.size().width,
            partition.size().height
        )))
    }
}

/// Concatenate per-block outcomes, in block order, into one result
pub fn combine(partition: &Partition, outcomes: Vec<BlockOutcome>) -> MoveResult {
    let mut blocks = Vec::with_capacity(outcomes.iter().map(|o| o.blocks.len()).sum());
    let mut moves = Vec::new();
    let mut cost = 0;
    for outcome in outcomes {
        blocks.extend(outcome.blocks);
        moves.extend(outcome.moves);
        cost += outcome.cost;
    }

    MoveResult {
        partition: partition.with_blocks(blocks),
        moves,
        cost,
    }
}
