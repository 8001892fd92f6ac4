//! Exhaustive single-cut search
//!
//! Candidate cut positions are every multiple of every divisor of the block's
//! extent that is at least the minimum step. Each candidate cut is resolved by
//! recoloring only those sub-blocks where paying for the color move is no
//! worse than keeping the inherited color, then scored as residual error plus
//! move cost. The best candidate replaces the block only if it strictly beats
//! the block's current error.

use rayon::prelude::*;

use crate::algorithm::executor::{BlockOutcome, OptimizerConfig, ScoredOutcome};
use crate::analysis::similarity::{region_color_diff, region_diff};
use crate::analysis::target::TargetImage;
use crate::moves::cost::move_cost;
use crate::moves::cut::{line_cut_children, point_cut_children};
use crate::moves::record::{Move, MoveKind};
use crate::spatial::geometry::{Orientation, Point, Size};
use crate::spatial::partition::Block;

/// A cut the search may apply to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Two-way split through `point`
    LineCut {
        /// Cut direction
        orientation: Orientation,
        /// Point on the cut line, strictly inside the block
        point: Point,
    },
    /// Four-way split at `point`
    PointCut {
        /// Quadrant corner, strictly inside the block
        point: Point,
    },
}

/// Cut offsets from the low edge for an extent
///
/// Every positive multiple, below `extent`, of every divisor `d` of `extent`
/// with `min_step <= d < extent`. Sorted and deduplicated.
pub fn cut_offsets(extent: u32, min_step: u32) -> Vec<u32> {
    let mut offsets: Vec<u32> = (min_step.max(1)..extent)
        .filter(|step| extent % step == 0)
        .flat_map(|step| (1..extent / step).map(move |k| k * step))
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// All candidate cuts for a block: horizontal lines, vertical lines, then points
///
/// Line cuts pass through the block's center on the other axis; candidates
/// whose point is not strictly inside the block are dropped.
pub fn candidates(block: &Block, min_step: u32) -> Vec<Candidate> {
    let shape = block.shape;
    let (low, center) = (shape.low(), shape.center());
    let xs: Vec<i32> = cut_offsets(shape.width(), min_step)
        .into_iter()
        .map(|offset| low.x + offset as i32)
        .collect();
    let ys: Vec<i32> = cut_offsets(shape.height(), min_step)
        .into_iter()
        .map(|offset| low.y + offset as i32)
        .collect();

    let horizontal = ys.iter().map(|&y| Candidate::LineCut {
        orientation: Orientation::Horizontal,
        point: Point::new(center.x, y),
    });
    let vertical = xs.iter().map(|&x| Candidate::LineCut {
        orientation: Orientation::Vertical,
        point: Point::new(x, center.y),
    });
    let points = xs.iter().flat_map(|&x| {
        ys.iter()
            .map(move |&y| Candidate::PointCut {
                point: Point::new(x, y),
            })
    });

    horizontal
        .chain(vertical)
        .chain(points)
        .filter(|candidate| {
            let point = match candidate {
                Candidate::LineCut { point, .. } | Candidate::PointCut { point } => *point,
            };
            shape.contains_strictly(point)
        })
        .collect()
}

/// Apply a candidate cut and selectively recolor its sub-blocks
///
/// A sub-block is recolored to its target region's representative color only
/// when `colored_diff + color_cost <= inherited_diff + recolor_slack`.
/// The score is assembled from the per-child errors computed along the way.
/// Returns `None` if the cut is geometrically impossible for this block.
pub fn resolve(
    block: &Block,
    candidate: Candidate,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
) -> Option<ScoredOutcome> {
    let (children, record, kind) = match candidate {
        Candidate::LineCut { orientation, point } => (
            line_cut_children(block, orientation, point).ok()?.to_vec(),
            Move::LineCut {
                block: block.id.clone(),
                orientation,
                point,
                shape: block.shape,
            },
            MoveKind::LineCut,
        ),
        Candidate::PointCut { point } => (
            point_cut_children(block, point).ok()?.to_vec(),
            Move::PointCut {
                block: block.id.clone(),
                point,
                shape: block.shape,
            },
            MoveKind::PointCut,
        ),
    };

    let mut outcome = BlockOutcome {
        blocks: Vec::with_capacity(children.len()),
        moves: vec![record],
        cost: move_cost(kind, &block.shape, canvas),
    };

    let mut residual = 0;
    for child in children {
        let (color, inherited) = config
            .color_strategy
            .select_with_diff(target, &child.shape, child.color);
        let color_cost = move_cost(MoveKind::Color, &child.shape, canvas);
        // Even a perfect recolor cannot pay for itself
        if color == child.color || color_cost > inherited + config.recolor_slack {
            residual += inherited;
            outcome.blocks.push(child);
            continue;
        }

        let colored = region_color_diff(target, &child.shape, color);
        if colored + color_cost <= inherited + config.recolor_slack {
            outcome.moves.push(Move::Color {
                block: child.id.clone(),
                color,
                shape: child.shape,
            });
            outcome.cost += color_cost;
            residual += colored;
            outcome.blocks.push(Block::new(child.id, child.shape, color));
        } else {
            residual += inherited;
            outcome.blocks.push(child);
        }
    }

    Some(ScoredOutcome {
        score: outcome.cost + residual,
        outcome,
    })
}

/// Search every candidate cut of `block`, keeping the best if it beats no change
///
/// Ties between candidates go to the earliest in [`candidates`] order; a tie
/// with the unchanged block keeps the block.
pub fn search_block(
    block: &Block,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
) -> BlockOutcome {
    search_block_scored(block, target, canvas, config).outcome
}

/// [`search_block`] together with the score of what it returns
pub fn search_block_scored(
    block: &Block,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
) -> ScoredOutcome {
    let current = region_diff(block, target);
    let unchanged = ScoredOutcome {
        outcome: BlockOutcome::unchanged(block),
        score: current,
    };
    if current == 0 {
        return unchanged;
    }

    let best = candidates(block, config.min_cut_step)
        .into_par_iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            resolve(block, candidate, target, canvas, config).map(|scored| (index, scored))
        })
        .min_by_key(|(index, scored)| (scored.score, *index));

    match best {
        Some((_, scored)) if scored.score < current => scored,
        _ => unchanged,
    }
}
