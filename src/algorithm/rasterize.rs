//! Greedy quad-split rasterization
//!
//! A block whose target region is not already flat is point-cut at its
//! center and each quadrant is colored with the matching cell of a 2x2
//! box-filtered downsample of the region. With a depth above one the
//! quadrants are refined the same way. A split is kept only if its move cost
//! plus residual error beats the block's current error.

use crate::algorithm::executor::{BlockOutcome, OptimizerConfig};
use crate::analysis::similarity::{is_uniform, region_diff};
use crate::analysis::target::TargetImage;
use crate::moves::cost::move_cost;
use crate::moves::cut::point_cut_children;
use crate::moves::record::{Move, MoveKind};
use crate::spatial::geometry::Size;
use crate::spatial::partition::{Block, Color};

// Downsample cell (row, col) of each point-cut child, rows counted from the bottom
const QUADRANT_CELLS: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 1), (1, 0)];

/// Quad-split one block toward the target, up to `config.greedy_depth` levels
pub fn quad_split(
    block: &Block,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
) -> BlockOutcome {
    split_recursive(block, target, canvas, config, config.greedy_depth.max(1))
}

fn split_recursive(
    block: &Block,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
    depth: usize,
) -> BlockOutcome {
    let current = region_diff(block, target);
    if current == 0
        || is_uniform(
            target,
            &block.shape,
            config.uniformity_grid,
            config.uniformity_threshold,
        )
    {
        return BlockOutcome::unchanged(block);
    }

    let Some(split) = colored_quadrants(block, target, canvas) else {
        return BlockOutcome::unchanged(block);
    };

    let split = if depth > 1 {
        refine(split, target, canvas, config, depth - 1)
    } else {
        split
    };

    if split.score(target) < current {
        split
    } else {
        BlockOutcome::unchanged(block)
    }
}

/// Point-cut at the center and color the quadrants from a 2x2 downsample
///
/// Returns `None` when the block is too thin to have an interior center.
pub fn colored_quadrants(block: &Block, target: &TargetImage, canvas: Size) -> Option<BlockOutcome> {
    let center = block.shape.center();
    if !block.shape.contains_strictly(center) {
        return None;
    }

    let samples = target.downsample(&block.shape, 2, 2);
    let children = point_cut_children(block, center).ok()?;

    let mut outcome = BlockOutcome {
        blocks: Vec::with_capacity(4),
        moves: vec![Move::PointCut {
            block: block.id.clone(),
            point: center,
            shape: block.shape,
        }],
        cost: move_cost(MoveKind::PointCut, &block.shape, canvas),
    };

    for (child, cell) in children.into_iter().zip(QUADRANT_CELLS) {
        let color: Color = samples.get(cell).copied().unwrap_or(child.color);
        outcome.moves.push(Move::Color {
            block: child.id.clone(),
            color,
            shape: child.shape,
        });
        outcome.cost += move_cost(MoveKind::Color, &child.shape, canvas);
        outcome.blocks.push(Block::new(child.id, child.shape, color));
    }

    Some(outcome)
}

fn refine(
    split: BlockOutcome,
    target: &TargetImage,
    canvas: Size,
    config: &OptimizerConfig,
    depth: usize,
) -> BlockOutcome {
    let mut refined = BlockOutcome {
        blocks: Vec::new(),
        moves: split.moves,
        cost: split.cost,
    };
    for child in &split.blocks {
        let outcome = split_recursive(child, target, canvas, config, depth);
        refined.blocks.extend(outcome.blocks);
        refined.moves.extend(outcome.moves);
        refined.cost += outcome.cost;
    }
    refined
}
