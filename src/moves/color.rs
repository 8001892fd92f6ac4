//! Recolor move

use crate::io::error::MoveError;
use crate::moves::cost::move_cost;
use crate::moves::record::{Move, MoveKind, MoveResult};
use crate::spatial::partition::{Block, BlockId, Color, Partition};

/// Replace the color of block `id`, keeping its geometry
///
/// # Errors
///
/// Returns [`MoveError::BlockNotFound`] if `id` is absent
pub fn color_block(partition: &Partition, id: &BlockId, color: Color) -> Result<MoveResult, MoveError> {
    let index = partition
        .position(id)
        .ok_or_else(|| MoveError::BlockNotFound { id: id.clone() })?;
    let block = partition.find(id)?;

    let recolored = Block::new(block.id.clone(), block.shape, color);
    let cost = move_cost(MoveKind::Color, &block.shape, partition.size());
    let record = Move::Color {
        block: block.id.clone(),
        color,
        shape: block.shape,
    };

    Ok(MoveResult {
        partition: partition.splice(index, vec![recolored]),
        moves: vec![record],
        cost,
    })
}
