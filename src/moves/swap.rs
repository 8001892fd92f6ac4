//! Swap move

use crate::io::error::MoveError;
use crate::moves::cost::move_cost;
use crate::moves::record::{Move, MoveKind, MoveResult};
use crate::spatial::partition::{Block, BlockId, Partition};

/// Exchange the identities of two blocks with equal width and height
///
/// Each block keeps its rectangle and color and takes the other's id, in
/// place in the collection.
///
/// # Errors
///
/// Returns an error if:
/// - Either id is absent ([`MoveError::BlockNotFound`])
/// - Both ids name the same block ([`MoveError::WrongBlockKind`])
/// - The blocks differ in width or height ([`MoveError::ShapeMismatch`])
pub fn swap_blocks(partition: &Partition, first: &BlockId, second: &BlockId) -> Result<MoveResult, MoveError> {
    let a = partition.find(first)?;
    let b = partition.find(second)?;

    if first == second {
        return Err(MoveError::WrongBlockKind {
            id: first.clone(),
            operation: "swap with itself",
        });
    }
    if !a.shape.is_congruent(&b.shape) {
        return Err(MoveError::ShapeMismatch {
            first: first.clone(),
            second: second.clone(),
        });
    }

    let blocks = partition
        .blocks()
        .iter()
        .map(|block| {
            if &block.id == first {
                Block::new(second.clone(), block.shape, block.color)
            } else if &block.id == second {
                Block::new(first.clone(), block.shape, block.color)
            } else {
                block.clone()
            }
        })
        .collect();

    let larger = if a.shape.area() >= b.shape.area() { a } else { b };
    Ok(MoveResult {
        partition: partition.with_blocks(blocks),
        moves: vec![Move::Swap {
            first: first.clone(),
            second: second.clone(),
            shapes: [a.shape, b.shape],
        }],
        cost: move_cost(MoveKind::Swap, &larger.shape, partition.size()),
    })
}
