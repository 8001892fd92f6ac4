//! Merge move
//!
//! Two blocks merge when they sit in the same containing region and share a
//! full edge: stacked with equal x-extent, or side by side with equal
//! y-extent. The merged block takes the next counter id.

use crate::io::error::MoveError;
use crate::moves::cost::move_cost;
use crate::moves::record::{Move, MoveKind, MoveResult};
use crate::spatial::geometry::{Point, Shape};
use crate::spatial::partition::{Block, BlockId, Partition};

/// Join two adjacent blocks into one
///
/// The merged block takes the color of the larger of the two (the first on
/// equal areas) and replaces whichever of the pair comes first in the
/// collection.
///
/// # Errors
///
/// Returns an error if:
/// - Either id is absent ([`MoveError::BlockNotFound`])
/// - Both ids name the same block ([`MoveError::WrongBlockKind`])
/// - The blocks lie in different containing regions ([`MoveError::DifferentParents`])
/// - The blocks do not share a full edge ([`MoveError::NotAdjacent`])
pub fn merge_blocks(partition: &Partition, first: &BlockId, second: &BlockId) -> Result<MoveResult, MoveError> {
    let (a, parent_a) = partition.find_with_parent(first)?;
    let (b, parent_b) = partition.find_with_parent(second)?;

    if first == second {
        return Err(MoveError::WrongBlockKind {
            id: first.clone(),
            operation: "merge with itself",
        });
    }
    if parent_a.map(|p| &p.id) != parent_b.map(|p| &p.id) {
        return Err(MoveError::DifferentParents {
            first: first.clone(),
            second: second.clone(),
        });
    }

    let union = vertical_union(&a.shape, &b.shape)
        .or_else(|| horizontal_union(&a.shape, &b.shape))
        .ok_or_else(|| MoveError::NotAdjacent {
            first: first.clone(),
            second: second.clone(),
        })?;

    let larger = if a.shape.area() >= b.shape.area() { a } else { b };
    let merged = Block::new(partition.next_merge_id(), union, larger.color);
    let cost = move_cost(MoveKind::Merge, &larger.shape, partition.size());

    let (Some(index_a), Some(index_b)) = (partition.position(first), partition.position(second)) else {
        return Err(MoveError::BlockNotFound { id: first.clone() });
    };

    Ok(MoveResult {
        partition: partition.merge_splice(index_a, index_b, merged),
        moves: vec![Move::Merge {
            first: first.clone(),
            second: second.clone(),
            shapes: [a.shape, b.shape],
        }],
        cost,
    })
}

/// Union of two blocks stacked on top of each other with matching x-extent
pub fn vertical_union(a: &Shape, b: &Shape) -> Option<Shape> {
    let same_columns = a.low().x == b.low().x && a.high().x == b.high().x;
    let touching = a.high().y == b.low().y || b.high().y == a.low().y;
    if !(same_columns && touching) {
        return None;
    }
    Shape::new(
        Point::new(a.low().x, a.low().y.min(b.low().y)),
        Point::new(a.high().x, a.high().y.max(b.high().y)),
    )
    .ok()
}

/// Union of two blocks side by side with matching y-extent
pub fn horizontal_union(a: &Shape, b: &Shape) -> Option<Shape> {
    let same_rows = a.low().y == b.low().y && a.high().y == b.high().y;
    let touching = a.high().x == b.low().x || b.high().x == a.low().x;
    if !(same_rows && touching) {
        return None;
    }
    Shape::new(
        Point::new(a.low().x.min(b.low().x), a.low().y),
        Point::new(a.high().x.max(b.high().x), a.high().y),
    )
    .ok()
}
