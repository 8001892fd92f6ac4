//! Line and point cuts
//!
//! Children inherit the parent's color. A line cut yields `P.0` on the low
//! side and `P.1` on the high side; a point cut yields quadrants in the order
//! bottom-left, bottom-right, top-right, top-left.

use crate::io::error::MoveError;
use crate::moves::cost::move_cost;
use crate::moves::record::{Move, MoveKind, MoveResult};
use crate::spatial::geometry::{Orientation, Point, Shape};
use crate::spatial::partition::{Block, BlockId, Partition};

/// Split block `id` in two along the line through `point`
///
/// # Errors
///
/// Returns an error if:
/// - `id` is absent ([`MoveError::BlockNotFound`])
/// - `point` is not strictly inside the block ([`MoveError::PointOutsideBlock`])
pub fn line_cut(
    partition: &Partition,
    id: &BlockId,
    orientation: Orientation,
    point: Point,
) -> Result<MoveResult, MoveError> {
    let (index, block) = locate_interior(partition, id, point)?;
    let children = line_cut_children(block, orientation, point)?;

    Ok(MoveResult {
        partition: partition.splice(index, children.to_vec()),
        moves: vec![Move::LineCut {
            block: block.id.clone(),
            orientation,
            point,
            shape: block.shape,
        }],
        cost: move_cost(MoveKind::LineCut, &block.shape, partition.size()),
    })
}

/// Split block `id` into four quadrants meeting at `point`
///
/// # Errors
///
/// Returns an error if:
/// - `id` is absent ([`MoveError::BlockNotFound`])
/// - `point` is not strictly inside the block ([`MoveError::PointOutsideBlock`])
pub fn point_cut(partition: &Partition, id: &BlockId, point: Point) -> Result<MoveResult, MoveError> {
    let (index, block) = locate_interior(partition, id, point)?;
    let children = point_cut_children(block, point)?;

    Ok(MoveResult {
        partition: partition.splice(index, children.to_vec()),
        moves: vec![Move::PointCut {
            block: block.id.clone(),
            point,
            shape: block.shape,
        }],
        cost: move_cost(MoveKind::PointCut, &block.shape, partition.size()),
    })
}

fn locate_interior<'a>(
    partition: &'a Partition,
    id: &BlockId,
    point: Point,
) -> Result<(usize, &'a Block), MoveError> {
    let block = partition.find(id)?;
    let index = partition
        .position(id)
        .ok_or_else(|| MoveError::BlockNotFound { id: id.clone() })?;

    if !block.shape.contains_strictly(point) {
        return Err(MoveError::PointOutsideBlock {
            id: id.clone(),
            point,
            shape: block.shape,
        });
    }
    Ok((index, block))
}

/// Two children of a line cut, low side first
///
/// # Errors
///
/// Returns [`MoveError::InvalidGeometry`] if the cut line does not fall
/// strictly between the block's edges on the cut axis
pub fn line_cut_children(
    block: &Block,
    orientation: Orientation,
    point: Point,
) -> Result<[Block; 2], MoveError> {
    let (low, high) = (block.shape.low(), block.shape.high());
    let (low_shape, high_shape) = match orientation {
        Orientation::Vertical => (
            Shape::new(low, Point::new(point.x, high.y))?,
            Shape::new(Point::new(point.x, low.y), high)?,
        ),
        Orientation::Horizontal => (
            Shape::new(low, Point::new(high.x, point.y))?,
            Shape::new(Point::new(low.x, point.y), high)?,
        ),
    };

    Ok([
        Block::new(block.id.child(0), low_shape, block.color),
        Block::new(block.id.child(1), high_shape, block.color),
    ])
}

/// Four children of a point cut: bottom-left, bottom-right, top-right, top-left
///
/// # Errors
///
/// Returns [`MoveError::InvalidGeometry`] if `point` is not strictly inside
pub fn point_cut_children(block: &Block, point: Point) -> Result<[Block; 4], MoveError> {
    let (low, high) = (block.shape.low(), block.shape.high());
    let shapes = [
        Shape::new(low, point)?,
        Shape::new(Point::new(point.x, low.y), Point::new(high.x, point.y))?,
        Shape::new(point, high)?,
        Shape::new(Point::new(low.x, point.y), Point::new(point.x, high.y))?,
    ];

    let mut index = 0;
    Ok(shapes.map(|shape| {
        let child = Block::new(block.id.child(index), shape, block.color);
        index += 1;
        child
    }))
}
