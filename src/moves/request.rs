//! Move requests and the editing session
//!
//! A [`MoveRequest`] is what an editor or a move log asks for; [`apply_move`]
//! turns it into a [`MoveResult`] without touching the input partition. A
//! [`Session`] keeps the current partition, the append-only log and the
//! running cost.

use crate::analysis::similarity::region_diff;
use crate::analysis::target::TargetImage;
use crate::io::error::MoveError;
use crate::moves::color::color_block;
use crate::moves::cut::{line_cut, point_cut};
use crate::moves::merge::merge_blocks;
use crate::moves::record::{Move, MoveResult};
use crate::moves::swap::swap_blocks;
use crate::spatial::geometry::{Orientation, Point, Size};
use crate::spatial::partition::{BlockId, Color, Partition};

/// A single edit addressed to blocks by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    /// Recolor a block
    Color {
        /// Target block
        block: BlockId,
        /// New fill color
        color: Color,
    },
    /// Split a block in two
    LineCut {
        /// Target block
        block: BlockId,
        /// Cut direction
        orientation: Orientation,
        /// Point the cut line passes through
        point: Point,
    },
    /// Split a block into quadrants
    PointCut {
        /// Target block
        block: BlockId,
        /// Shared corner of the quadrants
        point: Point,
    },
    /// Exchange the identities of two congruent blocks
    Swap {
        /// First block
        first: BlockId,
        /// Second block
        second: BlockId,
    },
    /// Join two adjacent blocks
    Merge {
        /// First block
        first: BlockId,
        /// Second block
        second: BlockId,
    },
}

impl From<&Move> for MoveRequest {
    fn from(record: &Move) -> Self {
        match record {
            Move::Color { block, color, .. } => Self::Color {
                block: block.clone(),
                color: *color,
            },
            Move::LineCut {
                block,
                orientation,
                point,
                ..
            } => Self::LineCut {
                block: block.clone(),
                orientation: *orientation,
                point: *point,
            },
            Move::PointCut { block, point, .. } => Self::PointCut {
                block: block.clone(),
                point: *point,
            },
            Move::Swap { first, second, .. } => Self::Swap {
                first: first.clone(),
                second: second.clone(),
            },
            Move::Merge { first, second, .. } => Self::Merge {
                first: first.clone(),
                second: second.clone(),
            },
        }
    }
}

/// Apply one request to a partition snapshot
///
/// # Errors
///
/// Returns the [`MoveError`] of the underlying move; `partition` is unchanged
pub fn apply_move(partition: &Partition, request: &MoveRequest) -> Result<MoveResult, MoveError> {
    match request {
        MoveRequest::Color { block, color } => color_block(partition, block, *color),
        MoveRequest::LineCut {
            block,
            orientation,
            point,
        } => line_cut(partition, block, *orientation, *point),
        MoveRequest::PointCut { block, point } => point_cut(partition, block, *point),
        MoveRequest::Swap { first, second } => swap_blocks(partition, first, second),
        MoveRequest::Merge { first, second } => merge_blocks(partition, first, second),
    }
}

/// Current partition with its move history and accumulated cost
#[derive(Debug, Clone)]
pub struct Session {
    partition: Partition,
    log: Vec<Move>,
    cost: u64,
}

impl Session {
    /// Start from a fresh canvas of the given size
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] for a zero-area canvas
    pub fn new(size: Size) -> Result<Self, MoveError> {
        Partition::new(size).map(Self::from_partition)
    }

    /// Start from an existing partition with an empty log
    pub const fn from_partition(partition: Partition) -> Self {
        Self {
            partition,
            log: Vec::new(),
            cost: 0,
        }
    }

    /// Current partition
    pub const fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Every move applied so far, in order
    pub fn log(&self) -> &[Move] {
        &self.log
    }

    /// Sum of the costs of all logged moves
    pub const fn cost(&self) -> u64 {
        self.cost
    }

    /// Apply a request; on failure nothing is recorded
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] of the underlying move
    pub fn apply(&mut self, request: &MoveRequest) -> Result<u64, MoveError> {
        let result = apply_move(&self.partition, request)?;
        Ok(self.absorb(result))
    }

    /// Adopt a result computed elsewhere (e.g. by the optimizer) from the
    /// current partition, returning its cost
    pub fn absorb(&mut self, result: MoveResult) -> u64 {
        self.partition = result.partition;
        self.log.extend(result.moves);
        self.cost += result.cost;
        result.cost
    }

    /// Total move cost plus the residual error of every block against `target`
    pub fn score(&self, target: &TargetImage) -> u64 {
        self.cost
            + self
                .partition
                .blocks()
                .iter()
                .map(|block| region_diff(block, target))
                .sum::<u64>()
    }
}
