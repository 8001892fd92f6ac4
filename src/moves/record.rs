//! Move records and the result of applying moves
//!
//! Records carry enough to replay or render an edit. Their `Display` form is
//! the line-oriented move log format, one move per line.

use std::fmt;

use crate::spatial::geometry::{Orientation, Point, Shape};
use crate::spatial::partition::{BlockId, Color, Partition};

/// Kind of move, used to look up its base cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Four-way split at a point
    PointCut,
    /// Two-way split along a line
    LineCut,
    /// Recolor a block
    Color,
    /// Exchange two congruent blocks
    Swap,
    /// Join two adjacent blocks
    Merge,
}

/// One entry of the append-only move log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// A block was recolored
    Color {
        /// Recolored block
        block: BlockId,
        /// New fill color
        color: Color,
        /// Block rectangle at the time of the move
        shape: Shape,
    },
    /// A block was split in two
    LineCut {
        /// Block that was cut
        block: BlockId,
        /// Cut direction
        orientation: Orientation,
        /// Point the cut line passes through
        point: Point,
        /// Block rectangle before the cut
        shape: Shape,
    },
    /// A block was split into quadrants
    PointCut {
        /// Block that was cut
        block: BlockId,
        /// Shared corner of the four quadrants
        point: Point,
        /// Block rectangle before the cut
        shape: Shape,
    },
    /// Two congruent blocks exchanged identities
    Swap {
        /// First block of the pair
        first: BlockId,
        /// Second block of the pair
        second: BlockId,
        /// Rectangles of the pair before the swap
        shapes: [Shape; 2],
    },
    /// Two adjacent blocks were joined
    Merge {
        /// First block of the pair
        first: BlockId,
        /// Second block of the pair
        second: BlockId,
        /// Rectangles of the pair before the merge
        shapes: [Shape; 2],
    },
}

impl Move {
    /// Kind of this move
    pub const fn kind(&self) -> MoveKind {
        match self {
            Self::Color { .. } => MoveKind::Color,
            Self::LineCut { .. } => MoveKind::LineCut,
            Self::PointCut { .. } => MoveKind::PointCut,
            Self::Swap { .. } => MoveKind::Swap,
            Self::Merge { .. } => MoveKind::Merge,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { block, color, .. } => {
                let [r, g, b, a] = color.channels();
                write!(f, "color [{block}] [{r},{g},{b},{a}]")
            }
            Self::LineCut {
                block,
                orientation,
                point,
                ..
            } => {
                let offset = match orientation {
                    Orientation::Vertical => point.x,
                    Orientation::Horizontal => point.y,
                };
                write!(f, "cut [{block}] [{}] [{offset}]", orientation.axis())
            }
            Self::PointCut { block, point, .. } => {
                write!(f, "cut [{block}] [{},{}]", point.x, point.y)
            }
            Self::Merge { first, second, .. } => write!(f, "merge [{first}] [{second}]"),
            Self::Swap { first, second, .. } => write!(f, "swap [{first}] [{second}]"),
        }
    }
}

/// Output of applying one or more moves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Partition after the moves
    pub partition: Partition,
    /// Records appended, in application order
    pub moves: Vec<Move>,
    /// Sum of the costs of the appended moves
    pub cost: u64,
}

impl MoveResult {
    /// Result that leaves `partition` as it is
    pub const fn unchanged(partition: Partition) -> Self {
        Self {
            partition,
            moves: Vec::new(),
            cost: 0,
        }
    }

    /// Apply a further step to this result's partition, accumulating its moves and cost
    ///
    /// # Errors
    ///
    /// Propagates the step's error; `self` is consumed either way
    pub fn then<E>(
        mut self,
        step: impl FnOnce(&Partition) -> Result<Self, E>,
    ) -> Result<Self, E> {
        let next = step(&self.partition)?;
        self.moves.extend(next.moves);
        Ok(Self {
            partition: next.partition,
            moves: self.moves,
            cost: self.cost + next.cost,
        })
    }
}
