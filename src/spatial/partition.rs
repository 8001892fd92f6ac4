//! Flat, persistent partition of the canvas into colored rectangular blocks
//!
//! Every move produces a new [`Partition`]; earlier snapshots stay valid.
//! Block ids are hierarchical (`P.0`, `P.1`, ...) for naming and history only:
//! all blocks live at one level, so the tiling check is a single pass.

use bitvec::prelude::{BitVec, bitvec};
use std::collections::HashSet;
use std::fmt;

use crate::io::configuration::DEFAULT_BLOCK_COLOR;
use crate::io::error::MoveError;
use crate::spatial::geometry::{Shape, Size};

/// RGBA color with integer channels
///
/// Channels are conventionally in `0..=255` but are stored as given; range
/// validation belongs to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub [i32; 4]);

impl Color {
    /// Create a color from its four channels
    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self([r, g, b, a])
    }

    /// Channels in `r, g, b, a` order
    pub const fn channels(self) -> [i32; 4] {
        self.0
    }

    /// Clamp each channel into a byte for rendering
    pub fn to_rgba8(self) -> [u8; 4] {
        self.0.map(|c| c.clamp(0, 255) as u8)
    }
}

impl From<[u8; 4]> for Color {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes.map(i32::from))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "[{r},{g},{b},{a}]")
    }
}

/// Hierarchical block identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap an identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the `index`-th child produced by a cut
    pub fn child(&self, index: usize) -> Self {
        Self(format!("{}.{index}", self.0))
    }

    /// Identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Uniformly colored rectangle with a unique id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Unique identifier within its partition
    pub id: BlockId,
    /// Covered rectangle
    pub shape: Shape,
    /// Fill color
    pub color: Color,
}

impl Block {
    /// Create a block
    pub const fn new(id: BlockId, shape: Shape, color: Color) -> Self {
        Self { id, shape, color }
    }
}

/// Blocks tiling a fixed-size canvas, plus the counter for merge ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    blocks: Vec<Block>,
    counter: u64,
    size: Size,
}

impl Partition {
    /// Canvas covered by a single block `"0"` of the default color
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] for a zero-area canvas
    pub fn new(size: Size) -> Result<Self, MoveError> {
        Self::with_color(size, Color(DEFAULT_BLOCK_COLOR))
    }

    /// Canvas covered by a single block `"0"` of the given color
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] for a zero-area canvas
    pub fn with_color(size: Size, color: Color) -> Result<Self, MoveError> {
        let shape = size.bounds()?;
        Ok(Self {
            blocks: vec![Block::new(BlockId::new("0"), shape, color)],
            counter: 0,
            size,
        })
    }

    /// Assemble a partition from existing blocks, checking the tiling
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] if the blocks leave gaps, overlap,
    /// leave the canvas, or repeat an id
    pub fn from_blocks(size: Size, counter: u64, blocks: Vec<Block>) -> Result<Self, MoveError> {
        let partition = Self {
            blocks,
            counter,
            size,
        };
        partition.verify_tiling()?;
        Ok(partition)
    }

    /// Canvas dimensions
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of merges performed so far
    pub const fn counter(&self) -> u64 {
        self.counter
    }

    /// Blocks in collection order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks
    pub const fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the partition has no blocks (never true for a valid partition)
    pub const fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Locate a block by id
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BlockNotFound`] if no block has this id
    pub fn find(&self, id: &BlockId) -> Result<&Block, MoveError> {
        self.blocks
            .iter()
            .find(|block| &block.id == id)
            .ok_or_else(|| MoveError::BlockNotFound { id: id.clone() })
    }

    /// Locate a block together with its containing block
    ///
    /// The partition is flat, so the container is always the canvas itself,
    /// reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::BlockNotFound`] if no block has this id
    pub fn find_with_parent(&self, id: &BlockId) -> Result<(&Block, Option<&Block>), MoveError> {
        self.find(id).map(|block| (block, None))
    }

    /// Index of a block in collection order
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    /// Identifier the next merge will assign
    pub fn next_merge_id(&self) -> BlockId {
        BlockId::new((self.counter + 1).to_string())
    }

    /// New snapshot with the block at `index` replaced by `replacements`
    ///
    /// Untouched blocks keep their order; replacements take the consumed
    /// block's place.
    pub(crate) fn splice(&self, index: usize, replacements: Vec<Block>) -> Self {
        let mut blocks = Vec::with_capacity(self.blocks.len() + replacements.len());
        let mut replacements = Some(replacements);
        for (i, block) in self.blocks.iter().enumerate() {
            if i == index {
                blocks.extend(replacements.take().unwrap_or_default());
            } else {
                blocks.push(block.clone());
            }
        }
        Self {
            blocks,
            counter: self.counter,
            size: self.size,
        }
    }

    /// New snapshot with two blocks consumed and `merged` placed where the
    /// earlier of the two stood
    pub(crate) fn merge_splice(&self, first: usize, second: usize, merged: Block) -> Self {
        let (keep, drop) = (first.min(second), first.max(second));
        let mut merged = Some(merged);
        let blocks = self
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop)
            .filter_map(|(i, block)| {
                if i == keep {
                    merged.take()
                } else {
                    Some(block.clone())
                }
            })
            .collect();
        Self {
            blocks,
            counter: self.counter + 1,
            size: self.size,
        }
    }

    /// New snapshot with the blocks replaced wholesale, keeping size and counter
    pub(crate) fn with_blocks(&self, blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            counter: self.counter,
            size: self.size,
        }
    }

    /// Check that the blocks cover the canvas exactly once with unique ids
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidGeometry`] describing the first violation found
    pub fn verify_tiling(&self) -> Result<(), MoveError> {
        let canvas = self.size.bounds()?;
        let width = self.size.width as usize;
        let mut covered: BitVec = bitvec![0; self.size.area() as usize];
        let mut ids = HashSet::with_capacity(self.blocks.len());

        for block in &self.blocks {
            if !ids.insert(&block.id) {
                return Err(MoveError::InvalidGeometry {
                    reason: format!("duplicate block id {}", block.id),
                });
            }

            let (low, high) = (block.shape.low(), block.shape.high());
            if low.x < 0 || low.y < 0 || high.x > canvas.high().x || high.y > canvas.high().y {
                return Err(MoveError::InvalidGeometry {
                    reason: format!("block {} at {} leaves the canvas", block.id, block.shape),
                });
            }

            for y in low.y..high.y {
                let row = y as usize * width;
                for x in low.x..high.x {
                    let index = row + x as usize;
                    if covered.get(index).is_some_and(|bit| *bit) {
                        return Err(MoveError::InvalidGeometry {
                            reason: format!("block {} overlaps at [{x},{y}]", block.id),
                        });
                    }
                    covered.set(index, true);
                }
            }
        }

        let gaps = covered.count_zeros();
        if gaps > 0 {
            return Err(MoveError::InvalidGeometry {
                reason: format!("{gaps} canvas pixels are not covered by any block"),
            });
        }

        Ok(())
    }
}
