//! Canvas geometry and the block partition
//!
//! This module contains:
//! - Points, rectangles and sizes in bottom-left-origin canvas coordinates
//! - Blocks, colors and the flat persistent partition with its tiling check

/// Points, rectangles and sizes
pub mod geometry;
/// Blocks and the canvas partition
pub mod partition;

pub use geometry::{Orientation, Point, Shape, Size};
pub use partition::{Block, BlockId, Color, Partition};
