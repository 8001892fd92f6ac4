//! Rectangular canvas partition with a cost-weighted move algebra and an image rasterizer
//!
//! A canvas is tiled by uniformly colored rectangular blocks. Moves split,
//! recolor, swap or merge blocks, each at a deterministic cost. The optimizer
//! searches for a move sequence that reproduces a target image while keeping
//! move cost plus residual color error low.

#![deny(unsafe_code)]

/// Greedy and brute-force rasterization over partitions
pub mod algorithm;
/// Target images and color similarity metrics
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Move algebra, cost model and editing session
pub mod moves;
/// Canvas geometry and block partition
pub mod spatial;

pub use io::error::{MoveError, RasterError, Result};
