//! Move cost model
//!
//! A move's cost is its base cost scaled by how small the addressed block is
//! relative to the canvas: `round(base * canvas_area / block_area)`.

use num_traits::ToPrimitive;

use crate::moves::record::MoveKind;
use crate::spatial::geometry::{Shape, Size};

/// Base cost of each move kind before area scaling
pub const fn base_cost(kind: MoveKind) -> u64 {
    match kind {
        MoveKind::PointCut => 10,
        MoveKind::LineCut => 7,
        MoveKind::Color => 5,
        MoveKind::Swap => 3,
        MoveKind::Merge => 1,
    }
}

/// Cost of applying `kind` to a block with rectangle `shape` on a canvas of `canvas`
pub fn move_cost(kind: MoveKind, shape: &Shape, canvas: Size) -> u64 {
    let scaled = base_cost(kind) as f64 * canvas.area() as f64 / shape.area() as f64;
    scaled.round().to_u64().unwrap_or(u64::MAX)
}
