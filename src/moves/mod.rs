/// Recolor move
pub mod color;
/// Per-kind base costs scaled by block area
pub mod cost;
/// Line and point cuts
pub mod cut;
/// Merge of adjacent blocks
pub mod merge;
/// Move records, kinds and results
pub mod record;
/// Request dispatch and the editing session
pub mod request;
/// Swap of congruent blocks
pub mod swap;

pub use record::{Move, MoveKind, MoveResult};
pub use request::{MoveRequest, Session, apply_move};
