/// Divisor-step cut candidate search
pub mod brute_force;
/// Per-block fan-out, pass driver and cancellation
pub mod executor;
/// Greedy quad-split rasterization
pub mod rasterize;
