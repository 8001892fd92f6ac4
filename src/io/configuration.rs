//! Constants and runtime configuration defaults

/// Fill color of the single block a fresh canvas starts with
pub const DEFAULT_BLOCK_COLOR: [i32; 4] = [255, 255, 255, 255];

// Region error is summed per pixel, then scaled and rounded
/// Scale applied to the summed per-pixel distance of a region
pub const DIFF_SCALE: f64 = 0.005;

// Tuning constants: chosen empirically, overridable through OptimizerConfig
/// Max pairwise sampled distance below which a region counts as uniform
pub const UNIFORMITY_THRESHOLD: f64 = 10.0;
/// Side of the sampling grid used for the uniformity test
pub const UNIFORMITY_GRID: u32 = 4;
/// Smallest divisor used as a cut step by the candidate search
pub const MIN_CUT_STEP: u32 = 10;
/// Slack added to the recolor acceptance test (`colored + cost <= inherited + slack`)
pub const RECOLOR_SLACK: u64 = 0;

/// Default number of optimizer passes
pub const DEFAULT_MAX_PASSES: usize = 8;
/// Default quad-split recursion depth (1 = single split per block)
pub const DEFAULT_GREEDY_DEPTH: usize = 1;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to rendered output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to move log filenames
pub const MOVES_SUFFIX: &str = "_moves";
/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "BLOCKRASTER_LOG";
