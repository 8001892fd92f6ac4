/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG loading and partition rendering
pub mod image;
/// Progress display for optimizer passes
pub mod progress;
/// Move log reading and writing
pub mod transcript;
