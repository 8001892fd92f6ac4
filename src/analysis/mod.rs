/// Color distance, region error and color selection strategies
pub mod similarity;
/// Target pixel buffer in canvas coordinates
pub mod target;
