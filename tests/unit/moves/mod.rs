pub mod cut;
pub mod swap;
