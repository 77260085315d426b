//! CLI command handling

pub mod interpret;
pub mod output;

pub use interpret::*;
pub use output::*;
