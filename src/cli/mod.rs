//! Command Line Interface for intentbot.

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;
