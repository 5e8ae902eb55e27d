//! Command-line interface
//!
//! A thin wrapper that runs one discovery and prints the result.

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::Runner;
