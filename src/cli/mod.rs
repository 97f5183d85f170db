//! Command-line interface
//!
//! Argument parsing and the runner that drives a full export.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{run_export, Runner};
