//! CLI command handlers for `gradplanner`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod evaluate;
pub mod report;
