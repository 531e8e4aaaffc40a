//! Core engine, loaders, reports and configuration

pub mod classifier;
pub mod config;
pub mod graduation;
pub mod models;
pub mod orchestrator;
pub mod planner;
pub mod report;
pub mod rules;
pub mod sections;
pub mod simulator;
pub mod substitution;

/// Returns the current version of the `grad-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
