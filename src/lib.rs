//! Library for `grad-planner`
//! Degree-requirement classification, graduation simulation and reporting

pub mod core;
pub mod logger;

pub use core::config;
pub use core::get_version;
