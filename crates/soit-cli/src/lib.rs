//! CLI library components for the student risk dashboard.

pub mod commands;
pub mod logging;
pub mod summary;
