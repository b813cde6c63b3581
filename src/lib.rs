//! Todo CLI - interactive task tracker backed by a JSON file

pub mod logging;
pub mod planner;
