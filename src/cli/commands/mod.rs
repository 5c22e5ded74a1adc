//! CLI command implementations

pub mod common;

pub mod completions;
pub mod map;
pub mod run;
