//! CLI command implementations.

pub mod config;
pub mod prepare;
pub mod render;
pub mod serve;
