//! CLI command handlers

pub mod commands;

pub use commands::{check, generate, init, layout, resolve_config, ConfigOverrides};
