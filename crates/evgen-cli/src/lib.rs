//! Event field-model inference CLI library.
//!
//! This crate provides the CLI interface for evgen.

mod cli;
pub mod commands;
mod config;
mod policy;

pub use cli::{AnalyzeArgs, Cli, Commands, OverrideArgs};
pub use config::Config;
pub use policy::RegexPolicy;
