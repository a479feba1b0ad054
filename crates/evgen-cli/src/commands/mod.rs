//! CLI subcommand implementations.

pub mod analyze;
pub mod explain;
mod util;
