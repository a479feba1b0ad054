//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Infers the field model of event interfaces.
///
/// Reads a structural model of interfaces (JSON), classifies their getters and
/// setters, applies explicit field overrides and prints the resulting catalog.
#[derive(Debug, Parser)]
#[command(name = "evgen", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Infer fields for every included interface and print the catalog.
    Analyze(AnalyzeArgs),

    /// Show how each method of one interface was classified.
    Explain {
        /// Structural model file (JSON).
        model: PathBuf,

        /// Qualified name of the interface to explain.
        interface: String,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Arguments for `evgen analyze`.
#[derive(Debug, Default, Args)]
pub struct AnalyzeArgs {
    /// Structural model file (JSON).
    pub model: PathBuf,

    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with an error if any warning was raised.
    #[arg(long)]
    pub deny_warnings: bool,

    /// Analyse interfaces in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Only analyse interfaces whose source file matches (repeatable).
    #[arg(long, value_name = "REGEX")]
    pub include: Vec<String>,

    /// Skip interfaces whose source file matches (repeatable).
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Flags shared by commands that run inference.
#[derive(Debug, Default, Args)]
pub struct OverrideArgs {
    /// Annotation carrying explicit `name:type` field lists.
    #[arg(long, value_name = "NAME")]
    pub override_annotation: Option<String>,
}
