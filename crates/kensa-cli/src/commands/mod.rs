//! CLI command implementations

pub mod analyze;

pub use analyze::AnalyzeArgs;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze React component files or directories
    Analyze(AnalyzeArgs),
}
