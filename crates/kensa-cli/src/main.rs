//! Kensa CLI - Command-line interface for the Kensa React component analyzer
//!
//! Checks React component files for syntax, hook, performance and
//! accessibility problems, and can fix the safe ones in place.

mod commands;
mod logging;
mod output;

use clap::Parser;
use commands::Commands;
use logging::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "kensa",
    author,
    version,
    about = "Static analyzer for React components",
    long_about = "Kensa inspects React component files for naming, hook, performance and\n\
                  accessibility problems, runs ESLint with the React plugins, and can\n\
                  remove unused imports and apply lint fixes automatically."
)]
pub struct Cli {
    #[arg(long, value_enum, default_value = "warn", global = true, help = "Set the log level")]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level, cli.log_json);

    match cli.command {
        Commands::Analyze(args) => args.run(),
    }
}
