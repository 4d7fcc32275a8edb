//! Analyze command - inspects React component files and optionally fixes them

use crate::output::json::{JsonFormatter, JsonUnit};
use crate::output::pretty::PrettyFormatter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use kensa_core::analysis::{AnalyzeOptions, Analyzer, RunSummary, UnitOutcome};
use kensa_core::config::discover_config;
use kensa_core::lint::LintBridge;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use walkdir::WalkDir;

const SUPPORTED_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Ndjson,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Component files or directories to analyze
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Remove unused imports and apply lint fixes, keeping a .backup copy
    #[arg(long)]
    pub fix: bool,

    /// Report state updates, effect dependencies and event listeners
    #[arg(long)]
    pub debug: bool,

    /// Show columns, per-diagnostic suggestions and optimization hints
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Skip the ESLint bridge
    #[arg(long)]
    pub no_lint: bool,
}

impl AnalyzeArgs {
    pub fn run(&self) -> Result<()> {
        self.configure_colors();

        let cwd = std::env::current_dir().context("Failed to resolve the current directory")?;
        let config_result = discover_config(&cwd)?;
        for warning in &config_result.warnings {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
        if let Some(path) = &config_result.path {
            tracing::debug!(path = %path.display(), "loaded config");
        }
        let config = config_result.config;

        let options = config.analysis.merge(self.cli_options());
        let lint = if self.no_lint {
            LintBridge::disabled()
        } else {
            LintBridge::eslint(config.lint)
        };
        let analyzer = Analyzer::new(options, config.parser, lint);

        let files = collect_inputs(&self.paths);
        if files.is_empty() {
            println!("No React component files found.");
            return Ok(());
        }

        let mut reporter = Reporter::new(self.format, options);
        let summary = analyzer.run(&files, |unit| reporter.report(unit))?;
        let errors = reporter.finish(&summary)?;

        if errors > 0 || summary.failed > 0 {
            process::exit(1);
        }

        Ok(())
    }

    fn cli_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            fix: self.fix,
            debug: self.debug,
            verbose: self.verbose,
        }
    }

    fn configure_colors(&self) {
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        if self.no_color || no_color_env || self.format != OutputFormat::Pretty {
            colored::control::set_override(false);
        }
    }
}

/// Writes each unit as it arrives; `json` buffers until the batch is done.
struct Reporter {
    format: OutputFormat,
    pretty: PrettyFormatter,
    json: JsonFormatter,
    buffered: Vec<JsonUnit>,
    errors: usize,
    write_error: Option<io::Error>,
}

impl Reporter {
    fn new(format: OutputFormat, options: AnalyzeOptions) -> Self {
        let mut reporter = Self {
            format,
            pretty: PrettyFormatter::new(options),
            json: JsonFormatter::new(),
            buffered: Vec::new(),
            errors: 0,
            write_error: None,
        };
        if format == OutputFormat::Ndjson {
            let result = reporter.json.write_ndjson_metadata(&mut io::stdout().lock());
            reporter.record(result);
        }
        reporter
    }

    fn report(&mut self, unit: UnitOutcome) {
        if let Ok(report) = &unit.report {
            self.errors += report.result.error_count();
        }

        match self.format {
            OutputFormat::Pretty => {
                let mut stdout = io::stdout().lock();
                let result = stdout
                    .write_all(self.pretty.format_unit(&unit).as_bytes())
                    .and_then(|_| stdout.flush());
                self.record(result);
            }
            OutputFormat::Json => {
                let unit = self.json.add(unit);
                self.buffered.push(unit);
            }
            OutputFormat::Ndjson => {
                let unit = self.json.add(unit);
                let result = self.json.write_ndjson_unit(&unit, &mut io::stdout().lock());
                self.record(result);
            }
        }
    }

    fn finish(mut self, summary: &RunSummary) -> Result<usize> {
        match self.format {
            OutputFormat::Pretty => {
                print!("{}", self.pretty.format_summary(summary, self.errors));
            }
            OutputFormat::Json => println!("{}", self.json.format(&self.buffered)),
            OutputFormat::Ndjson => {
                let result = self.json.write_ndjson_summary(&mut io::stdout().lock());
                self.record(result);
            }
        }

        if let Some(error) = self.write_error {
            return Err(error).context("Failed to write the report");
        }
        Ok(self.errors)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(error) = result
            && self.write_error.is_none()
        {
            self.write_error = Some(error);
        }
    }
}

/// Expands directories into their component files in a stable order. Explicit
/// paths are passed through unchanged, missing ones included, so the
/// analyzer can report them as failed units.
fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(discover_files(path));
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_supported_file(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name == "node_modules")
        .unwrap_or(false)
}
