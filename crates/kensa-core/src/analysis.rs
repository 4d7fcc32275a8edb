//! Analysis orchestration
//!
//! Runs every pass over one source unit at a time, in input order. Each unit
//! is parsed once; the AST is shared read-only by the passes. A unit's report
//! is handed to the caller, and its fix written, before the next unit is read.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::fixer::{FixError, FixOutcome, FixRequest, Fixer};
use crate::lint::{LintBridge, LintReport};
use crate::parser::{ParsedFile, ParserOptions};
use crate::passes::{
    AccessibilityPass, DebugPointsPass, HooksPass, HooksReport, ImportsPass, ImportsReport, Pass,
    PassName, PerformancePass, SyntaxPass,
};
use crate::suggestions::{Suggestion, suggest_optimizations};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzeOptions {
    pub fix: bool,
    pub debug: bool,
    pub verbose: bool,
}

impl AnalyzeOptions {
    /// Flags switched on by either side stay on.
    pub fn merge(self, other: AnalyzeOptions) -> AnalyzeOptions {
        AnalyzeOptions {
            fix: self.fix || other.fix,
            debug: self.debug || other.debug,
            verbose: self.verbose || other.verbose,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No input files given")]
    NoInputs,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    pub path: PathBuf,
    pub syntax: Vec<Diagnostic>,
    pub lint: Vec<Diagnostic>,
    #[serde(skip)]
    pub lint_report: LintReport,
    pub imports: ImportsReport,
    pub hooks: HooksReport,
    pub performance: Vec<Diagnostic>,
    pub accessibility: Vec<Diagnostic>,
    pub debug_points: Vec<Diagnostic>,
    pub suggestions: Vec<Suggestion>,
    pub failed_passes: Vec<PassName>,
}

impl AnalysisResult {
    pub fn diagnostics(&self, pass: PassName) -> &[Diagnostic] {
        match pass {
            PassName::Syntax => &self.syntax,
            PassName::Lint => &self.lint,
            PassName::Imports => &self.imports.diagnostics,
            PassName::Hooks => &self.hooks.diagnostics,
            PassName::Performance => &self.performance,
            PassName::Accessibility => &self.accessibility,
            PassName::DebugPoints => &self.debug_points,
        }
    }

    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        PassName::REPORT_ORDER
            .into_iter()
            .flat_map(|pass| self.diagnostics(pass))
    }

    pub fn error_count(&self) -> usize {
        self.all_diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn parse_failed(&self) -> bool {
        self.syntax
            .iter()
            .any(|d| d.kind == DiagnosticKind::ParseError)
    }
}

#[derive(Debug)]
pub struct UnitReport {
    pub result: AnalysisResult,
    /// Present only in fix mode.
    pub fix: Option<Result<FixOutcome, FixError>>,
}

#[derive(Debug)]
pub struct UnitOutcome {
    pub path: PathBuf,
    pub report: Result<UnitReport, AnalyzeError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub analyzed: usize,
    pub failed: usize,
}

pub struct Analyzer {
    options: AnalyzeOptions,
    parser_options: ParserOptions,
    lint: LintBridge,
    fixer: Fixer,
}

impl Analyzer {
    pub fn new(options: AnalyzeOptions, parser_options: ParserOptions, lint: LintBridge) -> Self {
        Self {
            options,
            fixer: Fixer::new(parser_options.clone()),
            parser_options,
            lint,
        }
    }

    pub fn options(&self) -> AnalyzeOptions {
        self.options
    }

    /// Analyzes `text` as the contents of `path` without touching the disk.
    pub fn analyze_source(&self, path: &Path, text: &str) -> AnalysisResult {
        let filename = path.to_string_lossy();
        let file = ParsedFile::with_options(&filename, text, &self.parser_options);
        let mut failed_passes = Vec::new();

        let syntax = run_guarded(&SyntaxPass::new(), &file, &mut failed_passes);
        let lint_report = self.lint.lint(text, path, false);
        let imports = run_guarded(&ImportsPass::new(), &file, &mut failed_passes);
        let hooks = run_guarded(&HooksPass::new(), &file, &mut failed_passes);
        let performance = run_guarded(&PerformancePass::new(), &file, &mut failed_passes);
        let accessibility = run_guarded(&AccessibilityPass::new(), &file, &mut failed_passes);
        let debug_points = if self.options.debug {
            run_guarded(&DebugPointsPass::new(), &file, &mut failed_passes)
        } else {
            Vec::new()
        };

        let suggestions = suggest_optimizations(&performance, &hooks);

        tracing::debug!(
            path = %path.display(),
            parsed = file.module().is_some(),
            unused_imports = imports.unused.len(),
            hooks = hooks.usages.len(),
            "passes finished"
        );

        AnalysisResult {
            path: path.to_path_buf(),
            syntax,
            lint: lint_report.to_diagnostics(),
            lint_report,
            imports,
            hooks,
            performance,
            accessibility,
            debug_points,
            suggestions,
            failed_passes,
        }
    }

    /// Reads, analyzes and, in fix mode, fixes one file.
    pub fn analyze_path(&self, path: &Path) -> Result<UnitReport, AnalyzeError> {
        if !path.is_file() {
            return Err(AnalyzeError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| AnalyzeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), "analyzing");
        let result = self.analyze_source(path, &text);

        let fix = self.options.fix.then(|| {
            let request = FixRequest {
                path,
                text: &text,
                lint: &result.lint_report,
                unused_imports: &result.imports.unused,
            };
            let outcome = self.fixer.fix(&request, &self.lint);
            if let Err(error) = &outcome {
                tracing::warn!(path = %path.display(), %error, "fix failed");
            }
            outcome
        });

        Ok(UnitReport { result, fix })
    }

    /// Processes `paths` strictly in order, handing each unit to `on_unit`
    /// before the next one is read. Per-unit failures do not stop the batch.
    pub fn run<F>(&self, paths: &[PathBuf], mut on_unit: F) -> Result<RunSummary, AnalyzeError>
    where
        F: FnMut(UnitOutcome),
    {
        if paths.is_empty() {
            return Err(AnalyzeError::NoInputs);
        }

        let mut summary = RunSummary::default();
        for path in paths {
            let report = self.analyze_path(path);
            match &report {
                Ok(_) => summary.analyzed += 1,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unit");
                    summary.failed += 1;
                }
            }
            on_unit(UnitOutcome {
                path: path.clone(),
                report,
            });
        }

        Ok(summary)
    }
}

/// Runs one pass, containing any panic to that pass's slot.
fn run_guarded<P: Pass>(pass: &P, file: &ParsedFile, failed: &mut Vec<PassName>) -> P::Output {
    let name = pass.metadata().name;
    match panic::catch_unwind(AssertUnwindSafe(|| pass.run(file))) {
        Ok(output) => output,
        Err(_) => {
            tracing::warn!(pass = %name, "pass panicked, leaving its results empty");
            failed.push(name);
            P::Output::default()
        }
    }
}
