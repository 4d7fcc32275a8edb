//! Human-readable report, one block per analyzed unit.

use colored::{ColoredString, Colorize};
use kensa_core::analysis::{AnalysisResult, AnalyzeOptions, RunSummary, UnitOutcome};
use kensa_core::diagnostic::{Diagnostic, Extra, Severity};
use kensa_core::fixer::{FixError, FixOutcome};
use std::fmt::Write;

pub struct PrettyFormatter {
    options: AnalyzeOptions,
}

impl PrettyFormatter {
    pub fn new(options: AnalyzeOptions) -> Self {
        Self { options }
    }

    pub fn format_unit(&self, unit: &UnitOutcome) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", "Analyzing".bold(), unit.path.display());

        match &unit.report {
            Ok(report) => {
                self.write_result(&mut out, &report.result);
                if let Some(fix) = &report.fix {
                    self.write_fix(&mut out, fix, &report.result);
                }
            }
            Err(error) => {
                let _ = writeln!(out, "{} {}", "✗".red().bold(), error);
            }
        }

        out.push('\n');
        out
    }

    pub fn format_summary(&self, summary: &RunSummary, errors: usize) -> String {
        let mut out = format!("Analyzed {} file(s)", summary.analyzed);
        if summary.failed > 0 {
            let _ = write!(out, ", {} could not be analyzed", summary.failed);
        }
        if errors > 0 {
            let _ = write!(out, ", {} error(s) found", errors);
        }
        out.push('\n');
        out
    }

    fn write_result(&self, out: &mut String, result: &AnalysisResult) {
        let _ = writeln!(out, "\n{}", "=== Analysis Results ===".bold());

        match result.syntax.iter().find(|d| d.is_error()) {
            Some(error) => {
                let _ = writeln!(
                    out,
                    "{} Syntax error at line {}: {}",
                    "✗".red().bold(),
                    error.line,
                    error.message
                );
            }
            None => {
                let _ = writeln!(out, "{} Syntax valid", "✓".green());
            }
        }

        let warnings: Vec<&Diagnostic> = result.syntax.iter().filter(|d| !d.is_error()).collect();
        self.write_section(out, "Syntax Warnings", warnings);

        if result.lint.is_empty() {
            let _ = writeln!(out, "\n{} No linting issues", "✓".green());
        } else {
            self.write_section(out, "Linting Issues", result.lint.iter().collect());
        }

        if !result.imports.imports.is_empty() {
            let _ = writeln!(out, "\n{}", "Imports:".bold());
            for import in &result.imports.imports {
                let _ = writeln!(
                    out,
                    "  - {}: {}",
                    import.source,
                    import.specifiers.join(", ")
                );
            }
        }
        if !result.imports.unused.is_empty() {
            let _ = writeln!(out, "\n{}", "Unused Imports:".bold());
            for name in &result.imports.unused {
                let _ = writeln!(out, "  - {}", name.yellow());
            }
        }

        if !result.hooks.usages.is_empty() {
            let _ = writeln!(out, "\n{}", "Hooks Usage:".bold());
            for usage in &result.hooks.usages {
                let _ = writeln!(out, "  - {} (line {})", usage.name, usage.line);
            }
        }
        self.write_section(out, "Hook Issues", result.hooks.diagnostics.iter().collect());

        self.write_section(
            out,
            "Performance Considerations",
            result.performance.iter().collect(),
        );
        self.write_section(
            out,
            "Accessibility Issues",
            result.accessibility.iter().collect(),
        );

        if self.options.debug {
            self.write_section(out, "Debug Points", result.debug_points.iter().collect());
        }

        if self.options.verbose && !result.suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", "Optimization Suggestions:".bold());
            for suggestion in &result.suggestions {
                let _ = writeln!(
                    out,
                    "  - [{}] {}",
                    suggestion.priority.as_str(),
                    suggestion.message
                );
            }
        }

        for pass in &result.failed_passes {
            let _ = writeln!(
                out,
                "{} the {} pass failed; its results are missing",
                "warning:".yellow().bold(),
                pass
            );
        }
    }

    fn write_section(&self, out: &mut String, title: &str, diagnostics: Vec<&Diagnostic>) {
        if diagnostics.is_empty() {
            return;
        }
        let _ = writeln!(out, "\n{}", format!("{}:", title).bold());
        for diag in diagnostics {
            let location = match diag.column {
                Some(column) if self.options.verbose => format!("{}:{}", diag.line, column),
                _ => diag.line.to_string(),
            };
            let _ = write!(
                out,
                "  - {} line {}: {}",
                severity_label(diag.severity),
                location,
                diag.message
            );
            match &diag.extra {
                Some(Extra::LintRule { rule_id }) => {
                    let _ = write!(out, " [{}]", rule_id.dimmed());
                }
                Some(Extra::Effect { dependencies }) if !dependencies.is_empty() => {
                    let _ = write!(out, " (dependencies: {})", dependencies.join(", "));
                }
                _ => {}
            }
            out.push('\n');
            if self.options.verbose
                && let Some(suggestion) = &diag.suggestion
            {
                let _ = writeln!(out, "      {} {}", "suggestion:".green(), suggestion);
            }
        }
    }

    fn write_fix(
        &self,
        out: &mut String,
        fix: &Result<FixOutcome, FixError>,
        result: &AnalysisResult,
    ) {
        out.push('\n');
        match fix {
            Ok(outcome) if outcome.changed() => {
                let _ = writeln!(
                    out,
                    "{} Fixed issues and saved to {}",
                    "✓".green(),
                    result.path.display()
                );
                if let Some(backup) = &outcome.backup_path {
                    let _ = writeln!(out, "Original file backed up to {}", backup.display());
                }
            }
            Ok(_) => {
                let _ = writeln!(out, "No automatic fixes were needed");
            }
            Err(error) => {
                let _ = writeln!(out, "{} Fix failed: {}", "✗".red().bold(), error);
            }
        }

        let manual: Vec<&Diagnostic> = result.syntax.iter().filter(|d| !d.is_error()).collect();
        if !manual.is_empty() {
            let _ = writeln!(out, "Consider manually fixing:");
            for diag in manual {
                let _ = writeln!(out, "  - line {}: {}", diag.line, diag.message);
            }
        }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Info => "info".blue().bold(),
    }
}
