//! Lint bridge
//!
//! Delegates rule checking to an external linter. The bridge is a pure
//! `(text, config) -> report` step: it never touches the file on disk, and
//! in fix mode the corrected text comes back in [`LintReport::output`] for
//! the fixer to adopt.

mod eslint;

pub use eslint::EslintEngine;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, DiagnosticKind, Extra, Severity};

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("Failed to start lint command '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("Lint engine failed: {0}")]
    Engine(String),
    #[error("Lint engine returned invalid output: {0}")]
    InvalidOutput(String),
    #[error("Failed to write lint config to '{path}': {source}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub enabled: bool,
    /// Program and leading arguments, e.g. `["npx", "eslint"]`.
    pub command: Vec<String>,
    pub plugins: Vec<String>,
    pub extends: Vec<String>,
    pub rules: BTreeMap<String, String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["npx".to_string(), "eslint".to_string()],
            plugins: vec!["react".to_string(), "react-hooks".to_string()],
            extends: vec![
                "eslint:recommended".to_string(),
                "plugin:react/recommended".to_string(),
                "plugin:react-hooks/recommended".to_string(),
            ],
            rules: BTreeMap::from([
                (
                    "react-hooks/rules-of-hooks".to_string(),
                    "error".to_string(),
                ),
                (
                    "react-hooks/exhaustive-deps".to_string(),
                    "warn".to_string(),
                ),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintMessage {
    pub line: usize,
    /// ESLint numbering: 2 is an error, 1 a warning.
    pub severity: u8,
    pub message: String,
    pub rule_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub error_count: usize,
    pub warning_count: usize,
    pub fixable_error_count: usize,
    pub fixable_warning_count: usize,
    pub messages: Vec<LintMessage>,
    /// Corrected text, only present in fix mode when something changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl LintReport {
    pub fn has_fixable(&self) -> bool {
        self.fixable_error_count > 0 || self.fixable_warning_count > 0
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.messages
            .iter()
            .map(|message| {
                let severity = match message.severity {
                    2 => Severity::Error,
                    1 => Severity::Warning,
                    _ => Severity::Info,
                };
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::LintFinding,
                    severity,
                    message.message.clone(),
                    message.line,
                );
                match &message.rule_id {
                    Some(rule_id) => diagnostic.with_extra(Extra::LintRule {
                        rule_id: rule_id.clone(),
                    }),
                    None => diagnostic,
                }
            })
            .collect()
    }

    fn from_error(error: &LintError) -> Self {
        Self {
            error_count: 1,
            messages: vec![LintMessage {
                line: 1,
                severity: 2,
                message: error.to_string(),
                rule_id: None,
            }],
            ..Default::default()
        }
    }
}

pub trait LintEngine {
    fn lint_text(
        &self,
        text: &str,
        path: &Path,
        fix: bool,
        config: &LintConfig,
    ) -> Result<LintReport, LintError>;
}

pub struct LintBridge {
    engine: Box<dyn LintEngine>,
    config: LintConfig,
}

impl LintBridge {
    pub fn new(engine: Box<dyn LintEngine>, config: LintConfig) -> Self {
        Self { engine, config }
    }

    pub fn eslint(config: LintConfig) -> Self {
        Self::new(Box::new(EslintEngine), config)
    }

    pub fn disabled() -> Self {
        Self::eslint(LintConfig {
            enabled: false,
            ..Default::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lints `text` as if it were the contents of `path`. Engine failures are
    /// folded into the report as a single error message.
    pub fn lint(&self, text: &str, path: &Path, fix: bool) -> LintReport {
        if !self.config.enabled {
            return LintReport::default();
        }

        match self.engine.lint_text(text, path, fix, &self.config) {
            Ok(report) => {
                tracing::debug!(
                    path = %path.display(),
                    errors = report.error_count,
                    warnings = report.warning_count,
                    fix,
                    "lint finished"
                );
                report
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "lint engine failed");
                LintReport::from_error(&error)
            }
        }
    }
}
