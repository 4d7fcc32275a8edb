//! Diagnostic reporting for analysis results
//!
//! Every pass, the lint bridge and the parser report findings through the same
//! [`Diagnostic`] record so the report can treat them uniformly.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    SyntaxWarning,
    ParseError,
    LintFinding,
    UnusedImport,
    HookMisuse,
    PerformanceConcern,
    AccessibilityIssue,
    DebugPoint,
}

/// Kind-specific payload attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Extra {
    Tag { name: String },
    Hook { name: String },
    Prop { name: String },
    Import { name: String, source: String },
    Effect { dependencies: Vec<String> },
    StateUpdate { setter: String },
    EventListener,
    LintRule { rule_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<Extra>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        severity: Severity,
        message: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            line,
            column: None,
            extra: None,
            suggestion: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Sorts diagnostics into document order; diagnostics without a column sort
/// first on their line.
pub fn sort_by_location(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| (d.line, d.column.unwrap_or(0)));
}
