//! JSON output formatter for analysis results
//!
//! Provides structured JSON and NDJSON output formats for programmatic integration.

use kensa_core::analysis::{AnalysisResult, UnitOutcome};
use kensa_core::diagnostic::Severity;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub metadata: JsonMetadata,
    pub summary: &'a JsonSummary,
    pub units: &'a [JsonUnit],
}

#[derive(Serialize)]
pub struct JsonMetadata {
    pub kensa_version: &'static str,
    pub working_directory: String,
}

#[derive(Debug, Default, Serialize)]
pub struct JsonSummary {
    pub total_units: usize,
    pub failed_units: usize,
    pub fixed_units: usize,
    pub by_severity: SeverityCounts,
}

#[derive(Debug, Default, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonUnit {
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<JsonFix>,
}

#[derive(Debug, Serialize)]
pub struct JsonFix {
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<UnitOutcome> for JsonUnit {
    fn from(outcome: UnitOutcome) -> Self {
        match outcome.report {
            Ok(report) => JsonUnit {
                path: outcome.path,
                error: None,
                fix: report.fix.map(|fix| match fix {
                    Ok(outcome) => JsonFix {
                        changed: outcome.changed(),
                        backup_path: outcome.backup_path,
                        error: None,
                    },
                    Err(error) => JsonFix {
                        changed: false,
                        backup_path: None,
                        error: Some(error.to_string()),
                    },
                }),
                result: Some(report.result),
            },
            Err(error) => JsonUnit {
                path: outcome.path,
                error: Some(error.to_string()),
                result: None,
                fix: None,
            },
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
pub enum NdjsonRecord<'a> {
    #[serde(rename = "metadata")]
    Metadata(JsonMetadata),
    #[serde(rename = "unit")]
    Unit(&'a JsonUnit),
    #[serde(rename = "summary")]
    Summary(&'a JsonSummary),
}

/// Collects per-unit records; `json` prints them once the batch is done while
/// `ndjson` writes each record as soon as its unit finishes.
#[derive(Default)]
pub struct JsonFormatter {
    summary: JsonSummary,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &JsonSummary {
        &self.summary
    }

    /// Records `outcome` in the running summary and converts it.
    pub fn add(&mut self, outcome: UnitOutcome) -> JsonUnit {
        let unit = JsonUnit::from(outcome);
        self.summary.total_units += 1;
        if unit.error.is_some() {
            self.summary.failed_units += 1;
        }
        if unit.fix.as_ref().is_some_and(|fix| fix.changed) {
            self.summary.fixed_units += 1;
        }
        if let Some(result) = &unit.result {
            for diag in result.all_diagnostics() {
                match diag.severity {
                    Severity::Error => self.summary.by_severity.error += 1,
                    Severity::Warning => self.summary.by_severity.warning += 1,
                    Severity::Info => self.summary.by_severity.info += 1,
                }
            }
        }
        unit
    }

    pub fn format(&self, units: &[JsonUnit]) -> String {
        let output = JsonOutput {
            version: "1.0",
            metadata: build_metadata(),
            summary: &self.summary,
            units,
        };
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_ndjson_metadata<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_record(writer, &NdjsonRecord::Metadata(build_metadata()))
    }

    pub fn write_ndjson_unit<W: Write>(&self, unit: &JsonUnit, writer: &mut W) -> io::Result<()> {
        write_record(writer, &NdjsonRecord::Unit(unit))
    }

    pub fn write_ndjson_summary<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_record(writer, &NdjsonRecord::Summary(&self.summary))
    }
}

fn write_record<W: Write>(writer: &mut W, record: &NdjsonRecord) -> io::Result<()> {
    writeln!(writer, "{}", serde_json::to_string(record)?)?;
    writer.flush()
}

fn build_metadata() -> JsonMetadata {
    JsonMetadata {
        kensa_version: env!("CARGO_PKG_VERSION"),
        working_directory: std::env::current_dir()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kensa_core::analysis::{AnalyzeError, UnitReport};
    use kensa_core::diagnostic::{Diagnostic, DiagnosticKind};
    use kensa_core::fixer::FixOutcome;

    fn analyzed_unit() -> UnitOutcome {
        let result = AnalysisResult {
            path: PathBuf::from("src/Card.jsx"),
            accessibility: vec![Diagnostic::new(
                DiagnosticKind::AccessibilityIssue,
                Severity::Error,
                "Image elements must have alt text",
                4,
            )],
            performance: vec![Diagnostic::new(
                DiagnosticKind::PerformanceConcern,
                Severity::Warning,
                "Inline object literal in prop 'style' causes re-renders",
                6,
            )],
            ..Default::default()
        };
        UnitOutcome {
            path: PathBuf::from("src/Card.jsx"),
            report: Ok(UnitReport { result, fix: None }),
        }
    }

    fn missing_unit() -> UnitOutcome {
        UnitOutcome {
            path: PathBuf::from("src/Gone.jsx"),
            report: Err(AnalyzeError::FileNotFound(PathBuf::from("src/Gone.jsx"))),
        }
    }

    #[test]
    fn format_produces_valid_json() {
        let mut formatter = JsonFormatter::new();
        let units = vec![formatter.add(analyzed_unit())];

        let output = formatter.format(&units);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["version"], "1.0");
        assert!(parsed["metadata"]["kensa_version"].is_string());
        assert!(parsed["units"].is_array());
    }

    #[test]
    fn format_includes_summary() {
        let mut formatter = JsonFormatter::new();
        let units = vec![formatter.add(analyzed_unit()), formatter.add(missing_unit())];

        let output = formatter.format(&units);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["summary"]["total_units"], 2);
        assert_eq!(parsed["summary"]["failed_units"], 1);
        assert_eq!(parsed["summary"]["by_severity"]["error"], 1);
        assert_eq!(parsed["summary"]["by_severity"]["warning"], 1);
    }

    #[test]
    fn unit_carries_result_slots() {
        let mut formatter = JsonFormatter::new();
        let units = vec![formatter.add(analyzed_unit())];

        let parsed: serde_json::Value = serde_json::from_str(&formatter.format(&units)).unwrap();
        let unit = &parsed["units"][0];
        assert_eq!(unit["path"], "src/Card.jsx");
        assert!(unit.get("error").is_none());
        let a11y = &unit["result"]["accessibility"][0];
        assert_eq!(a11y["kind"], "AccessibilityIssue");
        assert_eq!(a11y["severity"], "error");
        assert_eq!(a11y["line"], 4);
    }

    #[test]
    fn failed_unit_reports_error_without_result() {
        let unit = JsonUnit::from(missing_unit());

        assert_eq!(unit.error.as_deref(), Some("File not found: src/Gone.jsx"));
        assert!(unit.result.is_none());
        assert!(unit.fix.is_none());
    }

    #[test]
    fn fix_outcome_is_summarised() {
        let mut outcome = analyzed_unit();
        if let Ok(report) = &mut outcome.report {
            report.fix = Some(Ok(FixOutcome {
                original_text: "a".to_string(),
                fixed_text: "b".to_string(),
                backup_path: Some(PathBuf::from("src/Card.jsx.backup")),
            }));
        }
        let mut formatter = JsonFormatter::new();

        let unit = formatter.add(outcome);

        let fix = unit.fix.unwrap();
        assert!(fix.changed);
        assert_eq!(fix.backup_path, Some(PathBuf::from("src/Card.jsx.backup")));
        assert_eq!(formatter.summary().fixed_units, 1);
    }

    #[test]
    fn ndjson_format_produces_lines() {
        let mut formatter = JsonFormatter::new();
        let mut output = Vec::new();

        formatter.write_ndjson_metadata(&mut output).unwrap();
        let unit = formatter.add(analyzed_unit());
        formatter.write_ndjson_unit(&unit, &mut output).unwrap();
        formatter.write_ndjson_summary(&mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output_str.lines().collect();
        assert_eq!(lines.len(), 3);

        let metadata: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(metadata["type"], "metadata");
        let unit: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(unit["type"], "unit");
        assert_eq!(unit["path"], "src/Card.jsx");
        let summary: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(summary["type"], "summary");
        assert_eq!(summary["total_units"], 1);
    }
}
