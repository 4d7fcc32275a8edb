//! ESLint engine driven through its command line interface.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde::Deserialize;
use serde_json::json;

use super::{LintConfig, LintEngine, LintError, LintMessage, LintReport};

/// Exit status ESLint uses for configuration and internal failures.
const FATAL_EXIT_CODE: i32 = 2;

/// ESLint 9 defaults to flat config; the generated config is eslintrc-format.
const FLAT_CONFIG_ENV: &str = "ESLINT_USE_FLAT_CONFIG";

pub struct EslintEngine;

impl LintEngine for EslintEngine {
    fn lint_text(
        &self,
        text: &str,
        path: &Path,
        fix: bool,
        config: &LintConfig,
    ) -> Result<LintReport, LintError> {
        let Some((program, leading)) = config.command.split_first() else {
            return Err(LintError::Engine("lint command is empty".to_string()));
        };

        let mut config_file = tempfile::Builder::new()
            .prefix("kensa-eslint-")
            .suffix(".json")
            .tempfile()
            .map_err(|source| LintError::ConfigWrite {
                path: std::env::temp_dir(),
                source,
            })?;
        config_file
            .write_all(build_config(config).to_string().as_bytes())
            .and_then(|()| config_file.flush())
            .map_err(|source| LintError::ConfigWrite {
                path: config_file.path().to_path_buf(),
                source,
            })?;

        let mut child = build_command(program, leading, config_file.path(), path, fix)
            .spawn()
            .map_err(|source| LintError::Spawn {
                command: config.command.join(" "),
                source,
            })?;

        let stdin = child.stdin.take();
        let input = text.to_string();
        let writer = std::thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                // A closed pipe shows up as a failed exit below.
                let _ = stdin.write_all(input.as_bytes());
            }
        });

        let output = child.wait_with_output().map_err(|source| LintError::Spawn {
            command: config.command.join(" "),
            source,
        })?;
        let _ = writer.join();

        match output.status.code() {
            Some(code) if code < FATAL_EXIT_CODE => {}
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(LintError::Engine(
                    stderr.lines().next().unwrap_or("eslint exited abnormally").to_string(),
                ));
            }
        }

        parse_report(&String::from_utf8_lossy(&output.stdout))
    }
}

fn build_command(
    program: &str,
    leading: &[String],
    config_path: &Path,
    path: &Path,
    fix: bool,
) -> Command {
    let mut command = Command::new(program);
    command
        .args(leading)
        .args(build_args(config_path, path, fix))
        .env(FLAT_CONFIG_ENV, "false")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}

fn build_args(config_path: &Path, path: &Path, fix: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--no-eslintrc".into(),
        "--config".into(),
        config_path.into(),
        "--format".into(),
        "json".into(),
        "--stdin".into(),
        "--stdin-filename".into(),
        path.into(),
    ];
    if fix {
        args.push("--fix-dry-run".into());
    }
    args
}

fn build_config(config: &LintConfig) -> serde_json::Value {
    json!({
        "root": true,
        "parser": "@babel/eslint-parser",
        "parserOptions": {
            "ecmaVersion": 2021,
            "sourceType": "module",
            "requireConfigFile": false,
            "ecmaFeatures": { "jsx": true },
            "babelOptions": { "presets": ["@babel/preset-react"] }
        },
        "env": { "browser": true, "es2021": true, "node": true },
        "settings": { "react": { "version": "detect" } },
        "plugins": config.plugins,
        "extends": config.extends,
        "rules": config.rules
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EslintFileResult {
    error_count: usize,
    warning_count: usize,
    fixable_error_count: usize,
    fixable_warning_count: usize,
    messages: Vec<EslintMessage>,
    output: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EslintMessage {
    line: Option<usize>,
    severity: u8,
    message: String,
    rule_id: Option<String>,
}

fn parse_report(stdout: &str) -> Result<LintReport, LintError> {
    let results: Vec<EslintFileResult> = serde_json::from_str(stdout)
        .map_err(|e| LintError::InvalidOutput(e.to_string()))?;

    // One file goes in over stdin, so at most one result comes back.
    let Some(result) = results.into_iter().next() else {
        return Ok(LintReport::default());
    };

    Ok(LintReport {
        error_count: result.error_count,
        warning_count: result.warning_count,
        fixable_error_count: result.fixable_error_count,
        fixable_warning_count: result.fixable_warning_count,
        messages: result
            .messages
            .into_iter()
            .map(|m| LintMessage {
                line: m.line.unwrap_or(1),
                severity: m.severity,
                message: m.message,
                rule_id: m.rule_id,
            })
            .collect(),
        output: result.output,
    })
}
