//! Configuration loading and parsing for Kensa
//!
//! Provides functionality to load and parse `kensa.toml` configuration files.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::analysis::AnalyzeOptions;
use crate::lint::LintConfig;
use crate::parser::ParserOptions;

pub const CONFIG_FILENAME: &str = "kensa.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["analysis", "lint", "parser"];
const KNOWN_SECTION_KEYS: &[(&str, &[&str])] = &[
    ("analysis", &["fix", "debug", "verbose"]),
    ("lint", &["enabled", "command", "plugins", "extends", "rules"]),
    ("parser", &["jsx_in_js", "decorators"]),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub path: Option<PathBuf>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalyzeOptions,
    pub lint: LintConfig,
    pub parser: ParserOptions,
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<ConfigResult, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult {
        config,
        path: Some(path.to_path_buf()),
        warnings,
    })
}

/// Loads the nearest `kensa.toml` at or above `start_dir`, or the defaults
/// when there is none.
pub fn discover_config(start_dir: &Path) -> Result<ConfigResult, ConfigError> {
    match find_config_file(start_dir) {
        Some(path) => load_config(&path),
        None => Ok(ConfigResult::default()),
    }
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    for (section, known_keys) in KNOWN_SECTION_KEYS {
        if let Some(toml::Value::Table(values)) = table.get(*section) {
            for key in values.keys() {
                if !known_keys.contains(&key.as_str()) {
                    warnings.push(format!(
                        "Unknown config option in [{}]: '{}'",
                        section, key
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_temp_dir() -> tempfile::TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    #[test]
    fn load_config_from_file() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            r#"
[analysis]
debug = true

[lint]
command = ["./node_modules/.bin/eslint"]

[lint.rules]
"react-hooks/exhaustive-deps" = "error"

[parser]
jsx_in_js = false
"#,
        )
        .unwrap();

        let result = load_config(&config_path).unwrap();
        let config = result.config;

        assert!(config.analysis.debug);
        assert!(!config.analysis.fix);
        assert_eq!(config.lint.command, vec!["./node_modules/.bin/eslint"]);
        assert_eq!(
            config
                .lint
                .rules
                .get("react-hooks/exhaustive-deps")
                .map(String::as_str),
            Some("error")
        );
        assert!(!config.parser.jsx_in_js);
        assert_eq!(result.path, Some(config_path));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn default_config_when_missing() {
        let dir = create_temp_dir();
        let result = discover_config(dir.path()).unwrap();

        assert_eq!(result.config, Config::default());
        assert!(result.path.is_none());
        assert!(result.config.lint.enabled);
        assert!(result.config.parser.jsx_in_js);
    }

    #[test]
    fn error_on_invalid_toml() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "this is not valid { toml }").unwrap();

        let result = load_config(&config_path);

        assert!(result.is_err());
        let err = result.unwrap_err();
        match err {
            ConfigError::ParseError { path, message } => {
                assert_eq!(path, config_path);
                assert!(!message.is_empty());
            }
            _ => panic!("Expected ParseError"),
        }
    }

    #[test]
    fn find_config_file_in_current_directory() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();

        let found = find_config_file(dir.path());

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn find_config_file_in_parent_directory() {
        let parent = create_temp_dir();
        let child = parent.path().join("components");
        fs::create_dir(&child).unwrap();
        let config_path = parent.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "").unwrap();

        let found = find_config_file(&child);

        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn partial_lint_section_keeps_default_rules() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[lint]\nenabled = false").unwrap();

        let config = load_config(&config_path).unwrap().config;

        assert!(!config.lint.enabled);
        assert_eq!(config.lint.command, LintConfig::default().command);
        assert_eq!(config.lint.rules.len(), 2);
    }

    #[test]
    fn unknown_keys_become_warnings() {
        let dir = create_temp_dir();
        let config_path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &config_path,
            "colour = true\n[analysis]\nfix = true\nfast = true\n",
        )
        .unwrap();

        let result = load_config(&config_path).unwrap();

        assert!(result.config.analysis.fix);
        assert_eq!(
            result.warnings,
            vec![
                "Unknown config option: 'colour'".to_string(),
                "Unknown config option in [analysis]: 'fast'".to_string(),
            ]
        );
    }

    #[test]
    fn config_error_display_is_helpful() {
        let err = ConfigError::ParseError {
            path: PathBuf::from("/path/to/kensa.toml"),
            message: "expected `=`".to_string(),
        };

        let msg = format!("{}", err);

        assert!(msg.contains("/path/to/kensa.toml"));
        assert!(msg.contains("expected `=`"));
    }
}
