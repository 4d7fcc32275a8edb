//! Automatic fixes
//!
//! Two sources of edits are applied to the working text in order: whatever the
//! lint engine can fix on its own, then removal of unused import bindings.
//! The original file is only replaced when the text actually changed, and
//! always after a backup copy has been written next to it.

use std::ffi::OsString;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;
use swc_common::Spanned;
use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleDecl, ModuleItem};

use crate::lint::{LintBridge, LintReport};
use crate::parser::{ParseError, ParsedFile, ParserOptions};
use crate::passes::imports::specifier_local;

pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Failed to write backup '{path}': {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write fixed file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Fixed text no longer parses: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixOutcome {
    #[serde(skip)]
    pub original_text: String,
    #[serde(skip)]
    pub fixed_text: String,
    pub backup_path: Option<PathBuf>,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.fixed_text != self.original_text
    }
}

/// Everything the fixer needs to know about the unit it is fixing.
pub struct FixRequest<'a> {
    pub path: &'a Path,
    pub text: &'a str,
    pub lint: &'a LintReport,
    pub unused_imports: &'a [String],
}

#[derive(Debug, Clone, Default)]
pub struct Fixer {
    parser_options: ParserOptions,
}

impl Fixer {
    pub fn new(parser_options: ParserOptions) -> Self {
        Self { parser_options }
    }

    /// Computes the fixed text without touching the filesystem.
    pub fn fixed_text(&self, request: &FixRequest, bridge: &LintBridge) -> Result<String, FixError> {
        let mut working = request.text.to_string();

        if request.lint.has_fixable() {
            let fixed = bridge.lint(&working, request.path, true);
            if let Some(output) = fixed.output {
                tracing::debug!(path = %request.path.display(), "adopted lint fixes");
                working = output;
            }
        }

        if !request.unused_imports.is_empty() {
            let filename = request.path.to_string_lossy();
            working = remove_unused_imports(
                &filename,
                &working,
                request.unused_imports,
                &self.parser_options,
            )?;
        }

        Ok(working)
    }

    pub fn fix(&self, request: &FixRequest, bridge: &LintBridge) -> Result<FixOutcome, FixError> {
        let fixed_text = self.fixed_text(request, bridge)?;
        let mut outcome = FixOutcome {
            original_text: request.text.to_string(),
            fixed_text,
            backup_path: None,
        };

        if outcome.changed() {
            outcome.backup_path = Some(write_with_backup(
                request.path,
                &outcome.original_text,
                &outcome.fixed_text,
            )?);
            tracing::info!(path = %request.path.display(), "fixed file");
        }

        Ok(outcome)
    }
}

pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

fn write_with_backup(path: &Path, original: &str, fixed: &str) -> Result<PathBuf, FixError> {
    let backup = backup_path_for(path);

    fs::write(&backup, original).map_err(|source| FixError::Backup {
        path: backup.clone(),
        source,
    })?;
    fs::write(path, fixed).map_err(|source| FixError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(backup)
}

/// Drops every import binding named in `unused`. Declarations left without
/// bindings are removed with their line; the others are rewritten from the
/// bindings that remain. Text outside rewritten declarations is untouched.
pub fn remove_unused_imports(
    filename: &str,
    text: &str,
    unused: &[String],
    options: &ParserOptions,
) -> Result<String, ParseError> {
    let file = ParsedFile::with_options(filename, text, options);
    let Some(module) = file.module() else {
        return Err(file.parse_error().cloned().unwrap_or_else(|| ParseError {
            line: 1,
            column: 1,
            message: "unparsable source".to_string(),
        }));
    };

    let is_unused = |specifier: &ImportSpecifier| {
        let name = specifier_local(specifier).sym.as_ref();
        unused.iter().any(|u| u == name)
    };

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
            continue;
        };
        if !decl.specifiers.iter().any(is_unused) {
            continue;
        }
        let Some(range) = file.span_range(decl.span) else {
            continue;
        };

        let kept: Vec<&ImportSpecifier> = decl.specifiers.iter().filter(|s| !is_unused(*s)).collect();
        if kept.is_empty() {
            edits.push((extend_over_line_end(text, range), String::new()));
        } else if let Some(rewritten) = rewrite_import(&file, decl, &kept) {
            edits.push((range, rewritten));
        }
    }

    Ok(apply_edits(text, edits))
}

fn rewrite_import(file: &ParsedFile, decl: &ImportDecl, kept: &[&ImportSpecifier]) -> Option<String> {
    let mut clause: Vec<String> = Vec::new();
    let mut named: Vec<&str> = Vec::new();

    for specifier in kept {
        let text = file.span_text(specifier.span())?;
        match specifier {
            ImportSpecifier::Named(_) => named.push(text),
            ImportSpecifier::Default(_) | ImportSpecifier::Namespace(_) => {
                clause.push(text.to_string())
            }
        }
    }
    if !named.is_empty() {
        clause.push(format!("{{ {} }}", named.join(", ")));
    }

    let decl_range = file.span_range(decl.span)?;
    let src_range = file.span_range(decl.src.span)?;
    // Source literal, import attributes and the semicolon, as written.
    let tail = file.source().get(src_range.start..decl_range.end)?;
    let keyword = if decl.type_only { "import type" } else { "import" };

    Some(format!("{keyword} {} from {tail}", clause.join(", ")))
}

fn extend_over_line_end(text: &str, range: Range<usize>) -> Range<usize> {
    let mut end = range.end;
    let rest = &text[end..];
    let after_semi = rest.strip_prefix(';').unwrap_or(rest);
    end += rest.len() - after_semi.len();

    if after_semi.starts_with("\r\n") {
        end += 2;
    } else if after_semi.starts_with('\n') {
        end += 1;
    }
    range.start..end
}

/// Applies non-overlapping edits back to front so earlier offsets stay valid.
fn apply_edits(text: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    let mut out = text.to_string();
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::tests::StubEngine;

    fn remove(text: &str, unused: &[&str]) -> String {
        let unused: Vec<String> = unused.iter().map(|s| s.to_string()).collect();
        remove_unused_imports("App.jsx", text, &unused, &ParserOptions::default()).unwrap()
    }

    #[test]
    fn drops_unused_named_specifier() {
        let fixed = remove("import { Foo, Bar } from 'x';\nconst a = <Foo />;\n", &["Bar"]);

        assert_eq!(fixed, "import { Foo } from 'x';\nconst a = <Foo />;\n");
    }

    #[test]
    fn removes_declaration_left_empty() {
        let fixed = remove(
            "import React from 'react';\nimport { gone } from './gone';\nexport default React;\n",
            &["gone"],
        );

        assert_eq!(fixed, "import React from 'react';\nexport default React;\n");
    }

    #[test]
    fn keeps_default_namespace_and_aliases() {
        let fixed = remove(
            "import React, { useState, useMemo as memo } from \"react\"\nmemo(React);\n",
            &["useState"],
        );

        assert_eq!(
            fixed,
            "import React, { useMemo as memo } from \"react\"\nmemo(React);\n"
        );
    }

    #[test]
    fn drops_named_block_when_only_default_remains() {
        let fixed = remove("import React, { useState } from 'react';\nReact;\n", &["useState"]);

        assert_eq!(fixed, "import React from 'react';\nReact;\n");
    }

    #[test]
    fn leaves_side_effect_imports_and_other_code_alone() {
        let text = "import './styles.css';\n\nimport { a, b } from 'ab'; // keep\nexport const x = a;\n";

        let fixed = remove(text, &["b"]);

        assert_eq!(
            fixed,
            "import './styles.css';\n\nimport { a } from 'ab'; // keep\nexport const x = a;\n"
        );
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(
            backup_path_for(Path::new("src/App.jsx")),
            PathBuf::from("src/App.jsx.backup")
        );
    }

    #[test]
    fn fix_writes_backup_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.jsx");
        let original = "import { Foo, Bar } from 'x';\nexport const A = () => <Foo />;\n";
        fs::write(&path, original).unwrap();

        let lint = LintReport::default();
        let unused = vec!["Bar".to_string()];
        let request = FixRequest {
            path: &path,
            text: original,
            lint: &lint,
            unused_imports: &unused,
        };

        let outcome = Fixer::default().fix(&request, &LintBridge::disabled()).unwrap();

        let backup = outcome.backup_path.clone().unwrap();
        assert_eq!(fs::read_to_string(&backup).unwrap(), original);
        assert_eq!(fs::read_to_string(&path).unwrap(), outcome.fixed_text);
        assert!(outcome.fixed_text.starts_with("import { Foo } from 'x';"));
    }

    #[test]
    fn unchanged_text_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Clean.jsx");
        let original = "export const A = () => <Foo />;\n";
        fs::write(&path, original).unwrap();

        let lint = LintReport::default();
        let request = FixRequest {
            path: &path,
            text: original,
            lint: &lint,
            unused_imports: &[],
        };

        let outcome = Fixer::default().fix(&request, &LintBridge::disabled()).unwrap();

        assert!(!outcome.changed());
        assert!(outcome.backup_path.is_none());
        assert!(!backup_path_for(&path).exists());
    }

    #[test]
    fn adopts_lint_output_before_import_cleanup() {
        let engine = StubEngine::fixing("import { a, b } from 'ab';\nexport const x = a;\n");
        let bridge = StubEngine::bridge(&engine);
        let lint = bridge.lint("ignored", Path::new("App.jsx"), false);
        let unused = vec!["b".to_string()];
        let request = FixRequest {
            path: Path::new("App.jsx"),
            text: "import { a, b } from 'ab'\nexport const x = a\n",
            lint: &lint,
            unused_imports: &unused,
        };

        let fixed = Fixer::default().fixed_text(&request, &bridge).unwrap();

        assert_eq!(fixed, "import { a } from 'ab';\nexport const x = a;\n");
        assert_eq!(*engine.calls.borrow(), vec![false, true]);
    }

    #[test]
    fn lint_fix_is_skipped_without_fixable_findings() {
        let engine = StubEngine::returning(LintReport::default());
        let bridge = StubEngine::bridge(&engine);
        let lint = LintReport::default();
        let request = FixRequest {
            path: Path::new("App.jsx"),
            text: "export const x = 1;\n",
            lint: &lint,
            unused_imports: &[],
        };

        Fixer::default().fixed_text(&request, &bridge).unwrap();

        assert!(engine.calls.borrow().is_empty());
    }

    #[test]
    fn backup_failure_leaves_original_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.jsx");
        let original = "import { gone } from 'x';\n";
        fs::write(&path, original).unwrap();
        // A directory where the backup file should go makes the write fail.
        fs::create_dir(backup_path_for(&path)).unwrap();

        let lint = LintReport::default();
        let unused = vec!["gone".to_string()];
        let request = FixRequest {
            path: &path,
            text: original,
            lint: &lint,
            unused_imports: &unused,
        };

        let error = Fixer::default().fix(&request, &LintBridge::disabled()).unwrap_err();

        assert!(matches!(error, FixError::Backup { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
