//! Parser module for component source files
//!
//! Wraps SWC so every consumer gets the same AST, with JSX enabled and
//! comments retained, or a single structured parse failure.

use std::ops::Range;
use std::sync::OnceLock;

use serde::Deserialize;
use swc_common::comments::SingleThreadedComments;
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_module};

pub use swc_ecma_ast::{EsVersion, Module};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

pub fn detect_language(filename: &str) -> Language {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "jsx" => Language::Jsx,
        _ => Language::JavaScript,
    }
}

/// Parser settings handed to every parse call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Enable JSX in plain `.js` files; component files rarely use `.jsx`.
    pub jsx_in_js: bool,
    pub decorators: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            jsx_in_js: true,
            decorators: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub language: Language,
    pub line_count: usize,
}

/// Successful parser output before it is attached to a [`ParsedFile`].
pub struct ParsedModule {
    pub module: Module,
    pub comments: SingleThreadedComments,
    pub start_pos: BytePos,
}

#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    jsx: bool,
    typescript: bool,
    decorators: bool,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsx(mut self, enabled: bool) -> Self {
        self.jsx = enabled;
        self
    }

    pub fn typescript(mut self, enabled: bool) -> Self {
        self.typescript = enabled;
        self
    }

    pub fn decorators(mut self, enabled: bool) -> Self {
        self.decorators = enabled;
        self
    }

    pub fn build(self) -> Parser {
        let syntax = if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                decorators: self.decorators,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                decorators: self.decorators,
                ..Default::default()
            })
        };

        Parser { syntax }
    }
}

#[derive(Debug, Clone)]
pub struct Parser {
    syntax: Syntax,
}

impl Parser {
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    pub fn for_file(filename: &str, options: &ParserOptions) -> Self {
        let builder = Self::builder().decorators(options.decorators);
        match detect_language(filename) {
            Language::JavaScript => builder.jsx(options.jsx_in_js).build(),
            Language::Jsx => builder.jsx(true).build(),
            Language::TypeScript => builder.typescript(true).build(),
            Language::Tsx => builder.typescript(true).jsx(true).build(),
        }
    }

    /// Parses `code` as an ES module.
    ///
    /// Errors the SWC parser recovers from still fail the parse: the first
    /// reported error wins, fatal or not.
    pub fn parse(&self, code: &str) -> Result<ParsedModule, ParseError> {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.js".into()).into(), code.to_string());
        let comments = SingleThreadedComments::default();
        let mut recovered_errors = Vec::new();

        let result = parse_file_as_module(
            &fm,
            self.syntax,
            EsVersion::latest(),
            Some(&comments),
            &mut recovered_errors,
        );

        let to_parse_error = |e: swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            ParseError {
                line: loc.line,
                column: loc.col_display + 1,
                message: e.kind().msg().to_string(),
            }
        };

        match result {
            Ok(module) => match recovered_errors.into_iter().next() {
                Some(error) => Err(to_parse_error(error)),
                None => Ok(ParsedModule {
                    module,
                    comments,
                    start_pos: fm.start_pos,
                }),
            },
            Err(error) => Err(to_parse_error(error)),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::for_file("component.jsx", &ParserOptions::default())
    }
}

/// A source unit: the text of one file and the result of parsing it once.
pub struct ParsedFile {
    source: String,
    metadata: FileMetadata,
    outcome: Result<ParsedModule, ParseError>,
    line_starts: OnceLock<Vec<usize>>,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("metadata", &self.metadata)
            .field("has_module", &self.outcome.is_ok())
            .field("error", &self.outcome.as_ref().err())
            .finish()
    }
}

impl ParsedFile {
    pub fn from_source(filename: &str, source: &str) -> Self {
        Self::with_options(filename, source, &ParserOptions::default())
    }

    pub fn with_options(filename: &str, source: &str, options: &ParserOptions) -> Self {
        let outcome = Parser::for_file(filename, options).parse(source);

        if let Err(error) = &outcome {
            tracing::debug!(filename, %error, "parse failed");
        }

        let line_count = if source.is_empty() {
            0
        } else {
            source.lines().count()
        };

        Self {
            source: source.to_string(),
            metadata: FileMetadata {
                filename: filename.to_string(),
                language: detect_language(filename),
                line_count,
            },
            outcome,
            line_starts: OnceLock::new(),
        }
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn module(&self) -> Option<&Module> {
        self.outcome.as_ref().ok().map(|parsed| &parsed.module)
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }

    pub fn comments(&self) -> Option<&SingleThreadedComments> {
        self.outcome.as_ref().ok().map(|parsed| &parsed.comments)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte range of `span` inside [`Self::source`].
    pub fn span_range(&self, span: Span) -> Option<Range<usize>> {
        let base = self.outcome.as_ref().ok()?.start_pos.0;
        let lo = span.lo.0.checked_sub(base)? as usize;
        let hi = span.hi.0.checked_sub(base)? as usize;

        (lo <= hi && hi <= self.source.len()).then_some(lo..hi)
    }

    pub fn span_text(&self, span: Span) -> Option<&str> {
        self.span_range(span)
            .and_then(|range| self.source.get(range))
    }

    /// 1-based line and column of the start of `span`.
    pub fn location(&self, span: Span) -> (usize, usize) {
        let Some(range) = self.span_range(span) else {
            return (1, 1);
        };

        let starts = self.line_starts.get_or_init(|| self.build_line_starts());
        let index = starts.partition_point(|&start| start <= range.start) - 1;
        let column = self.source[starts[index]..range.start].chars().count() + 1;

        (index + 1, column)
    }

    pub fn get_line(&self, line_number: usize) -> Option<&str> {
        if line_number == 0 {
            return None;
        }

        self.source.lines().nth(line_number - 1)
    }

    fn build_line_starts(&self) -> Vec<usize> {
        std::iter::once(0)
            .chain(
                self.source
                    .char_indices()
                    .filter(|&(_, c)| c == '\n')
                    .map(|(i, _)| i + 1),
            )
            .collect()
    }
}
