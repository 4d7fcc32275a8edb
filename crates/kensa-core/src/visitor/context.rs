//! Visitor context providing file information during AST traversal.

use swc_common::Span;

use crate::parser::ParsedFile;

pub struct VisitorContext<'a> {
    file: &'a ParsedFile,
}

impl<'a> VisitorContext<'a> {
    pub fn new(file: &'a ParsedFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &ParsedFile {
        self.file
    }

    pub fn span_to_location(&self, span: Span) -> (usize, usize) {
        self.file.location(span)
    }

    pub fn get_source_text(&self, span: Span) -> Option<&str> {
        self.file.span_text(span)
    }
}

#[cfg(test)]
mod tests {
    use swc_common::Spanned;

    use super::*;

    #[test]
    fn context_provides_file_reference() {
        let parsed = ParsedFile::from_source("App.jsx", "const x = 1;");
        let ctx = VisitorContext::new(&parsed);

        assert_eq!(ctx.file().metadata().filename, "App.jsx");
    }

    #[test]
    fn span_to_location_second_line() {
        let code = "const x = 1;\n  const y = 2;";
        let parsed = ParsedFile::from_source("App.jsx", code);
        let ctx = VisitorContext::new(&parsed);

        let span = parsed.module().unwrap().body[1].span();

        assert_eq!(ctx.span_to_location(span), (2, 3));
    }

    #[test]
    fn get_source_text_returns_span_content() {
        let parsed = ParsedFile::from_source("App.jsx", "useEffect(run, []);");
        let ctx = VisitorContext::new(&parsed);

        let span = parsed.module().unwrap().body[0].span();

        assert!(
            ctx.get_source_text(span)
                .is_some_and(|text| text.starts_with("useEffect(run, [])"))
        );
    }
}
