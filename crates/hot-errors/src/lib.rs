//! Parse diagnostics and their terminal rendering.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// A problem found in a source file, located by byte range.
///
/// An empty range marks the place where something is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    range: TextRange,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Renders the diagnostic with the offending span underlined in `text`.
    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let label = if self.range.is_empty() { "expected here" } else { "found here" };
        let snippet = Snippet::source(text)
            .origin(path)
            .annotation(Level::Error.span(self.range.into()).label(label))
            .fold(true);
        renderer.render(Level::Error.title(&self.message).snippet(snippet))
    }
}

/// One-line tally for the end of a report; `None` when there is nothing to report.
pub fn summary(diagnostics: &[Diagnostic]) -> Option<String> {
    match diagnostics.len() {
        0 => None,
        1 => Some("found 1 error".to_owned()),
        n => Some(format!("found {n} errors")),
    }
}
