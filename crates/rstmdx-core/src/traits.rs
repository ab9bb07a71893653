//! Parser and Emitter traits.

use crate::{ConversionResult, Document};

/// Options for parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Attach 1-based source lines to diagnostics.
    pub track_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { track_lines: true }
    }
}

/// Options for emitting.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Maximum line width for reflowed text; 0 or negative disables reflow.
    pub wrap_width: i32,
}

impl EmitOptions {
    /// Options that reflow text at `width` columns.
    pub fn wrapped(width: i32) -> Self {
        Self { wrap_width: width }
    }

    /// The effective wrap width, `None` when reflow is disabled.
    pub fn wrap_limit(&self) -> Option<usize> {
        usize::try_from(self.wrap_width).ok().filter(|w| *w > 0)
    }
}

/// Error during parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Parse a format into the document tree.
pub trait Parser: Send + Sync {
    /// Formats this parser can handle.
    fn formats(&self) -> &[&str];

    /// Parse bytes into a document.
    fn parse(
        &self,
        input: &[u8],
        options: &ParseOptions,
    ) -> Result<ConversionResult<Document>, ParseError>;
}

/// Emit the document tree to a format.
///
/// Emitting never fails; problems are reported as diagnostics.
pub trait Emitter: Send + Sync {
    /// Formats this emitter can produce.
    fn formats(&self) -> &[&str];

    /// Emit a document to bytes.
    fn emit(&self, doc: &Document, options: &EmitOptions) -> ConversionResult<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_limit() {
        assert_eq!(EmitOptions::default().wrap_limit(), None);
        assert_eq!(EmitOptions::wrapped(-5).wrap_limit(), None);
        assert_eq!(EmitOptions::wrapped(80).wrap_limit(), Some(80));
    }
}
