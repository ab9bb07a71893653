//! Diagnostics - non-fatal problems found during conversion.

/// Result of a conversion step, including diagnostics.
#[derive(Debug)]
pub struct ConversionResult<T> {
    /// The conversion output.
    pub value: T,
    /// Problems that were recovered from.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> ConversionResult<T> {
    /// Create a result with no diagnostics.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Create a result with diagnostics.
    pub fn with_diagnostics(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Add a diagnostic.
    pub fn warn(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    /// Check if there are any diagnostics.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Transform the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionResult<U> {
        ConversionResult {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Chain another step, concatenating diagnostics in order.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ConversionResult<U>) -> ConversionResult<U> {
        let mut next = f(self.value);
        let mut diagnostics = self.diagnostics;
        diagnostics.append(&mut next.diagnostics);
        ConversionResult {
            value: next.value,
            diagnostics,
        }
    }
}

/// A recovered problem, with the raw text that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// How severe is this diagnostic?
    pub severity: Severity,
    /// What kind of issue?
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// The offending source text.
    pub text: String,
    /// 1-based source line, when known.
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            text: text.into(),
            line: None,
        }
    }

    /// A node kind the renderer does not know; its content was passed through.
    pub fn unknown_node(kind: &str, text: impl Into<String>) -> Self {
        Self::new(
            Severity::Warning,
            DiagnosticKind::UnknownNode(kind.to_string()),
            format!("unknown node kind: {kind}"),
            text,
        )
    }

    /// A cross-reference that did not have the expected shape.
    pub fn unparsed_reference(text: impl Into<String>) -> Self {
        Self::new(
            Severity::Warning,
            DiagnosticKind::UnparsedReference,
            "could not parse class reference",
            text,
        )
    }

    /// A comment that was consumed without producing output.
    pub fn skipped_comment(text: impl Into<String>) -> Self {
        Self::new(
            Severity::Info,
            DiagnosticKind::SkippedComment,
            "comment skipped",
            text,
        )
    }

    /// Set the source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        write!(f, "{}: {}", self.message, self.text)
    }
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Information only, output is unaffected.
    Info,
    /// Output was produced by a fallback path.
    Warning,
}

/// Kind of diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Node kind not supported by the renderer.
    UnknownNode(String),
    /// Cross-reference not in the `display <class_Name> trailing` shape.
    UnparsedReference,
    /// Comment consumed without output.
    SkippedComment,
}
