//! rstmdx - reStructuredText to MDX conversion
//!
//! Converts RST documentation pages into MDX suitable for static site
//! generators:
//! - Section titles become `#` headings; the first one becomes frontmatter
//! - Lists, code blocks, images and admonitions map to their MDX forms
//! - Roles and links are rewritten inline (`:ref:`, `:doc:`, `` `x <url>`_ ``)
//! - Directives without an MDX form are kept as JSX comments
//! - Nothing fails: recovered problems are reported as diagnostics
//!
//! # Quick Start
//!
//! ```rust
//! use rstmdx::EmitOptions;
//!
//! let result = rstmdx::convert("Title\n=====\n\nHello *world*.\n", &EmitOptions::default());
//!
//! assert_eq!(result.value, "---\ntitle: Title\n---\n\nHello *world*.");
//! assert!(result.diagnostics.is_empty());
//! ```
//!
//! # Architecture
//!
//! The [`rst`] reader scans the input once and produces a flat
//! [`Document`] of typed [`Node`]s, running inline markup conversion on
//! paragraph, list item and admonition text as it goes. The [`mdx`] writer
//! then renders each node in order.

use tracing::{debug, trace};

// Re-export core types
pub use rstmdx_core::*;

/// reStructuredText reader.
pub mod rst {
    pub use rstmdx_read_rst::{
        CLASS_REFERENCE_BASE, RstParser, inline, parse, parse_with_options, process_inline,
        slugify, underline_level,
    };
}

/// MDX writer.
pub mod mdx {
    pub use rstmdx_write_mdx::{
        ADMONITION_KINDS, DEFAULT_ADMONITION, MdxEmitter, admonition_kind, alt_from_path,
        builder, emit, emit_with_options, reflow,
    };
}

/// Convert RST text to MDX.
///
/// Diagnostics from parsing come first, followed by those from rendering.
pub fn convert(input: &str, options: &EmitOptions) -> ConversionResult<String> {
    convert_with_options(input, &ParseOptions::default(), options)
}

/// Convert RST text to MDX with custom parse and emit options.
pub fn convert_with_options(
    input: &str,
    parse_options: &ParseOptions,
    emit_options: &EmitOptions,
) -> ConversionResult<String> {
    let parsed = rst::parse_with_options(input, parse_options);
    debug!(
        nodes = parsed.value.len(),
        kinds = %parsed.value.kind_summary(),
        "parsed document"
    );

    let result = parsed.and_then(|doc| mdx::emit_with_options(&doc, emit_options));
    for diagnostic in &result.diagnostics {
        trace!(%diagnostic, "conversion diagnostic");
    }
    debug!(
        bytes = result.value.len(),
        diagnostics = result.diagnostics.len(),
        "rendered mdx"
    );
    result
}

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        ConversionResult, Diagnostic, DiagnosticKind, Document, EmitOptions, Node, NodeKind,
        ParseOptions,
    };
    pub use crate::mdx::builder;
}
