//! MDX writer for rstmdx.
//!
//! Renders the document tree as MDX: the first heading becomes YAML
//! frontmatter, admonitions become `:::kind` containers and directives
//! without an MDX equivalent are kept as JSX comments.

pub mod builder;
mod wrap;

pub use wrap::reflow;

use rstmdx_core::{
    ConversionResult, Diagnostic, Document, EmitOptions, Emitter, FieldList, HeadingLevel,
    ListItem, Node,
};
use serde::Serialize;

/// Admonition kinds the MDX container syntax accepts.
pub const ADMONITION_KINDS: &[&str] = &["note", "tip", "info", "warning", "danger", "caution"];

/// Kind used for admonitions outside [`ADMONITION_KINDS`].
pub const DEFAULT_ADMONITION: &str = "note";

/// Emit a document as MDX.
pub fn emit(doc: &Document) -> ConversionResult<String> {
    emit_with_options(doc, &EmitOptions::default())
}

/// Emit a document as MDX with custom options.
pub fn emit_with_options(doc: &Document, options: &EmitOptions) -> ConversionResult<String> {
    let mut ctx = EmitContext::new(options.wrap_limit());

    emit_nodes(&doc.nodes, &mut ctx);

    let output = match ctx.frontmatter {
        Some(frontmatter) if ctx.output.is_empty() => frontmatter,
        Some(frontmatter) => format!("{frontmatter}\n\n{}", ctx.output),
        None => ctx.output,
    };
    ConversionResult::with_diagnostics(output.trim().to_string(), ctx.diagnostics)
}

/// [`Emitter`] implementation producing UTF-8 MDX.
#[derive(Debug, Clone, Copy, Default)]
pub struct MdxEmitter;

impl Emitter for MdxEmitter {
    fn formats(&self) -> &[&str] {
        &["mdx"]
    }

    fn emit(&self, doc: &Document, options: &EmitOptions) -> ConversionResult<Vec<u8>> {
        emit_with_options(doc, options).map(String::into_bytes)
    }
}

/// Emit context for tracking state during emission.
struct EmitContext {
    output: String,
    frontmatter: Option<String>,
    diagnostics: Vec<Diagnostic>,
    wrap: Option<usize>,
}

impl EmitContext {
    fn new(wrap: Option<usize>) -> Self {
        Self {
            output: String::new(),
            frontmatter: None,
            diagnostics: Vec::new(),
            wrap,
        }
    }

    /// Append a block, separated from the previous one by a blank line.
    fn write_block(&mut self, block: &str) {
        let block = block.trim_end();
        if block.trim().is_empty() {
            return;
        }
        if !self.output.is_empty() {
            self.output.push_str("\n\n");
        }
        self.output.push_str(block);
    }

    fn reflow(&self, text: &str) -> String {
        wrap::reflow_to(text, self.wrap)
    }
}

#[derive(Serialize)]
struct Frontmatter<'a> {
    title: &'a str,
}

/// Emit a sequence of nodes.
fn emit_nodes(nodes: &[Node], ctx: &mut EmitContext) {
    for node in nodes {
        match node {
            Node::Heading { text, .. } if ctx.frontmatter.is_none() => {
                ctx.frontmatter = Some(emit_frontmatter(text));
            }
            _ => {
                let block = emit_node(node, ctx);
                ctx.write_block(&block);
            }
        }
    }
}

/// Render a single node to its block text.
fn emit_node(node: &Node, ctx: &mut EmitContext) -> String {
    match node {
        Node::Heading { level, text } => emit_heading(*level, text),
        Node::Paragraph { text } => ctx.reflow(text),
        Node::ListItem(item) => ctx.reflow(&item.text),
        Node::UnorderedList { items } => emit_list(items, false, ctx),
        Node::OrderedList { items } => emit_list(items, true, ctx),
        Node::CodeBlock { language, content } => emit_code_block(language, content),
        Node::Image { src, alt, .. } => emit_image(src, alt.as_deref()),
        Node::Admonition { kind, content } => emit_admonition(kind, content, ctx),
        Node::Directive {
            name,
            argument,
            options,
            content,
        } => emit_directive(name, argument, options, content, ctx),
        Node::Unknown { kind, content } => {
            ctx.diagnostics
                .push(Diagnostic::unknown_node(kind, content.clone()));
            ctx.reflow(content)
        }
    }
}

fn emit_frontmatter(title: &str) -> String {
    let yaml = serde_yaml::to_string(&Frontmatter { title })
        .unwrap_or_else(|_| format!("title: {title}\n"));
    format!("---\n{}\n---", yaml.trim_end())
}

fn emit_heading(level: HeadingLevel, text: &str) -> String {
    format!("{} {}", "#".repeat(level.get() as usize), text)
}

fn emit_list(items: &[ListItem], ordered: bool, ctx: &EmitContext) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if ordered {
                format!("{}. ", i + 1)
            } else {
                "- ".to_string()
            };
            let width = ctx.wrap.map(|w| w.saturating_sub(marker.len()).max(1));
            let text = wrap::reflow_to(&item.text, width);
            format!("{marker}{}", wrap::indent_continuation(&text, marker.len()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn emit_code_block(language: &str, content: &str) -> String {
    let fence = code_fence(content);
    if content.is_empty() {
        format!("{fence}{language}\n{fence}")
    } else {
        format!("{fence}{language}\n{}\n{fence}", content.trim_end_matches('\n'))
    }
}

/// A backtick fence longer than any backtick run inside `content`.
fn code_fence(content: &str) -> String {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest_run + 1).max(3))
}

fn emit_image(src: &str, alt: Option<&str>) -> String {
    let alt = match alt {
        Some(alt) if !alt.trim().is_empty() => alt.to_string(),
        _ => alt_from_path(src),
    };
    format!("![{alt}]({src})")
}

/// Alt text from an image path: file stem, separators as spaces, capitalized.
pub fn alt_from_path(src: &str) -> String {
    let file = src.rsplit(['/', '\\']).next().unwrap_or(src);
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };
    let spaced = stem.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The container kind for an admonition, falling back to [`DEFAULT_ADMONITION`].
pub fn admonition_kind(kind: &str) -> &'static str {
    let kind = kind.trim().to_lowercase();
    ADMONITION_KINDS
        .iter()
        .find(|allowed| **allowed == kind)
        .copied()
        .unwrap_or(DEFAULT_ADMONITION)
}

fn emit_admonition(kind: &str, content: &str, ctx: &EmitContext) -> String {
    let kind = admonition_kind(kind);
    let body = ctx.reflow(content);
    let body = body.trim_matches('\n');
    if body.trim().is_empty() {
        format!(":::{kind}\n:::")
    } else {
        format!(":::{kind}\n{body}\n:::")
    }
}

fn emit_directive(
    name: &str,
    argument: &str,
    options: &FieldList,
    content: &str,
    ctx: &EmitContext,
) -> String {
    match name {
        "include" => format!("{{/* include: {} */}}", escape_comment(argument)),
        "toctree" => "{/* toctree */}".to_string(),
        _ => {
            let mut lines = vec![format!("{{/* .. {name}:: {argument}").trim_end().to_string()];
            lines.extend(options.iter().map(|(key, value)| {
                format!(":{key}: {value}").trim_end().to_string()
            }));
            let body = ctx.reflow(content);
            let body = body.trim_matches('\n');
            if !body.trim().is_empty() {
                lines.push(String::new());
                lines.push(body.to_string());
            }
            lines.push("*/}".to_string());
            escape_comment_body(&lines)
        }
    }
}

/// Escape `*/` so text cannot close a JSX comment early.
fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

fn escape_comment_body(lines: &[String]) -> String {
    let last = lines.len().saturating_sub(1);
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == last {
                line.clone()
            } else {
                escape_comment(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
