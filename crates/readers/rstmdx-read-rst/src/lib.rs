//! reStructuredText (RST) reader for rstmdx.
//!
//! Parses RST source into rstmdx's block tree in a single forward pass over
//! the input lines. Recognizers are tried in a fixed order at every line and
//! the first one that matches consumes its lines. Nothing here fails: input
//! that no recognizer understands becomes a paragraph.

pub mod inline;

use once_cell::sync::Lazy;
use regex::Regex;
use rstmdx_core::{
    ConversionResult, Diagnostic, Document, FieldList, HeadingLevel, ListItem, Node, ParseError,
    ParseOptions,
};

pub use inline::{CLASS_REFERENCE_BASE, process_inline, slugify};

/// Parse RST text into an rstmdx Document.
pub fn parse(input: &str) -> ConversionResult<Document> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse RST with custom options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> ConversionResult<Document> {
    let mut parser = Parser::new(input, options.track_lines);
    let (nodes, diagnostics) = parser.parse_document();
    ConversionResult::with_diagnostics(Document::from(nodes), diagnostics)
}

/// [`rstmdx_core::Parser`] implementation for RST input.
#[derive(Debug, Clone, Copy, Default)]
pub struct RstParser;

impl rstmdx_core::Parser for RstParser {
    fn formats(&self) -> &[&str] {
        &["rst", "rest", "restructuredtext"]
    }

    fn parse(
        &self,
        input: &[u8],
        options: &ParseOptions,
    ) -> Result<ConversionResult<Document>, ParseError> {
        let text = std::str::from_utf8(input)?;
        Ok(parse_with_options(text, options))
    }
}

/// Characters that may underline (or overline) a section title.
const UNDERLINE_CHARS: &[char] = &[
    '=', '-', '`', '~', ':', '*', '\'', '+', '"', '^', '#', '_',
];

/// Heading level for an underline character; anything unlisted is level 2.
pub fn underline_level(ch: char) -> HeadingLevel {
    let level = match ch {
        '=' => 1,
        '-' => 2,
        '`' | '~' => 3,
        ':' | '*' => 4,
        '\'' | '+' => 5,
        '"' | '^' => 6,
        _ => 2,
    };
    HeadingLevel::clamped(level)
}

static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.\.\s+([A-Za-z0-9][\w.+:-]*?)::\s*(.*?)\s*$").unwrap());

static REFERENCE_TARGET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.\.\s+_[^:]*:").unwrap());

static FIELD_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([^:\s][^:]*):(?:\s+(.*?))?\s*$").unwrap());

static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[*+-]\s+(.*)$").unwrap());

static ENUMERATED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+|#)\.\s+(.*)$").unwrap());

const LITERAL_INDENT: &str = "    ";

/// Which list container a marker pattern builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Enumerated,
}

impl ListKind {
    fn pattern(self) -> &'static Regex {
        match self {
            ListKind::Bullet => &BULLET_ITEM,
            ListKind::Enumerated => &ENUMERATED_ITEM,
        }
    }
}

/// RST parser state.
struct Parser<'a> {
    lines: Vec<&'a str>,
    line_idx: usize,
    /// Whether the last consumed line was blank (true at document start).
    after_blank: bool,
    diagnostics: Vec<Diagnostic>,
    track_lines: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, track_lines: bool) -> Self {
        Self {
            lines: input.lines().collect(),
            line_idx: 0,
            after_blank: true,
            diagnostics: Vec::new(),
            track_lines,
        }
    }

    fn current_line(&self) -> Option<&'a str> {
        self.lines.get(self.line_idx).copied()
    }

    fn peek_line(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.line_idx + offset).copied()
    }

    fn advance_line(&mut self) {
        if let Some(line) = self.current_line() {
            self.after_blank = is_blank(line);
            self.line_idx += 1;
        }
    }

    fn advance_to(&mut self, line_idx: usize) {
        while self.line_idx < line_idx && !self.is_eof() {
            self.advance_line();
        }
    }

    fn is_eof(&self) -> bool {
        self.line_idx >= self.lines.len()
    }

    /// Index of the first non-blank line at or after `from`.
    fn next_non_blank(&self, from: usize) -> Option<usize> {
        (from..self.lines.len()).find(|&idx| !is_blank(self.lines[idx]))
    }

    /// Run the inline processor, recording its diagnostics against `line_idx`.
    fn inline(&mut self, text: &str, line_idx: usize) -> String {
        let result = process_inline(text);
        for diagnostic in result.diagnostics {
            self.record(diagnostic, line_idx);
        }
        result.value
    }

    fn record(&mut self, diagnostic: Diagnostic, line_idx: usize) {
        self.diagnostics.push(if self.track_lines {
            diagnostic.at_line(line_idx + 1)
        } else {
            diagnostic
        });
    }

    fn parse_document(&mut self) -> (Vec<Node>, Vec<Diagnostic>) {
        // Leading blanks and reference targets carry nothing to render.
        while let Some(line) = self.current_line() {
            if is_blank(line) || REFERENCE_TARGET.is_match(line) {
                self.advance_line();
            } else {
                break;
            }
        }

        let mut nodes = Vec::new();
        while !self.is_eof() {
            if let Some(node) = self.try_parse_block() {
                nodes.push(node);
            }
        }

        (nodes, std::mem::take(&mut self.diagnostics))
    }

    /// Try each recognizer in order at the current line.
    ///
    /// Always consumes at least one line; returns `None` for lines that
    /// produce no node.
    fn try_parse_block(&mut self) -> Option<Node> {
        let line = self.current_line()?;

        if is_blank(line) {
            self.advance_line();
            return None;
        }

        if REFERENCE_TARGET.is_match(line) {
            self.advance_line();
            return None;
        }

        if let Some(heading) = self.try_parse_heading() {
            return Some(heading);
        }

        if line.starts_with(".. ") && line.contains("::") {
            if let Some(directive) = self.try_parse_directive() {
                return Some(directive);
            }
        } else if is_comment(line) {
            self.skip_comment();
            return None;
        }

        if BULLET_ITEM.is_match(line) {
            return Some(self.parse_list(ListKind::Bullet));
        }

        if ENUMERATED_ITEM.is_match(line) {
            return Some(self.parse_list(ListKind::Enumerated));
        }

        if self.after_blank && line.starts_with(LITERAL_INDENT) {
            return Some(self.parse_literal_block());
        }

        self.parse_paragraph()
    }

    fn try_parse_heading(&mut self) -> Option<Node> {
        let line = self.current_line()?;
        let next = self.peek_line(1)?;

        // Overlined title: ===== / Title / =====
        if let Some(over) = underline_char(line) {
            let under = self.peek_line(2).and_then(underline_char);
            if !is_blank(next) && underline_char(next).is_none() && under == Some(over) {
                let title = next.trim().to_string();
                self.advance_to(self.line_idx + 3);
                return Some(Node::heading(underline_level(over), title));
            }
            return None;
        }

        let ch = underline_char(next)?;
        let title = line.trim().to_string();
        self.advance_to(self.line_idx + 2);
        Some(Node::heading(underline_level(ch), title))
    }

    fn try_parse_directive(&mut self) -> Option<Node> {
        let start_line = self.line_idx;
        let caps = DIRECTIVE.captures(self.current_line()?)?;
        let name = caps[1].to_string();
        let argument = caps[2].to_string();
        self.advance_line();

        let body = self.collect_directive_body();

        let node = match name.as_str() {
            "code-block" | "code" | "sourcecode" => {
                let (_options, content) = split_leading_options(&body);
                let language = if argument.is_empty() {
                    "text".to_string()
                } else {
                    argument
                };
                Node::CodeBlock { language, content }
            }
            "image" => {
                let (mut options, _content) = split_leading_options(&body);
                let alt = options.remove("alt");
                Node::Image {
                    src: argument,
                    alt,
                    options,
                }
            }
            "note" | "warning" | "danger" | "tip" => {
                let (_options, body) = split_leading_options(&body);
                let text = match (argument.is_empty(), body.is_empty()) {
                    (true, _) => body,
                    (false, true) => argument,
                    (false, false) => format!("{argument}\n{body}"),
                };
                let content = self.inline(&text, start_line + 1);
                Node::Admonition {
                    kind: name,
                    content,
                }
            }
            _ => {
                let (options, content) = split_leading_options(&body);
                Node::Directive {
                    name,
                    argument,
                    options,
                    content,
                }
            }
        };

        Some(node)
    }

    /// Collect the indented lines following a directive, dedented by the
    /// indentation of the first non-blank line.
    fn collect_directive_body(&mut self) -> Vec<&'a str> {
        let mut body = Vec::new();

        let Some(first) = self.next_non_blank(self.line_idx) else {
            return body;
        };
        let threshold = indent_width(self.lines[first]);
        if threshold == 0 {
            return body;
        }

        while let Some(line) = self.current_line() {
            if is_blank(line) {
                match self.next_non_blank(self.line_idx) {
                    Some(next) if indent_width(self.lines[next]) >= threshold => {
                        body.push("");
                        self.advance_line();
                    }
                    _ => break,
                }
            } else if indent_width(line) >= threshold {
                body.push(strip_indent(line, threshold));
                self.advance_line();
            } else {
                break;
            }
        }

        body
    }

    /// Consume a comment and its indented continuation lines.
    ///
    /// Comments render nothing; each one is reported as an info diagnostic.
    fn skip_comment(&mut self) {
        let start_line = self.line_idx;
        let mut text: Vec<&str> = Vec::new();
        if let Some(line) = self.current_line() {
            text.push(line.trim_start_matches('.').trim());
        }
        self.advance_line();
        while let Some(line) = self.current_line() {
            if is_blank(line) {
                match self.next_non_blank(self.line_idx) {
                    Some(next) if indent_width(self.lines[next]) > 0 => self.advance_line(),
                    _ => break,
                }
            } else if indent_width(line) > 0 {
                text.push(line.trim());
                self.advance_line();
            } else {
                break;
            }
        }

        self.record(Diagnostic::skipped_comment(text.join(" ").trim()), start_line);
    }

    fn parse_list(&mut self, kind: ListKind) -> Node {
        let pattern = kind.pattern();
        let mut items = Vec::new();

        while let Some(line) = self.current_line() {
            if let Some(caps) = pattern.captures(line) {
                let item_line = self.line_idx;
                let mut text = caps[1].trim().to_string();
                self.advance_line();

                // Indented lines directly below an item continue it.
                while let Some(next) = self.current_line() {
                    if is_blank(next)
                        || indent_width(next) == 0
                        || BULLET_ITEM.is_match(next)
                        || ENUMERATED_ITEM.is_match(next)
                    {
                        break;
                    }
                    if !text.is_empty() {
                        text.push(' ');
                    }
                    text.push_str(next.trim());
                    self.advance_line();
                }

                let text = self.inline(&text, item_line);
                items.push(ListItem::new(text));
                continue;
            }

            // Blank lines between items do not end the list.
            match self.next_non_blank(self.line_idx) {
                Some(next) if next > self.line_idx && pattern.is_match(self.lines[next]) => {
                    self.advance_to(next);
                }
                _ => break,
            }
        }

        match kind {
            ListKind::Bullet => Node::UnorderedList { items },
            ListKind::Enumerated => Node::OrderedList { items },
        }
    }

    fn parse_literal_block(&mut self) -> Node {
        let mut content_lines = Vec::new();

        while let Some(line) = self.current_line() {
            if is_blank(line) {
                content_lines.push("");
            } else if let Some(rest) = line.strip_prefix(LITERAL_INDENT) {
                content_lines.push(rest);
            } else {
                break;
            }
            self.advance_line();
        }

        Node::code_block("text", trim_blank_lines(&content_lines).join("\n"))
    }

    fn parse_paragraph(&mut self) -> Option<Node> {
        let start_line = self.line_idx;
        let mut content = String::new();

        while let Some(line) = self.current_line() {
            if is_blank(line) {
                break;
            }
            if !content.is_empty() {
                content.push(' ');
            }
            content.push_str(line.trim());
            self.advance_line();
        }

        // A trailing `::` introduces a literal block; it reads as one colon.
        let content = match content.strip_suffix("::") {
            Some("") => return None,
            Some(rest) if rest.ends_with(char::is_whitespace) => rest.trim_end().to_string(),
            Some(rest) => format!("{rest}:"),
            None => content,
        };

        let text = self.inline(&content, start_line);
        Some(Node::paragraph(text))
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// `..` on its own or `.. text` without a directive marker.
fn is_comment(line: &str) -> bool {
    line.trim_end() == ".." || (line.starts_with(".. ") && !line.contains("::"))
}

/// The repeated character of an underline of 3+ identical adornment chars.
fn underline_char(line: &str) -> Option<char> {
    let line = line.trim_end();
    let first = line.chars().next()?;
    (UNDERLINE_CHARS.contains(&first)
        && line.chars().count() >= 3
        && line.chars().all(|c| c == first))
    .then_some(first)
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Drop the first `width` characters of an indented line.
fn strip_indent(line: &str, width: usize) -> &str {
    match line.char_indices().nth(width) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

fn trim_blank_lines<'l>(lines: &'l [&'l str]) -> &'l [&'l str] {
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    &lines[start..end]
}

/// Split the field options directly below a directive line from its content.
///
/// Options end at the first blank or non-field line; field-like lines after
/// that are content.
fn split_leading_options(body: &[&str]) -> (FieldList, String) {
    let mut options = FieldList::new();
    let mut consumed = 0;
    for line in body {
        match FIELD_OPTION.captures(line) {
            Some(caps) => {
                options.set(&caps[1], caps.get(2).map_or("", |m| m.as_str()));
                consumed += 1;
            }
            None => break,
        }
    }
    let content = trim_blank_lines(&body[consumed..]).join("\n");
    (options, content)
}
