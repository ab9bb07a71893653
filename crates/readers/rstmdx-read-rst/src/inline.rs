//! Inline markup: RST emphasis, literals, links and roles to MDX text.
//!
//! The rules run as ordered regex passes over the whole string. Links are
//! swapped for placeholder tokens first and put back last, so no pass in
//! between can touch a link label or target.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rstmdx_core::{ConversionResult, Diagnostic};

/// Base path for `:ref:` links to class pages.
pub const CLASS_REFERENCE_BASE: &str = "/engine/classes";

// Placeholder tokens use private-use code points, which no rule below matches.
const PLACEHOLDER_OPEN: char = '\u{E000}';
const PLACEHOLDER_CLOSE: char = '\u{E001}';

static EXTERNAL_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`<]*?)\s*<([^<>`]+)>`__?").unwrap());

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`<>]+)`__?").unwrap());

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").unwrap());

static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[^*])\*([^*\n]+)\*").unwrap());

static DOUBLE_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"``(.+?)``").unwrap());

static SINGLE_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`(_?)").unwrap());

static ROLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z][\w+.-]*):`([^`]+)`").unwrap());

static CLASS_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?s)(.*?)\s*<(class_[^<>\s]+)>(.*)$").unwrap());

static EXPLICIT_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?s)(.+?)\s*<([^<>]+)>$").unwrap());

static ANGLE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());

/// Convert RST inline markup in `text` to MDX.
///
/// Never fails. Class references that cannot be parsed fall back to an
/// anchor link and are reported as diagnostics.
pub fn process_inline(text: &str) -> ConversionResult<String> {
    let mut protected = Vec::new();
    let mut diagnostics = Vec::new();

    let text = protect_links(text, &mut protected);
    // Strong and emphasis are already MDX syntax, so these two passes only
    // normalize the span and claim `**` before the single-star rule sees it.
    let text = STRONG.replace_all(&text, "**$1**");
    let text = EMPHASIS.replace_all(&text, "${1}*${2}*");
    let text = DOUBLE_LITERAL.replace_all(&text, |caps: &Captures| code_span(&caps[1]));
    let text = SINGLE_LITERAL.replace_all(&text, |caps: &Captures| {
        if &caps[2] == "_" {
            caps[0].to_string()
        } else {
            code_span(&caps[1])
        }
    });
    let text = ROLE.replace_all(&text, |caps: &Captures| {
        render_role(&caps[1], &caps[2], &mut diagnostics)
    });
    let text = resolve_placeholders(&text, &protected);

    ConversionResult::with_diagnostics(text, diagnostics)
}

/// Lowercase `label` and replace spaces with hyphens.
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "-")
}

/// Swap link spans for placeholders, recording their final rendering.
fn protect_links(text: &str, protected: &mut Vec<(String, String)>) -> String {
    let text = EXTERNAL_LINK.replace_all(text, |caps: &Captures| {
        let url = caps[2].trim();
        let label = match caps[1].trim() {
            "" => url,
            label => label,
        };
        placeholder(protected, format!("[{label}]({url})"))
    });
    REFERENCE
        .replace_all(&text, |caps: &Captures| {
            let label = caps[1].trim();
            placeholder(protected, format!("[{label}](#{})", slugify(label)))
        })
        .into_owned()
}

fn placeholder(protected: &mut Vec<(String, String)>, rendering: String) -> String {
    let token = format!("{PLACEHOLDER_OPEN}{}{PLACEHOLDER_CLOSE}", protected.len());
    protected.push((token.clone(), rendering));
    token
}

fn resolve_placeholders(text: &str, protected: &[(String, String)]) -> String {
    protected
        .iter()
        .fold(text.to_string(), |acc, (token, rendering)| {
            acc.replace(token, rendering)
        })
}

fn code_span(content: &str) -> String {
    if content.contains('`') {
        format!("`` {content} ``")
    } else {
        format!("`{content}`")
    }
}

fn render_role(role: &str, content: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    match role {
        "code" | "literal" => code_span(content),
        "em" | "emphasis" => format!("*{content}*"),
        "strong" => format!("**{content}**"),
        "math" => format!("${content}$"),
        "ref" => render_ref(content, diagnostics),
        "doc" => match EXPLICIT_TARGET.captures(content) {
            Some(caps) => format!("[{}]({})", caps[1].trim(), caps[2].trim()),
            None => format!("[{content}]({content})"),
        },
        _ => format!("<span className=\"{role}\">{content}</span>"),
    }
}

fn render_ref(content: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
    if content.contains("<class_") {
        return match CLASS_REFERENCE.captures(content) {
            Some(caps) => {
                let target = &caps[2];
                let label = match caps[1].trim() {
                    "" => target.trim_start_matches("class_"),
                    display => display,
                };
                format!(
                    "[{label}]({CLASS_REFERENCE_BASE}/{}){}",
                    target.to_lowercase(),
                    &caps[3]
                )
            }
            None => {
                diagnostics.push(Diagnostic::unparsed_reference(content));
                let stripped = ANGLE_GROUP.replace_all(content, "");
                let label = match stripped.trim() {
                    "" => content.trim(),
                    label => label,
                };
                format!("[{label}](#{})", slugify(label))
            }
        };
    }

    match EXPLICIT_TARGET.captures(content) {
        Some(caps) => format!("[{}](#{})", caps[1].trim(), slugify(&caps[2])),
        None => format!("[{content}](#{})", slugify(content)),
    }
}
