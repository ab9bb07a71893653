//! Greedy line reflow for prose blocks.

/// Reflow `text` so no line exceeds `width` characters where possible.
///
/// A `width` of 0 or less returns the text unchanged. Blank-line separated
/// paragraphs stay separate; inside each paragraph source line breaks are
/// dropped and words are refilled greedily. Words longer than `width` get a
/// line of their own. A word that would read as a block marker at the start
/// of a line (`-`, `1.`, `#`, `>` and the like) stays on the previous line
/// even past `width`. Reflowing the output again at the same width is a
/// no-op.
pub fn reflow(text: &str, width: i32) -> String {
    reflow_to(text, usize::try_from(width).ok().filter(|w| *w > 0))
}

pub(crate) fn reflow_to(text: &str, limit: Option<usize>) -> String {
    let Some(width) = limit else {
        return text.to_string();
    };

    paragraphs(text)
        .iter()
        .map(|words| fill(words, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Indent every line after the first by `indent` spaces.
pub(crate) fn indent_continuation(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Words of each blank-line separated paragraph.
fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.extend(line.split_whitespace());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

fn fill(words: &[&str], width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for word in words {
        let len = word.chars().count();
        if line_len == 0 {
            out.push_str(word);
            line_len = len;
        } else if line_len + 1 + len <= width || starts_block(word) {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + len;
        } else {
            out.push('\n');
            out.push_str(word);
            line_len = len;
        }
    }
    out
}

/// Whether `word` would open a block when it begins a line.
fn starts_block(word: &str) -> bool {
    let only = |c: char| word.chars().all(|w| w == c);
    let ordinal = word
        .strip_suffix(['.', ')'])
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
    only('-')
        || only('=')
        || only('*')
        || only('#')
        || word == "+"
        || ordinal
        || word.starts_with('>')
        || ["```", "~~~", ":::"].iter().any(|fence| word.starts_with(fence))
}
