//! Node types for the document tree.

use crate::FieldList;

/// A block in the document tree.
///
/// Every kind carries only the payload it needs. Nodes are built once by a
/// reader and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Node {
    /// A section title.
    Heading { level: HeadingLevel, text: String },
    /// Running text, already inline-processed.
    Paragraph { text: String },
    /// A bulleted list.
    UnorderedList { items: Vec<ListItem> },
    /// An enumerated list, numbered from 1 when rendered.
    OrderedList { items: Vec<ListItem> },
    /// A list item outside of a list container.
    ListItem(ListItem),
    /// Verbatim code, never reflowed.
    CodeBlock { language: String, content: String },
    /// An image; `src` is the path given to the directive.
    Image {
        src: String,
        alt: Option<String>,
        options: FieldList,
    },
    /// A call-out block (note, tip, warning, ...).
    Admonition { kind: String, content: String },
    /// Any directive without a dedicated node kind.
    Directive {
        name: String,
        argument: String,
        options: FieldList,
        content: String,
    },
    /// Content of a kind the renderer does not know.
    Unknown { kind: String, content: String },
}

/// An item in a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    pub text: String,
}

/// Heading depth, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct HeadingLevel(u8);

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Heading,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    CodeBlock,
    Image,
    Admonition,
    Directive,
    Unknown,
}

impl Node {
    /// Create a heading.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Node::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph { text: text.into() }
    }

    /// Create a code block.
    pub fn code_block(language: impl Into<String>, content: impl Into<String>) -> Self {
        Node::CodeBlock {
            language: language.into(),
            content: content.into(),
        }
    }

    /// Create an admonition.
    pub fn admonition(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Node::Admonition {
            kind: kind.into(),
            content: content.into(),
        }
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::UnorderedList { .. } => NodeKind::UnorderedList,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Image { .. } => NodeKind::Image,
            Node::Admonition { .. } => NodeKind::Admonition,
            Node::Directive { .. } => NodeKind::Directive,
            Node::Unknown { .. } => NodeKind::Unknown,
        }
    }

    /// Text payload of the node, or `""` for kinds without one.
    ///
    /// Images report their source path; lists have no content of their own.
    pub fn content(&self) -> &str {
        match self {
            Node::Heading { text, .. } | Node::Paragraph { text } => text,
            Node::ListItem(item) => &item.text,
            Node::CodeBlock { content, .. }
            | Node::Admonition { content, .. }
            | Node::Directive { content, .. }
            | Node::Unknown { content, .. } => content,
            Node::Image { src, .. } => src,
            Node::UnorderedList { .. } | Node::OrderedList { .. } => "",
        }
    }

    /// List items of a list container; empty for every other kind.
    pub fn items(&self) -> &[ListItem] {
        match self {
            Node::UnorderedList { items } | Node::OrderedList { items } => items,
            _ => &[],
        }
    }
}

impl ListItem {
    /// Create a list item.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl HeadingLevel {
    /// Top-level heading.
    pub const H1: HeadingLevel = HeadingLevel(1);
    /// Second-level heading, also used for unrecognised underlines.
    pub const H2: HeadingLevel = HeadingLevel(2);

    /// Create a level, returning `None` outside 1..=6.
    pub fn new(level: u8) -> Option<Self> {
        (1..=6).contains(&level).then_some(HeadingLevel(level))
    }

    /// Create a level, clamping into 1..=6.
    pub fn clamped(level: i64) -> Self {
        HeadingLevel(level.clamp(1, 6) as u8)
    }

    /// The numeric level.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        HeadingLevel::new(level).ok_or_else(|| format!("heading level {level} is outside 1..=6"))
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeKind {
    /// Get the kind as a string slice.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::UnorderedList => "unordered_list",
            NodeKind::OrderedList => "ordered_list",
            NodeKind::ListItem => "list_item",
            NodeKind::CodeBlock => "code_block",
            NodeKind::Image => "image",
            NodeKind::Admonition => "admonition",
            NodeKind::Directive => "directive",
            NodeKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_bounds() {
        assert!(HeadingLevel::new(0).is_none());
        assert!(HeadingLevel::new(7).is_none());
        assert_eq!(HeadingLevel::new(6).map(HeadingLevel::get), Some(6));
        assert_eq!(HeadingLevel::clamped(42).get(), 6);
        assert_eq!(HeadingLevel::clamped(-1).get(), 1);
        assert_eq!(HeadingLevel::H2.to_string(), "2");
    }

    #[test]
    fn test_list_has_items_but_no_content() {
        let list = Node::UnorderedList {
            items: vec![ListItem::new("a"), ListItem::new("b")],
        };
        assert_eq!(list.kind(), NodeKind::UnorderedList);
        assert_eq!(list.content(), "");
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn test_image_content_is_source() {
        let image = Node::Image {
            src: "img/logo.png".to_string(),
            alt: None,
            options: FieldList::new(),
        };
        assert_eq!(image.content(), "img/logo.png");
        assert!(image.items().is_empty());
    }
}
