//! Document builder for MDX output.
//!
//! Exposes the node kinds the MDX writer renders natively, so a document
//! built here always emits without diagnostics.
//!
//! # Example
//!
//! ```
//! use rstmdx_write_mdx::builder::*;
//!
//! let doc = mdx(|d| {
//!     d.h1("Hello World")
//!         .para("This is *emphasized* and **bold**.")
//!         .bullet_list(|l| l.item("First").item("Second"))
//!         .note("Mind the gap.")
//! });
//! assert_eq!(doc.len(), 4);
//! ```

use rstmdx_core::{Document, FieldList, HeadingLevel, ListItem, Node};

/// Build an MDX-ready document.
pub fn mdx<F>(f: F) -> Document
where
    F: FnOnce(MdxBuilder) -> MdxBuilder,
{
    let builder = f(MdxBuilder::new());
    Document::new().with_nodes(builder.nodes)
}

/// Builder for the block sequence of a document.
#[derive(Default)]
pub struct MdxBuilder {
    nodes: Vec<Node>,
}

impl MdxBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Add a heading; levels outside 1..=6 are clamped.
    pub fn heading(mut self, level: u8, text: impl Into<String>) -> Self {
        self.nodes
            .push(Node::heading(HeadingLevel::clamped(level.into()), text));
        self
    }

    /// Add a level 1 heading.
    pub fn h1(self, text: impl Into<String>) -> Self {
        self.heading(1, text)
    }

    /// Add a level 2 heading.
    pub fn h2(self, text: impl Into<String>) -> Self {
        self.heading(2, text)
    }

    /// Add a level 3 heading.
    pub fn h3(self, text: impl Into<String>) -> Self {
        self.heading(3, text)
    }

    /// Add a paragraph of already-converted inline text.
    pub fn para(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::paragraph(text));
        self
    }

    /// Add a bullet list.
    pub fn bullet_list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MdxList) -> MdxList,
    {
        let list = f(MdxList::default());
        self.nodes.push(Node::UnorderedList { items: list.items });
        self
    }

    /// Add a numbered list.
    pub fn ordered_list<F>(mut self, f: F) -> Self
    where
        F: FnOnce(MdxList) -> MdxList,
    {
        let list = f(MdxList::default());
        self.nodes.push(Node::OrderedList { items: list.items });
        self
    }

    /// Add a fenced code block.
    pub fn code_block(mut self, language: impl Into<String>, content: impl Into<String>) -> Self {
        self.nodes.push(Node::code_block(language, content));
        self
    }

    /// Add an image with an explicit alt text.
    pub fn image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.nodes.push(Node::Image {
            src: src.into(),
            alt: Some(alt.into()),
            options: FieldList::new(),
        });
        self
    }

    /// Add an admonition of the given kind.
    pub fn admonition(mut self, kind: impl Into<String>, content: impl Into<String>) -> Self {
        self.nodes.push(Node::admonition(kind, content));
        self
    }

    /// Add a `note` admonition.
    pub fn note(self, content: impl Into<String>) -> Self {
        self.admonition("note", content)
    }

    /// Add a `warning` admonition.
    pub fn warning(self, content: impl Into<String>) -> Self {
        self.admonition("warning", content)
    }

    /// Add a directive, rendered as a comment placeholder.
    pub fn directive(
        mut self,
        name: impl Into<String>,
        argument: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.nodes.push(Node::Directive {
            name: name.into(),
            argument: argument.into(),
            options: FieldList::new(),
            content: content.into(),
        });
        self
    }
}

/// Builder for list items.
#[derive(Default)]
pub struct MdxList {
    items: Vec<ListItem>,
}

impl MdxList {
    /// Add an item.
    pub fn item(mut self, text: impl Into<String>) -> Self {
        self.items.push(ListItem::new(text));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstmdx_core::NodeKind;

    #[test]
    fn test_builder_order() {
        let doc = mdx(|d| {
            d.h1("Title")
                .para("Body")
                .ordered_list(|l| l.item("a").item("b"))
                .code_block("rust", "fn main() {}")
        });
        let kinds: Vec<_> = doc.iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Heading,
                NodeKind::Paragraph,
                NodeKind::OrderedList,
                NodeKind::CodeBlock
            ]
        );
        assert_eq!(doc.nodes[2].items().len(), 2);
    }

    #[test]
    fn test_heading_level_clamped() {
        let doc = mdx(|d| d.heading(9, "Deep"));
        assert_eq!(doc.nodes[0], Node::heading(HeadingLevel::clamped(6), "Deep"));
    }
}
