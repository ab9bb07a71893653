//! End-to-end conversion tests for rstmdx.
//!
//! Covers the documented conversions, structural invariants, Unicode
//! handling and malformed input.

use pretty_assertions::assert_eq;
use rstmdx::{DiagnosticKind, EmitOptions, Node, NodeKind, Severity, mdx, rst};

fn convert(input: &str) -> String {
    let result = rstmdx::convert(input, &EmitOptions::default());
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    result.value
}

fn kinds(input: &str) -> Vec<NodeKind> {
    rst::parse(input).value.iter().map(Node::kind).collect()
}

mod conversions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_and_paragraph() {
        assert_eq!(
            convert("Title\n=====\n\nHello *world*.\n"),
            "---\ntitle: Title\n---\n\nHello *world*."
        );
    }

    #[test]
    fn test_bullet_list() {
        let doc = rst::parse("- a\n- b\n").value;
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.nodes[0].kind(), NodeKind::UnorderedList);
        let items: Vec<_> = doc.nodes[0].items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(items, vec!["a", "b"]);
        assert_eq!(mdx::emit(&doc).value, "- a\n- b");
    }

    #[test]
    fn test_code_block() {
        let doc = rst::parse(".. code-block:: python\n\n    x = 1\n").value;
        assert_eq!(doc.nodes, vec![Node::code_block("python", "x = 1")]);
        assert_eq!(mdx::emit(&doc).value, "```python\nx = 1\n```");
    }

    #[test]
    fn test_note() {
        let doc = rst::parse(".. note::\n\n    Careful.\n").value;
        assert_eq!(doc.nodes, vec![Node::admonition("note", "Careful.")]);
        assert_eq!(mdx::emit(&doc).value, ":::note\nCareful.\n:::");
    }

    #[test]
    fn test_class_reference() {
        assert_eq!(
            convert(":ref:`Enemy <class_Enemy>`\n"),
            "[Enemy](/engine/classes/class_enemy)"
        );
    }

    #[test]
    fn test_full_page() {
        let input = "\
.. _doc_intro:

Introduction
============

Welcome to the **engine**. See :ref:`Node <class_Node>` and `the site <https://example.com>`_.

Getting started
---------------

#. Download
#. Run ``engine --help``

.. note:: Read this first.

.. code-block:: gdscript
   :linenos:

   func _ready():
       print(\"hi\")

Example::

    $ engine run

.. image:: img/main_window.png

.. toctree::
   :maxdepth: 1

   tutorials/first
";
        let expected = "\
---
title: Introduction
---

Welcome to the **engine**. See [Node](/engine/classes/class_node) and [the site](https://example.com).

## Getting started

1. Download
2. Run `engine --help`

:::note
Read this first.
:::

```gdscript
func _ready():
    print(\"hi\")
```

Example:

```text
$ engine run
```

![Main window](img/main_window.png)

{/* toctree */}";
        assert_eq!(convert(input), expected);
    }
}

mod invariants {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_frontmatter_block() {
        let output = convert("One\n===\n\nTwo\n===\n\nOne\n===\n");
        assert_eq!(output.matches("title:").count(), 1);
        assert_eq!(output, "---\ntitle: One\n---\n\n# Two\n\n# One");
    }

    #[test]
    fn test_list_continuity_across_blank_lines() {
        let tight = rst::parse("- a\n- b\n- c\n").value;
        let loose = rst::parse("- a\n\n- b\n\n- c\n").value;
        assert_eq!(tight, loose);
        assert_eq!(tight.nodes[0].items().len(), 3);
    }

    #[test]
    fn test_list_kind_fixed_at_entry() {
        assert_eq!(
            kinds("- a\n- b\n\n1. one\n2. two\n"),
            vec![NodeKind::UnorderedList, NodeKind::OrderedList]
        );
    }

    #[test]
    fn test_link_target_untouched_by_inline_rules() {
        assert_eq!(
            convert("`*star* and code <https://x.org/a_*b*_c>`_\n"),
            "[*star* and code](https://x.org/a_*b*_c)"
        );
    }

    #[test]
    fn test_blocks_separated_by_one_blank_line() {
        let result = rstmdx::convert("a\n\n\n\nb\n\n.. comment\n\nc\n", &EmitOptions::default());
        assert_eq!(result.value, "a\n\nb\n\nc");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::SkippedComment);
        assert_eq!(result.diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn test_wrapped_markers_stay_inline() {
        let result = rstmdx::convert(
            "Costs 5 - 3 coins, see issue # 4 or step 2. then > more\n",
            &EmitOptions::wrapped(5),
        );
        for line in result.value.lines() {
            let first = line.split_whitespace().next().unwrap_or_default();
            assert!(
                !matches!(first, "-" | "#" | "2." | ">"),
                "line starts with a marker: {line:?}"
            );
        }
        assert_eq!(mdx::reflow(&result.value, 5), result.value);
    }

    #[test]
    fn test_wrapped_output_is_stable() {
        let input = "A paragraph with enough words in it to need several lines of output.\n";
        let once = rstmdx::convert(input, &EmitOptions::wrapped(24)).value;
        assert_eq!(mdx::reflow(&once, 24), once);
        assert!(once.lines().all(|line| line.chars().count() <= 24));
    }

    #[test]
    fn test_output_is_trimmed() {
        let output = convert("\n\n   \nText\n\n\n");
        assert_eq!(output, "Text");
    }
}

mod unicode {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accented_title() {
        assert_eq!(
            convert("Café déjà vu\n============\n\nnaïve text\n"),
            "---\ntitle: Café déjà vu\n---\n\nnaïve text"
        );
    }

    #[test]
    fn test_emoji_in_list() {
        assert_eq!(convert("- 👋 hi\n- 👨‍👩‍👧‍👦 family\n"), "- 👋 hi\n- 👨‍👩‍👧‍👦 family");
    }

    #[test]
    fn test_cjk_paragraph_wraps_by_chars() {
        let result = rstmdx::convert("日本語 の テキスト\n", &EmitOptions::wrapped(6));
        assert_eq!(result.value, "日本語 の\nテキスト");
    }

    #[test]
    fn test_unicode_in_directive_body() {
        let doc = rst::parse(".. note::\n\n   Ünïcödé body\n").value;
        assert_eq!(doc.nodes, vec![Node::admonition("note", "Ünïcödé body")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            convert("Title\r\n=====\r\n\r\nBody\r\n"),
            convert("Title\n=====\n\nBody\n")
        );
    }
}

mod structure {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let result = rstmdx::convert("", &EmitOptions::default());
        assert_eq!(result.value, "");
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(rst::parse("   \n\n\t\n").value.is_empty());
        assert_eq!(convert("   \n\n\t\n"), "");
    }

    #[test]
    fn test_only_targets_and_comments() {
        let result = rstmdx::convert(
            ".. _a:\n\n.. a comment\n   continued\n\n.. _b:\n",
            &EmitOptions::default(),
        );
        assert_eq!(result.value, "");
        let comments: Vec<_> = result.diagnostics.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(comments, vec!["a comment continued"]);
    }

    #[test]
    fn test_many_paragraphs() {
        let input: String = (0..500).map(|i| format!("Paragraph {i}.\n\n")).collect();
        let doc = rst::parse(&input).value;
        assert_eq!(doc.len(), 500);
        let output = mdx::emit(&doc).value;
        assert_eq!(output.split("\n\n").count(), 500);
        assert!(output.ends_with("Paragraph 499."));
    }

    #[test]
    fn test_title_only() {
        assert_eq!(convert("Just a title\n============\n"), "---\ntitle: Just a title\n---");
    }
}

mod malformed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directive_without_name_is_paragraph() {
        assert_eq!(kinds(".. :: nothing\n"), vec![NodeKind::Paragraph]);
        assert_eq!(convert(".. :: nothing\n"), ".. :: nothing");
    }

    #[test]
    fn test_directive_without_body() {
        assert_eq!(
            convert(".. image:: img/logo_dark.png\n\nAfter.\n"),
            "![Logo dark](img/logo_dark.png)\n\nAfter."
        );
    }

    #[test]
    fn test_image_alt_option() {
        assert_eq!(
            convert(".. image:: img/a.png\n   :alt: The editor\n   :width: 400\n"),
            "![The editor](img/a.png)"
        );
    }

    #[test]
    fn test_code_block_without_content() {
        assert_eq!(convert(".. code-block:: rust\n\nText\n"), "```rust\n```\n\nText");
    }

    #[test]
    fn test_unknown_directive_is_kept_as_comment() {
        assert_eq!(
            convert(".. seealso:: :ref:`x`\n"),
            "{/* .. seealso:: :ref:`x`\n*/}"
        );
    }

    #[test]
    fn test_unterminated_markup_is_left_alone() {
        assert_eq!(
            convert("a *dangling and ``open literal\n"),
            "a *dangling and ``open literal"
        );
    }

    #[test]
    fn test_broken_class_reference_reports_line() {
        let result = rstmdx::convert(
            "Fine.\n\nSee :ref:`Oops <class_Oops`.\n",
            &EmitOptions::default(),
        );
        assert_eq!(result.value, "Fine.\n\nSee [Oops](#oops).");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnparsedReference);
        assert_eq!(result.diagnostics[0].line, Some(3));
    }

    #[test]
    fn test_underline_shorter_than_three_is_not_heading() {
        assert_eq!(kinds("Hi\n==\n"), vec![NodeKind::Paragraph]);
    }
}
