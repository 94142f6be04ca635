//! HTML-to-Markdown conversion for embedded page content.
//!
//! Graph site pages surface rich text as raw HTML fragments. This crate
//! normalizes those fragments into readable Markdown through an ordered
//! cascade of rewrite rules.
//!
//! The conversion is pure, deterministic, and total: it never fails, and in
//! the worst case returns the input stripped of all recognizable tags.

mod rules;
mod table;

/// Convert an HTML fragment to Markdown.
///
/// Runs the full rule cascade: entity decoding, block and inline element
/// rewrites, table conversion, wrapper unwrapping, tag stripping, and
/// whitespace normalization.
///
/// Known limitation: nested tags of the same kind are only handled correctly
/// by the wrapper-unwrap stage (`div`/`span`); the other rules are single-pass
/// and may mis-handle deep same-tag nesting.
pub fn html_to_markdown(html: &str) -> String {
    rules::run_cascade(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Conversion shape ---

    #[test]
    fn heading_conversion() {
        assert_eq!(html_to_markdown("<h2>Title</h2>"), "## Title");
        // Before final trimming the heading carries its blank line separator.
        let out = html_to_markdown("<h2>Title</h2><p>Body</p>");
        assert_eq!(out, "## Title\n\nBody");
    }

    #[test]
    fn all_heading_levels() {
        let out = html_to_markdown("<h1>A</h1><h2>B</h2><h3>C</h3><h4>D</h4>");
        assert!(out.contains("# A"));
        assert!(out.contains("## B"));
        assert!(out.contains("### C"));
        assert!(out.contains("#### D"));
    }

    #[test]
    fn inline_formatting() {
        assert_eq!(
            html_to_markdown("<p>A <b>bold</b> and <i>italic</i> word</p>"),
            "A **bold** and *italic* word"
        );
        assert_eq!(
            html_to_markdown("<p><strong>S</strong> <em>E</em></p>"),
            "**S** *E*"
        );
    }

    #[test]
    fn anchors_become_links() {
        assert_eq!(
            html_to_markdown(r#"<a href="https://example.com/doc">the docs</a>"#),
            "[the docs](https://example.com/doc)"
        );
    }

    #[test]
    fn unordered_list_items() {
        let out = html_to_markdown("<ul><li>one</li><li>two</li></ul>");
        assert!(out.contains("- one"));
        assert!(out.contains("- two"));
    }

    #[test]
    fn ordered_list_items_all_prefixed_one() {
        // Sequence numbers are intentionally not tracked; every item is "1."
        let out = html_to_markdown("<ol><li>first</li><li>second</li></ol>");
        assert!(out.contains("1. first"));
        assert!(out.contains("1. second"));
        assert!(!out.contains("2. second"));
    }

    #[test]
    fn images_become_markdown_images() {
        assert_eq!(
            html_to_markdown(r#"<img src="/img/cat.png" alt="a cat">"#),
            "![a cat](/img/cat.png)"
        );
    }

    #[test]
    fn table_with_header_row() {
        let html = "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>30</td></tr></table>";
        let out = html_to_markdown(html);
        assert!(out.contains("| Name | Age |"), "missing header row in {out:?}");
        assert!(out.contains("| --- | --- |"), "missing separator row in {out:?}");
        assert!(out.contains("| Ann | 30 |"), "missing data row in {out:?}");
    }

    #[test]
    fn table_without_header_synthesizes_columns() {
        let html = "<table><tr><td>a</td><td>b</td><td>c</td></tr></table>";
        let out = html_to_markdown(html);
        assert!(out.contains("| Column 1 | Column 2 | Column 3 |"), "got {out:?}");
        assert!(out.contains("| a | b | c |"));
    }

    #[test]
    fn preformatted_and_inline_code() {
        let out = html_to_markdown("<pre>let x = 1;</pre>");
        assert!(out.contains("```\nlet x = 1;\n```"));

        assert_eq!(html_to_markdown("<p>run <code>cargo</code> now</p>"), "run `cargo` now");
    }

    #[test]
    fn blockquote_and_hr() {
        assert_eq!(html_to_markdown("<blockquote>wise words</blockquote>"), "> wise words");
        let out = html_to_markdown("<p>a</p><hr><p>b</p>");
        assert!(out.contains("---"));
    }

    #[test]
    fn nested_wrappers_fully_unwrapped() {
        let out = html_to_markdown("<div><div><span>deep</span> content</div></div>");
        assert_eq!(out, "deep content");
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(html_to_markdown("<p>fish &amp; chips &gt; rest</p>"), "fish & chips > rest");
    }

    #[test]
    fn line_breaks_become_newlines() {
        assert_eq!(html_to_markdown("one<br>two"), "one\ntwo");
    }

    #[test]
    fn unknown_tags_stripped_content_kept() {
        assert_eq!(
            html_to_markdown("<article><section>kept text</section></article>"),
            "kept text"
        );
    }

    // --- Totality and determinism ---

    #[test]
    fn empty_input() {
        assert_eq!(html_to_markdown(""), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_to_markdown("no markup here"), "no markup here");
    }

    #[test]
    fn unbalanced_tags_do_not_panic() {
        let inputs = [
            "<b>never closed",
            "closed never</b>",
            "<table><tr><td>lonely",
            "<<>><p></p",
            "<div><div>one close</div>",
        ];
        for input in inputs {
            // Must not panic; output content is best-effort.
            let _ = html_to_markdown(input);
        }
    }

    #[test]
    fn deterministic() {
        let html = "<h1>T</h1><div><p>a <b>b</b></p><ul><li>x</li></ul></div>";
        assert_eq!(html_to_markdown(html), html_to_markdown(html));
    }

    #[test]
    fn whitespace_collapsed_to_at_most_two_newlines() {
        let out = html_to_markdown("<p>a</p><p></p><p></p><p>b</p>");
        assert!(!out.contains("\n\n\n"), "got {out:?}");
    }

    #[test]
    fn output_trimmed() {
        let out = html_to_markdown("  <p>padded</p>  ");
        assert_eq!(out, "padded");
    }
}
