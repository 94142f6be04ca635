//! The ordered rewrite cascade turning HTML fragments into Markdown.
//!
//! Each rule is a function `&str -> String` applied in sequence; later rules
//! see earlier rules' output. Block-level patterns use `(?s)` so content may
//! span lines; inline patterns are line-local. Tag-pair rules are single-pass,
//! so same-tag nesting is only guaranteed for the wrapper-unwrap rule, which
//! runs to a fixed point.

use std::sync::LazyLock;

use regex::Regex;

use crate::table;

/// Run the full cascade on an HTML fragment.
pub(crate) fn run_cascade(html: &str) -> String {
    let mut out = html_escape::decode_html_entities(html).into_owned();

    out = headings(&out);
    out = paragraphs(&out);
    out = bold_italic(&out);
    out = anchors(&out);
    out = unordered_lists(&out);
    out = ordered_lists(&out);
    out = images(&out);
    out = table::convert_tables(&out);
    out = code_blocks(&out);
    out = blockquotes(&out);
    out = horizontal_rules(&out);
    out = unwrap_wrappers(&out);
    out = line_breaks(&out);
    out = strip_remaining_tags(&out);
    out = normalize_whitespace(&out);

    out
}

// ---------------------------------------------------------------------------
// Rule 1: Headings h1–h4
// ---------------------------------------------------------------------------

static H_RES: LazyLock<[(Regex, &'static str); 4]> = LazyLock::new(|| {
    [
        (tag_pair_re("h1"), "# $1\n\n"),
        (tag_pair_re("h2"), "## $1\n\n"),
        (tag_pair_re("h3"), "### $1\n\n"),
        (tag_pair_re("h4"), "#### $1\n\n"),
    ]
});

fn headings(html: &str) -> String {
    let mut out = html.to_string();
    for (re, repl) in H_RES.iter() {
        out = re.replace_all(&out, *repl).into_owned();
    }
    out
}

// ---------------------------------------------------------------------------
// Rule 2: Paragraphs
// ---------------------------------------------------------------------------

static P_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("p"));

fn paragraphs(html: &str) -> String {
    P_RE.replace_all(html, "$1\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 3: Bold and italic
// ---------------------------------------------------------------------------

static B_RE: LazyLock<Regex> = LazyLock::new(|| tag_pair_re("b"));
static STRONG_RE: LazyLock<Regex> = LazyLock::new(|| tag_pair_re("strong"));
static I_RE: LazyLock<Regex> = LazyLock::new(|| tag_pair_re("i"));
static EM_RE: LazyLock<Regex> = LazyLock::new(|| tag_pair_re("em"));

fn bold_italic(html: &str) -> String {
    let out = B_RE.replace_all(html, "**$1**");
    let out = STRONG_RE.replace_all(&out, "**$1**");
    let out = I_RE.replace_all(&out, "*$1*");
    EM_RE.replace_all(&out, "*$1*").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 4: Anchors
// ---------------------------------------------------------------------------

static A_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid regex")
});

fn anchors(html: &str) -> String {
    A_RE.replace_all(html, "[$2]($1)").into_owned()
}

// ---------------------------------------------------------------------------
// Rules 5 & 6: Lists
// ---------------------------------------------------------------------------

static UL_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("ul"));
static OL_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("ol"));
static LI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<li(?:\s[^>]*)?>(.*?)</li>\s*").expect("valid regex")
});

fn unordered_lists(html: &str) -> String {
    UL_RE
        .replace_all(html, |caps: &regex::Captures| {
            let items = LI_RE.replace_all(&caps[1], "- $1\n");
            format!("\n{}\n", items.trim())
        })
        .into_owned()
}

/// Sequence numbers are not tracked: every ordered item is literally `1.`,
/// a simplification most Markdown renderers renumber on display.
fn ordered_lists(html: &str) -> String {
    OL_RE
        .replace_all(html, |caps: &regex::Captures| {
            let items = LI_RE.replace_all(&caps[1], "1. $1\n");
            format!("\n{}\n", items.trim())
        })
        .into_owned()
}

// ---------------------------------------------------------------------------
// Rule 7: Images
// ---------------------------------------------------------------------------

static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]*src="([^"]*)"[^>]*alt="([^"]*)"[^>]*>"#).expect("valid regex")
});

fn images(html: &str) -> String {
    IMG_RE.replace_all(html, "![$2]($1)").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 9: Code blocks and inline code
// ---------------------------------------------------------------------------

static PRE_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("pre"));
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| tag_pair_re("code"));

fn code_blocks(html: &str) -> String {
    let out = PRE_RE.replace_all(html, "```\n$1\n```\n\n");
    CODE_RE.replace_all(&out, "`$1`").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 10: Blockquotes
// ---------------------------------------------------------------------------

static BLOCKQUOTE_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("blockquote"));

fn blockquotes(html: &str) -> String {
    BLOCKQUOTE_RE.replace_all(html, "> $1\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 11: Horizontal rules
// ---------------------------------------------------------------------------

static HR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<hr[^>]*>").expect("valid regex"));

fn horizontal_rules(html: &str) -> String {
    HR_RE.replace_all(html, "---\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 12: Wrapper unwrapping (fixed point)
// ---------------------------------------------------------------------------

static DIV_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("div"));
static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| block_pair_re("span"));

/// Replace `div`/`span` wrappers with their inner content until no matches
/// remain. Wrappers nest, so a single pass is not enough; each pass strictly
/// shrinks the string, so the loop terminates.
fn unwrap_wrappers(html: &str) -> String {
    let mut out = html.to_string();
    loop {
        let pass = {
            let divs = DIV_RE.replace_all(&out, "$1");
            SPAN_RE.replace_all(&divs, "$1").into_owned()
        };
        if pass == out {
            return out;
        }
        out = pass;
    }
}

// ---------------------------------------------------------------------------
// Rule 13: Line breaks
// ---------------------------------------------------------------------------

static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br[^>]*>").expect("valid regex"));

fn line_breaks(html: &str) -> String {
    BR_RE.replace_all(html, "\n").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 14: Strip remaining tags
// ---------------------------------------------------------------------------

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid regex"));
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

/// Strip any remaining recognizable tag syntax, preserving content.
/// Unbalanced leftovers that are not tag-shaped stay as literal text.
fn strip_remaining_tags(html: &str) -> String {
    let out = COMMENT_RE.replace_all(html, "");
    TAG_RE.replace_all(&out, "").into_owned()
}

// ---------------------------------------------------------------------------
// Rule 15: Whitespace normalization
// ---------------------------------------------------------------------------

static MULTI_BLANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Trim leading/trailing whitespace and collapse runs of 3+ newlines to 2.
fn normalize_whitespace(html: &str) -> String {
    MULTI_BLANK_RE.replace_all(html.trim(), "\n\n").into_owned()
}

// ---------------------------------------------------------------------------
// Pattern helpers
// ---------------------------------------------------------------------------

/// Inline open/close tag pair: content must not span lines.
fn tag_pair_re(tag: &str) -> Regex {
    Regex::new(&format!(r"<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).expect("valid regex")
}

/// Block-level open/close tag pair: `(?s)` so content may span lines.
fn block_pair_re(tag: &str) -> Regex {
    Regex::new(&format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).expect("valid regex")
}
