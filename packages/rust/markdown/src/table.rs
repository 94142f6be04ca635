//! HTML table to Markdown table conversion.
//!
//! The table span is located with a regex so the replacement is exact on the
//! source string; cell extraction inside the span goes through `scraper`,
//! which tolerates missing `tbody` wrappers and stray markup in cells.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<table[^>]*>.*?</table>").expect("valid regex"));

/// Replace every `<table>…</table>` span with a Markdown table block.
pub(crate) fn convert_tables(html: &str) -> String {
    if !TABLE_RE.is_match(html) {
        return html.to_string();
    }

    let spans: Vec<String> = TABLE_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();

    let mut result = html.to_string();
    for span in spans {
        let md = table_to_markdown(&span);
        result = result.replacen(&span, &md, 1);
    }
    result
}

/// Build the Markdown table for one `<table>` span.
///
/// Header row comes from the first row's `<th>` cells when present; otherwise
/// `Column N` headers are synthesized to match the first row's cell count.
/// Data rows are each row's `<td>` cells, so a `<th>`-only header row emits
/// no duplicate data row.
fn table_to_markdown(table_html: &str) -> String {
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let th_sel = Selector::parse("th").expect("valid selector");
    let td_sel = Selector::parse("td").expect("valid selector");

    let doc = Html::parse_fragment(table_html);

    let rows: Vec<_> = doc.select(&tr_sel).collect();

    let Some(first_row) = rows.first() else {
        return String::new();
    };

    let header: Vec<String> = {
        let ths: Vec<String> = first_row.select(&th_sel).map(cell_text).collect();
        if !ths.is_empty() {
            ths
        } else {
            let first_width = first_row.select(&td_sel).count();
            (1..=first_width).map(|i| format!("Column {i}")).collect()
        }
    };

    if header.is_empty() {
        return String::new();
    }

    let mut md = String::from("\n");
    md.push_str(&row_line(&header));

    let separator: Vec<String> = header.iter().map(|_| "---".to_string()).collect();
    md.push_str(&row_line(&separator));

    for row in &rows {
        let tds: Vec<String> = row.select(&td_sel).map(cell_text).collect();
        if !tds.is_empty() {
            md.push_str(&row_line(&tds));
        }
    }

    md.push('\n');
    md
}

fn row_line(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

fn cell_text(cell: scraper::ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_from_th() {
        let html = "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>30</td></tr></table>";
        let md = convert_tables(html);
        assert!(md.contains("| Name | Age |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| Ann | 30 |"));
        assert!(!md.contains("<table>"));
    }

    #[test]
    fn synthesized_header_counts_first_row() {
        let html = "<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>";
        let md = convert_tables(html);
        assert!(md.contains("| Column 1 | Column 2 |"), "got {md:?}");
        assert!(md.contains("| a | b |"));
        assert!(md.contains("| c | d |"));
    }

    #[test]
    fn tbody_and_thead_wrappers_tolerated() {
        let html = "<table><thead><tr><th>H</th></tr></thead><tbody><tr><td>v</td></tr></tbody></table>";
        let md = convert_tables(html);
        assert!(md.contains("| H |"));
        assert!(md.contains("| v |"));
    }

    #[test]
    fn empty_table_removed() {
        assert_eq!(convert_tables("before<table></table>after").trim(), "beforeafter");
    }

    #[test]
    fn surrounding_text_untouched() {
        let html = "intro<table><tr><td>x</td></tr></table>outro";
        let md = convert_tables(html);
        assert!(md.starts_with("intro"));
        assert!(md.ends_with("outro"));
    }

    #[test]
    fn no_table_is_identity() {
        assert_eq!(convert_tables("<p>nothing</p>"), "<p>nothing</p>");
    }

    #[test]
    fn cell_markup_reduced_to_text() {
        let html = "<table><tr><td>**already bold**</td></tr></table>";
        let md = convert_tables(html);
        assert!(md.contains("| **already bold** |"));
    }
}
