//! Content extraction from a single web part.
//!
//! Different web-part kinds (rich text, embedded web parts, generic app
//! parts) surface their payload through different, overlapping shapes. The
//! resolver tries a fixed precedence and stops at the first hit; checking the
//! typed backing store before the generic additional-data bag favors typed
//! data when available.

use serde_json::Value;

use graphscout_client::WebPart;
use graphscout_shared::RenderFormat;

/// Candidate fields scanned inside a web part's `data` mapping, in order.
const DATA_FIELDS: [&str; 5] = ["text", "content", "value", "description", "html"];

/// Extract displayable content from one web part, or `None` when the part
/// has nothing extractable — a defined non-error outcome.
///
/// Precedence:
/// 1. typed `innerHtml` (HTML)
/// 2. additional-data `innerHtml` (HTML)
/// 3. additional-data `text` (verbatim, never HTML-converted)
/// 4. additional-data `data`: first non-empty string among [`DATA_FIELDS`]
///    when it is a mapping (`html` is the only HTML-shaped one), or the
///    string itself when it is one.
pub fn resolve_content(part: &WebPart, format: RenderFormat) -> Option<String> {
    if let Some(html) = &part.inner_html {
        return Some(render_html(html, format));
    }

    if let Some(html) = part.additional_data.get("innerHtml").and_then(Value::as_str) {
        return Some(render_html(html, format));
    }

    if let Some(text) = part.additional_data.get("text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    match part.additional_data.get("data") {
        Some(Value::Object(map)) => {
            for field in DATA_FIELDS {
                if let Some(val) = map.get(field).and_then(Value::as_str) {
                    if !val.is_empty() {
                        return Some(if field == "html" {
                            render_html(val, format)
                        } else {
                            val.to_string()
                        });
                    }
                }
            }
            None
        }
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn render_html(html: &str, format: RenderFormat) -> String {
    match format {
        RenderFormat::Markdown => graphscout_markdown::html_to_markdown(html),
        RenderFormat::Plain => html.to_string(),
    }
}
