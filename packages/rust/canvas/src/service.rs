//! Page content rendering service.
//!
//! Fetches a page with its canvas layout expanded and renders it to a single
//! document string: title, description, then the walked layout body, joined
//! with blank lines. The rendered document is built fresh per request and
//! never cached.

use tracing::{debug, instrument};

use graphscout_client::{GraphClient, SitePage};
use graphscout_shared::{GraphScoutError, RenderFormat, Result};

use crate::layout::render_layout;

/// Shown when a page has no extractable content at all. A defined outcome,
/// not an error.
const NO_CONTENT_MARKDOWN: &str =
    "*No detailed content available. Use the page URL to view in browser.*";
const NO_CONTENT_PLAIN: &str =
    "No detailed content available. Use the page URL to view in browser.";

/// Fetch a page and render its content in the requested format.
///
/// A fetch failure is wrapped with the page/site context and propagated;
/// there is no retry.
#[instrument(skip(client))]
pub async fn page_content(
    client: &GraphClient,
    site_id: &str,
    page_id: &str,
    format: RenderFormat,
) -> Result<String> {
    let page = client
        .fetch_page_with_layout(site_id, page_id)
        .await
        .map_err(|e| GraphScoutError::page_content(site_id, page_id, e.to_string()))?;

    let rendered = render_page(&page, format);
    debug!(len = rendered.len(), "page rendered");
    Ok(rendered)
}

/// Render an already-fetched page (with layout) to the target format.
pub fn render_page(page: &SitePage, format: RenderFormat) -> String {
    let mut doc = String::new();

    if let Some(title) = &page.title {
        if format.is_markdown() {
            doc.push_str(&format!("## {title}\n\n"));
        } else {
            doc.push_str(&format!("Title: {title}\n\n"));
        }
    }

    if let Some(description) = &page.description {
        if format.is_markdown() {
            doc.push_str(&format!("*{description}*\n\n"));
        } else {
            doc.push_str(&format!("Description: {description}\n\n"));
        }
    }

    if let Some(layout) = &page.canvas_layout {
        doc.push_str(&render_layout(layout, format));
    }

    let doc = doc.trim_end();
    if doc.is_empty() {
        return no_content(format).to_string();
    }
    doc.to_string()
}

fn no_content(format: RenderFormat) -> &'static str {
    if format.is_markdown() {
        NO_CONTENT_MARKDOWN
    } else {
        NO_CONTENT_PLAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_from(value: serde_json::Value) -> SitePage {
        serde_json::from_value(value).expect("page fixture")
    }

    #[test]
    fn title_description_and_body_joined() {
        let page = page_from(json!({
            "title": "Welcome",
            "description": "The intro page",
            "canvasLayout": {
                "horizontalSections": [{"columns": [{"webparts": [
                    {"innerHtml": "<p>Hello there.</p>"}
                ]}]}]
            }
        }));

        assert_eq!(
            render_page(&page, RenderFormat::Markdown),
            "## Welcome\n\n*The intro page*\n\nHello there."
        );
    }

    #[test]
    fn plain_format_uses_labels() {
        let page = page_from(json!({
            "title": "Welcome",
            "description": "The intro page"
        }));

        assert_eq!(
            render_page(&page, RenderFormat::Plain),
            "Title: Welcome\n\nDescription: The intro page"
        );
    }

    #[test]
    fn empty_canvas_falls_back() {
        let page = page_from(json!({
            "canvasLayout": {"horizontalSections": []}
        }));

        assert_eq!(
            render_page(&page, RenderFormat::Markdown),
            "*No detailed content available. Use the page URL to view in browser.*"
        );
        assert_eq!(
            render_page(&page, RenderFormat::Plain),
            "No detailed content available. Use the page URL to view in browser."
        );
    }

    #[test]
    fn title_alone_is_content() {
        let page = page_from(json!({"title": "Just a title"}));
        assert_eq!(render_page(&page, RenderFormat::Markdown), "## Just a title");
    }

    #[tokio::test]
    async fn page_content_fetches_with_expanded_layout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sites/s1/pages/p1/microsoft.graph.sitePage"))
            .and(query_param("$expand", "canvasLayout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p1",
                "title": "Team News",
                "canvasLayout": {"verticalSection": {"webparts": [
                    {"innerHtml": "<h2>Update</h2><p>All good.</p>"}
                ]}}
            })))
            .mount(&server)
            .await;

        let client = GraphClient::with_token(&server.uri(), "t").unwrap();
        let content = page_content(&client, "s1", "p1", RenderFormat::Markdown)
            .await
            .unwrap();

        assert_eq!(content, "## Team News\n\n## Update\n\nAll good.");
    }

    #[tokio::test]
    async fn fetch_failure_carries_page_context() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GraphClient::with_token(&server.uri(), "t").unwrap();
        let err = page_content(&client, "s1", "p1", RenderFormat::Markdown)
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("p1"), "missing page id in {msg}");
        assert!(msg.contains("s1"), "missing site id in {msg}");
    }
}
