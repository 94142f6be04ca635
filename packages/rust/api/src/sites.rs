//! Site operations: collection fetch plus subsite, page, and page-content
//! enrichment.

use serde_json::Value;
use tracing::{instrument, warn};

use graphscout_canvas::page_content;
use graphscout_client::{GraphClient, QueryOptions, Site, SitePage, aggregate};
use graphscout_shared::{Attributes, Collection, RenderFormat, Result, merge_additional, put};

use crate::to_pretty_json;

/// Properties selected on the top-level site fetch when no filter is given.
pub const SITE_SELECT: &str = "id,displayName,webUrl,siteCollection,description";

/// Sentinel stored as a page's `content` when rendering that page failed.
/// One broken page must not fail the surrounding site response.
const ERROR_FETCHING_CONTENT: &str = "Error fetching content";

/// Fetch all sites (optionally filtered), following pagination, then enrich
/// each site with its `subsites` and `pages` sub-collections — every page
/// carrying its rendered Markdown `content`. Returns indented JSON keyed by
/// site id.
pub async fn get(client: &GraphClient, query: &QueryOptions) -> Result<String> {
    let first = client.fetch_collection::<Site>("sites", query).await?;
    let mut collection = aggregate(client, first, normalize).await?;

    for (site_id, attrs) in collection.iter_mut() {
        enrich_site(client, site_id, attrs).await;
    }

    to_pretty_json(&collection)
}

/// Attach `subsites` and `pages` to one site's attributes.
///
/// A failed subsites fetch skips the site's enrichment entirely; a failed
/// page-list fetch skips pages only. Both are logged and non-fatal — per-site
/// enrichment trouble never fails the whole collection.
#[instrument(skip(client, attrs))]
async fn enrich_site(client: &GraphClient, site_id: &str, attrs: &mut Attributes) {
    let subsites = match fetch_all_subsites(client, site_id).await {
        Ok(subsites) => subsites,
        Err(e) => {
            warn!(error = %e, "subsites fetch failed, skipping site enrichment");
            return;
        }
    };
    attrs.insert("subsites".into(), collection_value(subsites));

    let mut pages = match fetch_all_pages(client, site_id).await {
        Ok(pages) => pages,
        Err(e) => {
            warn!(error = %e, "page list fetch failed, skipping pages");
            return;
        }
    };

    for (page_id, page_attrs) in pages.iter_mut() {
        let content = match page_content(client, site_id, page_id, RenderFormat::Markdown).await {
            Ok(content) => content,
            Err(e) => {
                warn!(page_id = %page_id, error = %e, "page content fetch failed");
                ERROR_FETCHING_CONTENT.to_string()
            }
        };
        page_attrs.insert("content".into(), Value::String(content));
    }

    attrs.insert("pages".into(), collection_value(pages));
}

/// Aggregate a site's subsites across pages.
async fn fetch_all_subsites(client: &GraphClient, site_id: &str) -> Result<Collection> {
    let first = client
        .fetch_collection::<Site>(&format!("sites/{site_id}/sites"), &QueryOptions::default())
        .await?;
    aggregate(client, first, normalize).await
}

/// Aggregate a site's pages across pages of the collection.
async fn fetch_all_pages(client: &GraphClient, site_id: &str) -> Result<Collection> {
    let first = client
        .fetch_collection::<SitePage>(
            &format!("sites/{site_id}/pages/microsoft.graph.sitePage"),
            &QueryOptions::default(),
        )
        .await?;
    aggregate(client, first, normalize_page).await
}

/// Convert one site record into its attribute mapping.
pub(crate) fn normalize(site: &Site) -> Option<(String, Attributes)> {
    let id = site.id.clone()?;

    let mut attrs = Attributes::new();
    put(&mut attrs, "id", Some(&id));
    put(&mut attrs, "displayName", site.display_name.as_ref());
    put(&mut attrs, "webUrl", site.web_url.as_ref());
    put(&mut attrs, "description", site.description.as_ref());
    put(&mut attrs, "isPersonalSite", site.is_personal_site);
    put(&mut attrs, "siteCollection", site.site_collection.as_ref());
    put(&mut attrs, "sharepointIds", site.sharepoint_ids.as_ref());
    put(&mut attrs, "analytics", site.analytics.as_ref());
    put(&mut attrs, "error", site.error.as_ref());

    merge_additional(&mut attrs, &site.additional_data);

    Some((id, attrs))
}

/// Convert one site page record into its attribute mapping (content is
/// attached later during enrichment).
pub(crate) fn normalize_page(page: &SitePage) -> Option<(String, Attributes)> {
    let id = page.id.clone()?;

    let mut attrs = Attributes::new();
    put(&mut attrs, "id", Some(&id));
    put(&mut attrs, "title", page.title.as_ref());
    put(&mut attrs, "description", page.description.as_ref());
    put(&mut attrs, "pageLayout", page.page_layout.as_ref());
    put(&mut attrs, "publishingState", page.publishing_state.as_ref());

    merge_additional(&mut attrs, &page.additional_data);

    Some((id, attrs))
}

fn collection_value(collection: Collection) -> Value {
    Value::Object(
        collection
            .into_iter()
            .map(|(id, attrs)| (id, Value::Object(attrs)))
            .collect(),
    )
}
