//! Typed wire models for Graph resources.
//!
//! Every model keeps its known fields typed (`Option` marks absence) and
//! collects provider-supplied extras in a flattened `additional_data` map, so
//! downstream code does tagged lookups on `serde_json::Value` instead of
//! runtime casts.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use graphscout_shared::Attributes;

// ---------------------------------------------------------------------------
// Collection envelope
// ---------------------------------------------------------------------------

/// One page of a Graph collection response.
///
/// `next_link` is the opaque continuation token; absent or empty means no
/// more pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct CollectionPage<T> {
    /// Records on this page, in service order.
    #[serde(rename = "value", default)]
    pub records: Vec<T>,

    /// Continuation link for the next page, if any.
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Directory resources
// ---------------------------------------------------------------------------

/// A directory user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub user_principal_name: Option<String>,
    pub mail: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub job_title: Option<String>,
    pub mobile_phone: Option<String>,
    pub office_location: Option<String>,
    pub business_phones: Option<Vec<String>>,
    pub account_enabled: Option<bool>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub department: Option<String>,
    pub company_name: Option<String>,
    pub street_address: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
    pub preferred_language: Option<String>,
    pub employee_id: Option<String>,

    /// Provider-supplied extras (custom attributes, schema extensions).
    #[serde(flatten)]
    pub additional_data: Attributes,
}

/// A registered application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub app_id: Option<String>,
    pub publisher_domain: Option<String>,
    pub created_date_time: Option<DateTime<Utc>>,
    pub application_template_id: Option<String>,
    pub default_redirect_uri: Option<String>,
    pub description: Option<String>,
    pub disabled_by_microsoft_status: Option<String>,
    pub group_membership_claims: Option<String>,
    pub is_device_only_auth_supported: Option<bool>,
    pub is_fallback_public_client: Option<bool>,
    pub notes: Option<String>,
    pub oauth2_require_post_response: Option<bool>,
    pub saml_metadata_url: Option<String>,
    pub service_management_reference: Option<String>,
    pub sign_in_audience: Option<String>,
    pub tags: Option<Vec<String>>,
    pub token_encryption_key_id: Option<String>,
    pub unique_name: Option<String>,

    // Complex sub-objects are summarized, not copied (see the normalizer).
    pub api: Option<Value>,
    pub web: Option<Value>,
    pub spa: Option<Value>,
    pub certification: Option<Value>,
    pub info: Option<Value>,
    pub verified_publisher: Option<Value>,

    #[serde(flatten)]
    pub additional_data: Attributes,
}

// ---------------------------------------------------------------------------
// Sites and pages
// ---------------------------------------------------------------------------

/// A collaboration site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub web_url: Option<String>,
    pub description: Option<String>,
    pub is_personal_site: Option<bool>,
    pub site_collection: Option<Value>,
    pub sharepoint_ids: Option<Value>,
    pub analytics: Option<Value>,
    pub error: Option<Value>,

    #[serde(flatten)]
    pub additional_data: Attributes,
}

/// A site page, optionally carrying its expanded canvas layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePage {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub page_layout: Option<String>,
    pub publishing_state: Option<Value>,
    pub canvas_layout: Option<CanvasLayout>,

    #[serde(flatten)]
    pub additional_data: Attributes,
}

/// A page's canvas: zero-or-more horizontal sections plus an optional
/// vertical section. Order is significant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasLayout {
    pub horizontal_sections: Option<Vec<HorizontalSection>>,
    pub vertical_section: Option<VerticalSection>,
}

/// A horizontal section holding an ordered sequence of columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalSection {
    pub layout: Option<String>,
    pub columns: Option<Vec<SectionColumn>>,
}

/// A column holding an ordered sequence of web parts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionColumn {
    pub width: Option<i64>,
    pub webparts: Option<Vec<WebPart>>,
}

/// The single-column vertical section: web parts directly, no columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalSection {
    pub emphasis: Option<String>,
    pub webparts: Option<Vec<WebPart>>,
}

/// One content block on a page.
///
/// `inner_html` is the typed backing-store field; everything else a given
/// web-part kind exposes lands in `additional_data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPart {
    #[serde(rename = "@odata.type")]
    pub odata_type: Option<String>,
    pub id: Option<String>,
    pub inner_html: Option<String>,

    #[serde(flatten)]
    pub additional_data: Attributes,
}
