//! HTTP client for the Graph service.
//!
//! Acquires a client-credentials token, then issues bearer-authenticated GET
//! requests. No retries and no internal timeouts beyond the overall request
//! timeout: a fetch failure surfaces immediately, and cancellation is
//! whatever the caller does with the future.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use graphscout_shared::{GraphConfig, GraphScoutError, Result};

use crate::models::{CollectionPage, SitePage};

/// User-Agent string for Graph requests.
const USER_AGENT: &str = concat!("graphscout/", env!("CARGO_PKG_VERSION"));

/// Token scope for the Graph API.
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

// ---------------------------------------------------------------------------
// Query options
// ---------------------------------------------------------------------------

/// OData query options for a collection fetch.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// `$filter` expression, e.g. `displayName eq 'Marketing'`.
    pub filter: Option<String>,
    /// `$select` projection, e.g. `id,displayName,webUrl`.
    pub select: Option<String>,
}

impl QueryOptions {
    /// Options with a `$filter` expression.
    pub fn filtered(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            select: None,
        }
    }

    /// Add a `$select` projection.
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }
}

// ---------------------------------------------------------------------------
// GraphClient
// ---------------------------------------------------------------------------

/// Authenticated client for one Graph tenant.
pub struct GraphClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl GraphClient {
    /// Build the client and acquire an access token with the client
    /// credentials flow.
    #[instrument(skip_all, fields(tenant = %config.tenant_id))]
    pub async fn connect(config: &GraphConfig, client_secret: &str) -> Result<Self> {
        let http = build_http()?;
        let token = request_token(&http, config, client_secret).await?;
        Self::assemble(http, &config.base_url, token)
    }

    /// Build a client around an existing token. Used by tests to point at a
    /// mock server without a token exchange.
    pub fn with_token(base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        Self::assemble(build_http()?, base_url, access_token.into())
    }

    fn assemble(http: Client, base_url: &str, access_token: String) -> Result<Self> {
        // A trailing slash keeps Url::join from clobbering the version path.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| GraphScoutError::config(format!("invalid base URL {base_url}: {e}")))?;

        Ok(Self {
            http,
            base_url,
            access_token,
        })
    }

    /// Fetch the first page of a resource collection.
    ///
    /// `resource` is the collection path relative to the API base, e.g.
    /// `users` or `sites/{id}/pages/microsoft.graph.sitePage`.
    #[instrument(skip(self))]
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &QueryOptions,
    ) -> Result<CollectionPage<T>> {
        let mut url = self.resource_url(resource)?;
        if query.filter.is_some() || query.select.is_some() {
            let mut pairs = url.query_pairs_mut();
            if let Some(filter) = &query.filter {
                pairs.append_pair("$filter", filter);
            }
            if let Some(select) = &query.select {
                pairs.append_pair("$select", select);
            }
        }
        self.get_json(url).await
    }

    /// Fetch the page behind a continuation link returned by a previous
    /// collection fetch. Continuation links are absolute and already carry
    /// their query state.
    #[instrument(skip(self, next_link))]
    pub async fn fetch_next_page<T: DeserializeOwned>(
        &self,
        next_link: &str,
    ) -> Result<CollectionPage<T>> {
        let url = Url::parse(next_link).map_err(|e| {
            GraphScoutError::decode(format!("invalid continuation link {next_link}: {e}"))
        })?;
        self.get_json(url).await
    }

    /// Fetch one site page with its canvas layout expanded (single request).
    #[instrument(skip(self))]
    pub async fn fetch_page_with_layout(
        &self,
        site_id: &str,
        page_id: &str,
    ) -> Result<SitePage> {
        let mut url = self.resource_url(&format!(
            "sites/{site_id}/pages/{page_id}/microsoft.graph.sitePage"
        ))?;
        url.query_pairs_mut().append_pair("$expand", "canvasLayout");
        self.get_json(url).await
    }

    fn resource_url(&self, resource: &str) -> Result<Url> {
        self.base_url
            .join(resource)
            .map_err(|e| GraphScoutError::config(format!("invalid resource path {resource}: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| GraphScoutError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GraphScoutError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GraphScoutError::decode(format!("{url}: {e}")))
    }
}

fn build_http() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| GraphScoutError::Network(format!("failed to build HTTP client: {e}")))
}

// ---------------------------------------------------------------------------
// Token acquisition
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

async fn request_token(
    http: &Client,
    config: &GraphConfig,
    client_secret: &str,
) -> Result<String> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        config.authority.trim_end_matches('/'),
        config.tenant_id
    );

    let params = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", client_secret),
        ("scope", GRAPH_SCOPE),
        ("grant_type", "client_credentials"),
    ];

    let response = http
        .post(&url)
        .form(&params)
        .send()
        .await
        .map_err(|e| GraphScoutError::Auth(format!("token request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GraphScoutError::Auth(format!(
            "token endpoint returned HTTP {status}"
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| GraphScoutError::Auth(format!("malformed token response: {e}")))?;

    debug!("access token acquired");
    Ok(token.access_token)
}
