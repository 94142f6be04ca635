//! Tool surface for the boundary layer.
//!
//! Each resource kind is one tool. The table is a plain value and the client
//! handle is passed into every invocation — no process-wide registry, so the
//! transport layer composes these however it likes.

use graphscout_client::{GraphClient, QueryOptions};
use graphscout_shared::Result;

use crate::{applications, sites, users};

/// The resource-kind tools graphscout exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Users,
    Applications,
    Sites,
}

/// Static description of one tool, for registration by the transport layer.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Description of the single optional `name` argument.
    pub name_arg: &'static str,
}

impl ToolKind {
    /// Every available tool, in registration order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Users, ToolKind::Applications, ToolKind::Sites];

    /// Registration metadata for this tool.
    pub fn spec(self) -> ToolSpec {
        match self {
            ToolKind::Users => ToolSpec {
                name: "users",
                description: "Interact with the Graph API for user operations",
                name_arg: "The name of the user. If not provided, all users will be returned.",
            },
            ToolKind::Applications => ToolSpec {
                name: "applications",
                description: "Interact with the Graph API for application operations",
                name_arg:
                    "The name of the application. If not provided, all applications will be returned.",
            },
            ToolKind::Sites => ToolSpec {
                name: "sites",
                description: "Interact with the Graph API for site, subsites and pages operations",
                name_arg: "The name of the site",
            },
        }
    }

    /// Look a tool up by its registered name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.spec().name == name)
    }

    /// Run this tool against the given client, optionally filtering by name.
    /// Returns the identifier-keyed result as indented JSON.
    pub async fn run(self, client: &GraphClient, name: Option<&str>) -> Result<String> {
        let query = self.query_for(name);
        match self {
            ToolKind::Users => users::get(client, &query).await,
            ToolKind::Applications => applications::get(client, &query).await,
            ToolKind::Sites => sites::get(client, &query).await,
        }
    }

    /// Build the query options for a tool invocation. Users filter on given
    /// name, the rest on display name; an unfiltered site fetch projects the
    /// default site properties.
    fn query_for(self, name: Option<&str>) -> QueryOptions {
        match (self, name) {
            (ToolKind::Users, Some(name)) => {
                QueryOptions::filtered(format!("givenName eq '{name}'"))
            }
            (ToolKind::Applications, Some(name)) | (ToolKind::Sites, Some(name)) => {
                QueryOptions::filtered(format!("displayName eq '{name}'"))
            }
            (ToolKind::Sites, None) => QueryOptions::default().with_select(sites::SITE_SELECT),
            _ => QueryOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn names_resolve_to_tools() {
        assert_eq!(ToolKind::by_name("users"), Some(ToolKind::Users));
        assert_eq!(ToolKind::by_name("sites"), Some(ToolKind::Sites));
        assert_eq!(ToolKind::by_name("mailboxes"), None);
    }

    #[test]
    fn user_filter_uses_given_name() {
        let query = ToolKind::Users.query_for(Some("Ann"));
        assert_eq!(query.filter.as_deref(), Some("givenName eq 'Ann'"));
    }

    #[test]
    fn unfiltered_sites_select_default_properties() {
        let query = ToolKind::Sites.query_for(None);
        assert!(query.filter.is_none());
        assert_eq!(query.select.as_deref(), Some(sites::SITE_SELECT));
    }

    #[tokio::test]
    async fn users_tool_runs_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("$filter", "givenName eq 'Ann'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{"id": "u1", "displayName": "Ann Example"}]
            })))
            .mount(&server)
            .await;

        let client = GraphClient::with_token(&server.uri(), "t").unwrap();
        let output = ToolKind::Users.run(&client, Some("Ann")).await.unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["u1"]["displayName"], json!("Ann Example"));
        // Indented serialization for the tool consumer.
        assert!(output.contains("\n  "));
    }
}
