//! Application registration operations.

use chrono::SecondsFormat;

use graphscout_client::{Application, GraphClient, QueryOptions, aggregate};
use graphscout_shared::{Attributes, Result, merge_additional, put};

use crate::to_pretty_json;

/// Fetch all applications (optionally filtered), following pagination, and
/// return the identifier-keyed result as indented JSON.
pub async fn get(client: &GraphClient, query: &QueryOptions) -> Result<String> {
    let first = client
        .fetch_collection::<Application>("applications", query)
        .await?;
    let collection = aggregate(client, first, normalize).await?;
    to_pretty_json(&collection)
}

/// Convert one application record into its attribute mapping.
///
/// Complex sub-objects (api, web, spa, ...) are summarized as presence
/// markers rather than copied wholesale; additional data merges last.
pub(crate) fn normalize(app: &Application) -> Option<(String, Attributes)> {
    let id = app.id.clone()?;

    let mut attrs = Attributes::new();
    put(&mut attrs, "id", Some(&id));
    put(&mut attrs, "displayName", app.display_name.as_ref());
    put(&mut attrs, "appId", app.app_id.as_ref());
    put(&mut attrs, "publisherDomain", app.publisher_domain.as_ref());
    put(
        &mut attrs,
        "createdDateTime",
        app.created_date_time
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    put(
        &mut attrs,
        "applicationTemplateId",
        app.application_template_id.as_ref(),
    );
    put(&mut attrs, "defaultRedirectUri", app.default_redirect_uri.as_ref());
    put(&mut attrs, "description", app.description.as_ref());
    put(
        &mut attrs,
        "disabledByMicrosoftStatus",
        app.disabled_by_microsoft_status.as_ref(),
    );
    put(
        &mut attrs,
        "groupMembershipClaims",
        app.group_membership_claims.as_ref(),
    );
    put(
        &mut attrs,
        "isDeviceOnlyAuthSupported",
        app.is_device_only_auth_supported,
    );
    put(
        &mut attrs,
        "isFallbackPublicClient",
        app.is_fallback_public_client,
    );
    put(&mut attrs, "notes", app.notes.as_ref());
    put(
        &mut attrs,
        "oauth2RequirePostResponse",
        app.oauth2_require_post_response,
    );
    put(&mut attrs, "samlMetadataUrl", app.saml_metadata_url.as_ref());
    put(
        &mut attrs,
        "serviceManagementReference",
        app.service_management_reference.as_ref(),
    );
    put(&mut attrs, "signInAudience", app.sign_in_audience.as_ref());
    put(&mut attrs, "tags", app.tags.as_ref());
    put(
        &mut attrs,
        "tokenEncryptionKeyId",
        app.token_encryption_key_id.as_ref(),
    );
    put(&mut attrs, "uniqueName", app.unique_name.as_ref());

    // Presence markers for the heavyweight sub-objects.
    put(&mut attrs, "api", app.api.as_ref().map(|_| "ApiApplication present"));
    put(&mut attrs, "web", app.web.as_ref().map(|_| "WebApplication present"));
    put(&mut attrs, "spa", app.spa.as_ref().map(|_| "SpaApplication present"));
    put(
        &mut attrs,
        "certification",
        app.certification.as_ref().map(|_| "Certification present"),
    );
    put(
        &mut attrs,
        "info",
        app.info.as_ref().map(|_| "InformationalUrl present"),
    );
    put(
        &mut attrs,
        "verifiedPublisher",
        app.verified_publisher.as_ref().map(|_| "VerifiedPublisher present"),
    );

    merge_additional(&mut attrs, &app.additional_data);

    Some((id, attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app_from(value: serde_json::Value) -> Application {
        serde_json::from_value(value).expect("application fixture")
    }

    #[test]
    fn created_date_formatted_rfc3339() {
        let app = app_from(json!({
            "id": "a1",
            "createdDateTime": "2023-06-01T12:30:45Z"
        }));
        let (_, attrs) = normalize(&app).expect("normalized");
        assert_eq!(attrs["createdDateTime"], json!("2023-06-01T12:30:45Z"));
    }

    #[test]
    fn complex_objects_become_presence_markers() {
        let app = app_from(json!({
            "id": "a1",
            "web": {"redirectUris": ["https://example.com/cb"]},
            "api": {"requestedAccessTokenVersion": 2}
        }));
        let (_, attrs) = normalize(&app).expect("normalized");
        assert_eq!(attrs["web"], json!("WebApplication present"));
        assert_eq!(attrs["api"], json!("ApiApplication present"));
        assert!(!attrs.contains_key("spa"));
    }

    #[test]
    fn tags_copied_as_array() {
        let app = app_from(json!({
            "id": "a1",
            "tags": ["hr", "internal"]
        }));
        let (_, attrs) = normalize(&app).expect("normalized");
        assert_eq!(attrs["tags"], json!(["hr", "internal"]));
    }

    #[test]
    fn record_without_id_dropped() {
        let app = app_from(json!({"displayName": "Orphan"}));
        assert!(normalize(&app).is_none());
    }
}
