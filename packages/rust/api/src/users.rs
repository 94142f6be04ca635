//! User directory operations.

use graphscout_client::{GraphClient, QueryOptions, User, aggregate};
use graphscout_shared::{Attributes, Result, merge_additional, put};

use crate::to_pretty_json;

/// Fetch all users (optionally filtered), following pagination, and return
/// the identifier-keyed result as indented JSON.
pub async fn get(client: &GraphClient, query: &QueryOptions) -> Result<String> {
    let first = client.fetch_collection::<User>("users", query).await?;
    let collection = aggregate(client, first, normalize).await?;
    to_pretty_json(&collection)
}

/// Convert one user record into its attribute mapping.
///
/// Typed fields are written first; additional data is merged last so
/// provider-supplied fields win on key collisions. Records without an
/// identifier are dropped.
pub(crate) fn normalize(user: &User) -> Option<(String, Attributes)> {
    let id = user.id.clone()?;

    let mut attrs = Attributes::new();
    put(&mut attrs, "id", Some(&id));
    put(&mut attrs, "displayName", user.display_name.as_ref());
    put(&mut attrs, "userPrincipalName", user.user_principal_name.as_ref());
    put(&mut attrs, "mail", user.mail.as_ref());
    put(&mut attrs, "givenName", user.given_name.as_ref());
    put(&mut attrs, "surname", user.surname.as_ref());
    put(&mut attrs, "jobTitle", user.job_title.as_ref());
    put(&mut attrs, "mobilePhone", user.mobile_phone.as_ref());
    put(&mut attrs, "officeLocation", user.office_location.as_ref());
    put(&mut attrs, "businessPhones", user.business_phones.as_ref());
    put(&mut attrs, "accountEnabled", user.account_enabled);
    put(&mut attrs, "city", user.city.as_ref());
    put(&mut attrs, "country", user.country.as_ref());
    put(&mut attrs, "department", user.department.as_ref());
    put(&mut attrs, "companyName", user.company_name.as_ref());
    put(&mut attrs, "streetAddress", user.street_address.as_ref());
    put(&mut attrs, "postalCode", user.postal_code.as_ref());
    put(&mut attrs, "state", user.state.as_ref());
    put(&mut attrs, "preferredLanguage", user.preferred_language.as_ref());
    put(&mut attrs, "employeeId", user.employee_id.as_ref());

    merge_additional(&mut attrs, &user.additional_data);

    Some((id, attrs))
}
