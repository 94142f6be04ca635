//! Core domain types shared across graphscout crates.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Attribute mapping for a single resource.
///
/// Values are `serde_json::Value` — the String/Number/Bool/Mapping sum type;
/// absence is modeled by the key not being present. By construction no
/// attribute map ever holds a `Value::Null` (see [`put`]).
pub type Attributes = serde_json::Map<String, Value>;

/// An identifier-keyed collection of resources, built incrementally across
/// one or more pages of a remote collection. Keyed deterministically so
/// serialized output is stable.
pub type Collection = BTreeMap<String, Attributes>;

/// Insert an optional attribute, skipping absent and null values.
///
/// This is the single place the "no nulls in attribute maps" invariant is
/// enforced: typed fields and additional data both go through it or through
/// [`merge_additional`].
pub fn put<T: Serialize>(attrs: &mut Attributes, key: &str, value: Option<T>) {
    if let Some(v) = value {
        if let Ok(json) = serde_json::to_value(v) {
            if !json.is_null() {
                attrs.insert(key.to_string(), json);
            }
        }
    }
}

/// Merge provider-supplied additional data into an attribute map.
///
/// Applied after all typed fields so arbitrary additional fields overwrite
/// same-named typed keys (later-wins). Null values are dropped.
pub fn merge_additional(attrs: &mut Attributes, additional: &Attributes) {
    for (key, value) in additional {
        if !value.is_null() {
            attrs.insert(key.clone(), value.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// RenderFormat
// ---------------------------------------------------------------------------

/// Target format for rendered page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Markdown output (the primary format).
    #[default]
    Markdown,
    /// Plain-text output with labeled lines.
    Plain,
}

impl RenderFormat {
    /// True when the format is Markdown.
    pub fn is_markdown(self) -> bool {
        matches!(self, Self::Markdown)
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "plain" | "text" => Ok(Self::Plain),
            other => Err(format!("unknown format '{other}' (markdown or plain)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_skips_absent_and_null() {
        let mut attrs = Attributes::new();
        put(&mut attrs, "present", Some("value"));
        put(&mut attrs, "absent", None::<&str>);
        put(&mut attrs, "null", Some(Value::Null));

        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["present"], json!("value"));
    }

    #[test]
    fn merge_additional_overwrites_typed_fields() {
        let mut attrs = Attributes::new();
        put(&mut attrs, "displayName", Some("Typed Name"));
        put(&mut attrs, "id", Some("abc"));

        let mut additional = Attributes::new();
        additional.insert("displayName".into(), json!("Provider Name"));
        additional.insert("custom".into(), json!(42));
        additional.insert("dropped".into(), Value::Null);

        merge_additional(&mut attrs, &additional);

        assert_eq!(attrs["displayName"], json!("Provider Name"));
        assert_eq!(attrs["custom"], json!(42));
        assert_eq!(attrs["id"], json!("abc"));
        assert!(!attrs.contains_key("dropped"));
    }

    #[test]
    fn render_format_parses() {
        assert_eq!("markdown".parse::<RenderFormat>(), Ok(RenderFormat::Markdown));
        assert_eq!("plain".parse::<RenderFormat>(), Ok(RenderFormat::Plain));
        assert_eq!("text".parse::<RenderFormat>(), Ok(RenderFormat::Plain));
        assert!("html".parse::<RenderFormat>().is_err());
    }
}
