//! Per-resource operations over the Graph client: users, applications, and
//! sites (with subsite/page/content enrichment), plus the tool table the
//! transport boundary registers.

pub mod applications;
pub mod sites;
pub mod tools;
pub mod users;

use graphscout_shared::{Collection, GraphScoutError, Result};

pub use tools::{ToolKind, ToolSpec};

/// Serialize a collection as indented (2-space) JSON.
pub(crate) fn to_pretty_json(collection: &Collection) -> Result<String> {
    serde_json::to_string_pretty(collection).map_err(|e| GraphScoutError::Serialize(e.to_string()))
}
