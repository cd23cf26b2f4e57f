use serde::{Deserialize, Serialize};

use super::LinkItem;

/// One portfolio item (a project, a position, a piece of work).
///
/// Only `title` is required. Several source sites never assigned entries a
/// unique id, which is why lookup works on identifiers *derived* from the
/// entry (its position, its stored `id`, or a slug of its title) rather than
/// on a mandatory key field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Stored key, used by the `key` resolver strategy. Sites migrated from
    /// a dict-shaped data file carry the old mapping key here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkItem>,
}
