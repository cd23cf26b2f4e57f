use serde::{Deserialize, Serialize};

use super::{Course, Entry, LinkItem};

/// The in-memory parsed form of a site's JSON content file.
///
/// This is the one canonical document shape. Earlier site variants used
/// three incompatible shapes (`{"entries": [...]}`, a bare id→entry mapping,
/// and `{"projects": {...}, "classes": [...]}`); migrating means renaming the
/// list key to `projects` and lifting mapping keys into each entry's `id`.
///
/// The store is created at load time and discarded when the request (or the
/// process, for cached deployments) ends. Nothing ever writes it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStore {
    #[serde(default)]
    pub projects: Vec<Entry>,
    #[serde(default)]
    pub classes: Vec<Course>,
    #[serde(default)]
    pub links: Vec<LinkItem>,
}

impl ContentStore {
    /// The documented empty default returned under the lenient load policy.
    pub fn empty() -> Self {
        Self::default()
    }
}
