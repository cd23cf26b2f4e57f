use serde::{Deserialize, Serialize};

/// A labeled URL, used both on the linktree page and inside entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkItem {
    pub label: String,
    pub url: String,
}
