use serde::{Deserialize, Serialize};

use super::{Course, Entry, LinkItem};
use crate::content::ResolveStrategy;

/// A portfolio entry as shown on the listing page: the entry's display
/// fields plus the identifier the detail route will accept for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
}

impl EntrySummary {
    pub fn new(entry: &Entry, index: usize, strategy: ResolveStrategy) -> Self {
        Self {
            slug: strategy.identifier(entry, index),
            title: entry.title.clone(),
            role: entry.role.clone(),
            dates: entry.dates.clone(),
        }
    }
}

/// The portfolio listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioPage {
    pub entries: Vec<EntrySummary>,
}

/// A full entry with its derived identifier, used for detail responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDetail {
    pub slug: String,
    #[serde(flatten)]
    pub entry: Entry,
}

/// The academics page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicsPage {
    pub classes: Vec<Course>,
}

/// The linktree page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinktreePage {
    pub links: Vec<LinkItem>,
}

/// A static page that only carries a title (home, privacy, resume).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
}

/// Confirmation returned after a successful contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReceipt {
    pub message: String,
}
