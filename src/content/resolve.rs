use crate::models::Entry;

use super::title_to_slug;

/// How a request-path identifier maps to an entry.
///
/// The source sites used all three of these; a deployment picks one and the
/// listing page derives identifiers with the same strategy the detail route
/// resolves with, so identify→resolve always round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// The identifier is the entry's position in the list.
    Index,
    /// The identifier is the entry's stored `id` field. Entries without one
    /// fall back to the title slug.
    StoredKey,
    /// The identifier is a slug derived from the entry's title.
    TitleSlug,
}

impl ResolveStrategy {
    /// The identifier the detail route will accept for this entry.
    pub fn identifier(&self, entry: &Entry, index: usize) -> String {
        match self {
            Self::Index => index.to_string(),
            Self::StoredKey => entry
                .id
                .clone()
                .unwrap_or_else(|| title_to_slug(&entry.title)),
            Self::TitleSlug => title_to_slug(&entry.title),
        }
    }

    /// Locate the entry the identifier names, or `None`.
    ///
    /// Non-index strategies scan linearly and the first match wins; since
    /// slugging is not injective, colliding titles all resolve to the
    /// earliest entry in document order. An unparsable or out-of-range index
    /// is `None`, not an error.
    pub fn resolve<'a>(&self, entries: &'a [Entry], ident: &str) -> Option<&'a Entry> {
        match self {
            Self::Index => ident.parse::<usize>().ok().and_then(|i| entries.get(i)),
            _ => entries
                .iter()
                .enumerate()
                .find(|&(i, entry)| self.identifier(entry, i) == ident)
                .map(|(_, entry)| entry),
        }
    }
}

impl std::str::FromStr for ResolveStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "key" => Ok(Self::StoredKey),
            "slug" => Ok(Self::TitleSlug),
            other => Err(format!(
                "unknown resolver strategy '{other}' (expected 'index', 'key', or 'slug')"
            )),
        }
    }
}
