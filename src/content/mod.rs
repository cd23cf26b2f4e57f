//! The content resolution layer: loading the site's JSON file and turning
//! request-path identifiers back into entries.

mod loader;
mod resolve;
mod slug;

pub use loader::{load_store, ContentError, LoadPolicy};
pub use resolve::ResolveStrategy;
pub use slug::title_to_slug;

use std::path::PathBuf;
use std::sync::Arc;

use crate::models::ContentStore;

/// An explicitly owned handle to the site's content, injected into handlers
/// via router state.
///
/// The reload policy is fixed at construction: [`ContentSource::cached`]
/// reads the file once and every request shares the same `Arc` (read-only
/// after load, so no locking), while [`ContentSource::on_demand`] re-reads
/// the file per request and picks up edits without a restart.
#[derive(Clone)]
pub struct ContentSource {
    path: Arc<PathBuf>,
    policy: LoadPolicy,
    cached: Option<Arc<ContentStore>>,
}

impl ContentSource {
    /// A source that re-reads the content file on every request.
    pub fn on_demand(path: impl Into<PathBuf>, policy: LoadPolicy) -> Self {
        Self {
            path: Arc::new(path.into()),
            policy,
            cached: None,
        }
    }

    /// A source that loads once, now. Under the strict policy a missing or
    /// malformed file fails here, at startup, rather than on first request.
    pub fn cached(path: impl Into<PathBuf>, policy: LoadPolicy) -> Result<Self, ContentError> {
        let path = Arc::new(path.into());
        let store = load_store(&path, policy)?;
        Ok(Self {
            path,
            policy,
            cached: Some(Arc::new(store)),
        })
    }

    /// The current store: the startup snapshot for cached sources, a fresh
    /// read otherwise.
    pub fn store(&self) -> Result<Arc<ContentStore>, ContentError> {
        match &self.cached {
            Some(store) => Ok(Arc::clone(store)),
            None => load_store(&self.path, self.policy).map(Arc::new),
        }
    }
}
