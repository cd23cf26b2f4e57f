mod error;
mod handlers;

pub use error::{ErrorBody, SiteError};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::content::{ContentSource, ResolveStrategy};
use crate::notify::Mailer;

/// Everything the handlers need, injected instead of read from globals:
/// the content handle (which fixes the reload policy), the identifier
/// strategy the site resolves entries with, and the outbound mailer.
#[derive(Clone)]
pub struct AppState {
    pub source: ContentSource,
    pub resolver: ResolveStrategy,
    pub mailer: Option<Mailer>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::home))
        .route("/privacy", get(handlers::privacy))
        .route("/resume", get(handlers::resume))
        // Portfolio, with /projects as an alias
        .route("/portfolio", get(handlers::portfolio))
        .route("/portfolio/{ident}", get(handlers::portfolio_detail))
        .route("/projects", get(handlers::portfolio))
        .route("/projects/{ident}", get(handlers::portfolio_detail))
        // Academics / links
        .route("/academics", get(handlers::academics))
        .route("/linktree", get(handlers::linktree))
        // Campaign + contact form
        .route("/campaign", get(handlers::campaign))
        .route("/c", get(handlers::campaign_shortlink))
        .route("/campaign/join", get(handlers::join_campaign_form))
        .route("/campaign/join", post(handlers::join_campaign))
        // Health
        .route("/health", get(handlers::health))
        // Anything else is a uniform 404 payload
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
