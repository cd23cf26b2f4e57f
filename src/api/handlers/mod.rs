use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};

use crate::api::{AppState, SiteError};
use crate::models::*;
use crate::notify::ContactSubmission;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Static pages
// ============================================================

pub async fn home() -> Json<PageInfo> {
    Json(PageInfo {
        title: "Home".to_string(),
    })
}

pub async fn privacy() -> Json<PageInfo> {
    Json(PageInfo {
        title: "Privacy & Terms".to_string(),
    })
}

pub async fn resume() -> Json<PageInfo> {
    Json(PageInfo {
        title: "Resume".to_string(),
    })
}

pub async fn campaign() -> Json<PageInfo> {
    Json(PageInfo {
        title: "Campaign".to_string(),
    })
}

pub async fn campaign_shortlink() -> Redirect {
    Redirect::to("/campaign")
}

// ============================================================
// Portfolio
// ============================================================

pub async fn portfolio(State(state): State<AppState>) -> Result<Json<PortfolioPage>, SiteError> {
    let store = state.source.store()?;
    let entries = store
        .projects
        .iter()
        .enumerate()
        .map(|(i, entry)| EntrySummary::new(entry, i, state.resolver))
        .collect();
    Ok(Json(PortfolioPage { entries }))
}

pub async fn portfolio_detail(
    State(state): State<AppState>,
    Path(ident): Path<String>,
) -> Result<Json<EntryDetail>, SiteError> {
    let store = state.source.store()?;
    let entry = state
        .resolver
        .resolve(&store.projects, &ident)
        .ok_or(SiteError::EntryNotFound)?;
    Ok(Json(EntryDetail {
        slug: ident,
        entry: entry.clone(),
    }))
}

// ============================================================
// Academics / linktree
// ============================================================

pub async fn academics(State(state): State<AppState>) -> Result<Json<AcademicsPage>, SiteError> {
    let store = state.source.store()?;
    Ok(Json(AcademicsPage {
        classes: store.classes.clone(),
    }))
}

pub async fn linktree(State(state): State<AppState>) -> Result<Json<LinktreePage>, SiteError> {
    let store = state.source.store()?;
    Ok(Json(LinktreePage {
        links: store.links.clone(),
    }))
}

// ============================================================
// Contact form
// ============================================================

pub async fn join_campaign_form() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "title": "Join the Campaign",
        "fields": ["name", "email", "role", "phone", "message"],
    }))
}

pub async fn join_campaign(
    State(state): State<AppState>,
    Form(submission): Form<ContactSubmission>,
) -> Result<Json<CampaignReceipt>, SiteError> {
    if let Err(field) = submission.validate() {
        return Err(SiteError::InvalidSubmission(field));
    }

    let Some(mailer) = &state.mailer else {
        return Err(SiteError::DeliveryFailed(
            crate::notify::NotifyError::Unconfigured,
        ));
    };

    mailer
        .deliver("Join Campaign", &submission)
        .await
        .map_err(SiteError::DeliveryFailed)?;

    tracing::info!(name = %submission.name, "contact form delivered");
    Ok(Json(CampaignReceipt {
        message: format!(
            "We've received your information, {}! Thank you for joining the campaign. \
             We'll be in touch soon.",
            submission.name
        ),
    }))
}

// ============================================================
// Fallback
// ============================================================

pub async fn not_found() -> SiteError {
    SiteError::EntryNotFound
}
