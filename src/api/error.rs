use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::content::ContentError;
use crate::notify::NotifyError;

/// Everything a handler can fail with, normalized at the response boundary.
///
/// Full errors are logged server-side; clients get a fixed message per kind
/// so nothing internal leaks. The diagnostic chain is attached only for
/// 500-class responses and only in debug builds.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("content source missing")]
    SourceMissing(#[source] ContentError),

    #[error("content source malformed")]
    SourceMalformed(#[source] ContentError),

    #[error("entry not found")]
    EntryNotFound,

    #[error("mail delivery failed")]
    DeliveryFailed(#[source] NotifyError),

    #[error("submission missing required field '{0}'")]
    InvalidSubmission(&'static str),

    #[error("internal error")]
    Unhandled(#[from] anyhow::Error),
}

impl From<ContentError> for SiteError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::SourceMissing { .. } => Self::SourceMissing(err),
            ContentError::SourceMalformed { .. } => Self::SourceMalformed(err),
            ContentError::Io { .. } => Self::Unhandled(err.into()),
        }
    }
}

/// The uniform error payload every non-2xx response carries.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SiteError {
    fn status(&self) -> StatusCode {
        match self {
            Self::EntryNotFound => StatusCode::NOT_FOUND,
            Self::InvalidSubmission(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::DeliveryFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::SourceMissing(_) | Self::SourceMalformed(_) | Self::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::SourceMissing(_) => "source_missing",
            Self::SourceMalformed(_) => "source_malformed",
            Self::EntryNotFound => "entry_not_found",
            Self::DeliveryFailed(_) => "delivery_failed",
            Self::InvalidSubmission(_) => "invalid_submission",
            Self::Unhandled(_) => "unhandled",
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::EntryNotFound => {
                "The page you're looking for has vanished into a black hole.".to_string()
            }
            Self::DeliveryFailed(_) => {
                "We couldn't deliver your message just now. Please try again in a few minutes."
                    .to_string()
            }
            Self::InvalidSubmission(field) => {
                format!("Please fill in the '{field}' field and resubmit.")
            }
            Self::SourceMissing(_) | Self::SourceMalformed(_) | Self::Unhandled(_) => {
                "Our server encountered a glitch in the simulation.".to_string()
            }
        }
    }

    /// The `source()` chain, for the debug-only `detail` field.
    fn chain(&self) -> String {
        use std::error::Error;
        let mut out = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.chain(), "request failed");
        } else {
            tracing::warn!(error = %self.chain(), "request rejected");
        }

        let detail = (status == StatusCode::INTERNAL_SERVER_ERROR && cfg!(debug_assertions))
            .then(|| self.chain());

        let body = ErrorBody {
            status: status.as_u16(),
            error: self.kind(),
            message: self.user_message(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}
