use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::ReviewError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    TeamExists(String),

    PrExists(String),

    PrMerged(String),

    NotAssigned(String),

    NoCandidate(String),

    ValidationError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::TeamExists(msg) => write!(f, "Team exists: {msg}"),
            Self::PrExists(msg) => write!(f, "PR exists: {msg}"),
            Self::PrMerged(msg) => write!(f, "PR merged: {msg}"),
            Self::NotAssigned(msg) => write!(f, "Not assigned: {msg}"),
            Self::NoCandidate(msg) => write!(f, "No candidate: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Stable machine-readable code carried in every error body.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::TeamExists(_) => "TEAM_EXISTS",
            Self::PrExists(_) => "PR_EXISTS",
            Self::PrMerged(_) => "PR_MERGED",
            Self::NotAssigned(_) => "NOT_ASSIGNED",
            Self::NoCandidate(_) => "NO_CANDIDATE",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Duplicate team names surface as a plain bad request, id
            // collisions on PRs as a conflict.
            Self::TeamExists(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::PrExists(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::PrMerged(msg) | Self::NotAssigned(msg) | Self::NoCandidate(msg) => {
                (StatusCode::CONFLICT, msg.clone())
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(self.code(), message);
        (status, Json(body)).into_response()
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound => Self::NotFound("resource not found".to_string()),
            ReviewError::TeamExists => Self::TeamExists("team_name already exists".to_string()),
            ReviewError::PrExists => Self::PrExists("pull_request_id already exists".to_string()),
            ReviewError::PrMerged => {
                Self::PrMerged("pull request is already merged".to_string())
            }
            ReviewError::NotAssigned => {
                Self::NotAssigned("reviewer is not assigned to this pull request".to_string())
            }
            ReviewError::NoCandidate => {
                Self::NoCandidate("no active replacement candidate in team".to_string())
            }
        }
    }
}
