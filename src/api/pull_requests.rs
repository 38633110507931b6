use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use tracing::info;

use super::{
    ApiError, ApiResponse, AppState, CreatePrRequest, MergePrRequest, PullRequestResponse,
    ReassignRequest, ReassignResponse,
};
use crate::api::validation::require_field;

pub async fn create_pull_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePrRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PullRequestResponse>>), ApiError> {
    require_field(&payload.pull_request_id, "pull_request_id")?;
    require_field(&payload.pull_request_name, "pull_request_name")?;
    require_field(&payload.author_id, "author_id")?;

    let pr = state.service().create_pull_request(
        &payload.pull_request_id,
        &payload.pull_request_name,
        &payload.author_id,
    )?;

    info!(
        pr_id = %pr.id,
        reviewers = pr.assigned_reviewers.len(),
        "pull request created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PullRequestResponse { pr: pr.into() })),
    ))
}

pub async fn merge_pull_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MergePrRequest>,
) -> Result<Json<ApiResponse<PullRequestResponse>>, ApiError> {
    require_field(&payload.pull_request_id, "pull_request_id")?;

    let pr = state.service().merge_pull_request(&payload.pull_request_id)?;

    Ok(Json(ApiResponse::success(PullRequestResponse {
        pr: pr.into(),
    })))
}

pub async fn reassign_reviewer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReassignRequest>,
) -> Result<Json<ApiResponse<ReassignResponse>>, ApiError> {
    require_field(&payload.pull_request_id, "pull_request_id")?;
    require_field(&payload.old_user_id, "old_user_id")?;

    let (pr, replaced_by) = state
        .service()
        .reassign_reviewer(&payload.pull_request_id, &payload.old_user_id)?;

    info!(
        pr_id = %pr.id,
        old = %payload.old_user_id,
        new = %replaced_by,
        "reviewer reassigned"
    );

    Ok(Json(ApiResponse::success(ReassignResponse {
        pr: pr.into(),
        replaced_by,
    })))
}
