use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, GetReviewQuery, SetIsActiveRequest, UserResponse,
    UserReviewsResponse,
};
use crate::api::validation::require_field;

pub async fn set_is_active(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetIsActiveRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_field(&payload.user_id, "user_id")?;

    let user = state
        .service()
        .set_user_active(&payload.user_id, payload.is_active)?;

    Ok(Json(ApiResponse::success(UserResponse { user: user.into() })))
}

pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetReviewQuery>,
) -> Result<Json<ApiResponse<UserReviewsResponse>>, ApiError> {
    require_field(&query.user_id, "user_id")?;

    let pull_requests = state
        .service()
        .user_reviews(&query.user_id)?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ApiResponse::success(UserReviewsResponse {
        user_id: query.user_id,
        pull_requests,
    })))
}
