use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, GetTeamQuery, TeamDto, TeamResponse};
use crate::api::validation::require_field;
use crate::models::User;

pub async fn add_team(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TeamDto>,
) -> Result<(StatusCode, Json<ApiResponse<TeamResponse>>), ApiError> {
    require_field(&payload.team_name, "team_name")?;

    let members: Vec<User> = payload
        .members
        .into_iter()
        .map(|m| User {
            id: m.user_id,
            username: m.username,
            team_name: payload.team_name.clone(),
            is_active: m.is_active,
        })
        .collect();

    let team = state.service().create_team(&payload.team_name, members)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TeamResponse { team: team.into() })),
    ))
}

pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetTeamQuery>,
) -> Result<Json<ApiResponse<TeamDto>>, ApiError> {
    require_field(&query.team_name, "team_name")?;

    let team = state.service().get_team(&query.team_name)?;

    Ok(Json(ApiResponse::success(team.into())))
}
