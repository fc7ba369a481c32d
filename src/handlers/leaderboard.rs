use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::leaderboard::{LeaderboardEntry, LeaderboardQuery},
};

// GET /api/leaderboard?period=daily|monthly
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "Leaderboard",
    params(("period" = Option<String>, Query, description = "daily (padrão) ou monthly")),
    responses(
        (status = 200, description = "Ranking de agentes no período", body = Vec<LeaderboardEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn ranking(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.leaderboard_service.ranking(query.period).await?;
    Ok(Json(ApiResponse::success(entries)))
}
