use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::stats::{DailyStats, DashboardData},
};

// GET /api/stats/dashboard
// Resumo salarial do mês corrente + contadores do turno de hoje.
#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    tag = "Stats",
    responses(
        (status = 200, description = "Painel do agente", body = DashboardData)
    ),
    security(("api_jwt" = []))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state.salary_service.dashboard(&user).await?;
    Ok(Json(ApiResponse::success(data)))
}

// POST /api/stats/add-lead
// Incrementa o contador de leads do próprio agente na data do turno corrente.
#[utoipa::path(
    post,
    path = "/api/stats/add-lead",
    tag = "Stats",
    responses(
        (status = 200, description = "Contadores do dia após o incremento", body = DailyStats)
    ),
    security(("api_jwt" = []))
)]
pub async fn add_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.lead_service.add_lead_count(&user).await?;
    Ok(Json(ApiResponse::success_with_message(
        stats,
        "Lead contabilizado.",
    )))
}
