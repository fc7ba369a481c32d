use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::attendance::{AttendanceRecord, AttendanceResult},
};

// GET /api/attendance/today
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    tag = "Attendance",
    responses(
        (status = 200, description = "Situação de presença do turno corrente", body = AttendanceResult)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_today(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state.attendance_service.today(&user).await?;
    let message = result.message.clone();
    Ok(Json(ApiResponse::success_with_message(result, message)))
}

// POST /api/attendance/check-in
// Idempotente por turno: o primeiro check-in vence, os seguintes devolvem o
// registro existente com already_recorded = true.
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    tag = "Attendance",
    responses(
        (status = 200, description = "Check-in registrado ou já existente", body = AttendanceResult)
    ),
    security(("api_jwt" = []))
)]
pub async fn check_in(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state.attendance_service.record_check_in(&user).await?;
    let message = result.message.clone();
    Ok(Json(ApiResponse::success_with_message(result, message)))
}

// POST /api/attendance/check-out
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    tag = "Attendance",
    responses(
        (status = 200, description = "Check-out registrado", body = AttendanceRecord),
        (status = 400, description = "Sem check-in ou check-out já registrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_out(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let record = app_state.attendance_service.check_out(&user).await?;
    Ok(Json(ApiResponse::success_with_message(
        record,
        "Check-out registrado.",
    )))
}
