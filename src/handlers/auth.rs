use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{LoginData, LoginPayload, User},
};

// POST /api/auth/login
// Além do token, o login dispara o check-in do turno como efeito colateral:
// o primeiro login do turno cria o registro de presença, os seguintes só
// releem o existente.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token emitido + presença do turno", body = LoginData),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;

    let attendance = app_state.attendance_service.record_check_in(&user).await?;
    let message = attendance.message.clone();
    let attendance = if attendance.record.is_some() {
        Some(attendance)
    } else {
        None
    };

    tracing::info!("Login de {} (ramal {})", user.username, user.extension);

    Ok(Json(ApiResponse::success_with_message(
        LoginData {
            token,
            user,
            attendance,
        },
        message,
    )))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Usuário autenticado", body = User),
        (status = 401, description = "Token inválido ou ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(ApiResponse::success(user)))
}
