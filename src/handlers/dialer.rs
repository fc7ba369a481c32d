use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::leads::{DialPayload, Lead, NextLeadData},
};

// GET /api/dialer/next
// Próximo lead pendente do agente + prévia da fila. Fila vazia responde
// sucesso com "lista concluída", não erro.
#[utoipa::path(
    get,
    path = "/api/dialer/next",
    tag = "Dialer",
    responses(
        (status = 200, description = "Próximo lead da fila", body = NextLeadData)
    ),
    security(("api_jwt" = []))
)]
pub async fn next_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state.lead_service.next_lead(&user).await?;
    let message = if data.lead.is_none() {
        "Lista concluída: nenhum lead pendente."
    } else {
        "Próximo lead da fila."
    };
    Ok(Json(ApiResponse::success_with_message(data, message)))
}

// POST /api/dialer/call
// Aciona o discador externo e marca o lead como 'called'. A falha do gatilho
// de telefonia é logada e não aborta a transição de status.
#[utoipa::path(
    post,
    path = "/api/dialer/call",
    tag = "Dialer",
    request_body = DialPayload,
    responses(
        (status = 200, description = "Chamada registrada", body = Lead),
        (status = 403, description = "Lead de outro agente"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn call(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<DialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state.lead_service.dial(&user, payload.lead_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        lead,
        "Chamada registrada.",
    )))
}
