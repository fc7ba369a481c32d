use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    services::{duration::parse_duration_seconds, shift::attendance_date},
};

// Evento de chamada vindo do discador, no formato do contrato:
// {agent_extension, duration, call_type}. Campos opcionais de propósito: a
// ausência responde 400, não 422 do extrator.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CallEventPayload {
    pub agent_extension: Option<String>,
    pub duration: Option<String>,
    pub call_type: Option<String>,
}

// POST /api/webhook/call-event
// Sem autenticação: fronteira de rede confiável. Ramal desconhecido -> 404.
#[utoipa::path(
    post,
    path = "/api/webhook/call-event",
    tag = "Webhook",
    request_body = CallEventPayload,
    responses(
        (status = 200, description = "Contadores do dia atualizados"),
        (status = 400, description = "Campos obrigatórios ausentes"),
        (status = 404, description = "Ramal desconhecido")
    )
)]
pub async fn call_event(
    State(app_state): State<AppState>,
    Json(payload): Json<CallEventPayload>,
) -> Result<impl IntoResponse, AppError> {
    let extension = payload
        .agent_extension
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("agent_extension é obrigatório.".to_string()))?;
    let duration = payload
        .duration
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("duration é obrigatório.".to_string()))?;
    let call_type = payload
        .call_type
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("call_type é obrigatório.".to_string()))?;

    let user = app_state
        .user_repo
        .find_active_by_extension(extension)
        .await?
        .ok_or(AppError::NotFound("Ramal"))?;

    let talk_time = parse_duration_seconds(duration);
    let date = attendance_date(
        user.shift_start,
        user.shift_end,
        app_state.clock.now_utc(),
        app_state.rules.tz,
    );

    let stats = app_state.stats_repo.add_call(user.id, date, talk_time).await?;

    tracing::info!(
        "Chamada ({}) de {}s registrada para o ramal {}",
        call_type,
        talk_time,
        extension
    );

    Ok(Json(ApiResponse::success(stats)))
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Webhook",
    responses((status = 200, description = "Serviço no ar"))
)]
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::message_only("OK"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_documented_snake_case_payload() {
        let payload: CallEventPayload = serde_json::from_str(
            r#"{"agent_extension":"101","duration":"05:30","call_type":"inbound"}"#,
        )
        .unwrap();
        assert_eq!(payload.agent_extension.as_deref(), Some("101"));
        assert_eq!(payload.duration.as_deref(), Some("05:30"));
        assert_eq!(payload.call_type.as_deref(), Some("inbound"));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let payload: CallEventPayload =
            serde_json::from_str(r#"{"duration":"05:30"}"#).unwrap();
        assert!(payload.agent_extension.is_none());
        assert!(payload.call_type.is_none());
    }
}
