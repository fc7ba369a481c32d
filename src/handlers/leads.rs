use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::{AuthenticatedUser, HrUser},
    models::leads::{
        AgentLead, BulkImportPayload, Lead, ReviewAgentLeadPayload, SubmitAgentLeadPayload,
    },
};

// GET /api/leads — RH vê todos, agente vê os seus.
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Lista de leads", body = Vec<Lead>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.lead_service.list(&user).await?;
    Ok(Json(ApiResponse::success(leads)))
}

// POST /api/leads/import — importação em massa, exclusiva do RH.
#[utoipa::path(
    post,
    path = "/api/leads/import",
    tag = "Leads",
    request_body = BulkImportPayload,
    responses(
        (status = 201, description = "Leads importados"),
        (status = 403, description = "Apenas RH")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_leads(
    State(app_state): State<AppState>,
    HrUser(_hr): HrUser,
    Json(payload): Json<BulkImportPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let inserted = app_state.lead_service.bulk_import(&payload).await?;
    tracing::info!("Importação de {} leads concluída", inserted);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            json!({ "imported": inserted }),
            format!("{} leads importados.", inserted),
        )),
    ))
}

// POST /api/agent-leads — envio de lead pelo próprio agente (fica pendente
// de revisão do RH).
#[utoipa::path(
    post,
    path = "/api/agent-leads",
    tag = "Leads",
    request_body = SubmitAgentLeadPayload,
    responses(
        (status = 201, description = "Lead enviado para revisão", body = AgentLead)
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_agent_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SubmitAgentLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let lead = app_state
        .lead_service
        .submit_agent_lead(&user, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            lead,
            "Lead enviado para revisão do RH.",
        )),
    ))
}

// GET /api/agent-leads — RH: fila de pendentes; agente: os próprios envios.
#[utoipa::path(
    get,
    path = "/api/agent-leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Leads enviados por agentes", body = Vec<AgentLead>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agent_leads(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.lead_service.list_agent_leads(&user).await?;
    Ok(Json(ApiResponse::success(leads)))
}

// POST /api/agent-leads/{id}/review — aprova/rejeita atomicamente; na
// aprovação o leads_count do agente dono é incrementado na mesma transação.
#[utoipa::path(
    post,
    path = "/api/agent-leads/{id}/review",
    tag = "Leads",
    request_body = ReviewAgentLeadPayload,
    params(("id" = i64, Path, description = "ID do agent_lead")),
    responses(
        (status = 200, description = "Lead revisado", body = AgentLead),
        (status = 400, description = "Lead já revisado"),
        (status = 403, description = "Apenas RH")
    ),
    security(("api_jwt" = []))
)]
pub async fn review_agent_lead(
    State(app_state): State<AppState>,
    HrUser(reviewer): HrUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewAgentLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    let lead = app_state
        .lead_service
        .review_agent_lead(&reviewer, id, payload.action)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        lead,
        "Revisão registrada.",
    )))
}
