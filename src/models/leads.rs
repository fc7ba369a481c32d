use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Mapeia o CREATE TYPE lead_status do banco.
// Ciclo de vida: pending -> called -> {busy, bad_number} (reclassificação manual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    Called,
    Busy,
    BadNumber,
}

// Mapeia o CREATE TYPE agent_lead_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "agent_lead_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AgentLeadStatus {
    Pending,
    Approved,
    Rejected,
}

impl AgentLeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub status: LeadStatus,
    pub assigned_agent_id: Option<i64>,
    pub last_called_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Lead enviado por um agente, pendente de revisão do RH.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentLead {
    pub id: i64,
    pub agent_id: i64,
    pub name: String,
    pub phone: String,
    pub notes: Option<String>,
    pub status: AgentLeadStatus,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadImportEntry {
    #[validate(length(min = 1, message = "O nome do lead é obrigatório."))]
    pub name: String,
    #[validate(length(min = 4, message = "O telefone do lead é inválido."))]
    pub phone: String,
    pub notes: Option<String>,
}

// Importação em massa pelo RH, com atribuição opcional a um agente.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportPayload {
    #[validate(length(min = 1, message = "A lista de leads não pode ser vazia."), nested)]
    pub leads: Vec<LeadImportEntry>,
    pub assigned_agent_id: Option<i64>,
}

// Envio de lead pelo próprio agente (entra como pending em agent_leads).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAgentLeadPayload {
    #[validate(length(min = 1, message = "O nome do lead é obrigatório."))]
    pub name: String,
    #[validate(length(min = 4, message = "O telefone do lead é inválido."))]
    pub phone: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAgentLeadPayload {
    pub action: ReviewAction,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DialPayload {
    pub lead_id: i64,
}

// Próximo lead da fila + prévia dos que vêm em seguida.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextLeadData {
    pub lead: Option<Lead>,
    pub queue: Vec<Lead>,
}
