// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Attendance ---
        handlers::attendance::get_today,
        handlers::attendance::check_in,
        handlers::attendance::check_out,

        // --- Stats ---
        handlers::stats::dashboard,
        handlers::stats::add_lead,

        // --- Leads ---
        handlers::leads::list_leads,
        handlers::leads::import_leads,
        handlers::leads::submit_agent_lead,
        handlers::leads::list_agent_leads,
        handlers::leads::review_agent_lead,

        // --- Dialer ---
        handlers::dialer::next_lead,
        handlers::dialer::call,

        // --- Leaderboard ---
        handlers::leaderboard::ranking,

        // --- Webhook ---
        handlers::webhook::call_event,
        handlers::webhook::health,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::LoginData,

            // --- Attendance ---
            models::attendance::AttendanceStatus,
            models::attendance::AttendanceRecord,
            models::attendance::AttendanceResult,

            // --- Stats ---
            models::stats::DailyStats,
            models::stats::SalarySummary,
            models::stats::DashboardData,

            // --- Leads ---
            models::leads::LeadStatus,
            models::leads::AgentLeadStatus,
            models::leads::Lead,
            models::leads::AgentLead,
            models::leads::LeadImportEntry,
            models::leads::BulkImportPayload,
            models::leads::SubmitAgentLeadPayload,
            models::leads::ReviewAction,
            models::leads::ReviewAgentLeadPayload,
            models::leads::DialPayload,
            models::leads::NextLeadData,

            // --- Leaderboard ---
            models::leaderboard::LeaderboardEntry,

            // --- Webhook ---
            handlers::webhook::CallEventPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e sessão"),
        (name = "Attendance", description = "Presença por turno (check-in/check-out)"),
        (name = "Stats", description = "Salário e contadores diários"),
        (name = "Leads", description = "Importação e revisão de leads"),
        (name = "Dialer", description = "Fila de discagem e gatilho de chamada"),
        (name = "Leaderboard", description = "Ranking diário e mensal"),
        (name = "Webhook", description = "Ingestão de eventos do discador")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
