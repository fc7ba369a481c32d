use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Contadores diários de um agente. Todos crescem por upsert-incremento:
// se a linha (user_id, date) não existe, nasce zerada com o incremento aplicado.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub user_id: i64,
    pub date: NaiveDate,
    pub calls_count: i32,
    pub talk_time_seconds: i64,
    pub leads_count: i32,
    pub sales_amount: Decimal,
}

// Resumo de salário do mês corrente, derivado do histórico de presença.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    pub base_salary: Decimal,
    pub daily_potential: Decimal,
    pub total_earned: Decimal,
    pub projected_salary: Decimal,
    pub working_days: u32,
    pub working_days_elapsed: u32,
    pub on_time_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    pub absent_days: u32,
}

// Painel do agente: salário + contadores de hoje.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub salary: SalarySummary,
    pub today: DailyStats,
}
