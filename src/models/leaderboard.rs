use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Daily,
    Monthly,
}

impl Default for LeaderboardPeriod {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub period: LeaderboardPeriod,
}

// Uma linha do ranking. Agentes sem atividade aparecem com zeros,
// nunca são omitidos.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[sqlx(default)]
    pub rank: i64,
    pub user_id: i64,
    pub full_name: String,
    pub extension: String,
    pub calls_count: i64,
    pub talk_time_seconds: i64,
    pub leads_count: i64,
}
