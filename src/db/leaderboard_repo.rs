use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{common::error::AppError, models::leaderboard::LeaderboardEntry};

#[derive(Clone)]
pub struct LeaderboardRepository {
    pool: PgPool,
}

impl LeaderboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Totais por agente no período. LEFT JOIN + COALESCE: agente sem atividade
    // entra com zeros em vez de sumir do ranking. A ordenação final (e o
    // desempate estável) acontece no serviço; aqui a ordem é só por id, para a
    // estabilidade ser determinística.
    pub async fn totals_for_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT u.id AS user_id,
                   u.full_name,
                   u.extension,
                   COALESCE(SUM(s.calls_count), 0)::BIGINT AS calls_count,
                   COALESCE(SUM(s.talk_time_seconds), 0)::BIGINT AS talk_time_seconds,
                   COALESCE(SUM(s.leads_count), 0)::BIGINT AS leads_count
            FROM users u
            LEFT JOIN daily_stats s
                   ON s.user_id = u.id AND s.date BETWEEN $1 AND $2
            WHERE u.role = 'agent' AND u.is_active = TRUE
            GROUP BY u.id, u.full_name, u.extension
            ORDER BY u.id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
