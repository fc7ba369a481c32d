use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{common::error::AppError, models::stats::DailyStats};

// Contadores diários. Todo método de escrita segue o mesmo contrato:
// incrementa a linha (user_id, date) se ela existe, senão cria a linha
// zerada já com o incremento aplicado.
#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_day(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailyStats>, AppError> {
        let stats = sqlx::query_as::<_, DailyStats>(
            "SELECT * FROM daily_stats WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(stats)
    }

    // Evento de chamada vindo do webhook: +1 chamada, +duração falada.
    pub async fn add_call(
        &self,
        user_id: i64,
        date: NaiveDate,
        talk_time_seconds: i64,
    ) -> Result<DailyStats, AppError> {
        let stats = sqlx::query_as::<_, DailyStats>(
            r#"
            INSERT INTO daily_stats (user_id, date, calls_count, talk_time_seconds)
            VALUES ($1, $2, 1, $3)
            ON CONFLICT (user_id, date) DO UPDATE
            SET calls_count = daily_stats.calls_count + 1,
                talk_time_seconds = daily_stats.talk_time_seconds + EXCLUDED.talk_time_seconds
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(talk_time_seconds)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    pub async fn add_leads(
        &self,
        user_id: i64,
        date: NaiveDate,
        count: i32,
    ) -> Result<DailyStats, AppError> {
        let stats = sqlx::query_as::<_, DailyStats>(
            r#"
            INSERT INTO daily_stats (user_id, date, leads_count)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, date) DO UPDATE
            SET leads_count = daily_stats.leads_count + EXCLUDED.leads_count
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(count)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    // Variante transacional, usada pela aprovação de agent_lead para que o
    // incremento participe do mesmo commit/rollback da revisão.
    pub async fn add_leads_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i64,
        date: NaiveDate,
        count: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO daily_stats (user_id, date, leads_count)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, date) DO UPDATE
            SET leads_count = daily_stats.leads_count + EXCLUDED.leads_count
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(count)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
