use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::attendance::{AttendanceDay, AttendanceRecord, AttendanceStatus},
};

#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE user_id = $1 AND date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // Insere o registro do primeiro check-in do turno. O ON CONFLICT resolve a
    // corrida de dois primeiros logins simultâneos: o perdedor recebe None e
    // deve reler a linha do vencedor em vez de errar.
    pub async fn try_insert(
        &self,
        user_id: i64,
        date: NaiveDate,
        check_in_time: DateTime<Utc>,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (user_id, date, check_in_time, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(check_in_time)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // Grava o check-out uma única vez. Retorna None quando não há registro do
    // dia ou o check-out já foi feito.
    pub async fn set_check_out(
        &self,
        user_id: i64,
        date: NaiveDate,
        check_out_time: DateTime<Utc>,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            UPDATE attendance
            SET check_out_time = $3
            WHERE user_id = $1 AND date = $2 AND check_out_time IS NULL
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(check_out_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    // Linhas (data, status) de um intervalo, para a agregação salarial.
    pub async fn list_days_in_range(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceDay>, AppError> {
        let days = sqlx::query_as::<_, AttendanceDay>(
            r#"
            SELECT date, status FROM attendance
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(days)
    }
}
