// src/services/attendance_service.rs
//
// Máquina de estados por (usuário, data do turno):
// ausente (implícito) -> registrado(status) -> com check-out.
// Regra do primeiro login: só o primeiro check-in do turno cria o registro;
// logins seguintes devolvem a linha existente sem tocar nela.

use crate::{
    common::error::AppError,
    db::AttendanceRepository,
    models::{
        attendance::{AttendanceRecord, AttendanceResult, AttendanceStatus},
        auth::User,
    },
    services::{
        clock::SharedClock,
        shift::{attendance_date, classify_check_in, is_weekend_shift, ShiftRules},
    },
};

#[derive(Clone)]
pub struct AttendanceService {
    repo: AttendanceRepository,
    rules: ShiftRules,
    clock: SharedClock,
}

impl AttendanceService {
    pub fn new(repo: AttendanceRepository, rules: ShiftRules, clock: SharedClock) -> Self {
        Self { repo, rules, clock }
    }

    fn weekend_result(&self) -> AttendanceResult {
        AttendanceResult {
            record: None,
            status: AttendanceStatus::Weekend,
            minutes_late: 0,
            already_recorded: false,
            message: "Fim de semana: controle de presença pausado.".to_string(),
        }
    }

    // Check-in explícito ou efeito colateral do login. Turno de fim de semana
    // não persiste nada. Em caso de corrida entre dois primeiros logins, a
    // restrição UNIQUE decide e o perdedor relê a linha do vencedor.
    pub async fn record_check_in(&self, user: &User) -> Result<AttendanceResult, AppError> {
        let now = self.clock.now_utc();

        if is_weekend_shift(user.shift_start, user.shift_end, now, self.rules.tz) {
            return Ok(self.weekend_result());
        }

        let date = attendance_date(user.shift_start, user.shift_end, now, self.rules.tz);

        if let Some(existing) = self.repo.find_by_user_and_date(user.id, date).await? {
            return Ok(Self::already_recorded(existing));
        }

        let outcome = classify_check_in(user.shift_start, user.shift_end, now, &self.rules);
        match self
            .repo
            .try_insert(user.id, date, now, outcome.status)
            .await?
        {
            Some(record) => Ok(AttendanceResult {
                status: record.status,
                minutes_late: outcome.minutes_late,
                already_recorded: false,
                message: outcome.message,
                record: Some(record),
            }),
            // Perdemos a corrida do INSERT: outro login acabou de registrar.
            None => {
                let winner = self
                    .repo
                    .find_by_user_and_date(user.id, date)
                    .await?
                    .ok_or_else(|| {
                        anyhow::anyhow!("registro de presença sumiu após conflito de inserção")
                    })?;
                Ok(Self::already_recorded(winner))
            }
        }
    }

    fn already_recorded(record: AttendanceRecord) -> AttendanceResult {
        AttendanceResult {
            status: record.status,
            minutes_late: 0,
            already_recorded: true,
            message: "Presença já registrada para este turno.".to_string(),
            record: Some(record),
        }
    }

    pub async fn check_out(&self, user: &User) -> Result<AttendanceRecord, AppError> {
        let now = self.clock.now_utc();
        let date = attendance_date(user.shift_start, user.shift_end, now, self.rules.tz);

        match self.repo.set_check_out(user.id, date, now).await? {
            Some(record) => Ok(record),
            None => match self.repo.find_by_user_and_date(user.id, date).await? {
                Some(_) => Err(AppError::Conflict(
                    "Check-out já registrado para este turno.".to_string(),
                )),
                None => Err(AppError::Conflict(
                    "Nenhum check-in registrado para este turno.".to_string(),
                )),
            },
        }
    }

    // Situação de hoje: o registro se existir, weekend em fim de semana,
    // ausente implícito quando ainda não houve check-in.
    pub async fn today(&self, user: &User) -> Result<AttendanceResult, AppError> {
        let now = self.clock.now_utc();

        if is_weekend_shift(user.shift_start, user.shift_end, now, self.rules.tz) {
            return Ok(self.weekend_result());
        }

        let date = attendance_date(user.shift_start, user.shift_end, now, self.rules.tz);
        match self.repo.find_by_user_and_date(user.id, date).await? {
            Some(record) => Ok(Self::already_recorded(record)),
            None => Ok(AttendanceResult {
                record: None,
                status: AttendanceStatus::Absent,
                minutes_late: 0,
                already_recorded: false,
                message: "Nenhum check-in registrado para este turno.".to_string(),
            }),
        }
    }
}

// Testes de integração contra Postgres. Ignorados por padrão; rodar com
// DATABASE_URL definida: cargo test -- --ignored
#[cfg(test)]
mod pg_tests {
    use super::*;
    use crate::services::clock::test_support::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};
    use sqlx::PgPool;
    use std::sync::Arc;

    async fn seed_agent(pool: &PgPool) -> User {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, full_name, extension)
            VALUES ('a.khan', 'x', 'Agente Khan', '101')
            RETURNING *
            "#,
        )
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn service(pool: PgPool, now: DateTime<Utc>) -> AttendanceService {
        AttendanceService::new(
            crate::db::AttendanceRepository::new(pool),
            ShiftRules::default(),
            Arc::new(FixedClock(now)),
        )
    }

    // 2025-08-12 (terça) 09:10 PKT == 04:10 UTC, turno padrão 09:00–17:00.
    fn tuesday_0910() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 12, 4, 10, 0).unwrap()
    }

    #[sqlx::test]
    #[ignore]
    async fn concurrent_first_check_ins_persist_exactly_one_row(pool: PgPool) {
        let user = seed_agent(&pool).await;
        let s1 = service(pool.clone(), tuesday_0910());
        let s2 = service(pool.clone(), tuesday_0910());

        let (a, b) = tokio::join!(s1.record_check_in(&user), s2.record_check_in(&user));
        let (a, b) = (a.unwrap(), b.unwrap());

        // Ambos observam o mesmo status; exatamente um foi o criador.
        assert_eq!(a.status, AttendanceStatus::OnTime);
        assert_eq!(b.status, a.status);
        assert_ne!(a.already_recorded, b.already_recorded);

        let rows: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE user_id = $1")
                .bind(user.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(rows, 1);
    }

    #[sqlx::test]
    #[ignore]
    async fn second_login_rereads_winner_unchanged(pool: PgPool) {
        let user = seed_agent(&pool).await;

        let first = service(pool.clone(), tuesday_0910())
            .record_check_in(&user)
            .await
            .unwrap();
        assert!(!first.already_recorded);
        assert_eq!(first.status, AttendanceStatus::OnTime);

        // Login mais tarde no mesmo turno (09:40, seria 'late'): devolve a
        // linha do vencedor sem tocar em status nem check_in_time.
        let later = Utc.with_ymd_and_hms(2025, 8, 12, 4, 40, 0).unwrap();
        let second = service(pool.clone(), later)
            .record_check_in(&user)
            .await
            .unwrap();
        assert!(second.already_recorded);
        assert_eq!(second.status, AttendanceStatus::OnTime);
        assert_eq!(
            second.record.unwrap().check_in_time,
            first.record.unwrap().check_in_time
        );
    }
}
