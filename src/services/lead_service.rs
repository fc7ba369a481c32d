// src/services/lead_service.rs
//
// Fluxo de leads e discador: importação, fila do agente, gatilho de chamada e
// revisão (RH) dos leads enviados pelos agentes.

use crate::{
    common::error::AppError,
    db::{LeadsRepository, StatsRepository, UserRepository},
    models::{
        auth::{User, UserRole},
        leads::{
            AgentLead, AgentLeadStatus, BulkImportPayload, Lead, NextLeadData, ReviewAction,
            SubmitAgentLeadPayload,
        },
        stats::DailyStats,
    },
    services::{
        clock::SharedClock,
        shift::{attendance_date, ShiftRules},
        telephony::SharedDialer,
    },
};

// Tamanho da prévia da fila do discador, além do lead corrente.
const DIAL_QUEUE_PREVIEW: i64 = 10;

// Posse do lead: se há agente atribuído, só ele pode discar.
pub fn ensure_can_dial(lead: &Lead, agent_id: i64) -> Result<(), AppError> {
    match lead.assigned_agent_id {
        Some(owner) if owner != agent_id => Err(AppError::Forbidden(
            "Este lead está atribuído a outro agente.".to_string(),
        )),
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct LeadService {
    leads_repo: LeadsRepository,
    stats_repo: StatsRepository,
    user_repo: UserRepository,
    rules: ShiftRules,
    clock: SharedClock,
    dialer: SharedDialer,
}

impl LeadService {
    pub fn new(
        leads_repo: LeadsRepository,
        stats_repo: StatsRepository,
        user_repo: UserRepository,
        rules: ShiftRules,
        clock: SharedClock,
        dialer: SharedDialer,
    ) -> Self {
        Self {
            leads_repo,
            stats_repo,
            user_repo,
            rules,
            clock,
            dialer,
        }
    }

    // Dispara a chamada e marca o lead como 'called'. A falha do discador é
    // registrada no log e engolida: a ação do usuário é a discagem, e ela
    // fica registrada mesmo que o gatilho HTTP falhe. Tornar isso
    // transacional é não-objetivo explícito.
    pub async fn dial(&self, agent: &User, lead_id: i64) -> Result<Lead, AppError> {
        let lead = self
            .leads_repo
            .find_by_id(lead_id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        ensure_can_dial(&lead, agent.id)?;

        if let Err(e) = self.dialer.trigger_call(&agent.extension, &lead.phone).await {
            tracing::warn!(
                "Falha ao acionar o discador para o ramal {} (lead {}): {}. A chamada segue registrada.",
                agent.extension,
                lead.id,
                e
            );
        }

        self.leads_repo.mark_called(lead.id, self.clock.now_utc()).await
    }

    // Próximo lead pendente do agente (mais antigo primeiro) + prévia da fila.
    // Fila vazia é um resultado normal, não um erro.
    pub async fn next_lead(&self, agent: &User) -> Result<NextLeadData, AppError> {
        let mut queue = self
            .leads_repo
            .pending_queue(agent.id, DIAL_QUEUE_PREVIEW + 1)
            .await?;

        if queue.is_empty() {
            return Ok(NextLeadData {
                lead: None,
                queue: Vec::new(),
            });
        }
        let lead = queue.remove(0);
        Ok(NextLeadData {
            lead: Some(lead),
            queue,
        })
    }

    pub async fn bulk_import(&self, payload: &BulkImportPayload) -> Result<u64, AppError> {
        if let Some(agent_id) = payload.assigned_agent_id {
            self.user_repo
                .find_by_id(agent_id)
                .await?
                .ok_or(AppError::NotFound("Agente"))?;
        }
        self.leads_repo
            .bulk_insert(&payload.leads, payload.assigned_agent_id)
            .await
    }

    // RH enxerga todos os leads; agente só os atribuídos a ele.
    pub async fn list(&self, user: &User) -> Result<Vec<Lead>, AppError> {
        let filter = match user.role {
            UserRole::Hr => None,
            UserRole::Agent => Some(user.id),
        };
        self.leads_repo.list(filter).await
    }

    pub async fn submit_agent_lead(
        &self,
        agent: &User,
        payload: &SubmitAgentLeadPayload,
    ) -> Result<AgentLead, AppError> {
        self.leads_repo
            .insert_agent_lead(
                agent.id,
                &payload.name,
                &payload.phone,
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn list_agent_leads(&self, user: &User) -> Result<Vec<AgentLead>, AppError> {
        match user.role {
            // Fila de revisão do RH: só os pendentes.
            UserRole::Hr => self.leads_repo.list_agent_leads(None, true).await,
            UserRole::Agent => self.leads_repo.list_agent_leads(Some(user.id), false).await,
        }
    }

    // Revisão atômica: tranca a linha, exige status ainda 'pending' e, na
    // aprovação, incrementa o leads_count do agente dono na MESMA transação.
    // A data creditada é a data de turno do envio do lead, calculada pela
    // configuração de turno do agente, não pelo instante da revisão.
    pub async fn review_agent_lead(
        &self,
        reviewer: &User,
        id: i64,
        action: ReviewAction,
    ) -> Result<AgentLead, AppError> {
        let mut tx = self.leads_repo.pool().begin().await?;

        let lead = self
            .leads_repo
            .lock_agent_lead(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound("Lead de agente"))?;

        if lead.status != AgentLeadStatus::Pending {
            // O drop da transação faz rollback; nada foi alterado.
            return Err(AppError::Conflict(format!(
                "Lead já revisado: status atual '{}'.",
                lead.status.as_str()
            )));
        }

        let new_status = match action {
            ReviewAction::Approve => AgentLeadStatus::Approved,
            ReviewAction::Reject => AgentLeadStatus::Rejected,
        };

        let now = self.clock.now_utc();
        let updated = self
            .leads_repo
            .set_agent_lead_review(&mut tx, id, new_status, reviewer.id, now)
            .await?;

        if new_status == AgentLeadStatus::Approved {
            let agent = self
                .user_repo
                .find_by_id(lead.agent_id)
                .await?
                .ok_or(AppError::NotFound("Agente"))?;
            let credit_date = attendance_date(
                agent.shift_start,
                agent.shift_end,
                lead.created_at,
                self.rules.tz,
            );
            self.stats_repo
                .add_leads_in_tx(&mut tx, lead.agent_id, credit_date, 1)
                .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    // Contador manual de lead do próprio agente, creditado na data do turno
    // corrente.
    pub async fn add_lead_count(&self, agent: &User) -> Result<DailyStats, AppError> {
        let date = attendance_date(
            agent.shift_start,
            agent.shift_end,
            self.clock.now_utc(),
            self.rules.tz,
        );
        self.stats_repo.add_leads(agent.id, date, 1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::leads::LeadStatus;
    use chrono::Utc;

    fn lead(assigned: Option<i64>) -> Lead {
        Lead {
            id: 1,
            name: "Lead".to_string(),
            phone: "03001234567".to_string(),
            status: LeadStatus::Pending,
            assigned_agent_id: assigned,
            last_called_at: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn dialing_foreign_lead_is_forbidden_and_leaves_status_alone() {
        let lead = lead(Some(7));
        let result = ensure_can_dial(&lead, 9);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        // A guarda roda antes de qualquer escrita: o lead não muda.
        assert_eq!(lead.status, LeadStatus::Pending);
        assert!(lead.last_called_at.is_none());
    }

    #[test]
    fn owner_and_unassigned_leads_can_be_dialed() {
        assert!(ensure_can_dial(&lead(Some(7)), 7).is_ok());
        assert!(ensure_can_dial(&lead(None), 7).is_ok());
    }
}

// Testes de integração contra Postgres. Ignorados por padrão; rodar com
// DATABASE_URL definida: cargo test -- --ignored
#[cfg(test)]
mod pg_tests {
    use super::*;
    use crate::{
        db::{LeadsRepository, StatsRepository, UserRepository},
        services::{clock::test_support::FixedClock, telephony::DialerClient},
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use sqlx::PgPool;
    use std::sync::Arc;

    // Discador que não faz nada: estes testes só exercitam a revisão.
    struct NoopDialer;

    #[async_trait]
    impl DialerClient for NoopDialer {
        async fn trigger_call(&self, _extension: &str, _phone: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    async fn seed_user(pool: &PgPool, username: &str, extension: &str, role: &str) -> User {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, full_name, extension, role)
            VALUES ($1, 'x', $1, $2, $3::user_role)
            RETURNING *
            "#,
        )
        .bind(username)
        .bind(extension)
        .bind(role)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    fn service(pool: PgPool) -> LeadService {
        LeadService::new(
            LeadsRepository::new(pool.clone()),
            StatsRepository::new(pool.clone()),
            UserRepository::new(pool),
            ShiftRules::default(),
            Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2025, 8, 12, 5, 0, 0).unwrap(),
            )),
            Arc::new(NoopDialer),
        )
    }

    async fn leads_count_sum(pool: &PgPool, agent_id: i64) -> i64 {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(leads_count), 0)::BIGINT FROM daily_stats WHERE user_id = $1",
        )
        .bind(agent_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test]
    #[ignore]
    async fn approving_pending_lead_credits_agent_exactly_once(pool: PgPool) {
        let agent = seed_user(&pool, "a.khan", "101", "agent").await;
        let hr = seed_user(&pool, "h.bibi", "200", "hr").await;
        let service = service(pool.clone());

        let submitted = service
            .submit_agent_lead(
                &agent,
                &SubmitAgentLeadPayload {
                    name: "Cliente Novo".to_string(),
                    phone: "03001234567".to_string(),
                    notes: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(submitted.status, AgentLeadStatus::Pending);

        let reviewed = service
            .review_agent_lead(&hr, submitted.id, ReviewAction::Approve)
            .await
            .unwrap();
        assert_eq!(reviewed.status, AgentLeadStatus::Approved);
        assert_eq!(reviewed.reviewed_by, Some(hr.id));
        assert_eq!(leads_count_sum(&pool, agent.id).await, 1);
    }

    #[sqlx::test]
    #[ignore]
    async fn second_review_conflicts_and_leaves_counters_alone(pool: PgPool) {
        let agent = seed_user(&pool, "a.khan", "101", "agent").await;
        let hr = seed_user(&pool, "h.bibi", "200", "hr").await;
        let service = service(pool.clone());

        let submitted = service
            .submit_agent_lead(
                &agent,
                &SubmitAgentLeadPayload {
                    name: "Cliente Novo".to_string(),
                    phone: "03001234567".to_string(),
                    notes: None,
                },
            )
            .await
            .unwrap();

        service
            .review_agent_lead(&hr, submitted.id, ReviewAction::Approve)
            .await
            .unwrap();

        // A segunda revisão acha o lead já resolvido e não toca em nada.
        let second = service
            .review_agent_lead(&hr, submitted.id, ReviewAction::Reject)
            .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(leads_count_sum(&pool, agent.id).await, 1);

        let status: AgentLeadStatus =
            sqlx::query_scalar("SELECT status FROM agent_leads WHERE id = $1")
                .bind(submitted.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(status, AgentLeadStatus::Approved);
    }
}
