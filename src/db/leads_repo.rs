use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    common::error::AppError,
    models::leads::{AgentLead, AgentLeadStatus, Lead, LeadImportEntry},
};

#[derive(Clone)]
pub struct LeadsRepository {
    pool: PgPool,
}

impl LeadsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Lead>, AppError> {
        let lead = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lead)
    }

    // Importação em massa. Uma transação só: ou entra tudo, ou nada.
    pub async fn bulk_insert(
        &self,
        entries: &[LeadImportEntry],
        assigned_agent_id: Option<i64>,
    ) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;
        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO leads (name, phone, notes, assigned_agent_id)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(&entry.name)
            .bind(&entry.phone)
            .bind(&entry.notes)
            .bind(assigned_agent_id)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    // RH enxerga tudo; agente só o que está atribuído a ele.
    pub async fn list(&self, assigned_agent_id: Option<i64>) -> Result<Vec<Lead>, AppError> {
        let leads = match assigned_agent_id {
            Some(agent_id) => {
                sqlx::query_as::<_, Lead>(
                    "SELECT * FROM leads WHERE assigned_agent_id = $1 ORDER BY created_at DESC",
                )
                .bind(agent_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(leads)
    }

    // Fila do discador: os pendentes mais antigos do agente, o primeiro é o
    // próximo a discar e o resto é prévia.
    pub async fn pending_queue(&self, agent_id: i64, limit: i64) -> Result<Vec<Lead>, AppError> {
        let leads = sqlx::query_as::<_, Lead>(
            r#"
            SELECT * FROM leads
            WHERE assigned_agent_id = $1 AND status = 'pending'
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(agent_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(leads)
    }

    pub async fn mark_called(
        &self,
        lead_id: i64,
        called_at: DateTime<Utc>,
    ) -> Result<Lead, AppError> {
        let lead = sqlx::query_as::<_, Lead>(
            r#"
            UPDATE leads
            SET status = 'called', last_called_at = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(lead_id)
        .bind(called_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    // --- agent_leads (envios dos agentes, revisão do RH) ---

    pub async fn insert_agent_lead(
        &self,
        agent_id: i64,
        name: &str,
        phone: &str,
        notes: Option<&str>,
    ) -> Result<AgentLead, AppError> {
        let lead = sqlx::query_as::<_, AgentLead>(
            r#"
            INSERT INTO agent_leads (agent_id, name, phone, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(agent_id)
        .bind(name)
        .bind(phone)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(lead)
    }

    pub async fn list_agent_leads(
        &self,
        agent_id: Option<i64>,
        only_pending: bool,
    ) -> Result<Vec<AgentLead>, AppError> {
        let mut sql = String::from("SELECT * FROM agent_leads WHERE TRUE");
        if agent_id.is_some() {
            sql.push_str(" AND agent_id = $1");
        }
        if only_pending {
            sql.push_str(" AND status = 'pending'");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, AgentLead>(&sql);
        if let Some(id) = agent_id {
            query = query.bind(id);
        }
        let leads = query.fetch_all(&self.pool).await?;
        Ok(leads)
    }

    // Tranca a linha pelo tempo da transação de revisão (FOR UPDATE), para que
    // duas revisões simultâneas não aprovem o mesmo lead duas vezes.
    pub async fn lock_agent_lead(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> Result<Option<AgentLead>, AppError> {
        let lead = sqlx::query_as::<_, AgentLead>(
            "SELECT * FROM agent_leads WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(lead)
    }

    pub async fn set_agent_lead_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        status: AgentLeadStatus,
        reviewed_by: i64,
        reviewed_at: DateTime<Utc>,
    ) -> Result<AgentLead, AppError> {
        let lead = sqlx::query_as::<_, AgentLead>(
            r#"
            UPDATE agent_leads
            SET status = $2, reviewed_by = $3, reviewed_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(reviewed_by)
        .bind(reviewed_at)
        .fetch_one(&mut **tx)
        .await?;
        Ok(lead)
    }
}
