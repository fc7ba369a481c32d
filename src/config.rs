// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{
        AttendanceRepository, LeaderboardRepository, LeadsRepository, StatsRepository,
        UserRepository,
    },
    services::{
        attendance_service::AttendanceService,
        auth::AuthService,
        clock::{SharedClock, SystemClock},
        lead_service::LeadService,
        leaderboard_service::LeaderboardService,
        salary_service::SalaryService,
        shift::ShiftRules,
        telephony::{HttpDialerClient, SharedDialer},
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub rules: ShiftRules,
    pub clock: SharedClock,
    pub user_repo: UserRepository,
    pub stats_repo: StatsRepository,
    pub auth_service: AuthService,
    pub attendance_service: AttendanceService,
    pub salary_service: SalaryService,
    pub lead_service: LeadService,
    pub leaderboard_service: LeaderboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let dialer_host = env::var("DIALER_HOST").unwrap_or_else(|_| {
            tracing::warn!("DIALER_HOST não definido; usando http://localhost:8088");
            "http://localhost:8088".to_string()
        });

        // Pool criado uma vez na subida do processo e compartilhado por todas
        // as requisições; nunca recriado por requisição.
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let clock: SharedClock = Arc::new(SystemClock);
        let dialer: SharedDialer = Arc::new(HttpDialerClient::new(dialer_host));

        Ok(Self::assemble(db_pool, jwt_secret, clock, dialer))
    }

    // --- Monta o gráfico de dependências ---
    // Separado de new() para os testes de integração poderem injetar relógio
    // e discador próprios.
    pub fn assemble(
        db_pool: PgPool,
        jwt_secret: String,
        clock: SharedClock,
        dialer: SharedDialer,
    ) -> Self {
        let rules = ShiftRules::default();

        let user_repo = UserRepository::new(db_pool.clone());
        let attendance_repo = AttendanceRepository::new(db_pool.clone());
        let stats_repo = StatsRepository::new(db_pool.clone());
        let leads_repo = LeadsRepository::new(db_pool.clone());
        let leaderboard_repo = LeaderboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, clock.clone());
        let attendance_service = AttendanceService::new(attendance_repo.clone(), rules, clock.clone());
        let salary_service = SalaryService::new(
            attendance_repo,
            stats_repo.clone(),
            rules,
            clock.clone(),
        );
        let lead_service = LeadService::new(
            leads_repo,
            stats_repo.clone(),
            user_repo.clone(),
            rules,
            clock.clone(),
            dialer,
        );
        let leaderboard_service = LeaderboardService::new(leaderboard_repo, rules, clock.clone());

        Self {
            db_pool,
            rules,
            clock,
            user_repo,
            stats_repo,
            auth_service,
            attendance_service,
            salary_service,
            lead_service,
            leaderboard_service,
        }
    }
}
