//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas: login e webhook do discador (fronteira de rede confiável)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let webhook_routes = Router::new()
        .route("/call-event", post(handlers::webhook::call_event));

    // Rotas protegidas pelo middleware de autenticação
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let attendance_routes = Router::new()
        .route("/today", get(handlers::attendance::get_today))
        .route("/check-in", post(handlers::attendance::check_in))
        .route("/check-out", post(handlers::attendance::check_out))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let stats_routes = Router::new()
        .route("/dashboard", get(handlers::stats::dashboard))
        .route("/add-lead", post(handlers::stats::add_lead))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let leads_routes = Router::new()
        .route("/", get(handlers::leads::list_leads))
        .route("/import", post(handlers::leads::import_leads))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let agent_leads_routes = Router::new()
        .route(
            "/",
            post(handlers::leads::submit_agent_lead).get(handlers::leads::list_agent_leads),
        )
        .route("/{id}/review", post(handlers::leads::review_agent_lead))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dialer_routes = Router::new()
        .route("/next", get(handlers::dialer::next_lead))
        .route("/call", post(handlers::dialer::call))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let leaderboard_routes = Router::new()
        .route("/", get(handlers::leaderboard::ranking))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(handlers::webhook::health))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/attendance", attendance_routes)
        .nest("/api/stats", stats_routes)
        .nest("/api/leads", leads_routes)
        .nest("/api/agent-leads", agent_leads_routes)
        .nest("/api/dialer", dialer_routes)
        .nest("/api/leaderboard", leaderboard_routes)
        .nest("/api/webhook", webhook_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
