use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia é fixa: 401 autenticação, 403 autorização, 404 não encontrado,
// 400 validação/conflito, 500 para todo o resto.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(String),

    // Conflito de estado (check-in duplicado, lead já revisado, check-out
    // repetido). Responde 400, não 409.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::ValidationError(errors) => {
                let detail: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(_, field_errors)| {
                        field_errors
                            .iter()
                            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    })
                    .collect();
                let message = if detail.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    detail.join("; ")
                };
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Usuário ou senha inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado.", entity))
            }
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::Conflict(message) => (StatusCode::BAD_REQUEST, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),

            // Todos os outros erros (DatabaseError, InternalServerError etc.)
            // viram 500. O detalhe vai para o log, nunca para o cliente.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "status": "error", "message": message }));
        (status, body).into_response()
    }
}
