//! HTTP request handlers

use super::types::{AskRequest, AskResponse, ContentResponse, ErrorResponse, HealthResponse};
use super::AppState;
use crate::content::{INTRO_MARKDOWN, NO_RESPONSE, SUGGESTIONS, WELCOME_MESSAGE};
use crate::llm::{LlmError, LlmRequest};
use crate::markdown;
use crate::prompt::SYSTEM_PROMPT;
use crate::question::{self, QuestionError};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        // Liveness
        .route("/health", get(health))
        // Ask proxy
        .route("/api/ask", post(ask))
        // Site copy
        .route("/api/content", get(site_content))
        // Version
        .route("/version", get(get_version))
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

// ============================================================
// Liveness
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ============================================================
// Ask proxy
// ============================================================

async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable ask body");
            AskRequest::default()
        }
    };

    let question = question::validate(request.question_str().unwrap_or_default())?;

    let Some(llm) = state.llm.as_ref() else {
        tracing::error!("OPENROUTER_API_KEY not configured");
        return Err(AppError::Internal("API key not configured".to_string()));
    };

    let response = llm
        .complete(&LlmRequest::single(SYSTEM_PROMPT, question))
        .await
        .map_err(AppError::from)?;

    Ok(Json(AskResponse {
        answer: Some(response.text.unwrap_or_else(|| NO_RESPONSE.to_string())),
    }))
}

// ============================================================
// Site copy
// ============================================================

async fn site_content() -> Json<ContentResponse> {
    Json(ContentResponse {
        welcome: WELCOME_MESSAGE.to_string(),
        suggestions: SUGGESTIONS.iter().map(ToString::to_string).collect(),
        intro_markdown: INTRO_MARKDOWN.to_string(),
        intro_html: markdown::to_html(INTRO_MARKDOWN),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("portfolio-chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
    /// Provider answered with a non-success status; relayed as-is
    Upstream { status: StatusCode, details: String },
}

impl From<QuestionError> for AppError {
    fn from(err: QuestionError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err.status.and_then(|s| StatusCode::from_u16(s).ok()) {
            Some(status) => AppError::Upstream {
                status,
                details: err.message,
            },
            // Cause already logged by the logging service
            None => AppError::Internal("Error processing question".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(msg)),
            AppError::Upstream { status, details } => (
                status,
                ErrorResponse::new("Error from completion provider").with_details(details),
            ),
        };

        (status, Json(body)).into_response()
    }
}
