//! HTTP handlers for generation endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::application::handlers::generation::{
    GenerateCommand, GenerateHandler, GenerateResult, GenerationError,
};
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::study::GenerationRequest;
use crate::ports::ProviderInfo;

use super::dto::{ErrorResponse, FlashcardsBody, HealthResponse, QuizBody, StudyPlanBody};

/// Header naming where the returned object came from.
pub const RECOVERY_OUTCOME_HEADER: &str = "x-recovery-outcome";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct GenerationHandlers {
    generate_handler: Arc<GenerateHandler>,
    provider_info: ProviderInfo,
}

impl GenerationHandlers {
    pub fn new(generate_handler: Arc<GenerateHandler>, provider_info: ProviderInfo) -> Self {
        Self {
            generate_handler,
            provider_info,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/generate-study-plan - Generate a weekly study plan
pub async fn generate_study_plan(
    State(handlers): State<GenerationHandlers>,
    body: Result<Json<StudyPlanBody>, JsonRejection>,
) -> Response {
    let as_of = Timestamp::now().date();
    let request = body
        .map_err(reject_body)
        .and_then(|Json(b)| b.into_request(as_of).map_err(invalid_request));
    run(&handlers, request).await
}

/// POST /api/generate-flashcards - Generate a flashcard set
pub async fn generate_flashcards(
    State(handlers): State<GenerationHandlers>,
    body: Result<Json<FlashcardsBody>, JsonRejection>,
) -> Response {
    let request = body
        .map_err(reject_body)
        .and_then(|Json(b)| b.into_request().map_err(invalid_request));
    run(&handlers, request).await
}

/// POST /api/generate-quiz - Generate a multiple-choice quiz
pub async fn generate_quiz(
    State(handlers): State<GenerationHandlers>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> Response {
    let request = body
        .map_err(reject_body)
        .and_then(|Json(b)| b.into_request().map_err(invalid_request));
    run(&handlers, request).await
}

/// GET /api/health - Liveness plus the configured provider
pub async fn health(State(handlers): State<GenerationHandlers>) -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse::from(&handlers.provider_info)),
    )
        .into_response()
}

async fn run(
    handlers: &GenerationHandlers,
    request: Result<GenerationRequest, Response>,
) -> Response {
    let request = match request {
        Ok(request) => request,
        Err(response) => return response,
    };

    let cmd = GenerateCommand::new(request);
    info!(kind = %cmd.request.kind(), trace_id = %cmd.trace_id, "Generation requested");

    match handlers.generate_handler.handle(cmd).await {
        Ok(result) => generated(result),
        Err(e) => handle_generation_error(e),
    }
}

fn generated(result: GenerateResult) -> Response {
    let outcome = HeaderValue::from_static(result.source.as_str());
    (
        StatusCode::OK,
        [(HeaderName::from_static(RECOVERY_OUTCOME_HEADER), outcome)],
        Json(result.object),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn reject_body(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "Rejected generation request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}

fn invalid_request(error: ValidationError) -> Response {
    handle_generation_error(GenerationError::InvalidRequest(error))
}

fn handle_generation_error(error: GenerationError) -> Response {
    let message = error.to_string();
    match error {
        GenerationError::InvalidRequest(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        GenerationError::Provider(_) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::provider_error(message)),
        )
            .into_response(),
        GenerationError::ProviderTimeout => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::provider_timeout(message)),
        )
            .into_response(),
    }
}
