//! HTTP routes for generation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_flashcards, generate_quiz, generate_study_plan, health, GenerationHandlers,
};

/// Creates the generation router, mounted under `/api`.
pub fn generation_routes(handlers: GenerationHandlers) -> Router {
    Router::new()
        .route("/api/generate-study-plan", post(generate_study_plan))
        .route("/api/generate-flashcards", post(generate_flashcards))
        .route("/api/generate-quiz", post(generate_quiz))
        .route("/api/health", get(health))
        .with_state(handlers)
}
