//! HTTP adapter for generation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, FlashcardsBody, HealthResponse, HoursInput, QuizBody, StudyPlanBody,
    SubjectsInput,
};
pub use handlers::{GenerationHandlers, RECOVERY_OUTCOME_HEADER};
pub use routes::generation_routes;
