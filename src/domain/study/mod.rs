//! Study module - requests and the domain objects generated from them.
//!
//! A [`GenerationRequest`] is tagged by [`DomainKind`] and yields exactly one
//! [`DomainObject`]: a study plan, a flashcard set or a quiz.

mod cache_key;
mod flashcard;
mod locale;
mod object;
mod plan;
mod prompt;
mod quiz;
mod request;

pub use cache_key::CacheKey;
pub use flashcard::{Flashcard, FlashcardSet};
pub use locale::Locale;
pub use object::{DomainKind, DomainObject};
pub use plan::{Day, StudyPlan, Week};
pub use prompt::build_prompt;
pub use quiz::{Quiz, QuizQuestion, MAX_CORRECT_INDEX, OPTIONS_PER_QUESTION};
pub use request::{
    parse_exam_date, FlashcardRequest, GenerationRequest, QuizRequest, StudyPlanRequest,
    DEFAULT_QUIZ_QUESTIONS, MAX_HOURS_PER_DAY, MAX_ITEMS_PER_REQUEST,
};
