//! Store action errors.

use thiserror::Error;

use crate::domain::foundation::{DeckId, FlashcardId, PlanId};

/// Errors returned by [`StudyState`](super::StudyState) actions.
///
/// A failed action leaves the snapshot it was called on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("study plan {0} not found")]
    PlanNotFound(PlanId),

    #[error("plan has no week {week}, day {day}")]
    DayNotFound { week: usize, day: usize },

    #[error("topic {index} is out of range for a day with {count} topics")]
    TopicOutOfRange { index: usize, count: usize },

    #[error("deck {0} not found")]
    DeckNotFound(DeckId),

    #[error("flashcard {0} not found")]
    FlashcardNotFound(FlashcardId),

    #[error("deck name cannot be empty")]
    EmptyDeckName,
}
