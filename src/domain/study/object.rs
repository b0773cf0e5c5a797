//! Domain objects produced by a generation run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FlashcardSet, Quiz, StudyPlan};

/// Tag identifying which domain object a request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    StudyPlan,
    FlashcardSet,
    Quiz,
}

impl DomainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKind::StudyPlan => "study_plan",
            DomainKind::FlashcardSet => "flashcard_set",
            DomainKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated structured result.
///
/// Serializes as the bare inner object so HTTP callers see the same shape
/// whichever recovery path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainObject {
    StudyPlan(StudyPlan),
    FlashcardSet(FlashcardSet),
    Quiz(Quiz),
}

impl DomainObject {
    pub fn kind(&self) -> DomainKind {
        match self {
            DomainObject::StudyPlan(_) => DomainKind::StudyPlan,
            DomainObject::FlashcardSet(_) => DomainKind::FlashcardSet,
            DomainObject::Quiz(_) => DomainKind::Quiz,
        }
    }

    pub fn as_study_plan(&self) -> Option<&StudyPlan> {
        match self {
            DomainObject::StudyPlan(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn as_flashcards(&self) -> Option<&FlashcardSet> {
        match self {
            DomainObject::FlashcardSet(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_quiz(&self) -> Option<&Quiz> {
        match self {
            DomainObject::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }
}

impl From<StudyPlan> for DomainObject {
    fn from(plan: StudyPlan) -> Self {
        DomainObject::StudyPlan(plan)
    }
}

impl From<FlashcardSet> for DomainObject {
    fn from(set: FlashcardSet) -> Self {
        DomainObject::FlashcardSet(set)
    }
}

impl From<Quiz> for DomainObject {
    fn from(quiz: Quiz) -> Self {
        DomainObject::Quiz(quiz)
    }
}
