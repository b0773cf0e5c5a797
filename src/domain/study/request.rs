//! Generation requests - the typed input for one generation run.
//!
//! A request is created by the caller, validated once, and consumed by a
//! single provider call plus recovery pipeline run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DomainKind;
use crate::domain::foundation::ValidationError;

/// Upper bound for card and question counts.
pub const MAX_ITEMS_PER_REQUEST: u32 = 50;

/// Default quiz length when the caller does not specify one.
pub const DEFAULT_QUIZ_QUESTIONS: u32 = 10;

/// Maximum study hours per day accepted for a plan.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// A request to generate one domain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationRequest {
    StudyPlan(StudyPlanRequest),
    FlashcardSet(FlashcardRequest),
    Quiz(QuizRequest),
}

impl GenerationRequest {
    /// Returns the domain kind this request produces.
    pub fn kind(&self) -> DomainKind {
        match self {
            GenerationRequest::StudyPlan(_) => DomainKind::StudyPlan,
            GenerationRequest::FlashcardSet(_) => DomainKind::FlashcardSet,
            GenerationRequest::Quiz(_) => DomainKind::Quiz,
        }
    }

    /// Validates required fields and ranges.
    ///
    /// Must pass before any provider call is made.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            GenerationRequest::StudyPlan(r) => r.validate(),
            GenerationRequest::FlashcardSet(r) => r.validate(),
            GenerationRequest::Quiz(r) => r.validate(),
        }
    }

    /// Number of list items the caller expects back, if the kind has one.
    pub fn expected_items(&self) -> Option<usize> {
        match self {
            GenerationRequest::StudyPlan(_) => None,
            GenerationRequest::FlashcardSet(r) => Some(r.number_of_cards as usize),
            GenerationRequest::Quiz(r) => Some(r.number_of_questions as usize),
        }
    }
}

impl From<StudyPlanRequest> for GenerationRequest {
    fn from(request: StudyPlanRequest) -> Self {
        GenerationRequest::StudyPlan(request)
    }
}

impl From<FlashcardRequest> for GenerationRequest {
    fn from(request: FlashcardRequest) -> Self {
        GenerationRequest::FlashcardSet(request)
    }
}

impl From<QuizRequest> for GenerationRequest {
    fn from(request: QuizRequest) -> Self {
        GenerationRequest::Quiz(request)
    }
}

/// Parameters for a study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanRequest {
    /// Main subjects to cover.
    pub subjects: Vec<String>,
    /// Optional finer-grained topics, free text.
    pub sub_subjects: Option<String>,
    /// Date of the exam.
    pub exam_date: NaiveDate,
    /// Study hours available per day.
    pub hours_per_day: f64,
    /// Self-reported difficulty level.
    pub difficulty: String,
    /// What the student wants to achieve.
    pub goal: String,
    /// Date the request was made; anchors the week computation.
    pub as_of: NaiveDate,
}

impl StudyPlanRequest {
    /// Creates a plan request with empty difficulty and goal.
    pub fn new(
        subjects: Vec<String>,
        exam_date: NaiveDate,
        hours_per_day: f64,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            subjects,
            sub_subjects: None,
            exam_date,
            hours_per_day,
            difficulty: String::new(),
            goal: String::new(),
            as_of,
        }
    }

    /// Sets the sub-subjects.
    pub fn with_sub_subjects(mut self, sub_subjects: impl Into<String>) -> Self {
        self.sub_subjects = Some(sub_subjects.into());
        self
    }

    /// Sets the difficulty.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Sets the goal.
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Calendar days between `as_of` and the exam. Negative when the exam
    /// date has passed.
    pub fn days_until_exam(&self) -> i64 {
        (self.exam_date - self.as_of).num_days()
    }

    /// Number of plan weeks: `ceil(max(1, days_until_exam) / 7)`.
    pub fn weeks(&self) -> u32 {
        let days = self.days_until_exam().max(1);
        ((days + 6) / 7) as u32
    }

    /// Subjects joined for display.
    pub fn subjects_label(&self) -> String {
        self.subjects.join(", ")
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.subjects.iter().all(|s| s.trim().is_empty()) {
            return Err(ValidationError::empty_field("subjects"));
        }
        if !self.hours_per_day.is_finite()
            || self.hours_per_day <= 0.0
            || self.hours_per_day > MAX_HOURS_PER_DAY
        {
            return Err(ValidationError::out_of_range(
                "hoursPerDay",
                0.0,
                MAX_HOURS_PER_DAY,
                self.hours_per_day,
            ));
        }
        Ok(())
    }
}

/// Parameters for a flashcard set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardRequest {
    pub theme: String,
    pub number_of_cards: u32,
}

impl FlashcardRequest {
    pub fn new(theme: impl Into<String>, number_of_cards: u32) -> Self {
        Self {
            theme: theme.into(),
            number_of_cards,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.theme.trim().is_empty() {
            return Err(ValidationError::empty_field("theme"));
        }
        check_count("numberOfCards", self.number_of_cards)
    }
}

/// Parameters for a multiple-choice quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    pub number_of_questions: u32,
}

impl QuizRequest {
    pub fn new(topic: impl Into<String>, number_of_questions: u32) -> Self {
        Self {
            topic: topic.into(),
            number_of_questions,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        check_count("numberOfQuestions", self.number_of_questions)
    }
}

fn check_count(field: &str, count: u32) -> Result<(), ValidationError> {
    if count == 0 || count > MAX_ITEMS_PER_REQUEST {
        return Err(ValidationError::out_of_range(
            field,
            1.0,
            f64::from(MAX_ITEMS_PER_REQUEST),
            f64::from(count),
        ));
    }
    Ok(())
}

/// Parses an exam date given as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_exam_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_format("examDate", "expected YYYY-MM-DD"))
}
