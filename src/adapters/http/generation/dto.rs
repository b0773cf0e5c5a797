//! HTTP DTOs (Data Transfer Objects) for generation endpoints.
//!
//! Request bodies keep every field optional so that a missing field is
//! reported as an invalid request with a readable message rather than a
//! deserialization failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::study::{
    parse_exam_date, FlashcardRequest, GenerationRequest, QuizRequest, StudyPlanRequest,
    DEFAULT_QUIZ_QUESTIONS,
};
use crate::ports::ProviderInfo;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/generate-study-plan`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanBody {
    pub subjects: Option<SubjectsInput>,
    pub sub_subjects: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub exam_date: Option<String>,
    pub hours_per_day: Option<HoursInput>,
    pub difficulty: Option<String>,
    pub goal: Option<String>,
}

/// Subjects as a JSON array or a comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubjectsInput {
    List(Vec<String>),
    Text(String),
}

impl SubjectsInput {
    fn into_subjects(self) -> Vec<String> {
        let raw = match self {
            SubjectsInput::List(list) => list,
            SubjectsInput::Text(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Hours as a number or a numeric string (HTML form values arrive as text).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HoursInput {
    Number(f64),
    Text(String),
}

impl HoursInput {
    fn into_hours(self) -> Result<f64, ValidationError> {
        match self {
            HoursInput::Number(n) => Ok(n),
            HoursInput::Text(text) => text
                .trim()
                .replace(',', ".")
                .parse()
                .map_err(|_| ValidationError::invalid_format("hoursPerDay", "expected a number")),
        }
    }
}

impl StudyPlanBody {
    /// Converts the body into a request anchored at `as_of`.
    pub fn into_request(self, as_of: NaiveDate) -> Result<GenerationRequest, ValidationError> {
        let subjects = self
            .subjects
            .map(SubjectsInput::into_subjects)
            .unwrap_or_default();
        if subjects.is_empty() {
            return Err(ValidationError::empty_field("subjects"));
        }

        let exam_date = match self.exam_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_exam_date(raw)?,
            _ => return Err(ValidationError::empty_field("examDate")),
        };

        let hours_per_day = self
            .hours_per_day
            .ok_or_else(|| ValidationError::empty_field("hoursPerDay"))?
            .into_hours()?;

        let mut request = StudyPlanRequest::new(subjects, exam_date, hours_per_day, as_of)
            .with_difficulty(self.difficulty.unwrap_or_default())
            .with_goal(self.goal.unwrap_or_default());
        if let Some(sub_subjects) = self.sub_subjects.filter(|s| !s.trim().is_empty()) {
            request = request.with_sub_subjects(sub_subjects);
        }

        Ok(request.into())
    }
}

/// Body of `POST /api/generate-flashcards`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardsBody {
    pub theme: Option<String>,
    pub number_of_cards: Option<u32>,
}

impl FlashcardsBody {
    pub fn into_request(self) -> Result<GenerationRequest, ValidationError> {
        let theme = self
            .theme
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::empty_field("theme"))?;
        let count = self
            .number_of_cards
            .ok_or_else(|| ValidationError::empty_field("numberOfCards"))?;

        Ok(FlashcardRequest::new(theme.trim(), count).into())
    }
}

/// Body of `POST /api/generate-quiz`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizBody {
    pub topic: Option<String>,
    pub number_of_questions: Option<u32>,
}

impl QuizBody {
    pub fn into_request(self) -> Result<GenerationRequest, ValidationError> {
        let topic = self
            .topic
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ValidationError::empty_field("topic"))?;
        let count = self.number_of_questions.unwrap_or(DEFAULT_QUIZ_QUESTIONS);

        Ok(QuizRequest::new(topic.trim(), count).into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INVALID_REQUEST".to_string(),
        }
    }

    pub fn provider_error(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "PROVIDER_ERROR".to_string(),
        }
    }

    pub fn provider_timeout(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "PROVIDER_TIMEOUT".to_string(),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}

impl From<&ProviderInfo> for HealthResponse {
    fn from(info: &ProviderInfo) -> Self {
        Self {
            status: "ok".to_string(),
            provider: info.name.clone(),
            model: info.model.clone(),
        }
    }
}
