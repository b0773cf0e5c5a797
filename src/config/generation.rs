//! Generation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::study::Locale;

/// Per-kind token budgets and output settings
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Language of synthesized placeholder content
    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_study_plan_max_tokens")]
    pub study_plan_max_tokens: u32,

    #[serde(default = "default_flashcards_max_tokens")]
    pub flashcards_max_tokens: u32,

    #[serde(default = "default_quiz_max_tokens")]
    pub quiz_max_tokens: u32,

    /// Sampling temperature; provider default when unset
    pub temperature: Option<f32>,

    /// Reuse flashcard results for repeated theme and count
    #[serde(default = "default_cache_flashcards")]
    pub cache_flashcards: bool,
}

impl GenerationConfig {
    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.study_plan_max_tokens == 0 {
            return Err(ValidationError::ZeroTokenBudget("study_plan_max_tokens"));
        }
        if self.flashcards_max_tokens == 0 {
            return Err(ValidationError::ZeroTokenBudget("flashcards_max_tokens"));
        }
        if self.quiz_max_tokens == 0 {
            return Err(ValidationError::ZeroTokenBudget("quiz_max_tokens"));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ValidationError::InvalidTemperature);
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            study_plan_max_tokens: default_study_plan_max_tokens(),
            flashcards_max_tokens: default_flashcards_max_tokens(),
            quiz_max_tokens: default_quiz_max_tokens(),
            temperature: None,
            cache_flashcards: default_cache_flashcards(),
        }
    }
}

fn default_study_plan_max_tokens() -> u32 {
    4000
}

fn default_flashcards_max_tokens() -> u32 {
    2000
}

fn default_quiz_max_tokens() -> u32 {
    4000
}

fn default_cache_flashcards() -> bool {
    true
}
