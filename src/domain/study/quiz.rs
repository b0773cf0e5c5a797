//! Multiple-choice quiz domain object.

use serde::{Deserialize, Serialize};

/// Number of options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Highest valid value for [`QuizQuestion::correct`].
pub const MAX_CORRECT_INDEX: u8 = (OPTIONS_PER_QUESTION - 1) as u8;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// 0-based index into `options`.
    pub correct: u8,
    pub explanation: String,
}

impl QuizQuestion {
    /// The text of the correct option.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct as usize).map(String::as_str)
    }
}

/// An ordered quiz. Serializes as `{"quiz": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(quiz: Vec<QuizQuestion>) -> Self {
        Self { quiz }
    }

    pub fn len(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quiz.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: u8) -> QuizQuestion {
        QuizQuestion {
            question: "2 + 2?".to_string(),
            options: ["3".into(), "4".into(), "5".into(), "6".into()],
            correct,
            explanation: "Arithmetic".to_string(),
        }
    }

    #[test]
    fn correct_option_returns_indexed_text() {
        assert_eq!(question(1).correct_option(), Some("4"));
    }

    #[test]
    fn quiz_serializes_with_wrapper() {
        let quiz = Quiz::new(vec![question(1)]);
        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["quiz"][0]["options"].as_array().unwrap().len(), 4);
        assert_eq!(json["quiz"][0]["correct"], 1);
    }
}
