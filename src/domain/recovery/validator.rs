//! Strict parse and schema validation of an extracted fragment.
//!
//! Parsing goes through `serde_json::Value` so that schema failures can
//! name the week, day, flashcard or question that broke them.

use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

use super::RecoveryError;
use crate::domain::study::{
    Day, DomainObject, Flashcard, FlashcardRequest, FlashcardSet, GenerationRequest, Quiz,
    QuizQuestion, QuizRequest, StudyPlan, StudyPlanRequest, Week, MAX_CORRECT_INDEX,
    MAX_HOURS_PER_DAY, OPTIONS_PER_QUESTION,
};

/// Upper bound on days listed in a single week.
pub const MAX_DAYS_PER_WEEK: usize = 7;

type Object = Map<String, Value>;

/// Parses `fragment` and validates it against the schema of the request's kind.
pub fn parse_and_validate(
    fragment: &str,
    request: &GenerationRequest,
) -> Result<DomainObject, RecoveryError> {
    let value: Value = serde_json::from_str(fragment)?;

    match request {
        GenerationRequest::StudyPlan(r) => validate_study_plan(&value, r).map(Into::into),
        GenerationRequest::FlashcardSet(r) => validate_flashcards(&value, r).map(Into::into),
        GenerationRequest::Quiz(r) => validate_quiz(&value, r).map(Into::into),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Study plan
// ════════════════════════════════════════════════════════════════════════════

fn validate_study_plan(
    value: &Value,
    request: &StudyPlanRequest,
) -> Result<StudyPlan, RecoveryError> {
    let root = as_object(value, "plan")?;

    let title = required_text(root, "title", "plan")?;
    let overview = optional_text(root, "overview", "plan")?;

    let schedule = root
        .get("schedule")
        .and_then(Value::as_array)
        .ok_or_else(|| RecoveryError::schema("plan", "schedule must be an array"))?;
    if schedule.is_empty() {
        return Err(RecoveryError::schema("plan", "schedule has no weeks"));
    }

    let schedule = schedule
        .iter()
        .enumerate()
        .map(|(i, week)| validate_week(week, i + 1, request))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(expected) = week_count_mismatch(schedule.len(), request) {
        debug!(
            expected,
            actual = schedule.len(),
            "Study plan week count differs from the exam horizon"
        );
    }

    let tips = match root.get("tips") {
        None | Some(Value::Null) => Vec::new(),
        Some(tips) => string_list(tips, "tips")?,
    };

    Ok(StudyPlan {
        title,
        overview,
        schedule,
        tips,
    })
}

/// Weeks the request's exam horizon calls for, when the schedule has a
/// different number. Plans of any length are still accepted.
fn week_count_mismatch(weeks: usize, request: &StudyPlanRequest) -> Option<u32> {
    let expected = request.weeks();
    (weeks != expected as usize).then_some(expected)
}

fn validate_week(
    value: &Value,
    position: usize,
    request: &StudyPlanRequest,
) -> Result<Week, RecoveryError> {
    let location = format!("week {}", position);
    let week = as_object(value, &location)?;

    let number = match week.get("week") {
        None | Some(Value::Null) => position as u64,
        Some(n) => n.as_u64().ok_or_else(|| {
            RecoveryError::schema(&location, "week number must be a positive integer")
        })?,
    };
    if number != position as u64 {
        return Err(RecoveryError::schema(
            &location,
            format!("week number {} is out of sequence", number),
        ));
    }

    let focus = match week.get("focus") {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    };

    let days = week
        .get("days")
        .and_then(Value::as_array)
        .ok_or_else(|| RecoveryError::schema(&location, "days must be an array"))?;
    if days.is_empty() {
        return Err(RecoveryError::schema(&location, "week has no days"));
    }
    if days.len() > MAX_DAYS_PER_WEEK {
        return Err(RecoveryError::schema(
            &location,
            format!("week has {} days, at most {} allowed", days.len(), MAX_DAYS_PER_WEEK),
        ));
    }

    let days = days
        .iter()
        .enumerate()
        .map(|(i, day)| validate_day(day, &format!("{}, day {}", location, i + 1), request))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Week {
        week: position as u32,
        focus,
        days,
    })
}

fn validate_day(
    value: &Value,
    location: &str,
    request: &StudyPlanRequest,
) -> Result<Day, RecoveryError> {
    let day = as_object(value, location)?;

    let label = required_text(day, "day", location)?;
    let subjects = day_subjects(day.get("subjects"), location)?;
    let topics = match day.get("topics") {
        None | Some(Value::Null) => Vec::new(),
        Some(topics) => string_list(topics, location)?,
    };
    let hours = day_hours(day, location, request.hours_per_day)?;

    let completed = match day.get("completed") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return Err(RecoveryError::schema(location, "completed must be a boolean")),
    };

    let completed_topics = completed_topics(day.get("completedTopics"), topics.len(), location)?;
    let notes = optional_text(day, "notes", location)?;

    let mut result = Day::new(label, subjects, topics, hours);
    result.completed = completed;
    result.completed_topics = completed_topics;
    result.notes = notes;
    Ok(result)
}

/// Subjects may be a list or a single string; duplicates and blanks are dropped.
fn day_subjects(value: Option<&Value>, location: &str) -> Result<Vec<String>, RecoveryError> {
    let raw = match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(list @ Value::Array(_)) => string_list(list, location)?,
        _ => return Err(RecoveryError::schema(location, "subjects must be a list")),
    };

    let mut seen = BTreeSet::new();
    let subjects: Vec<String> = raw
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect();

    if subjects.is_empty() {
        return Err(RecoveryError::schema(location, "subjects is empty"));
    }
    Ok(subjects)
}

/// Reads `hours`, then `duration`, then falls back to the requested hours.
fn day_hours(day: &Object, location: &str, default: f64) -> Result<f64, RecoveryError> {
    let raw = match (day.get("hours"), day.get("duration")) {
        (Some(v), _) if !v.is_null() => v,
        (_, Some(v)) if !v.is_null() => v,
        _ => return Ok(default),
    };

    let hours = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
    .ok_or_else(|| RecoveryError::schema(location, "hours must be a number"))?;

    if !hours.is_finite() || hours <= 0.0 || hours > MAX_HOURS_PER_DAY {
        return Err(RecoveryError::schema(
            location,
            format!("hours must be within (0, {}], got {}", MAX_HOURS_PER_DAY, hours),
        ));
    }
    Ok(hours)
}

/// Parses the number at the start of strings like `"2h"`, `"1,5 horas"`.
fn leading_number(text: &str) -> Option<f64> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    digits.parse().ok()
}

fn completed_topics(
    value: Option<&Value>,
    topic_count: usize,
    location: &str,
) -> Result<BTreeSet<usize>, RecoveryError> {
    let items = match value {
        None | Some(Value::Null) => return Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(RecoveryError::schema(
                location,
                "completedTopics must be a list",
            ))
        }
    };

    items
        .iter()
        .map(|item| match item.as_u64() {
            Some(index) if (index as usize) < topic_count => Ok(index as usize),
            _ => Err(RecoveryError::schema(
                location,
                format!("completedTopics entry {} is not a topic index", item),
            )),
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Flashcards
// ════════════════════════════════════════════════════════════════════════════

fn validate_flashcards(
    value: &Value,
    request: &FlashcardRequest,
) -> Result<FlashcardSet, RecoveryError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(root) => root
            .get("flashcards")
            .and_then(Value::as_array)
            .ok_or_else(|| RecoveryError::schema("flashcards", "flashcards must be an array"))?,
        _ => {
            return Err(RecoveryError::schema(
                "flashcards",
                "expected an array or a flashcards wrapper",
            ))
        }
    };

    let expected = request.number_of_cards as usize;
    check_item_count(items.len(), expected, "flashcards")?;

    let flashcards = items
        .iter()
        .take(expected)
        .enumerate()
        .map(|(i, item)| {
            let location = format!("flashcard {}", i + 1);
            let card = as_object(item, &location)?;
            Ok(Flashcard::new(
                required_text(card, "question", &location)?,
                required_text(card, "answer", &location)?,
            ))
        })
        .collect::<Result<Vec<_>, RecoveryError>>()?;

    Ok(FlashcardSet::new(flashcards))
}

// ════════════════════════════════════════════════════════════════════════════
// Quiz
// ════════════════════════════════════════════════════════════════════════════

fn validate_quiz(value: &Value, request: &QuizRequest) -> Result<Quiz, RecoveryError> {
    let items = value
        .as_object()
        .and_then(|root| root.get("quiz"))
        .and_then(Value::as_array)
        .ok_or_else(|| RecoveryError::schema("quiz", "expected a quiz wrapper with an array"))?;

    let expected = request.number_of_questions as usize;
    check_item_count(items.len(), expected, "quiz")?;

    let questions = items
        .iter()
        .take(expected)
        .enumerate()
        .map(|(i, item)| validate_question(item, &format!("question {}", i + 1)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz::new(questions))
}

fn validate_question(value: &Value, location: &str) -> Result<QuizQuestion, RecoveryError> {
    let item = as_object(value, location)?;

    let question = required_text(item, "question", location)?;

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .filter(|options| options.len() == OPTIONS_PER_QUESTION)
        .ok_or_else(|| {
            RecoveryError::schema(
                location,
                format!("options must have exactly {} entries", OPTIONS_PER_QUESTION),
            )
        })?;
    let options: Vec<String> = options
        .iter()
        .map(|o| {
            o.as_str()
                .map(str::to_string)
                .ok_or_else(|| RecoveryError::schema(location, "options must be strings"))
        })
        .collect::<Result<_, _>>()?;
    let options: [String; OPTIONS_PER_QUESTION] = options.try_into().map_err(|_| {
        RecoveryError::schema(
            location,
            format!("options must have exactly {} entries", OPTIONS_PER_QUESTION),
        )
    })?;

    let correct = item
        .get("correct")
        .and_then(Value::as_u64)
        .filter(|c| *c <= u64::from(MAX_CORRECT_INDEX))
        .ok_or_else(|| {
            RecoveryError::schema(
                location,
                format!("correct must be an integer from 0 to {}", MAX_CORRECT_INDEX),
            )
        })? as u8;

    let explanation = item
        .get("explanation")
        .and_then(Value::as_str)
        .ok_or_else(|| RecoveryError::schema(location, "explanation must be a string"))?
        .to_string();

    Ok(QuizQuestion {
        question,
        options,
        correct,
        explanation,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn as_object<'a>(value: &'a Value, location: &str) -> Result<&'a Object, RecoveryError> {
    value
        .as_object()
        .ok_or_else(|| RecoveryError::schema(location, "expected an object"))
}

fn required_text(object: &Object, key: &str, location: &str) -> Result<String, RecoveryError> {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(RecoveryError::schema(location, format!("{} is empty", key))),
        Some(_) => Err(RecoveryError::schema(
            location,
            format!("{} must be a string", key),
        )),
        None => Err(RecoveryError::schema(location, format!("{} is missing", key))),
    }
}

fn optional_text(object: &Object, key: &str, location: &str) -> Result<String, RecoveryError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RecoveryError::schema(
            location,
            format!("{} must be a string", key),
        )),
    }
}

fn string_list(value: &Value, location: &str) -> Result<Vec<String>, RecoveryError> {
    value
        .as_array()
        .ok_or_else(|| RecoveryError::schema(location, "expected a list of strings"))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| RecoveryError::schema(location, "expected a list of strings"))
        })
        .collect()
}

fn check_item_count(found: usize, expected: usize, location: &str) -> Result<(), RecoveryError> {
    if found < expected {
        return Err(RecoveryError::schema(
            location,
            format!("expected {} items, found {}", expected, found),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recovery::ErrorKind;
    use chrono::NaiveDate;
    use serde_json::json;

    fn plan_request() -> GenerationRequest {
        StudyPlanRequest::new(
            vec!["Math".to_string()],
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            2.5,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .into()
    }

    fn schema_location(err: RecoveryError) -> String {
        match err {
            RecoveryError::Schema { location, .. } => location,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    fn question(options: Value, correct: Value) -> Value {
        json!({
            "question": "2 + 2?",
            "options": options,
            "correct": correct,
            "explanation": "Arithmetic"
        })
    }

    fn four_options() -> Value {
        json!(["A) 3", "B) 4", "C) 5", "D) 6"])
    }

    #[test]
    fn week_count_mismatch_reports_exam_horizon() {
        let GenerationRequest::StudyPlan(request) = plan_request() else {
            unreachable!()
        };

        assert_eq!(week_count_mismatch(1, &request), None);
        assert_eq!(week_count_mismatch(3, &request), Some(1));
    }

    #[test]
    fn schedule_longer_than_exam_horizon_is_still_accepted() {
        let week = json!({"days": [{"day": "Segunda-feira", "subjects": ["Math"]}]});
        let fragment = json!({"title": "Plano", "schedule": [week.clone(), week.clone(), week]})
            .to_string();

        let object = parse_and_validate(&fragment, &plan_request()).unwrap();

        assert_eq!(object.as_study_plan().unwrap().schedule.len(), 3);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_and_validate("{\"title\": ", &plan_request()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn accepts_minimal_study_plan_and_fills_defaults() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{
                "days": [{"day": "Segunda-feira", "subjects": "Math"}]
            }]
        })
        .to_string();

        let object = parse_and_validate(&fragment, &plan_request()).unwrap();
        let plan = object.as_study_plan().unwrap();
        let day = &plan.schedule[0].days[0];

        assert_eq!(plan.schedule[0].week, 1);
        assert_eq!(day.subjects, vec!["Math".to_string()]);
        assert!(day.topics.is_empty());
        assert!((day.hours - 2.5).abs() < f64::EPSILON);
        assert!(!day.completed);
        assert!(day.notes.is_empty());
        assert!(plan.tips.is_empty());
    }

    #[test]
    fn study_plan_requires_title_and_schedule() {
        let err = parse_and_validate(r#"{"schedule": []}"#, &plan_request()).unwrap_err();
        assert_eq!(schema_location(err), "plan");

        let err = parse_and_validate(r#"{"title": "Plano"}"#, &plan_request()).unwrap_err();
        assert_eq!(err.to_string(), "schema error at plan: schedule must be an array");
    }

    #[test]
    fn study_plan_errors_name_week_and_day() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [
                {"week": 1, "days": [{"day": "Segunda-feira", "subjects": ["Math"]}]},
                {"week": 2, "days": [
                    {"day": "Segunda-feira", "subjects": ["Math"]},
                    {"day": "Terça-feira", "subjects": []}
                ]}
            ]
        })
        .to_string();

        let err = parse_and_validate(&fragment, &plan_request()).unwrap_err();
        assert_eq!(schema_location(err), "week 2, day 2");
    }

    #[test]
    fn week_numbers_must_be_sequential() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{"week": 3, "days": [{"day": "Mon", "subjects": ["Math"]}]}]
        })
        .to_string();

        let err = parse_and_validate(&fragment, &plan_request()).unwrap_err();
        assert_eq!(schema_location(err), "week 1");
    }

    #[test]
    fn week_with_more_than_seven_days_is_rejected() {
        let days: Vec<Value> = (0..8)
            .map(|i| json!({"day": format!("Day {i}"), "subjects": ["Math"]}))
            .collect();
        let fragment = json!({"title": "Plano", "schedule": [{"days": days}]}).to_string();

        assert!(parse_and_validate(&fragment, &plan_request()).is_err());
    }

    #[test]
    fn day_hours_accept_duration_strings() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{"days": [
                {"day": "Mon", "subjects": ["Math"], "duration": "3h"},
                {"day": "Tue", "subjects": ["Math"], "hours": "1,5"},
                {"day": "Wed", "subjects": ["Math"], "hours": 4}
            ]}]
        })
        .to_string();

        let object = parse_and_validate(&fragment, &plan_request()).unwrap();
        let hours: Vec<f64> = object.as_study_plan().unwrap().schedule[0]
            .days
            .iter()
            .map(|d| d.hours)
            .collect();
        assert_eq!(hours, vec![3.0, 1.5, 4.0]);
    }

    #[test]
    fn day_hours_must_be_positive() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{"days": [{"day": "Mon", "subjects": ["Math"], "hours": 0}]}]
        })
        .to_string();
        assert!(parse_and_validate(&fragment, &plan_request()).is_err());
    }

    #[test]
    fn subjects_are_deduplicated() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{"days": [{"day": "Mon", "subjects": ["Math", " Math", "Physics"]}]}]
        })
        .to_string();

        let object = parse_and_validate(&fragment, &plan_request()).unwrap();
        assert_eq!(
            object.as_study_plan().unwrap().schedule[0].days[0].subjects,
            vec!["Math".to_string(), "Physics".to_string()]
        );
    }

    #[test]
    fn completed_topics_must_index_topics() {
        let fragment = json!({
            "title": "Plano",
            "schedule": [{"days": [{
                "day": "Mon",
                "subjects": ["Math"],
                "topics": ["Algebra"],
                "completedTopics": [1]
            }]}]
        })
        .to_string();
        assert!(parse_and_validate(&fragment, &plan_request()).is_err());
    }

    #[test]
    fn flashcards_accept_root_array_and_wrapper() {
        let request = FlashcardRequest::new("Rome", 1).into();

        let wrapped = r#"{"flashcards":[{"question":"Q1","answer":"A1"}]}"#;
        let bare = r#"[{"question":"Q1","answer":"A1"}]"#;

        let a = parse_and_validate(wrapped, &request).unwrap();
        let b = parse_and_validate(bare, &request).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_flashcards().unwrap().flashcards[0].answer, "A1");
    }

    #[test]
    fn flashcards_require_non_empty_fields() {
        let request = FlashcardRequest::new("Rome", 2).into();
        let fragment = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":" "}]"#;

        let err = parse_and_validate(fragment, &request).unwrap_err();
        assert_eq!(schema_location(err), "flashcard 2");
    }

    #[test]
    fn surplus_flashcards_are_truncated_and_shortfall_rejected() {
        let fragment = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]"#;

        let one = parse_and_validate(fragment, &FlashcardRequest::new("Rome", 1).into()).unwrap();
        assert_eq!(one.as_flashcards().unwrap().len(), 1);

        let err = parse_and_validate(fragment, &FlashcardRequest::new("Rome", 3).into())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SchemaError);
    }

    #[test]
    fn quiz_requires_wrapper() {
        let request = QuizRequest::new("Math", 1).into();
        let fragment = json!([question(four_options(), json!(1))]).to_string();
        assert!(parse_and_validate(&fragment, &request).is_err());
    }

    #[test]
    fn quiz_accepts_valid_questions() {
        let request = QuizRequest::new("Math", 1).into();
        let fragment = json!({"quiz": [question(four_options(), json!(1))]}).to_string();

        let object = parse_and_validate(&fragment, &request).unwrap();
        let quiz = object.as_quiz().unwrap();
        assert_eq!(quiz.quiz[0].correct_option(), Some("B) 4"));
    }

    #[test]
    fn quiz_rejects_wrong_option_count() {
        let request = QuizRequest::new("Math", 2).into();
        let fragment = json!({"quiz": [
            question(four_options(), json!(0)),
            question(json!(["A", "B", "C"]), json!(0))
        ]})
        .to_string();

        let err = parse_and_validate(&fragment, &request).unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema error at question 2: options must have exactly 4 entries"
        );
    }

    #[test]
    fn quiz_rejects_out_of_range_correct_index() {
        let request = QuizRequest::new("Math", 1).into();
        for correct in [json!(4), json!(-1), json!(1.5), json!("1")] {
            let fragment = json!({"quiz": [question(four_options(), correct)]}).to_string();
            let err = parse_and_validate(&fragment, &request).unwrap_err();
            assert_eq!(schema_location(err), "question 1");
        }
    }

    #[test]
    fn leading_number_reads_prefixes() {
        assert_eq!(leading_number("2h"), Some(2.0));
        assert_eq!(leading_number(" 1.5 hours"), Some(1.5));
        assert_eq!(leading_number("two"), None);
    }
}
