//! Prompt construction for the provider call.
//!
//! Each prompt embeds the request parameters, the exact JSON shape the
//! recovery pipeline validates against, and an instruction to answer with
//! JSON only.

use super::{FlashcardRequest, GenerationRequest, Locale, QuizRequest, StudyPlanRequest};

/// Builds the single user-role prompt for a request.
pub fn build_prompt(request: &GenerationRequest, locale: Locale) -> String {
    match request {
        GenerationRequest::StudyPlan(r) => study_plan_prompt(r, locale),
        GenerationRequest::FlashcardSet(r) => flashcards_prompt(r, locale),
        GenerationRequest::Quiz(r) => quiz_prompt(r, locale),
    }
}

fn study_plan_prompt(request: &StudyPlanRequest, locale: Locale) -> String {
    let weeks = request.weeks();
    let labels = locale.weekday_labels();

    let sub_subjects_line = request
        .sub_subjects
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!("- Specific sub-topics: {}\n", s))
        .unwrap_or_default();

    let sub_subjects_guidance = if sub_subjects_line.is_empty() {
        "- Focus on the general topics of the main subjects."
    } else {
        "- Use the sub-topics to create specific, detailed topics.\n\
         - Order the schedule following the logical progression of the sub-topics.\n\
         - Include reviews that connect related sub-topics."
    };

    format!(
        r#"You are an expert in education and study planning. Create a detailed, personalized study plan.

STUDENT DATA:
- Subjects: {subjects}
{sub_subjects_line}- Exam date: {exam_date} ({days} days left)
- Hours available per day: {hours}h
- Level: {difficulty}
- Goal: {goal}
- Plan length: {weeks} weeks

THE PLAN MUST CONTAIN:
1. A motivating title
2. An overview of the plan
3. A weekly schedule with exactly {weeks} weeks, each with 7 days ({first_day} to {last_day}), listing subjects, specific topics and study hours per day
4. Tips tailored to the goal

SUB-TOPICS:
{sub_subjects_guidance}

Write all text in {language}.

JSON STRUCTURE:
{{
  "title": "Plan title",
  "overview": "General description",
  "schedule": [
    {{
      "week": 1,
      "days": [
        {{
          "day": "{first_day}",
          "subjects": ["Subject"],
          "topics": ["Topic 1", "Topic 2"],
          "hours": {hours},
          "completed": false,
          "completedTopics": [],
          "notes": ""
        }}
      ]
    }}
  ],
  "tips": ["Tip 1", "Tip 2", "Tip 3"]
}}

Respond with JSON only, no additional text."#,
        subjects = request.subjects_label(),
        sub_subjects_line = sub_subjects_line,
        exam_date = request.exam_date.format("%Y-%m-%d"),
        days = request.days_until_exam().max(0),
        hours = request.hours_per_day,
        difficulty = request.difficulty,
        goal = request.goal,
        weeks = weeks,
        first_day = labels[0],
        last_day = labels[6],
        sub_subjects_guidance = sub_subjects_guidance,
        language = locale.language_name(),
    )
}

fn flashcards_prompt(request: &FlashcardRequest, locale: Locale) -> String {
    format!(
        r#"You are an expert educator. Create exactly {count} educational flashcards about "{theme}".

INSTRUCTIONS:
- Each flashcard has a specific question and a complete, factually correct answer
- Focus on important concepts, dates, people, events and definitions
- Vary the kinds of questions
- Write all text in {language}

Respond with JSON only, no additional text:
{{
  "flashcards": [
    {{
      "question": "A specific question about {theme}",
      "answer": "A detailed, educational answer"
    }}
  ]
}}"#,
        count = request.number_of_cards,
        theme = request.theme,
        language = locale.language_name(),
    )
}

fn quiz_prompt(request: &QuizRequest, locale: Locale) -> String {
    format!(
        r#"Create exactly {count} multiple-choice questions about "{topic}".

INSTRUCTIONS:
- Every question has exactly 4 options (A, B, C, D)
- Exactly one option is correct
- Questions are clear and specific to "{topic}"
- Vary the difficulty
- Include an educational explanation for each question
- Write all text in {language}

Respond with JSON only, no additional text:
{{
  "quiz": [
    {{
      "question": "A specific question about {topic}",
      "options": ["A) First option", "B) Second option", "C) Third option", "D) Fourth option"],
      "correct": 1,
      "explanation": "Why the answer is correct"
    }}
  ]
}}

NOTE: "correct" is the 0-based index of the correct option (0=A, 1=B, 2=C, 3=D)."#,
        count = request.number_of_questions,
        topic = request.topic,
        language = locale.language_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn plan_request() -> StudyPlanRequest {
        StudyPlanRequest::new(
            vec!["Math".to_string(), "Physics".to_string()],
            NaiveDate::from_ymd_opt(2024, 3, 22).unwrap(),
            3.0,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
        .with_goal("pass the entrance exam")
    }

    #[test]
    fn study_plan_prompt_embeds_parameters_and_weeks() {
        let prompt = build_prompt(&plan_request().into(), Locale::En);

        assert!(prompt.contains("Math, Physics"));
        assert!(prompt.contains("exactly 3 weeks"));
        assert!(prompt.contains("21 days left"));
        assert!(prompt.contains("pass the entrance exam"));
        assert!(prompt.contains("Respond with JSON only"));
        assert!(prompt.contains("Focus on the general topics"));
    }

    #[test]
    fn study_plan_prompt_uses_sub_subjects_when_given() {
        let request = plan_request().with_sub_subjects("Derivatives, Kinematics");
        let prompt = build_prompt(&request.into(), Locale::PtBr);

        assert!(prompt.contains("Specific sub-topics: Derivatives, Kinematics"));
        assert!(prompt.contains("logical progression"));
        assert!(prompt.contains("Segunda-feira"));
    }

    #[test]
    fn flashcards_prompt_states_count_and_theme() {
        let prompt = build_prompt(&FlashcardRequest::new("Roman Empire", 8).into(), Locale::En);
        assert!(prompt.contains("exactly 8 educational flashcards"));
        assert!(prompt.contains("\"Roman Empire\""));
        assert!(prompt.contains("\"flashcards\""));
    }

    #[test]
    fn quiz_prompt_explains_correct_index() {
        let prompt = build_prompt(&QuizRequest::new("Photosynthesis", 5).into(), Locale::En);
        assert!(prompt.contains("exactly 5 multiple-choice questions"));
        assert!(prompt.contains("0-based index"));
    }
}
