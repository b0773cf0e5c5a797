//! Deterministic placeholder objects.
//!
//! Built from the request alone, so the same request always yields the same
//! object and the result is schema-valid without another validation pass.

use crate::domain::study::{
    Day, DomainObject, Flashcard, FlashcardRequest, FlashcardSet, GenerationRequest, Locale, Quiz,
    QuizQuestion, QuizRequest, StudyPlan, StudyPlanRequest, Week,
};

/// Index of the correct option in synthesized questions.
pub const FALLBACK_CORRECT_INDEX: u8 = 1;

/// Builds the placeholder object for `request`.
pub fn synthesize(request: &GenerationRequest, locale: Locale) -> DomainObject {
    match request {
        GenerationRequest::StudyPlan(r) => study_plan(r, locale).into(),
        GenerationRequest::FlashcardSet(r) => flashcards(r, locale).into(),
        GenerationRequest::Quiz(r) => quiz(r, locale).into(),
    }
}

fn study_plan(request: &StudyPlanRequest, locale: Locale) -> StudyPlan {
    let subjects = fallback_subjects(request);
    let label = subjects.join(", ");
    let text = Templates::for_locale(locale);

    let days = locale
        .weekday_labels()
        .iter()
        .enumerate()
        .map(|(i, weekday)| {
            Day::new(
                *weekday,
                subjects.clone(),
                vec![format!("{} {}", text.topic, i + 1)],
                request.hours_per_day,
            )
        })
        .collect();

    let overview = if request.goal.trim().is_empty() {
        format!("{} {}", text.overview, label)
    } else {
        format!("{} {} ({})", text.overview, label, request.goal.trim())
    };

    StudyPlan {
        title: format!("{} - {}", text.plan_title, label),
        overview,
        schedule: vec![Week {
            week: 1,
            focus: Some(format!("{} 1", text.week)),
            days,
        }],
        tips: text.tips.iter().map(|t| t.to_string()).collect(),
    }
}

fn fallback_subjects(request: &StudyPlanRequest) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for subject in request.subjects.iter().map(|s| s.trim()) {
        if !subject.is_empty() && !subjects.iter().any(|s| s == subject) {
            subjects.push(subject.to_string());
        }
    }
    subjects
}

fn flashcards(request: &FlashcardRequest, locale: Locale) -> FlashcardSet {
    let text = Templates::for_locale(locale);
    let theme = request.theme.trim();

    FlashcardSet::new(
        (1..=request.number_of_cards)
            .map(|i| {
                Flashcard::new(
                    format!("{} {} {} {}", text.question, i, text.about, theme),
                    format!("{} {} {} {}", text.answer, i, text.about, theme),
                )
            })
            .collect(),
    )
}

fn quiz(request: &QuizRequest, locale: Locale) -> Quiz {
    let text = Templates::for_locale(locale);
    let topic = request.topic.trim();

    Quiz::new(
        (1..=request.number_of_questions)
            .map(|i| QuizQuestion {
                question: format!("{} {} {} {}", text.quiz_question, i, text.about, topic),
                options: ["A", "B", "C", "D"]
                    .map(|letter| format!("{letter}) {} {letter} {} {i}", text.option, text.of_question)),
                correct: FALLBACK_CORRECT_INDEX,
                explanation: format!("{} {} {} {}", text.explanation, i, text.about, topic),
            })
            .collect(),
    )
}

struct Templates {
    plan_title: &'static str,
    overview: &'static str,
    week: &'static str,
    topic: &'static str,
    tips: [&'static str; 3],
    question: &'static str,
    answer: &'static str,
    about: &'static str,
    quiz_question: &'static str,
    option: &'static str,
    of_question: &'static str,
    explanation: &'static str,
}

impl Templates {
    fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::PtBr => Self {
                plan_title: "Plano de Estudos",
                overview: "Plano personalizado para",
                week: "Semana",
                topic: "Tópico",
                tips: [
                    "Mantenha uma rotina consistente de estudos",
                    "Faça pausas regulares para descansar",
                    "Revise o conteúdo regularmente",
                ],
                question: "Pergunta",
                answer: "Resposta",
                about: "sobre",
                quiz_question: "Questão",
                option: "Alternativa",
                of_question: "da questão",
                explanation: "Explicação para a questão",
            },
            Locale::En => Self {
                plan_title: "Study Plan",
                overview: "Personalized plan for",
                week: "Week",
                topic: "Topic",
                tips: [
                    "Keep a consistent study routine",
                    "Take regular breaks to rest",
                    "Review the material regularly",
                ],
                question: "Question",
                answer: "Answer",
                about: "about",
                quiz_question: "Question",
                option: "Option",
                of_question: "of question",
                explanation: "Explanation for question",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::study::{MAX_CORRECT_INDEX, OPTIONS_PER_QUESTION};
    use chrono::NaiveDate;

    fn plan_request() -> StudyPlanRequest {
        StudyPlanRequest::new(
            vec!["Math".to_string(), "Physics".to_string(), "Math".to_string()],
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            3.0,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn study_plan_has_one_week_of_seven_days() {
        let object = synthesize(&plan_request().into(), Locale::PtBr);
        let plan = object.as_study_plan().unwrap();

        assert_eq!(plan.schedule.len(), 1);
        assert_eq!(plan.schedule[0].week, 1);
        assert_eq!(plan.schedule[0].days.len(), 7);
        assert_eq!(plan.tips.len(), 3);
        assert_eq!(plan.title, "Plano de Estudos - Math, Physics");
    }

    #[test]
    fn study_plan_days_carry_request_parameters() {
        let object = synthesize(&plan_request().into(), Locale::En);
        let plan = object.as_study_plan().unwrap();

        for (i, day) in plan.schedule[0].days.iter().enumerate() {
            assert_eq!(day.day, Locale::En.weekday_labels()[i]);
            assert_eq!(day.subjects, vec!["Math".to_string(), "Physics".to_string()]);
            assert_eq!(day.topics, vec![format!("Topic {}", i + 1)]);
            assert!((day.hours - 3.0).abs() < f64::EPSILON);
            assert!(!day.completed);
        }
    }

    #[test]
    fn flashcards_match_requested_count() {
        let object = synthesize(&FlashcardRequest::new("Roman Empire", 4).into(), Locale::PtBr);
        let set = object.as_flashcards().unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.flashcards[0].question, "Pergunta 1 sobre Roman Empire");
        assert_eq!(set.flashcards[3].answer, "Resposta 4 sobre Roman Empire");
    }

    #[test]
    fn quiz_questions_are_well_formed() {
        let object = synthesize(&QuizRequest::new("Photosynthesis", 3).into(), Locale::PtBr);
        let quiz = object.as_quiz().unwrap();

        assert_eq!(quiz.len(), 3);
        for question in &quiz.quiz {
            assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
            assert!(question.correct <= MAX_CORRECT_INDEX);
            assert_eq!(question.correct, 1);
        }
        assert_eq!(quiz.quiz[0].question, "Questão 1 sobre Photosynthesis");
        assert_eq!(quiz.quiz[0].options[0], "A) Alternativa A da questão 1");
        assert_eq!(
            quiz.quiz[2].explanation,
            "Explicação para a questão 3 sobre Photosynthesis"
        );
    }

    #[test]
    fn synthesis_is_deterministic() {
        let request: GenerationRequest = QuizRequest::new("Rome", 5).into();
        assert_eq!(
            synthesize(&request, Locale::En),
            synthesize(&request, Locale::En)
        );
    }
}
