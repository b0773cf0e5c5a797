//! Client study state as an explicit, immutable container.
//!
//! Every action borrows the current snapshot and returns a new one, so a
//! caller holding an older snapshot never observes a change. Identity and
//! timestamps are assigned here; the recovery pipeline never touches this
//! type.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::domain::foundation::{ActivityId, DeckId, FlashcardId, PlanId, Timestamp};
use crate::domain::study::{Day, Flashcard, StudyPlan};

/// Number of activity entries kept in history.
pub const ACTIVITY_HISTORY_LIMIT: usize = 100;

/// Colour given to decks created without one.
pub const DEFAULT_DECK_COLOR: &str = "#8b5cf6";

/// A generated plan after it has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    pub id: PlanId,
    pub created_at: Timestamp,
    pub plan: StudyPlan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub cards_count: u32,
}

/// Partial deck update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFlashcard {
    pub id: FlashcardId,
    pub deck_id: DeckId,
    pub question: String,
    pub answer: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    StudyPlanCreated,
    DayCompleted,
    FlashcardsGenerated,
    QuizStarted,
    QuizCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    pub description: String,
    pub date: Timestamp,
}

/// Snapshot of everything the client persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyState {
    pub study_plans: Vec<StoredPlan>,
    pub current_plan: Option<PlanId>,
    pub decks: Vec<Deck>,
    pub flashcards: Vec<StoredFlashcard>,
    pub activity_history: Vec<Activity>,
}

impl StudyState {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Plans ──────────────────────────────────────────────────────────────

    /// Saves a plan and returns the new snapshot with the plan's id.
    pub fn add_plan(&self, plan: StudyPlan) -> (Self, PlanId) {
        let id = PlanId::new();
        let mut next = self.clone();
        next.study_plans.push(StoredPlan {
            id,
            created_at: Timestamp::now(),
            plan,
        });
        (next, id)
    }

    pub fn plan(&self, id: PlanId) -> Option<&StoredPlan> {
        self.study_plans.iter().find(|p| p.id == id)
    }

    pub fn current(&self) -> Option<&StoredPlan> {
        self.current_plan.and_then(|id| self.plan(id))
    }

    pub fn set_current_plan(&self, id: Option<PlanId>) -> Result<Self, StoreError> {
        if let Some(id) = id {
            self.plan(id).ok_or(StoreError::PlanNotFound(id))?;
        }
        let mut next = self.clone();
        next.current_plan = id;
        Ok(next)
    }

    /// Removes a plan, clearing the current plan if it was this one.
    pub fn delete_plan(&self, id: PlanId) -> Result<Self, StoreError> {
        self.plan(id).ok_or(StoreError::PlanNotFound(id))?;
        let mut next = self.clone();
        next.study_plans.retain(|p| p.id != id);
        if next.current_plan == Some(id) {
            next.current_plan = None;
        }
        Ok(next)
    }

    /// Flips a day's completion, stamping or clearing `completed_at`.
    pub fn toggle_day_complete(
        &self,
        plan: PlanId,
        week: usize,
        day: usize,
    ) -> Result<Self, StoreError> {
        self.update_day(plan, week, day, |d| {
            d.completed = !d.completed;
            d.completed_at = d.completed.then(Timestamp::now);
            Ok(())
        })
    }

    pub fn toggle_topic_complete(
        &self,
        plan: PlanId,
        week: usize,
        day: usize,
        topic: usize,
    ) -> Result<Self, StoreError> {
        self.update_day(plan, week, day, |d| {
            if topic >= d.topics.len() {
                return Err(StoreError::TopicOutOfRange {
                    index: topic,
                    count: d.topics.len(),
                });
            }
            if !d.completed_topics.remove(&topic) {
                d.completed_topics.insert(topic);
            }
            Ok(())
        })
    }

    pub fn set_day_notes(
        &self,
        plan: PlanId,
        week: usize,
        day: usize,
        notes: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let notes = notes.into();
        self.update_day(plan, week, day, move |d| {
            d.notes = notes;
            Ok(())
        })
    }

    fn update_day<F>(
        &self,
        plan: PlanId,
        week: usize,
        day: usize,
        apply: F,
    ) -> Result<Self, StoreError>
    where
        F: FnOnce(&mut Day) -> Result<(), StoreError>,
    {
        let mut next = self.clone();
        let stored = next
            .study_plans
            .iter_mut()
            .find(|p| p.id == plan)
            .ok_or(StoreError::PlanNotFound(plan))?;
        let target = stored
            .plan
            .schedule
            .get_mut(week)
            .and_then(|w| w.days.get_mut(day))
            .ok_or(StoreError::DayNotFound { week, day })?;
        apply(target)?;
        Ok(next)
    }

    // ─── Decks and flashcards ───────────────────────────────────────────────

    pub fn create_deck(
        &self,
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<(Self, DeckId), StoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(StoreError::EmptyDeckName);
        }
        let id = DeckId::new();
        let mut next = self.clone();
        next.decks.push(Deck {
            id,
            name,
            color: color.unwrap_or_else(|| DEFAULT_DECK_COLOR.to_string()),
            created_at: Timestamp::now(),
            cards_count: 0,
        });
        Ok((next, id))
    }

    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    pub fn update_deck(&self, id: DeckId, update: DeckUpdate) -> Result<Self, StoreError> {
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(StoreError::EmptyDeckName);
        }
        let mut next = self.clone();
        let deck = next
            .decks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::DeckNotFound(id))?;
        if let Some(name) = update.name {
            deck.name = name;
        }
        if let Some(color) = update.color {
            deck.color = color;
        }
        Ok(next)
    }

    /// Removes a deck together with its cards.
    pub fn delete_deck(&self, id: DeckId) -> Result<Self, StoreError> {
        self.deck(id).ok_or(StoreError::DeckNotFound(id))?;
        let mut next = self.clone();
        next.decks.retain(|d| d.id != id);
        next.flashcards.retain(|c| c.deck_id != id);
        Ok(next)
    }

    pub fn cards_in(&self, deck: DeckId) -> impl Iterator<Item = &StoredFlashcard> {
        self.flashcards.iter().filter(move |c| c.deck_id == deck)
    }

    pub fn add_flashcards(
        &self,
        deck: DeckId,
        cards: impl IntoIterator<Item = Flashcard>,
    ) -> Result<Self, StoreError> {
        let mut next = self.clone();
        let now = Timestamp::now();
        let before = next.flashcards.len();
        next.flashcards.extend(cards.into_iter().map(|card| StoredFlashcard {
            id: FlashcardId::new(),
            deck_id: deck,
            question: card.question,
            answer: card.answer,
            created_at: now,
        }));
        let added = (next.flashcards.len() - before) as u32;

        let target = next
            .decks
            .iter_mut()
            .find(|d| d.id == deck)
            .ok_or(StoreError::DeckNotFound(deck))?;
        target.cards_count += added;
        Ok(next)
    }

    pub fn delete_flashcard(&self, id: FlashcardId) -> Result<Self, StoreError> {
        let card = self
            .flashcards
            .iter()
            .find(|c| c.id == id)
            .ok_or(StoreError::FlashcardNotFound(id))?;
        let deck_id = card.deck_id;

        let mut next = self.clone();
        next.flashcards.retain(|c| c.id != id);
        if let Some(deck) = next.decks.iter_mut().find(|d| d.id == deck_id) {
            deck.cards_count = deck.cards_count.saturating_sub(1);
        }
        Ok(next)
    }

    // ─── Activity ───────────────────────────────────────────────────────────

    /// Appends an activity, keeping only the most recent entries.
    pub fn record_activity(&self, kind: ActivityKind, description: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.activity_history.push(Activity {
            id: ActivityId::new(),
            kind,
            description: description.into(),
            date: Timestamp::now(),
        });
        let overflow = next
            .activity_history
            .len()
            .saturating_sub(ACTIVITY_HISTORY_LIMIT);
        next.activity_history.drain(..overflow);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::study::Week;

    fn plan() -> StudyPlan {
        StudyPlan {
            title: "Plan".to_string(),
            overview: String::new(),
            schedule: vec![Week {
                week: 1,
                focus: None,
                days: vec![Day::new(
                    "Monday",
                    vec!["Math".into()],
                    vec!["Algebra".into(), "Geometry".into()],
                    2.0,
                )],
            }],
            tips: vec![],
        }
    }

    fn state_with_plan() -> (StudyState, PlanId) {
        StudyState::new().add_plan(plan())
    }

    #[test]
    fn actions_leave_previous_snapshot_untouched() {
        let empty = StudyState::new();
        let (with_plan, _) = empty.add_plan(plan());

        assert!(empty.study_plans.is_empty());
        assert_eq!(with_plan.study_plans.len(), 1);
    }

    #[test]
    fn toggling_a_day_stamps_and_clears_completion_time() {
        let (state, id) = state_with_plan();

        let done = state.toggle_day_complete(id, 0, 0).unwrap();
        let day = &done.plan(id).unwrap().plan.schedule[0].days[0];
        assert!(day.completed);
        assert!(day.completed_at.is_some());

        let undone = done.toggle_day_complete(id, 0, 0).unwrap();
        let day = &undone.plan(id).unwrap().plan.schedule[0].days[0];
        assert!(!day.completed);
        assert!(day.completed_at.is_none());
    }

    #[test]
    fn out_of_range_day_is_an_error() {
        let (state, id) = state_with_plan();
        assert_eq!(
            state.toggle_day_complete(id, 1, 0).unwrap_err(),
            StoreError::DayNotFound { week: 1, day: 0 }
        );
        assert!(matches!(
            state.toggle_day_complete(PlanId::new(), 0, 0),
            Err(StoreError::PlanNotFound(_))
        ));
    }

    #[test]
    fn toggling_topics_requires_valid_index() {
        let (state, id) = state_with_plan();

        let state = state.toggle_topic_complete(id, 0, 0, 1).unwrap();
        let day = &state.plan(id).unwrap().plan.schedule[0].days[0];
        assert!(day.completed_topics.contains(&1));

        let state = state.toggle_topic_complete(id, 0, 0, 1).unwrap();
        assert!(state.plan(id).unwrap().plan.schedule[0].days[0]
            .completed_topics
            .is_empty());

        assert_eq!(
            state.toggle_topic_complete(id, 0, 0, 2).unwrap_err(),
            StoreError::TopicOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn notes_are_replaced() {
        let (state, id) = state_with_plan();
        let state = state.set_day_notes(id, 0, 0, "Review chapter 2").unwrap();
        assert_eq!(
            state.plan(id).unwrap().plan.schedule[0].days[0].notes,
            "Review chapter 2"
        );
    }

    #[test]
    fn deleting_current_plan_clears_it() {
        let (state, id) = state_with_plan();
        let state = state.set_current_plan(Some(id)).unwrap();
        assert_eq!(state.current().unwrap().id, id);

        let state = state.delete_plan(id).unwrap();
        assert!(state.current_plan.is_none());
        assert!(state.study_plans.is_empty());
    }

    #[test]
    fn set_current_plan_rejects_unknown_id() {
        assert!(StudyState::new().set_current_plan(Some(PlanId::new())).is_err());
        assert!(StudyState::new().set_current_plan(None).is_ok());
    }

    #[test]
    fn deck_lifecycle_tracks_card_count() {
        let (state, deck) = StudyState::new().create_deck("History", None).unwrap();
        assert_eq!(state.deck(deck).unwrap().color, DEFAULT_DECK_COLOR);

        let state = state
            .add_flashcards(
                deck,
                vec![Flashcard::new("Q1", "A1"), Flashcard::new("Q2", "A2")],
            )
            .unwrap();
        assert_eq!(state.deck(deck).unwrap().cards_count, 2);

        let first = state.cards_in(deck).next().unwrap().id;
        let state = state.delete_flashcard(first).unwrap();
        assert_eq!(state.deck(deck).unwrap().cards_count, 1);
        assert_eq!(state.cards_in(deck).count(), 1);
    }

    #[test]
    fn deleting_deck_removes_its_cards() {
        let (state, keep) = StudyState::new().create_deck("Keep", None).unwrap();
        let (state, drop) = state.create_deck("Drop", None).unwrap();
        let state = state
            .add_flashcards(keep, vec![Flashcard::new("Q", "A")])
            .unwrap()
            .add_flashcards(drop, vec![Flashcard::new("Q", "A")])
            .unwrap();

        let state = state.delete_deck(drop).unwrap();
        assert_eq!(state.decks.len(), 1);
        assert_eq!(state.flashcards.len(), 1);
        assert_eq!(state.flashcards[0].deck_id, keep);
    }

    #[test]
    fn update_deck_applies_partial_changes() {
        let (state, deck) = StudyState::new().create_deck("History", None).unwrap();
        let state = state
            .update_deck(
                deck,
                DeckUpdate {
                    color: Some("#000000".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = state.deck(deck).unwrap();
        assert_eq!(updated.name, "History");
        assert_eq!(updated.color, "#000000");

        assert_eq!(
            state
                .update_deck(
                    deck,
                    DeckUpdate {
                        name: Some(" ".to_string()),
                        ..Default::default()
                    }
                )
                .unwrap_err(),
            StoreError::EmptyDeckName
        );
    }

    #[test]
    fn adding_cards_to_unknown_deck_fails() {
        let result = StudyState::new().add_flashcards(DeckId::new(), vec![Flashcard::new("Q", "A")]);
        assert!(matches!(result, Err(StoreError::DeckNotFound(_))));
    }

    #[test]
    fn activity_history_keeps_latest_entries() {
        let mut state = StudyState::new();
        for i in 0..(ACTIVITY_HISTORY_LIMIT + 5) {
            state = state.record_activity(ActivityKind::QuizStarted, format!("quiz {i}"));
        }

        assert_eq!(state.activity_history.len(), ACTIVITY_HISTORY_LIMIT);
        assert_eq!(state.activity_history[0].description, "quiz 5");
        assert_eq!(
            state.activity_history.last().unwrap().description,
            format!("quiz {}", ACTIVITY_HISTORY_LIMIT + 4)
        );
    }
}
