//! Store module - the persisted client state.
//!
//! [`StudyState`] is a plain value. Persistence goes through the
//! `StateStorage` port with last-writer-wins semantics.

mod errors;
mod state;

pub use errors::StoreError;
pub use state::{
    Activity, ActivityKind, Deck, DeckUpdate, StoredFlashcard, StoredPlan, StudyState,
    ACTIVITY_HISTORY_LIMIT, DEFAULT_DECK_COLOR,
};
