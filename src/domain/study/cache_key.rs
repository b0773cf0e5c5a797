//! Cache keys for previously generated results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GenerationRequest;

/// Lookup key for a cached generation result.
///
/// Only flashcard requests are cacheable; the key is the lowercased theme
/// and the card count, e.g. `roman empire_10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a request, or `None` when the kind is not cached.
    pub fn for_request(request: &GenerationRequest) -> Option<Self> {
        match request {
            GenerationRequest::FlashcardSet(r) => Some(Self(format!(
                "{}_{}",
                r.theme.trim().to_lowercase(),
                r.number_of_cards
            ))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
