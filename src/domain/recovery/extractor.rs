//! Fragment extraction from raw model output.
//!
//! Models wrap their JSON in code fences, prose, or both. The extractor
//! strips fence markers and slices from the first opening delimiter to the
//! last closing one. The slice is not guaranteed to be valid JSON; parsing is
//! only used to choose between an object and a root array.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::domain::study::DomainKind;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)```[a-z]*").expect("code fence pattern is valid"));

/// Root delimiter the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentShape {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// `{ ... }` or a root `[ ... ]` of objects.
    ObjectOrArray,
}

impl FragmentShape {
    /// Shape accepted by the validator for a domain kind.
    pub fn for_kind(kind: DomainKind) -> Self {
        match kind {
            DomainKind::StudyPlan | DomainKind::Quiz => FragmentShape::Object,
            DomainKind::FlashcardSet => FragmentShape::ObjectOrArray,
        }
    }
}

/// Substring of a raw response believed to hold the JSON payload.
///
/// Empty when no candidate delimiter pair was found.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedFragment(String);

impl ExtractedFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Extracts the best-effort JSON fragment from `raw`.
pub fn extract_fragment(raw: &str, shape: FragmentShape) -> ExtractedFragment {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    let text = unfenced.trim();

    let span = match shape {
        FragmentShape::Object => span_between(text, '{', '}'),
        FragmentShape::Array => span_between(text, '[', ']'),
        FragmentShape::ObjectOrArray => object_or_array(text),
    };

    span.map(|range| ExtractedFragment(text[range].to_string()))
        .unwrap_or_default()
}

fn span_between(text: &str, open: char, close: char) -> Option<Range<usize>> {
    match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if end > start => Some(start..end + close.len_utf8()),
        _ => None,
    }
}

/// Picks between the `{ ... }` and `[ ... ]` spans of `text`.
///
/// A span that parses wins over one that does not. Otherwise the array is
/// taken only when it opens straight onto the first object and closes after
/// the last one, so a bracket in the model's lead-in prose never hides the
/// object that follows it.
fn object_or_array(text: &str) -> Option<Range<usize>> {
    let object = span_between(text, '{', '}');
    let array = span_between(text, '[', ']');

    let (object, array) = match (object, array) {
        (Some(object), Some(array)) => (object, array),
        (object, array) => return object.or(array),
    };

    match (parses(&text[object.clone()]), parses(&text[array.clone()])) {
        (true, false) => Some(object),
        (false, true) => Some(array),
        _ if wraps_object_list(text, &array, &object) => Some(array),
        _ => Some(object),
    }
}

/// `[` followed by nothing but whitespace up to the first `{`, closing after
/// the last `}`.
fn wraps_object_list(text: &str, array: &Range<usize>, object: &Range<usize>) -> bool {
    array.start < object.start
        && array.end >= object.end
        && text[array.start + 1..object.start].trim().is_empty()
}

fn parses(candidate: &str) -> bool {
    serde_json::from_str::<Value>(candidate).is_ok()
}
