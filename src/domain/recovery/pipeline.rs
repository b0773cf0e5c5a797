//! Recovery pipeline - raw model text in, domain object out.
//!
//! ```text
//! Start → Extracted → { Parsed | RepairAttempted } → { Validated | FallbackUsed } → Done
//! ```
//!
//! Parse and schema failures are absorbed: the pipeline repairs once,
//! retries once, and otherwise synthesizes a placeholder. Only an invalid
//! request is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::extractor::{extract_fragment, FragmentShape};
use super::fallback::synthesize;
use super::repairer::repair;
use super::validator::parse_and_validate;
use super::{ErrorKind, RecoveryError};
use crate::domain::study::{DomainObject, GenerationRequest, Locale};

/// Terminal result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryOutcome {
    /// The fragment validated as extracted.
    Parsed(DomainObject),
    /// The fragment validated after one repair pass.
    RepairedAndParsed(DomainObject),
    /// Nothing usable was found; the object is a placeholder.
    Fallback(DomainObject),
    /// The request itself was invalid.
    Rejected(ErrorKind),
}

impl RecoveryOutcome {
    pub fn tag(&self) -> OutcomeTag {
        match self {
            RecoveryOutcome::Parsed(_) => OutcomeTag::Parsed,
            RecoveryOutcome::RepairedAndParsed(_) => OutcomeTag::RepairedAndParsed,
            RecoveryOutcome::Fallback(_) => OutcomeTag::Fallback,
            RecoveryOutcome::Rejected(_) => OutcomeTag::Rejected,
        }
    }

    pub fn object(&self) -> Option<&DomainObject> {
        match self {
            RecoveryOutcome::Parsed(o)
            | RecoveryOutcome::RepairedAndParsed(o)
            | RecoveryOutcome::Fallback(o) => Some(o),
            RecoveryOutcome::Rejected(_) => None,
        }
    }

    pub fn into_object(self) -> Option<DomainObject> {
        match self {
            RecoveryOutcome::Parsed(o)
            | RecoveryOutcome::RepairedAndParsed(o)
            | RecoveryOutcome::Fallback(o) => Some(o),
            RecoveryOutcome::Rejected(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RecoveryOutcome::Fallback(_))
    }
}

/// Outcome variant without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTag {
    Parsed,
    RepairedAndParsed,
    Fallback,
    Rejected,
}

impl OutcomeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeTag::Parsed => "parsed",
            OutcomeTag::RepairedAndParsed => "repaired_and_parsed",
            OutcomeTag::Fallback => "fallback",
            OutcomeTag::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States visited by a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    Start,
    Extracted,
    Parsed,
    RepairAttempted,
    Validated,
    FallbackUsed,
    Done,
}

/// Outcome plus the path taken to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryReport {
    pub outcome: RecoveryOutcome,
    pub stages: Vec<RecoveryStage>,
    /// Absorbed parse and schema errors, in order.
    pub diagnostics: Vec<RecoveryError>,
}

/// Stateless orchestrator over extractor, repairer, validator and fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryPipeline {
    locale: Locale,
}

impl RecoveryPipeline {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn recover(&self, raw: &str, request: &GenerationRequest) -> RecoveryOutcome {
        self.recover_with_report(raw, request).outcome
    }

    pub fn recover_with_report(&self, raw: &str, request: &GenerationRequest) -> RecoveryReport {
        let mut run = Run::default();

        if let Err(err) = request.validate() {
            debug!(kind = %request.kind(), error = %err, "Rejecting invalid generation request");
            return run.finish(RecoveryOutcome::Rejected(ErrorKind::InvalidRequest));
        }

        let fragment = extract_fragment(raw, FragmentShape::for_kind(request.kind()));
        run.enter(RecoveryStage::Extracted);

        if fragment.is_empty() {
            debug!(kind = %request.kind(), raw_len = raw.len(), "No JSON fragment in model output");
            return self.fall_back(run, request);
        }

        match parse_and_validate(fragment.as_str(), request) {
            Ok(object) => {
                run.enter(RecoveryStage::Parsed);
                run.enter(RecoveryStage::Validated);
                return run.finish(RecoveryOutcome::Parsed(object));
            }
            Err(err) => run.absorb(err),
        }

        let repaired = repair(fragment.as_str());
        run.enter(RecoveryStage::RepairAttempted);

        match parse_and_validate(&repaired, request) {
            Ok(object) => {
                debug!(kind = %request.kind(), "Model output validated after repair");
                run.enter(RecoveryStage::Validated);
                run.finish(RecoveryOutcome::RepairedAndParsed(object))
            }
            Err(err) => {
                run.absorb(err);
                self.fall_back(run, request)
            }
        }
    }

    fn fall_back(&self, mut run: Run, request: &GenerationRequest) -> RecoveryReport {
        warn!(
            kind = %request.kind(),
            attempts = run.diagnostics.len(),
            "Model output unusable, synthesizing placeholder"
        );
        run.enter(RecoveryStage::FallbackUsed);
        run.finish(RecoveryOutcome::Fallback(synthesize(request, self.locale)))
    }
}

struct Run {
    stages: Vec<RecoveryStage>,
    diagnostics: Vec<RecoveryError>,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            stages: vec![RecoveryStage::Start],
            diagnostics: Vec::new(),
        }
    }
}

impl Run {
    fn enter(&mut self, stage: RecoveryStage) {
        debug!(?stage, "Recovery stage");
        self.stages.push(stage);
    }

    fn absorb(&mut self, err: RecoveryError) {
        debug!(kind = %err.kind(), error = %err, "Absorbed recovery error");
        self.diagnostics.push(err);
    }

    fn finish(mut self, outcome: RecoveryOutcome) -> RecoveryReport {
        self.stages.push(RecoveryStage::Done);
        RecoveryReport {
            outcome,
            stages: self.stages,
            diagnostics: self.diagnostics,
        }
    }
}
