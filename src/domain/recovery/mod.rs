//! Recovery module - turns raw model text into validated domain objects.
//!
//! Stages, leaves first:
//! - [`extract_fragment`] isolates the JSON-like substring
//! - [`repair`] applies heuristic comma fixes
//! - [`parse_and_validate`] parses strictly and checks the domain schema
//! - [`synthesize`] builds a placeholder from the request alone
//! - [`RecoveryPipeline`] sequences them and tags the outcome

mod errors;
mod extractor;
mod fallback;
mod pipeline;
mod repairer;
mod validator;

pub use errors::{ErrorKind, RecoveryError};
pub use extractor::{extract_fragment, ExtractedFragment, FragmentShape};
pub use fallback::{synthesize, FALLBACK_CORRECT_INDEX};
pub use pipeline::{OutcomeTag, RecoveryOutcome, RecoveryPipeline, RecoveryReport, RecoveryStage};
pub use repairer::repair;
pub use validator::{parse_and_validate, MAX_DAYS_PER_WEEK};
