//! Turn protocol for a single match.
//!
//! The state machine is implemented directly on `Match` (see `engine`);
//! `outcome` holds the result types it produces.

mod engine;
mod outcome;

pub use engine::STEPS;
pub use outcome::{EndReason, MatchOutcome, SeriesTransition, StepReport, SubmitOutcome, TurnReport};
