//! Effect system for card resolution.
//!
//! - `Effect`: closed set of effect kinds with target and timing
//! - `ResolutionContext`: what a card sees when it resolves
//! - `EffectEngine`: validation, application, status ticks
//!
//! ## Design Philosophy
//!
//! The engine is pure. It never looks at phases, deadlines or the other
//! step's cards; the turn state machine computes everything situational
//! into a `ResolutionContext` first.

mod effect;
mod resolver;

pub use effect::{Condition, Effect, EffectKind, Target, Timing};
pub use resolver::{EffectEngine, EffectOutcome, ResolutionContext, StatusOutcome};
