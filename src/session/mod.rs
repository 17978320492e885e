//! Session layer: the registry of live matches and the timeout driver.
//!
//! This is the only surface the hosting service talks to. Each match sits
//! behind its own lock; the registry map is shared by all of them.

pub mod registry;
pub mod scheduler;

pub use registry::{MatchHandle, SessionRegistry};
pub use scheduler::{SchedulerHandle, TickSummary, TimeoutScheduler, TimerSignal};
