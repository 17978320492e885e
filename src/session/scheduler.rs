//! Selection deadline driver.
//!
//! Every tick scans the registry: matches whose deadline has passed are
//! forced to resolve, the rest get a remaining-time signal, and matches
//! that have been over for longer than the grace period are reaped.
//! Expiry is checked and acted on under the match lock, and resolution
//! clears or re-arms the deadline, so an expiry is never processed twice.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender, TrySendError};

use crate::core::SchedulerConfig;
use crate::state::{MatchId, Phase};

use super::registry::SessionRegistry;

/// Published for every match in selection on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerSignal {
    Remaining {
        match_id: MatchId,
        turn_number: u32,
        /// Whole seconds until the deadline.
        seconds: i64,
    },
    Expired {
        match_id: MatchId,
        turn_number: u32,
    },
}

/// What one tick did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Matches whose turn was forced.
    pub expired: Vec<MatchId>,
    /// Matches still inside their selection window.
    pub pending: usize,
    /// Matches removed after their grace period.
    pub reaped: Vec<MatchId>,
}

/// Forces resolution when a selection deadline elapses.
pub struct TimeoutScheduler {
    registry: Arc<SessionRegistry>,
    config: SchedulerConfig,
    signals: Option<Sender<TimerSignal>>,
}

impl TimeoutScheduler {
    pub fn new(registry: Arc<SessionRegistry>, config: SchedulerConfig) -> Self {
        Self {
            registry,
            config,
            signals: None,
        }
    }

    /// Publish timer signals on `tx`. A full or closed channel drops them.
    #[must_use]
    pub fn with_signals(mut self, tx: Sender<TimerSignal>) -> Self {
        self.signals = Some(tx);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one scan.
    pub fn tick(&self) -> TickSummary {
        let now = self.registry.clock().now();
        let mut summary = TickSummary::default();

        for handle in self.registry.handles() {
            let match_id = handle.id();
            if !self.registry.contains(match_id) {
                continue;
            }

            let mut m = handle.lock();
            if m.phase() != Phase::Selection {
                continue;
            }
            let Some(deadline) = m.deadline() else {
                continue;
            };
            let turn_number = m.turn_number();

            if now >= deadline {
                if m.force_timeout(now).is_some() {
                    summary.expired.push(match_id);
                    self.publish(TimerSignal::Expired {
                        match_id,
                        turn_number,
                    });
                }
            } else {
                summary.pending += 1;
                self.publish(TimerSignal::Remaining {
                    match_id,
                    turn_number,
                    seconds: (deadline - now).num_seconds(),
                });
            }
        }

        summary.reaped = self.registry.reap_ended(self.config.ended_grace);
        summary
    }

    /// Run `tick` on a background thread every `tick_interval` until the
    /// returned handle is stopped or dropped.
    pub fn spawn(self) -> io::Result<SchedulerHandle> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let interval = self.config.tick_interval;

        let thread = thread::Builder::new()
            .name("duel-timeouts".to_string())
            .spawn(move || {
                log::info!("timeout scheduler started, ticking every {:?}", interval);
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let summary = self.tick();
                            if !summary.expired.is_empty() {
                                log::debug!("forced timeouts: {:?}", summary.expired);
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::info!("timeout scheduler stopped");
            })?;

        Ok(SchedulerHandle {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }

    fn publish(&self, signal: TimerSignal) {
        let Some(tx) = &self.signals else {
            return;
        };
        match tx.try_send(signal) {
            Ok(()) => log::trace!("{:?}", signal),
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                log::trace!("dropped {:?}", signal);
            }
        }
    }
}

/// Owns the scheduler thread. Dropping it stops the thread.
pub struct SchedulerHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Stop the scheduler and wait for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Closing the channel wakes the loop.
        drop(self.stop.take());
        if let Some(thread) = self.thread.take() {
            join_scheduler(thread);
        }
    }
}

/// Join the scheduler thread. Returns `false` if it panicked.
fn join_scheduler(thread: JoinHandle<()>) -> bool {
    match thread.join() {
        Ok(()) => true,
        Err(_) => {
            log::warn!("timeout scheduler thread panicked");
            false
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
