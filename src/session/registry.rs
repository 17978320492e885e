//! Registry of live matches.
//!
//! The registry map is only held long enough to clone a handle out of it;
//! match locks are never taken while it is held.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::cards::{CardCatalog, CardId, CardRef, CardRegistry};
use crate::core::{Clock, CombatantId, MatchConfig, Side, SystemClock};
use crate::error::{ConfigError, MatchError, MatchResult};
use crate::rules::{SubmitOutcome, TurnReport};
use crate::series::{SeriesController, SeriesStatus};
use crate::state::{Match, MatchId, MatchView};

/// Shared access to one match.
///
/// Cloning is cheap. A handle keeps its match alive after the registry
/// drops it, so in-flight calls always finish.
#[derive(Clone)]
pub struct MatchHandle {
    id: MatchId,
    inner: Arc<Mutex<Match>>,
    clock: Arc<dyn Clock>,
    catalog: Arc<dyn CardCatalog>,
}

impl std::fmt::Debug for MatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

impl MatchHandle {
    #[must_use]
    pub fn id(&self) -> MatchId {
        self.id
    }

    /// Seat a combatant.
    pub fn join(&self, combatant: CombatantId, name: impl Into<String>) -> MatchResult<Side> {
        let mut m = self.lock();
        let now = self.clock.now();
        m.join_combatant(combatant, name, now)
    }

    /// Submit three card ids for the current turn.
    ///
    /// Phase, seat and readiness are checked before ids are resolved
    /// through the catalog, so an unknown id only surfaces for a
    /// combatant that could otherwise select.
    pub fn submit(&self, combatant: CombatantId, cards: &[CardId]) -> MatchResult<SubmitOutcome> {
        let mut m = self.lock();
        m.selection_gate(combatant)?;
        let cards = cards
            .iter()
            .map(|&id| self.catalog.card(id).ok_or(MatchError::UnknownCard(id)))
            .collect::<MatchResult<Vec<CardRef>>>()?;

        let now = self.clock.now();
        m.submit_selection(combatant, cards, now)
    }

    /// Force the current turn to resolve. `None` outside the selection phase.
    pub fn force_timeout(&self) -> Option<TurnReport> {
        let mut m = self.lock();
        let now = self.clock.now();
        m.force_timeout(now)
    }

    #[must_use]
    pub fn view(&self) -> MatchView {
        self.lock().view()
    }

    #[must_use]
    pub fn series_status(&self) -> SeriesStatus {
        SeriesController::series_status(&*self.lock())
    }

    /// Run `f` against the match under its lock.
    pub fn with_match<R>(&self, f: impl FnOnce(&Match) -> R) -> R {
        f(&*self.lock())
    }

    /// Lock the match. A poisoned lock is recovered: state is only written
    /// after validation succeeds, so a panicking holder leaves it consistent.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Match> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("{} lock was poisoned, recovering", self.id);
            poisoned.into_inner()
        })
    }
}

/// Store of active matches.
///
/// An explicit value: create one per service (or per test) and share it
/// behind an `Arc`.
pub struct SessionRegistry {
    matches: RwLock<FxHashMap<MatchId, MatchHandle>>,
    next_id: AtomicU64,
    clock: Arc<dyn Clock>,
    catalog: Arc<dyn CardCatalog>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new(catalog: Arc<dyn CardCatalog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            matches: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
            clock,
            catalog,
        }
    }

    /// A registry over the standard card set and the system clock.
    #[must_use]
    pub fn with_standard_cards() -> Self {
        Self::new(Arc::new(CardRegistry::standard()), Arc::new(SystemClock))
    }

    /// Open a new match waiting for combatants.
    pub fn create(&self, config: MatchConfig) -> Result<MatchHandle, ConfigError> {
        config.validate()?;

        let id = MatchId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let best_of = config.best_of;
        let handle = MatchHandle {
            id,
            inner: Arc::new(Mutex::new(Match::new(id, config, self.clock.now()))),
            clock: Arc::clone(&self.clock),
            catalog: Arc::clone(&self.catalog),
        };
        self.write().insert(id, handle.clone());

        log::info!("opened {} (best of {})", id, best_of);
        Ok(handle)
    }

    pub fn get(&self, id: MatchId) -> MatchResult<MatchHandle> {
        self.read()
            .get(&id)
            .cloned()
            .ok_or(MatchError::MatchNotFound(id))
    }

    /// Drop a match from the registry. Outstanding handles stay usable.
    pub fn remove(&self, id: MatchId) -> MatchResult<MatchHandle> {
        let removed = self.write().remove(&id).ok_or(MatchError::MatchNotFound(id))?;
        log::info!("removed {}", id);
        Ok(removed)
    }

    #[must_use]
    pub fn contains(&self, id: MatchId) -> bool {
        self.read().contains_key(&id)
    }

    /// Ids of all registered matches, ascending.
    #[must_use]
    pub fn list(&self) -> Vec<MatchId> {
        let mut ids: Vec<MatchId> = self.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Views of every registered match, by ascending id.
    #[must_use]
    pub fn views(&self) -> Vec<MatchView> {
        let mut views: Vec<MatchView> = self.handles().iter().map(MatchHandle::view).collect();
        views.sort_unstable_by_key(|v| v.id);
        views
    }

    /// Remove matches that have been terminal for at least `grace`.
    pub fn reap_ended(&self, grace: Duration) -> Vec<MatchId> {
        let Ok(grace) = chrono::Duration::from_std(grace) else {
            return Vec::new();
        };
        let now = self.clock.now();

        let expired: Vec<MatchId> = self
            .handles()
            .into_iter()
            .filter(|handle| {
                handle.with_match(|m| {
                    m.is_terminal() && m.ended_at().is_some_and(|at| now - at >= grace)
                })
            })
            .map(|handle| handle.id())
            .collect();

        if !expired.is_empty() {
            let mut matches = self.write();
            for id in &expired {
                matches.remove(id);
                log::info!("reaped {}", id);
            }
        }
        expired
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Snapshot of every handle, taken without holding any match lock.
    pub(crate) fn handles(&self) -> Vec<MatchHandle> {
        self.read().values().cloned().collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<MatchId, MatchHandle>> {
        self.matches.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<MatchId, MatchHandle>> {
        self.matches.write().unwrap_or_else(|e| e.into_inner())
    }
}
