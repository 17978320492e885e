//! Turn state machine.
//!
//! Drives one match through `Waiting -> Selection -> Resolution ->
//! (Selection | Ended)`. Every operation takes `now` explicitly; the match
//! never reads a clock itself.
//!
//! ## Resolution order
//!
//! 1. Status effects tick on both sides.
//! 2. Both block values reset (once per turn).
//! 3. Steps 1..=3: contexts are built from the blocks standing at the start
//!    of the step, charge costs are paid, both cards apply, and the win
//!    condition is checked after each step.
//! 4. If nobody has lost, each step-1 card keyed on repeated cards applies
//!    again in an end-of-turn context.
//! 5. The game ends, or the next turn opens with a fresh deadline.

use chrono::{DateTime, Utc};

use crate::cards::{standard, CardDefinition, CardRef};
use crate::core::{Combatant, CombatantId, Pair, Selection, Side};
use crate::effects::{EffectEngine, EffectKind, ResolutionContext, Target, Timing};
use crate::error::{MatchError, MatchResult};
use crate::series::SeriesController;
use crate::state::{HistoryEvent, Match, Phase};

use super::outcome::{MatchOutcome, SeriesTransition, StepReport, SubmitOutcome, TurnReport};

/// Cards in every selection, one per step.
pub const STEPS: u8 = 3;

impl Match {
    /// Seat a combatant.
    ///
    /// The second join opens the selection phase and arms the deadline.
    pub fn join_combatant(
        &mut self,
        id: CombatantId,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> MatchResult<Side> {
        if self.seated() >= 2 {
            return Err(MatchError::MatchFull);
        }
        if self.phase != Phase::Waiting {
            return Err(MatchError::MatchNotJoinable);
        }
        if self.side_of(id).is_some() {
            return Err(MatchError::InvalidAction(format!(
                "{id} already joined {}",
                self.id
            )));
        }

        let side = if self.combatants[Side::First].is_none() {
            Side::First
        } else {
            Side::Second
        };
        let name = name.into();
        log::info!("{} joined {} as {} ({})", id, self.id, side, name);

        self.combatants[side] = Some(Combatant::new(id, name, self.config.max_health));
        self.record(now, HistoryEvent::CombatantJoined { side, combatant: id });

        if self.seated() == 2 {
            self.phase = Phase::Selection;
            self.arm_deadline(now);
        }
        Ok(side)
    }

    /// Store a combatant's three cards for this turn.
    ///
    /// Resolves the turn once both sides are ready. A rejected selection
    /// leaves the match untouched.
    pub fn submit_selection(
        &mut self,
        combatant_id: CombatantId,
        cards: Vec<CardRef>,
        now: DateTime<Utc>,
    ) -> MatchResult<SubmitOutcome> {
        let (side, combatant) = self.selection_gate(combatant_id)?;

        let count = cards.len();
        let selection: Selection = cards
            .try_into()
            .map_err(|_| MatchError::WrongCardCount(count))?;
        for (step, card) in (1..=STEPS).zip(selection.iter()) {
            EffectEngine::validate_card_play(card, combatant, step).map_err(|reason| {
                MatchError::CardNotPlayable {
                    card: card.id,
                    step,
                    reason,
                }
            })?;
        }

        if let Some(combatant) = self.combatants[side].as_mut() {
            combatant.selection = Some(selection);
            combatant.ready = true;
        }
        self.record(now, HistoryEvent::SelectionStored { side });
        log::debug!("{} stored selection for {} in {}", combatant_id, side, self.id);

        if self.combatants().filter(|(_, c)| c.ready).count() < 2 {
            return Ok(SubmitOutcome::WaitingForOpponent);
        }
        Ok(match self.resolve_turn(now) {
            Some(report) => SubmitOutcome::Resolved(report),
            None => SubmitOutcome::WaitingForOpponent,
        })
    }

    /// Check that `combatant_id` may select now: the match is in the
    /// selection phase, the combatant is seated and has not selected yet.
    pub(crate) fn selection_gate(
        &self,
        combatant_id: CombatantId,
    ) -> MatchResult<(Side, &Combatant)> {
        match self.phase {
            Phase::Selection => {}
            Phase::Waiting => return Err(MatchError::MatchNotJoinable),
            phase => {
                return Err(MatchError::InvalidAction(format!(
                    "{} cannot take selections while in {phase}",
                    self.id
                )))
            }
        }

        let not_seated = || {
            MatchError::InvalidAction(format!("{combatant_id} is not seated in {}", self.id))
        };
        let side = self.side_of(combatant_id).ok_or_else(not_seated)?;
        let combatant = self.combatants[side].as_ref().ok_or_else(not_seated)?;
        if combatant.ready {
            return Err(MatchError::AlreadySelected);
        }
        Ok((side, combatant))
    }

    /// Give every side that has not selected the default selection and
    /// resolve the turn.
    ///
    /// Outside the selection phase this does nothing and returns `None`.
    pub fn force_timeout(&mut self, now: DateTime<Utc>) -> Option<TurnReport> {
        if self.phase != Phase::Selection {
            return None;
        }

        let fallback = standard::charger().into_ref();
        let mut defaulted = Vec::with_capacity(2);
        for side in Side::BOTH {
            if let Some(combatant) = self.combatants[side].as_mut() {
                if !combatant.ready {
                    combatant.selection =
                        Some([fallback.clone(), fallback.clone(), fallback.clone()]);
                    combatant.ready = true;
                    defaulted.push(side);
                }
            }
        }

        log::debug!(
            "{} timed out on turn {}, defaulted {:?}",
            self.id,
            self.turn_number,
            defaulted
        );
        self.record(now, HistoryEvent::TimeoutForced { defaulted });
        self.resolve_turn(now)
    }

    /// Resolve the current turn. Requires both selections to be stored.
    pub(crate) fn resolve_turn(&mut self, now: DateTime<Utc>) -> Option<TurnReport> {
        if self.phase != Phase::Selection {
            return None;
        }
        let selections = self.stored_selections()?;
        let mut duel = self.take_duel()?;

        self.phase = Phase::Resolution;
        self.deadline = None;
        let max_health = self.config.max_health;
        let mut report = TurnReport::new(self.game_index, self.turn_number);

        for side in Side::BOTH {
            let ticks = EffectEngine::process_status_effects(&mut duel[side]);
            if !ticks.is_empty() {
                self.record(
                    now,
                    HistoryEvent::StatusTicked {
                        side,
                        outcomes: ticks.clone(),
                    },
                );
            }
            report.status[side] = ticks;
        }

        for combatant in duel.values_mut() {
            combatant.block_value = 0;
        }

        let mut outcome = None;
        for (index, step) in (1..=STEPS).enumerate() {
            let contexts =
                Pair::from_fn(|side| step_context(&duel, &selections, side, index, max_health));

            for side in Side::BOTH {
                duel[side].spend_charges(selections[side][index].charge_cost);
            }

            let mut outcomes = Pair::default();
            for side in Side::BOTH {
                let (actor, opponent) = duel.split_mut(side);
                outcomes[side] = EffectEngine::apply_effects(
                    &selections[side][index],
                    actor,
                    opponent,
                    &contexts[side],
                );
            }

            let step_report = StepReport {
                step,
                cards: selections.map(|s| s[index].id),
                outcomes,
            };
            log::trace!("{} step {}: {:?}", self.id, step, step_report.outcomes);
            self.record(now, HistoryEvent::StepResolved(step_report.clone()));
            report.steps.push(step_report);

            outcome = MatchOutcome::evaluate(&duel);
            if outcome.is_some() {
                break;
            }
        }

        if outcome.is_none() {
            let played = selections.map(|s| s.iter().map(|c| c.id).collect::<Vec<_>>());
            for side in Side::BOTH {
                let card = &selections[side][0];
                if !card.has_end_of_turn_effect() {
                    continue;
                }
                let repeated_cards = EffectEngine::count_repeated_cards(&played[side.opponent()]);
                let context = ResolutionContext::end_of_turn(max_health, repeated_cards);
                let (actor, opponent) = duel.split_mut(side);
                let outcomes = EffectEngine::apply_effects(card, actor, opponent, &context);

                self.record(
                    now,
                    HistoryEvent::EndOfTurn {
                        side,
                        card: card.id,
                        repeated_cards,
                        outcomes: outcomes.clone(),
                    },
                );
                report.end_of_turn[side] = outcomes;
            }
            outcome = MatchOutcome::evaluate(&duel);
        }

        log::debug!(
            "{} resolved turn {}: health {} / {}",
            self.id,
            self.turn_number,
            duel[Side::First].health,
            duel[Side::Second].health
        );
        self.restore_duel(duel);

        match outcome {
            Some(outcome) => {
                report.outcome = Some(outcome);
                report.series = Some(self.end_match(outcome, now));
            }
            None => self.prepare_next_turn(now),
        }
        Some(report)
    }

    /// Finish the current game and hand the outcome to the series.
    pub(crate) fn end_match(
        &mut self,
        outcome: MatchOutcome,
        now: DateTime<Utc>,
    ) -> SeriesTransition {
        self.phase = Phase::Ended;
        self.winner = outcome.winner();
        self.deadline = None;
        self.record(now, HistoryEvent::MatchEnded(outcome));

        match outcome.winner() {
            Some(winner) => log::info!("{} game {} won by {}", self.id, self.game_index, winner),
            None => log::info!("{} game {} ended in a draw", self.id, self.game_index),
        }

        SeriesController::on_match_ended(self, &outcome, now)
    }

    fn prepare_next_turn(&mut self, now: DateTime<Utc>) {
        for combatant in self.combatants.values_mut().flatten() {
            combatant.clear_turn();
        }
        self.turn_number += 1;
        self.phase = Phase::Selection;
        self.arm_deadline(now);
    }

    fn stored_selections(&self) -> Option<Pair<Selection>> {
        let first = self.combatant(Side::First)?.selection.clone()?;
        let second = self.combatant(Side::Second)?.selection.clone()?;
        Some(Pair::new(first, second))
    }
}

/// Context for `side`'s card in one step, from the blocks standing at the
/// start of that step.
fn step_context(
    duel: &Pair<Combatant>,
    selections: &Pair<Selection>,
    side: Side,
    index: usize,
    max_health: u32,
) -> ResolutionContext {
    let own_block = duel[side].block_value;
    let blocked_damage = if own_block > 0 {
        own_block.min(incoming_damage(&selections[side.opponent()][index]))
    } else {
        0
    };
    ResolutionContext::new(max_health)
        .against_block(duel[side.opponent()].block_value)
        .with_blocked_damage(blocked_damage)
}

/// Unconditional damage a card sends at its owner's opponent.
fn incoming_damage(card: &CardDefinition) -> u32 {
    card.effects
        .iter()
        .filter(|e| {
            e.kind == EffectKind::Damage
                && e.target == Target::Opponent
                && e.timing == Timing::Immediate
        })
        .map(|e| e.magnitude)
        .sum()
}
