//! Best-of-N series tests.

use chrono::{DateTime, Utc};

use rust_duel::cards::{standard, CardRef};
use rust_duel::core::{CombatantId, MatchConfig, Side};
use rust_duel::error::MatchError;
use rust_duel::rules::{SeriesTransition, SubmitOutcome, TurnReport};
use rust_duel::series::SeriesController;
use rust_duel::state::{HistoryEvent, Match, MatchId, Phase};

const ADA: CombatantId = CombatantId::new(1);
const BO: CombatantId = CombatantId::new(2);

fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn best_of(n: u32) -> Match {
    let config = MatchConfig::default().with_max_health(1).with_best_of(n);
    let mut m = Match::new(MatchId::new(1), config, t0());
    m.join_combatant(ADA, "Ada", t0()).unwrap();
    m.join_combatant(BO, "Bo", t0()).unwrap();
    m
}

fn chargers() -> Vec<CardRef> {
    let card = standard::charger().into_ref();
    vec![card.clone(), card.clone(), card]
}

fn shot() -> Vec<CardRef> {
    let charger = standard::charger().into_ref();
    vec![standard::tirer().into_ref(), charger.clone(), charger]
}

fn turn(m: &mut Match, ada: Vec<CardRef>, bo: Vec<CardRef>) -> TurnReport {
    m.submit_selection(ADA, ada, t0()).unwrap();
    match m.submit_selection(BO, bo, t0()).unwrap() {
        SubmitOutcome::Resolved(report) => report,
        SubmitOutcome::WaitingForOpponent => panic!("turn did not resolve"),
    }
}

/// Charge up, then `winner` shoots the other down.
fn win_game(m: &mut Match, winner: Side) -> TurnReport {
    turn(m, chargers(), chargers());
    match winner {
        Side::First => turn(m, shot(), chargers()),
        Side::Second => turn(m, chargers(), shot()),
    }
}

#[test]
fn test_two_wins_end_best_of_three() {
    let mut m = best_of(3);

    let first = win_game(&mut m, Side::First);
    assert_eq!(first.series, Some(SeriesTransition::NextGame { game: 2 }));
    assert_eq!(m.phase(), Phase::Selection);
    assert_eq!(m.game_number(), 2);

    let second = win_game(&mut m, Side::First);
    assert_eq!(second.game, 2);
    assert_eq!(second.series, Some(SeriesTransition::SeriesEnded { winner: ADA }));

    assert_eq!(m.phase(), Phase::Ended);
    assert!(m.is_series_complete());
    assert_eq!(m.series_winner(), Some(ADA));
    assert_eq!(m.game_number(), 2);
    assert!(matches!(
        m.submit_selection(ADA, chargers(), t0()),
        Err(MatchError::InvalidAction(_))
    ));

    let status = SeriesController::series_status(&m);
    assert_eq!((status.wins_first, status.wins_second), (2, 0));
    assert!(status.is_complete);
    assert_eq!(status.games_remaining, 0);
    assert_eq!(
        m.history().count(|e| matches!(e, HistoryEvent::SeriesEnded { .. })),
        1
    );
}

#[test]
fn test_one_all_starts_fresh_game() {
    let mut m = best_of(3);
    win_game(&mut m, Side::First);
    let report = win_game(&mut m, Side::Second);

    assert_eq!(report.series, Some(SeriesTransition::NextGame { game: 3 }));
    assert_eq!(m.phase(), Phase::Selection);
    assert_eq!(m.turn_number(), 1);
    assert!(m.winner().is_none());
    assert!(m.deadline().is_some());
    for (_, c) in m.combatants() {
        assert_eq!(c.health, 1);
        assert_eq!(c.charges, 0);
        assert!(c.status_effects.is_empty());
        assert!(!c.ready);
    }

    let status = m.view().series_status;
    assert_eq!(status.total_played, 2);
    assert_eq!(status.current_game_number, 3);
    assert_eq!(status.games_remaining, 1);
    assert!(!status.is_complete);
}

#[test]
fn test_single_game_match() {
    let mut m = best_of(1);
    let report = win_game(&mut m, Side::Second);

    assert_eq!(report.series, Some(SeriesTransition::Ended));
    assert_eq!(m.phase(), Phase::Ended);
    assert_eq!(m.winner(), Some(BO));
    assert!(!m.is_series_complete());
}

#[test]
fn test_history_tags_games() {
    let mut m = best_of(3);
    win_game(&mut m, Side::First);
    turn(&mut m, chargers(), chargers());

    let last = m.history().last().unwrap();
    assert_eq!(last.game, 2);
    assert_eq!(last.turn, 1);
    assert_eq!(
        m.history().count(|e| matches!(e, HistoryEvent::NextGameStarted { game: 2, .. })),
        1
    );
}
