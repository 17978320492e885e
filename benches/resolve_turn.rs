//! Benchmarks for turn resolution, the hot path of every match.

use std::hint::black_box;

use chrono::{DateTime, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use rust_duel::cards::{standard, CardRef};
use rust_duel::core::{CombatantId, MatchConfig};
use rust_duel::state::{Match, MatchId};

fn seated() -> Match {
    let now = DateTime::<Utc>::UNIX_EPOCH;
    let mut m = Match::new(MatchId::new(1), MatchConfig::default().with_max_health(1_000), now);
    m.join_combatant(CombatantId::new(1), "Ada", now).unwrap();
    m.join_combatant(CombatantId::new(2), "Bo", now).unwrap();
    m
}

fn selection(cards: [fn() -> rust_duel::CardDefinition; 3]) -> Vec<CardRef> {
    cards.iter().map(|card| card().into_ref()).collect()
}

fn bench_timeout_turn(c: &mut Criterion) {
    let now = DateTime::<Utc>::UNIX_EPOCH;
    c.bench_function("force_timeout_turn", |b| {
        b.iter_batched(
            seated,
            |mut m| black_box(m.force_timeout(black_box(now))),
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_mixed_turn(c: &mut Criterion) {
    let now = DateTime::<Utc>::UNIX_EPOCH;
    let ada = selection([standard::echo, standard::bloquer, standard::tirer]);
    let bo = selection([standard::charger, standard::contrer, standard::charger]);

    c.bench_function("mixed_turn", |b| {
        b.iter_batched(
            || {
                let mut m = seated();
                m.force_timeout(now);
                m.force_timeout(now);
                m
            },
            |mut m| {
                m.submit_selection(CombatantId::new(1), ada.clone(), now).unwrap();
                black_box(m.submit_selection(CombatantId::new(2), bo.clone(), now).unwrap())
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_timeout_turn, bench_mixed_turn);
criterion_main!(benches);
