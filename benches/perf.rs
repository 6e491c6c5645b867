use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use fpl_form::form_rankings::derive;
use fpl_form::model::{Fixture, Player, Position, RawSnapshot, Snapshot, Team};
use fpl_form::snapshot_merge::merge;
use fpl_form::table::render;

fn sample_raw() -> RawSnapshot {
    RawSnapshot {
        bootstrap: BOOTSTRAP_JSON.as_bytes().to_vec(),
        fixtures: FIXTURES_JSON.as_bytes().to_vec(),
    }
}

/// Roughly a full season: 20 teams, 700 players, 380 fixtures.
fn season_snapshot() -> Snapshot {
    let teams: Vec<Team> = (1..=20u32)
        .map(|id| Team {
            id,
            short_name: format!("T{id:02}"),
        })
        .collect();
    let players = (0..700u32)
        .map(|idx| Player {
            position: Position::from_code(i64::from(idx % 4 + 1)),
            first_name: "First".to_string(),
            last_name: format!("Last {idx}"),
            display_name: format!("Player {idx}"),
            form: f64::from(idx % 97) / 10.0,
            transfers_in: i64::from(idx * 13),
            team: teams[(idx % 20) as usize].clone(),
            difficulties: Vec::new(),
        })
        .collect();
    let mut fixtures = Vec::new();
    for round in 1..=38u32 {
        for slot in 0..10u32 {
            let home = (slot * 2 + round) % 20 + 1;
            let away = (slot * 2 + 1 + round) % 20 + 1;
            fixtures.push(Fixture {
                round: Some(round),
                home_team: home,
                away_team: away,
                home_difficulty: (home % 5 + 1) as u8,
                away_difficulty: (away % 5 + 1) as u8,
            });
        }
    }
    Snapshot {
        players,
        teams,
        fixtures,
        current_round: 12,
    }
}

fn bench_merge(c: &mut Criterion) {
    let raw = sample_raw();
    c.bench_function("snapshot_merge", |b| {
        b.iter(|| {
            let snapshot = merge(black_box(&raw)).unwrap();
            black_box(snapshot.players.len());
        })
    });
}

fn bench_derive(c: &mut Criterion) {
    let snapshot = season_snapshot();
    c.bench_function("form_rankings_derive", |b| {
        b.iter(|| {
            let rankings = derive(black_box(snapshot.clone()));
            black_box(rankings.len());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let rankings = derive(season_snapshot());
    c.bench_function("table_render", |b| {
        b.iter(|| {
            let text = render(black_box(&rankings));
            black_box(text.len());
        })
    });
}

criterion_group!(perf, bench_merge, bench_derive, bench_render);
criterion_main!(perf);

static BOOTSTRAP_JSON: &str = include_str!("../tests/fixtures/bootstrap_static.json");
static FIXTURES_JSON: &str = include_str!("../tests/fixtures/fixtures.json");
