use std::collections::HashMap;

use tracing::warn;

use crate::model::{Difficulty, Fixture, Player, Rankings, Snapshot, Team};

/// Players kept per position.
pub const SHORTLIST_LEN: usize = 5;
/// Rounds ahead (current included) that count towards difficulty.
pub const FIXTURE_HORIZON: u32 = 5;

pub fn derive(snapshot: Snapshot) -> Rankings {
    let window = fixture_window(&snapshot.fixtures, snapshot.current_round);
    let teams: HashMap<u32, &Team> = snapshot.teams.iter().map(|t| (t.id, t)).collect();

    let mut rankings = group_by_position(snapshot.players);
    for players in rankings.values_mut() {
        rank_by_form(players);
        players.truncate(SHORTLIST_LEN);
        for player in players.iter_mut() {
            player.difficulties = difficulties_for(player.team.id, &window, &teams);
        }
    }
    rankings
}

/// Fixtures in `[current_round, current_round + FIXTURE_HORIZON)`.
pub fn fixture_window(fixtures: &[Fixture], current_round: u32) -> Vec<Fixture> {
    let end = current_round.saturating_add(FIXTURE_HORIZON);
    fixtures
        .iter()
        .filter(|f| f.round.is_some_and(|r| r >= current_round && r < end))
        .cloned()
        .collect()
}

pub fn group_by_position(players: Vec<Player>) -> Rankings {
    let mut out = Rankings::new();
    for player in players {
        out.entry(player.position).or_default().push(player);
    }
    out
}

/// Stable: equal form keeps input order.
pub fn rank_by_form(players: &mut [Player]) {
    players.sort_by(|a, b| b.form.total_cmp(&a.form));
}

/// One entry per windowed fixture the team plays in. The rating is the
/// opponent side's difficulty figure from the fixture record.
pub fn difficulties_for(
    team_id: u32,
    window: &[Fixture],
    teams: &HashMap<u32, &Team>,
) -> Vec<Difficulty> {
    let mut out = Vec::new();
    for fixture in window {
        let (opponent_id, rating, is_home) = if fixture.home_team == team_id {
            (fixture.away_team, fixture.away_difficulty, true)
        } else if fixture.away_team == team_id {
            (fixture.home_team, fixture.home_difficulty, false)
        } else {
            continue;
        };
        let opponent = match teams.get(&opponent_id) {
            Some(team) => team.short_name.clone(),
            None => {
                warn!(team_id = opponent_id, "fixture opponent not in team list");
                String::new()
            }
        };
        out.push(Difficulty {
            opponent,
            rating,
            is_home,
        });
    }
    out
}
