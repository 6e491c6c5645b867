use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeErrors};
use crate::model::{Fixture, Player, Position, RawSnapshot, Resource, Snapshot, Team};

#[derive(Debug, Deserialize)]
struct RawTeam {
    id: u32,
    short_name: String,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    first_name: String,
    second_name: String,
    web_name: String,
    #[serde(deserialize_with = "decimal_from_str")]
    form: f64,
    element_type: i64,
    transfers_in_event: i64,
    team: u32,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: u32,
    #[serde(default)]
    is_next: bool,
}

#[derive(Debug, Deserialize)]
struct RawFixture {
    event: Option<u32>,
    team_h: u32,
    team_a: u32,
    team_h_difficulty: u8,
    team_a_difficulty: u8,
}

fn decimal_from_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| serde::de::Error::custom(format!("form {raw:?} is not a decimal")))
}

/// Bootstrap payload with players still pointing at bare team ids.
#[derive(Debug)]
pub struct Bootstrap {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub current_round: u32,
}

/// Decodes both payloads, reporting every failure instead of the first.
pub fn merge(raw: &RawSnapshot) -> Result<Snapshot, DecodeErrors> {
    let mut errors = Vec::new();
    let bootstrap = parse_bootstrap_json(&raw.bootstrap).map_err(|e| errors.extend(e.0));
    let fixtures = parse_fixtures_json(&raw.fixtures).map_err(|e| errors.push(e));

    match (bootstrap, fixtures) {
        (Ok(bootstrap), Ok(fixtures)) => Ok(Snapshot {
            players: bootstrap.players,
            teams: bootstrap.teams,
            fixtures,
            current_round: bootstrap.current_round,
        }),
        _ => Err(DecodeErrors(errors)),
    }
}

/// Decodes teams, elements and events independently, then resolves each
/// player's team. Nothing is resolved if any section failed.
pub fn parse_bootstrap_json(raw: &[u8]) -> Result<Bootstrap, DecodeErrors> {
    let mut root: Map<String, Value> = serde_json::from_slice(raw).map_err(|source| {
        DecodeErrors(vec![DecodeError::NotAnObject {
            resource: Resource::Bootstrap,
            source,
        }])
    })?;

    let mut errors = Vec::new();
    let teams = section::<RawTeam>(&mut root, "teams").map_err(|e| errors.push(e));
    let elements = section::<RawElement>(&mut root, "elements").map_err(|e| errors.push(e));
    let current_round = section::<RawEvent>(&mut root, "events")
        .and_then(|events| next_round(&events))
        .map_err(|e| errors.push(e));

    let (Ok(teams), Ok(elements), Ok(current_round)) = (teams, elements, current_round) else {
        return Err(DecodeErrors(errors));
    };

    let teams: Vec<Team> = teams
        .into_iter()
        .map(|t| Team {
            id: t.id,
            short_name: t.short_name,
        })
        .collect();
    let by_id: HashMap<u32, &Team> = teams.iter().map(|t| (t.id, t)).collect();
    let players = elements
        .into_iter()
        .map(|e| Player {
            position: Position::from_code(e.element_type),
            first_name: e.first_name,
            last_name: e.second_name,
            display_name: e.web_name,
            form: e.form,
            transfers_in: e.transfers_in_event,
            team: by_id.get(&e.team).map(|t| (*t).clone()).unwrap_or(Team {
                id: e.team,
                short_name: String::new(),
            }),
            difficulties: Vec::new(),
        })
        .collect();

    Ok(Bootstrap {
        teams,
        players,
        current_round,
    })
}

pub fn parse_fixtures_json(raw: &[u8]) -> Result<Vec<Fixture>, DecodeError> {
    let fixtures: Vec<RawFixture> =
        serde_json::from_slice(raw).map_err(|source| DecodeError::Section {
            resource: Resource::Fixtures,
            section: "fixtures",
            source,
        })?;
    Ok(fixtures
        .into_iter()
        .map(|f| Fixture {
            round: f.event,
            home_team: f.team_h,
            away_team: f.team_a,
            home_difficulty: f.team_h_difficulty,
            away_difficulty: f.team_a_difficulty,
        })
        .collect())
}

fn section<T: DeserializeOwned>(
    root: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Vec<T>, DecodeError> {
    let value = root.remove(name).ok_or(DecodeError::MissingSection {
        resource: Resource::Bootstrap,
        section: name,
    })?;
    serde_json::from_value(value).map_err(|source| DecodeError::Section {
        resource: Resource::Bootstrap,
        section: name,
        source,
    })
}

fn next_round(events: &[RawEvent]) -> Result<u32, DecodeError> {
    let flagged: Vec<u32> = events.iter().filter(|e| e.is_next).map(|e| e.id).collect();
    match flagged.as_slice() {
        [] => Err(DecodeError::NoNextRound),
        [id] => Ok(*id),
        _ => Err(DecodeError::AmbiguousNextRound(flagged)),
    }
}
