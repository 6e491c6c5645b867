use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// The two upstream payloads a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Players, teams and events in one document.
    Bootstrap,
    Fixtures,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Bootstrap, Resource::Fixtures];

    pub fn file_name(self, date: NaiveDate) -> String {
        let day = date.format("%Y-%m-%d");
        match self {
            Resource::Bootstrap => format!("{day}.json"),
            Resource::Fixtures => format!("{day}-fixtures.json"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Bootstrap => f.write_str("bootstrap-static"),
            Resource::Fixtures => f.write_str("fixtures"),
        }
    }
}

/// Verbatim response bodies, as fetched or as read back from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSnapshot {
    pub bootstrap: Vec<u8>,
    pub fixtures: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Maps the upstream `element_type` code. Unknown codes count as forwards.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Position::Goalkeeper,
            2 => Position::Defender,
            3 => Position::Midfielder,
            _ => Position::Forward,
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Team {
    pub id: u32,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Position,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub form: f64,
    pub transfers_in: i64,
    pub team: Team,
    pub difficulties: Vec<Difficulty>,
}

impl Player {
    /// Upcoming fixtures as `"{opponent}{tag}:{rating}"`, comma separated.
    pub fn fdr_summary(&self) -> String {
        self.difficulties
            .iter()
            .map(Difficulty::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// `None` while the match is unscheduled.
    pub round: Option<u32>,
    pub home_team: u32,
    pub away_team: u32,
    pub home_difficulty: u8,
    pub away_difficulty: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub opponent: String,
    pub rating: u8,
    /// The player's own team is at home.
    pub is_home: bool,
}

impl Difficulty {
    pub fn location_tag(&self) -> &'static str {
        if self.is_home { "(H)" } else { "(A)" }
    }

    pub fn label(&self) -> String {
        format!("{}{}:{}", self.opponent, self.location_tag(), self.rating)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub fixtures: Vec<Fixture>,
    pub current_round: u32,
}

/// Top players per position, best form first.
pub type Rankings = BTreeMap<Position, Vec<Player>>;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Difficulty, Player, Position, Resource, Team};

    #[test]
    fn unknown_position_codes_are_forwards() {
        assert_eq!(Position::from_code(1), Position::Goalkeeper);
        assert_eq!(Position::from_code(3), Position::Midfielder);
        assert_eq!(Position::from_code(4), Position::Forward);
        assert_eq!(Position::from_code(0), Position::Forward);
        assert_eq!(Position::from_code(9), Position::Forward);
        assert_eq!(Position::from_code(256), Position::Forward);
        assert_eq!(Position::from_code(-1), Position::Forward);
    }

    #[test]
    fn file_names_follow_local_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Resource::Bootstrap.file_name(date), "2024-03-09.json");
        assert_eq!(Resource::Fixtures.file_name(date), "2024-03-09-fixtures.json");
    }

    #[test]
    fn fdr_summary_joins_labels() {
        let player = Player {
            position: Position::Midfielder,
            first_name: "Bukayo".to_string(),
            last_name: "Saka".to_string(),
            display_name: "Saka".to_string(),
            form: 7.2,
            transfers_in: 1200,
            team: Team {
                id: 1,
                short_name: "ARS".to_string(),
            },
            difficulties: vec![
                Difficulty {
                    opponent: "BUR".to_string(),
                    rating: 2,
                    is_home: true,
                },
                Difficulty {
                    opponent: "LIV".to_string(),
                    rating: 5,
                    is_home: false,
                },
            ],
        };
        assert_eq!(player.fdr_summary(), "BUR(H):2, LIV(A):5");
    }

    #[test]
    fn location_tag_follows_home_flag() {
        let mut difficulty = Difficulty {
            opponent: "CHE".to_string(),
            rating: 4,
            is_home: true,
        };
        assert_eq!(difficulty.location_tag(), "(H)");
        difficulty.is_home = false;
        assert_eq!(difficulty.location_tag(), "(A)");
        assert_eq!(difficulty.label(), "CHE(A):4");
    }

    #[test]
    fn fdr_summary_empty_without_fixtures() {
        let player = Player {
            position: Position::Goalkeeper,
            first_name: String::new(),
            last_name: String::new(),
            display_name: "Raya".to_string(),
            form: 0.0,
            transfers_in: 0,
            team: Team::default(),
            difficulties: Vec::new(),
        };
        assert_eq!(player.fdr_summary(), "");
    }
}
