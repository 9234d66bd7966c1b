pub mod aggregate;
pub mod classify;
pub mod client;
pub mod clock;
pub mod describe;
pub mod error;
pub mod geometry;
pub mod lineup;
pub mod nhle;
pub mod pipeline;
pub mod roster;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use classify::{EventType, EventZone, Play, ShotType};
pub use clock::SeasonType;
pub use error::PbpError;
pub use pipeline::{Diagnostics, EnrichOutput, enrich};
pub use roster::RosterDirectory;

pub type PlayerId = u64;
pub type GameId = u64;

/// Number of on-ice slots kept per side.
pub const ON_ICE_SLOTS: usize = 7;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of NHL wire format
// ---------------------------------------------------------------------------

/// One roster row. The same player shows up once per (season, team) they appeared for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String, // "Auston Matthews"
    pub sweater: Option<u16>,
    pub height_in: Option<u16>,
    pub weight_lb: Option<u16>,
    pub position: Position,
    pub hand: Option<Hand>,
    pub birth_city: Option<String>,
    pub birth_state: Option<String>,
    pub birth_country: Option<String>,
    pub season: u32, // 20232024
    pub team: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[default]
    #[serde(rename = "C")]
    Center,
    #[serde(rename = "L")]
    LeftWing,
    #[serde(rename = "R")]
    RightWing,
    #[serde(rename = "D")]
    Defense,
    #[serde(rename = "G")]
    Goalie,
}

impl Position {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Position::Center),
            "L" => Some(Position::LeftWing),
            "R" => Some(Position::RightWing),
            "D" => Some(Position::Defense),
            "G" => Some(Position::Goalie),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "L",
            Position::RightWing => "R",
            Position::Defense => "D",
            Position::Goalie => "G",
        }
    }

    /// Forward/defense split used for shooter labels. Anything not a defenseman counts as F.
    pub fn skater_group(&self) -> &'static str {
        match self {
            Position::Defense => "D",
            _ => "F",
        }
    }
}

/// Shoots/catches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    L,
    R,
}

impl Hand {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Hand::L),
            "R" => Some(Hand::R),
            _ => None,
        }
    }
}

/// End of the rink a team defends in a given period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(Side::Left),
            "right" => Some(Side::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    pub abbrev: String, // "TOR"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub date: NaiveDate,
    pub season: u32,
    pub game_type: u8, // 1 = preseason, 2 = regular, 3 = playoffs
    pub home: TeamRef,
    pub away: TeamRef,
    /// Side the home team defends, per period number.
    #[serde(default)]
    pub home_defending_side: BTreeMap<u8, Side>,
}

impl Game {
    pub fn season_type(&self) -> SeasonType {
        SeasonType::from_game_type(self.game_type)
    }

    pub fn defending_side(&self, period: u8) -> Option<Side> {
        self.home_defending_side.get(&period).copied()
    }

    /// Which side of this game a team id belongs to, if either.
    pub fn side_of(&self, team_id: Option<u32>) -> Option<TeamSide> {
        match team_id? {
            id if id == self.home.id => Some(TeamSide::Home),
            id if id == self.away.id => Some(TeamSide::Away),
            _ => None,
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamRef {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// A play as delivered upstream, before any classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    pub game_id: GameId,
    pub period: u8,
    pub time_in_period: String, // "MM:SS" elapsed
    pub time_remaining: Option<String>,
    pub type_desc_key: String, // "faceoff", "shot-on-goal", ...
    #[serde(default)]
    pub details: RawEventDetails,
}

/// Raw per-type role fields. Which ones are populated depends on the event type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventDetails {
    pub event_owner_team_id: Option<u32>,
    pub x_coord: Option<f64>,
    pub y_coord: Option<f64>,
    pub zone_code: Option<String>,
    pub shot_type: Option<String>,
    pub desc_key: Option<String>, // penalty type, e.g. "tripping"
    pub duration: Option<u16>,    // penalty minutes
    pub scoring_player_id: Option<PlayerId>,
    pub assist1_player_id: Option<PlayerId>,
    pub assist2_player_id: Option<PlayerId>,
    pub winning_player_id: Option<PlayerId>,
    pub losing_player_id: Option<PlayerId>,
    pub shooting_player_id: Option<PlayerId>,
    pub blocking_player_id: Option<PlayerId>,
    pub hitting_player_id: Option<PlayerId>,
    pub hittee_player_id: Option<PlayerId>,
    pub committed_by_player_id: Option<PlayerId>,
    pub drawn_by_player_id: Option<PlayerId>,
    pub player_id: Option<PlayerId>, // takeaway / giveaway
}

/// A shift as delivered upstream. Times are elapsed within the period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShift {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub team_abbrev: String,
    pub period: u8,
    pub start_time: String,
    pub end_time: String,
}

/// Everything one enrichment run needs. Also the on-disk snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub games: Vec<Game>,
    pub events: Vec<RawEvent>,
    pub shifts: Vec<RawShift>,
    pub players: Vec<Player>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Player reference resolved against the roster. `name`/`sweater` are None for unknown ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: Option<String>,
    pub sweater: Option<u16>,
}

/// Hand and position of a player involved in an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Handedness {
    pub hand: Option<Hand>,
    pub position: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEvent {
    pub season: u32,
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub season_type: SeasonType,
    pub event_index: u32,
    pub period: u8,
    pub game_seconds: u32,
    pub clock_time: Option<String>,
    pub event_type: Option<EventType>,
    pub description: Option<String>,
    pub event_detail: Option<ShotType>,
    pub event_zone: Option<EventZone>,
    pub event_team: Option<String>,
    pub opponent_team: Option<String>,
    pub players: [Option<PlayerRef>; 3],
    pub penalty_type: Option<String>,
    pub penalty_duration: Option<u16>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub home_on_ice: [Option<PlayerRef>; ON_ICE_SLOTS],
    pub away_on_ice: [Option<PlayerRef>; ON_ICE_SLOTS],
    pub home_goalie: Option<PlayerRef>,
    pub away_goalie: Option<PlayerRef>,
    pub home_team: String,
    pub away_team: String,
    pub home_skaters: u8,
    pub away_skaters: u8,
    pub home_score: u16,
    pub away_score: u16,
    pub score_state: String,    // "2v1", home first
    pub strength_state: String, // "5v4", home first
    pub home_zone: Option<EventZone>,
    pub shot_distance: Option<f64>,
    pub shot_angle: Option<f64>,
    pub faceoff_index: Option<u32>,
    pub faceoff_winner: Option<Handedness>,
    pub faceoff_loser: Option<Handedness>,
    pub shooter: Option<Handedness>,
}
