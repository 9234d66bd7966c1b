/// NHL API raw wire types: serde shapes for the api-web and stats/rest responses.
/// These map onto the domain records in client.rs.
use serde::Deserialize;

/// `{"default": "Toronto", "fr": "..."}` localized strings. Only the default is kept.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Localized {
    pub default: Option<String>,
}

impl Localized {
    pub fn into_inner(self) -> Option<String> {
        self.default
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NhleTeamRef {
    pub id: u32,
    #[serde(default)]
    pub abbrev: String,
}

// ---------------------------------------------------------------------------
// Teams  (stats/rest/en/team)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    #[serde(default)]
    pub data: Vec<NhleTeam>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NhleTeam {
    pub id: u32,
    pub tri_code: Option<String>,
    pub full_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Roster  (v1/roster/{team}/{season})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    #[serde(default)]
    pub forwards: Vec<RosterPlayer>,
    #[serde(default)]
    pub defensemen: Vec<RosterPlayer>,
    #[serde(default)]
    pub goalies: Vec<RosterPlayer>,
}

impl RosterResponse {
    pub fn into_players(self) -> impl Iterator<Item = RosterPlayer> {
        self.forwards
            .into_iter()
            .chain(self.defensemen)
            .chain(self.goalies)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub id: u64,
    #[serde(default)]
    pub first_name: Localized,
    #[serde(default)]
    pub last_name: Localized,
    pub sweater_number: Option<u16>,
    pub position_code: Option<String>,
    pub shoots_catches: Option<String>,
    pub height_in_inches: Option<u16>,
    pub weight_in_pounds: Option<u16>,
    #[serde(default)]
    pub birth_city: Localized,
    #[serde(default)]
    pub birth_state_province: Localized,
    pub birth_country: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule  (v1/club-schedule-season/{team}/{season})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    pub id: u64,
    pub season: u32,
    pub game_type: u8,
    pub game_date: String, // "2023-10-11"
    pub home_team: NhleTeamRef,
    pub away_team: NhleTeamRef,
}

// ---------------------------------------------------------------------------
// Play-by-play  (v1/gamecenter/{game}/play-by-play)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlayResponse {
    pub id: u64,
    #[serde(default)]
    pub plays: Vec<NhlePlay>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NhlePlay {
    pub event_id: Option<u64>,
    pub period_descriptor: PeriodDescriptor,
    pub time_in_period: String,
    pub time_remaining: Option<String>,
    pub home_team_defending_side: Option<String>,
    pub type_desc_key: String,
    pub sort_order: Option<u32>,
    #[serde(default)]
    pub details: PlayDetails,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    pub number: u8,
    pub period_type: Option<String>, // "REG", "OT", "SO"
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayDetails {
    pub event_owner_team_id: Option<u32>,
    pub x_coord: Option<f64>,
    pub y_coord: Option<f64>,
    pub zone_code: Option<String>,
    pub shot_type: Option<String>,
    pub desc_key: Option<String>,
    pub duration: Option<u16>,
    pub scoring_player_id: Option<u64>,
    pub assist1_player_id: Option<u64>,
    pub assist2_player_id: Option<u64>,
    pub winning_player_id: Option<u64>,
    pub losing_player_id: Option<u64>,
    pub shooting_player_id: Option<u64>,
    pub blocking_player_id: Option<u64>,
    pub hitting_player_id: Option<u64>,
    pub hittee_player_id: Option<u64>,
    pub committed_by_player_id: Option<u64>,
    pub drawn_by_player_id: Option<u64>,
    pub player_id: Option<u64>,
}

// ---------------------------------------------------------------------------
// Shift charts  (stats/rest/en/shiftcharts?cayenneExp=gameId={game})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ShiftChartResponse {
    #[serde(default)]
    pub data: Vec<ShiftRow>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRow {
    pub game_id: u64,
    pub player_id: u64,
    pub team_abbrev: Option<String>,
    pub period: u8,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
