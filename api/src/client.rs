use crate::nhle::{
    NhlePlay, PlayByPlayResponse, RosterPlayer, RosterResponse, ScheduleGame, ScheduleResponse,
    ShiftChartResponse, ShiftRow, TeamsResponse,
};
use crate::{
    Game, GameId, Hand, Player, Position, RawEvent, RawEventDetails, RawShift, Side, TeamRef,
};
use chrono::NaiveDate;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const API_WEB: &str = "https://api-web.nhle.com/v1";
pub const API_STATS: &str = "https://api.nhle.com/stats/rest/en";

/// NHL API client over the public api-web and stats endpoints.
#[derive(Debug, Clone)]
pub struct NhlApi {
    client: Client,
    timeout: Duration,
    web_base: String,
    stats_base: String,
}

impl Default for NhlApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("nhlpbp/0.1 (play-by-play enrichment)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(30),
            web_base: API_WEB.to_owned(),
            stats_base: API_STATS.to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error for {1}: {0}")]
    Network(#[source] reqwest::Error, String),
    #[error("API error for {1}: {0}")]
    Api(#[source] reqwest::Error, String),
    #[error("parse error for {1}: {0}")]
    Parsing(#[source] reqwest::Error, String),
}

/// One game's play-by-play, split into raw events and per-period defending sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFeed {
    pub events: Vec<RawEvent>,
    pub home_defending_side: BTreeMap<u8, Side>,
}

impl NhlApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at other hosts (local mirrors, test servers).
    pub fn with_base_urls(web_base: impl Into<String>, stats_base: impl Into<String>) -> Self {
        Self {
            web_base: web_base.into().trim_end_matches('/').to_owned(),
            stats_base: stats_base.into().trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Every franchise the stats API knows about, defunct ones included.
    pub async fn fetch_teams(&self) -> ApiResult<Vec<TeamRef>> {
        let url = format!("{}/team", self.stats_base);
        let raw: TeamsResponse = self.get(&url).await?;
        let teams = raw
            .data
            .into_iter()
            .filter_map(|t| {
                Some(TeamRef {
                    id: t.id,
                    abbrev: t.tri_code?,
                })
            })
            .collect();
        Ok(teams)
    }

    /// Roster rows for one team-season. A team that did not play that season has none.
    pub async fn fetch_roster(&self, team: &str, season: u32) -> ApiResult<Vec<Player>> {
        let url = format!("{}/roster/{team}/{season}", self.web_base);
        let raw: RosterResponse = self.get(&url).await?;
        Ok(raw
            .into_players()
            .filter_map(|p| map_roster_player(p, season, team))
            .collect())
    }

    /// Games on one team's schedule for a season. Defending sides are filled in later from
    /// the play-by-play.
    pub async fn fetch_schedule(&self, team: &str, season: u32) -> ApiResult<Vec<Game>> {
        let url = format!("{}/club-schedule-season/{team}/{season}", self.web_base);
        let raw: ScheduleResponse = self.get(&url).await?;
        Ok(raw.games.into_iter().filter_map(map_schedule_game).collect())
    }

    pub async fn fetch_play_by_play(&self, game_id: GameId) -> ApiResult<GameFeed> {
        let url = format!("{}/gamecenter/{game_id}/play-by-play", self.web_base);
        let raw: PlayByPlayResponse = self.get(&url).await?;
        Ok(map_play_by_play(game_id, raw))
    }

    pub async fn fetch_shifts(&self, game_id: GameId) -> ApiResult<Vec<RawShift>> {
        let url = format!("{}/shiftcharts?cayenneExp=gameId={game_id}", self.stats_base);
        let raw: ShiftChartResponse = self.get(&url).await?;
        Ok(raw.data.into_iter().filter_map(map_shift).collect())
    }

    /// Client-error statuses come back as `T::default()`; upstream answers 404 for
    /// team-seasons and games it has no data for.
    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    log::debug!("{url} answered {:?}; treating as empty", e.status());
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: NHL wire types → domain records
// ---------------------------------------------------------------------------

fn map_roster_player(p: RosterPlayer, season: u32, team: &str) -> Option<Player> {
    let Some(position) = p.position_code.as_deref().and_then(Position::from_code) else {
        log::debug!("skipping roster row {} with position {:?}", p.id, p.position_code);
        return None;
    };
    let name = [p.first_name.into_inner(), p.last_name.into_inner()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    Some(Player {
        id: p.id,
        name,
        sweater: p.sweater_number,
        height_in: p.height_in_inches,
        weight_lb: p.weight_in_pounds,
        position,
        hand: p.shoots_catches.as_deref().and_then(Hand::from_code),
        birth_city: p.birth_city.into_inner(),
        birth_state: p.birth_state_province.into_inner(),
        birth_country: p.birth_country,
        season,
        team: team.to_owned(),
    })
}

fn map_schedule_game(g: ScheduleGame) -> Option<Game> {
    let date = match NaiveDate::parse_from_str(&g.game_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            log::warn!("game {} has unreadable date {:?}: {e}", g.id, g.game_date);
            return None;
        }
    };
    Some(Game {
        id: g.id,
        date,
        season: g.season,
        game_type: g.game_type,
        home: TeamRef {
            id: g.home_team.id,
            abbrev: g.home_team.abbrev,
        },
        away: TeamRef {
            id: g.away_team.id,
            abbrev: g.away_team.abbrev,
        },
        home_defending_side: BTreeMap::new(),
    })
}

fn map_play_by_play(game_id: GameId, raw: PlayByPlayResponse) -> GameFeed {
    let mut home_defending_side = BTreeMap::new();
    let events = raw
        .plays
        .into_iter()
        .map(|play| {
            if let Some(side) = play.home_team_defending_side.as_deref().and_then(Side::from_raw) {
                home_defending_side
                    .entry(play.period_descriptor.number)
                    .or_insert(side);
            }
            map_play(game_id, play)
        })
        .collect();
    GameFeed {
        events,
        home_defending_side,
    }
}

fn map_play(game_id: GameId, play: NhlePlay) -> RawEvent {
    let d = play.details;
    RawEvent {
        game_id,
        period: play.period_descriptor.number,
        time_in_period: play.time_in_period,
        time_remaining: play.time_remaining,
        type_desc_key: play.type_desc_key,
        details: RawEventDetails {
            event_owner_team_id: d.event_owner_team_id,
            x_coord: d.x_coord,
            y_coord: d.y_coord,
            zone_code: d.zone_code,
            shot_type: d.shot_type,
            desc_key: d.desc_key,
            duration: d.duration,
            scoring_player_id: d.scoring_player_id,
            assist1_player_id: d.assist1_player_id,
            assist2_player_id: d.assist2_player_id,
            winning_player_id: d.winning_player_id,
            losing_player_id: d.losing_player_id,
            shooting_player_id: d.shooting_player_id,
            blocking_player_id: d.blocking_player_id,
            hitting_player_id: d.hitting_player_id,
            hittee_player_id: d.hittee_player_id,
            committed_by_player_id: d.committed_by_player_id,
            drawn_by_player_id: d.drawn_by_player_id,
            player_id: d.player_id,
        },
    }
}

/// Shift rows without both clock ends or a team are not shifts (goal markers share the feed).
fn map_shift(row: ShiftRow) -> Option<RawShift> {
    Some(RawShift {
        game_id: row.game_id,
        player_id: row.player_id,
        team_abbrev: row.team_abbrev?,
        period: row.period,
        start_time: row.start_time?,
        end_time: row.end_time?,
    })
}
