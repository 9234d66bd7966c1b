//! On-ice lineup reconstruction.
//!
//! Shifts are indexed once per game by (team, period). Each event is then matched against
//! that index at its game-second, with the matching rule picked from a two-event window
//! over the game's ordered events. The index only ever holds one game's shifts, so the
//! look-ahead cannot reach into another game.

use crate::classify::EventType;
use crate::clock::shift_seconds;
use crate::error::PbpError;
use crate::roster::RosterDirectory;
use crate::{GameId, ON_ICE_SLOTS, PlayerId, RawShift};
use serde::Serialize;
use std::collections::HashMap;

/// A shift normalized to game-seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSpan {
    pub player_id: PlayerId,
    pub start: u32,
    pub end: u32,
    pub goalie: bool,
}

/// How a shift interval is matched against an event's game-second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `start < t <= end`: the shift was already underway and has not yet ended.
    Stoppage,
    /// `start <= t < end`: a player leaving at `t` is already off the ice.
    InPlay,
}

impl MatchRule {
    pub fn matches(self, span: &ShiftSpan, t: u32) -> bool {
        match self {
            MatchRule::Stoppage => span.start < t && span.end >= t,
            MatchRule::InPlay => span.start <= t && span.end > t,
        }
    }
}

/// The parts of an ordered event that lineup matching looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMoment {
    pub event_index: u32,
    pub period: u8,
    pub game_seconds: u32,
    pub event_type: Option<EventType>,
}

impl EventMoment {
    fn is_stoppage(&self) -> bool {
        self.event_type.is_some_and(|t| t.is_stoppage())
    }
}

/// Pick the matching rule for `current` given the event right after it in the same game.
pub fn select_rule(current: &EventMoment, next: &EventMoment) -> MatchRule {
    if current.is_stoppage() {
        return MatchRule::Stoppage;
    }
    // An in-play event at the same instant as a following stoppage is matched as the stoppage.
    if current.game_seconds == next.game_seconds && next.is_stoppage() {
        return MatchRule::Stoppage;
    }
    MatchRule::InPlay
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineup {
    /// Every matched player for the side, goaltender included, capped at [`ON_ICE_SLOTS`].
    pub skaters: Vec<PlayerId>,
    pub goalie: Option<PlayerId>,
}

impl Lineup {
    /// Players on the ice, not counting the goaltender's slot.
    pub fn skater_count(&self) -> u8 {
        self.skaters
            .iter()
            .filter(|&&id| Some(id) != self.goalie)
            .count() as u8
    }
}

/// Data-quality findings. None of these stop processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    ExtraSkaters {
        game_id: GameId,
        event_index: u32,
        team: String,
        matched: usize,
    },
    MultipleGoalies {
        game_id: GameId,
        event_index: u32,
        team: String,
        matched: usize,
    },
}

/// Lineup lookup for a single game.
#[derive(Debug, Clone, Default)]
pub struct ShiftIndex {
    spans: HashMap<(String, u8), Vec<ShiftSpan>>,
}

struct Matched {
    lineup: Lineup,
    skater_matches: usize,
    goalie_matches: usize,
}

impl ShiftIndex {
    /// Index one game's shifts. Shifts whose clocks do not parse are returned with their
    /// position and left out of the index.
    pub fn build<'a, I>(shifts: I, roster: &RosterDirectory) -> (Self, Vec<(usize, PbpError)>)
    where
        I: IntoIterator<Item = (usize, &'a RawShift)>,
    {
        let mut spans: HashMap<(String, u8), Vec<ShiftSpan>> = HashMap::new();
        let mut rejected = Vec::new();

        for (position, shift) in shifts {
            let bounds = shift_seconds(shift.period, &shift.start_time).and_then(|start| {
                shift_seconds(shift.period, &shift.end_time).map(|end| (start, end))
            });
            match bounds {
                Ok((start, end)) => spans
                    .entry((shift.team_abbrev.clone(), shift.period))
                    .or_default()
                    .push(ShiftSpan {
                        player_id: shift.player_id,
                        start,
                        end,
                        goalie: roster.is_goalie(shift.player_id),
                    }),
                Err(err) => rejected.push((position, err)),
            }
        }

        (Self { spans }, rejected)
    }

    pub fn len(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn lookup(&self, team: &str, period: u8, t: u32, rule: MatchRule) -> Matched {
        let mut matched = Matched {
            lineup: Lineup::default(),
            skater_matches: 0,
            goalie_matches: 0,
        };
        let Some(spans) = self.spans.get(&(team.to_owned(), period)) else {
            return matched;
        };

        for span in spans.iter().filter(|s| rule.matches(s, t)) {
            matched.skater_matches += 1;
            if matched.lineup.skaters.len() < ON_ICE_SLOTS {
                matched.lineup.skaters.push(span.player_id);
            }
            if span.goalie {
                matched.goalie_matches += 1;
                // First match wins.
                matched.lineup.goalie.get_or_insert(span.player_id);
            }
        }
        matched
    }

    /// Lineup for one team at one instant.
    pub fn lineup(&self, team: &str, period: u8, t: u32, rule: MatchRule) -> Lineup {
        self.lookup(team, period, t, rule).lineup
    }
}

/// Home and away lineups for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnIce {
    pub home: Lineup,
    pub away: Lineup,
}

/// Reconstruct lineups for one game's events, already in game order.
///
/// The last event of the game has no successor and gets empty lineups.
pub fn reconstruct(
    game_id: GameId,
    moments: &[EventMoment],
    index: &ShiftIndex,
    home_team: &str,
    away_team: &str,
) -> (Vec<OnIce>, Vec<DataWarning>) {
    let mut on_ice = Vec::with_capacity(moments.len());
    let mut warnings = Vec::new();

    for window in moments.windows(2) {
        let (current, next) = (&window[0], &window[1]);
        let rule = select_rule(current, next);

        let mut side = |team: &str| {
            let m = index.lookup(team, current.period, current.game_seconds, rule);
            if m.skater_matches > ON_ICE_SLOTS {
                log::warn!(
                    "game {game_id} event {}: {} shifts matched for {team}, keeping {ON_ICE_SLOTS}",
                    current.event_index,
                    m.skater_matches
                );
                warnings.push(DataWarning::ExtraSkaters {
                    game_id,
                    event_index: current.event_index,
                    team: team.to_owned(),
                    matched: m.skater_matches,
                });
            }
            if m.goalie_matches > 1 {
                log::warn!(
                    "game {game_id} event {}: {} goaltenders matched for {team}, keeping the first",
                    current.event_index,
                    m.goalie_matches
                );
                warnings.push(DataWarning::MultipleGoalies {
                    game_id,
                    event_index: current.event_index,
                    team: team.to_owned(),
                    matched: m.goalie_matches,
                });
            }
            m.lineup
        };

        let home = side(home_team);
        let away = side(away_team);
        on_ice.push(OnIce { home, away });
    }

    if !moments.is_empty() {
        on_ice.push(OnIce::default());
    }
    (on_ice, warnings)
}
