//! Batch enrichment.
//!
//! Records are partitioned by game before anything else happens, and every per-game step
//! runs against that game's records only. Games are enriched in parallel; within a game
//! everything is sequential over the ordered events.

use crate::aggregate::{self, GameState};
use crate::classify::{EventZone, Play, ShotType};
use crate::clock::event_clock;
use crate::describe::describe;
use crate::error::PbpError;
use crate::geometry::{home_zone, shot_geometry};
use crate::lineup::{DataWarning, EventMoment, Lineup, ShiftIndex, reconstruct};
use crate::roster::RosterDirectory;
use crate::{Batch, EnrichedEvent, Game, GameId, ON_ICE_SLOTS, PlayerRef, RawEvent, RawShift};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Event,
    Shift,
}

/// A record left out of the output, with its position in the input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub kind: RecordKind,
    pub game_id: GameId,
    pub position: usize,
    #[serde(serialize_with = "as_display")]
    pub reason: PbpError,
}

fn as_display<S: serde::Serializer>(err: &PbpError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub exclusions: Vec<Exclusion>,
    pub warnings: Vec<DataWarning>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.exclusions.is_empty() && self.warnings.is_empty()
    }

    fn extend(&mut self, other: Diagnostics) {
        self.exclusions.extend(other.exclusions);
        self.warnings.extend(other.warnings);
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnrichOutput {
    pub events: Vec<EnrichedEvent>,
    pub diagnostics: Diagnostics,
}

/// One game's slice of the batch. Positions index into the batch's own vectors.
struct GameSlice<'a> {
    game: &'a Game,
    events: Vec<(usize, &'a RawEvent)>,
    shifts: Vec<(usize, &'a RawShift)>,
}

/// Enrich every event in the batch.
///
/// Malformed records are excluded and reported in the diagnostics; they never abort the
/// batch. Output is ordered by (game, period, game-seconds, event index) and does not
/// depend on the order games appear in the input.
pub fn enrich(batch: &Batch) -> EnrichOutput {
    let roster = RosterDirectory::build(batch.players.iter().cloned());
    log::debug!("roster resolved to {} players", roster.len());

    let (slices, mut diagnostics) = partition(batch);

    let per_game: Vec<(Vec<EnrichedEvent>, Diagnostics)> = slices
        .par_iter()
        .map(|slice| enrich_game(slice, &roster))
        .collect();

    let mut events = Vec::with_capacity(batch.events.len());
    for (game_events, game_diagnostics) in per_game {
        events.extend(game_events);
        diagnostics.extend(game_diagnostics);
    }
    events.sort_by_key(|e| (e.game_id, e.period, e.game_seconds, e.event_index));

    for ex in &diagnostics.exclusions {
        log::warn!(
            "excluded {:?} #{} (game {}): {}",
            ex.kind,
            ex.position,
            ex.game_id,
            ex.reason
        );
    }
    log::info!(
        "enriched {} events across {} games ({} excluded, {} warnings)",
        events.len(),
        slices.len(),
        diagnostics.exclusions.len(),
        diagnostics.warnings.len()
    );

    EnrichOutput { events, diagnostics }
}

fn partition(batch: &Batch) -> (Vec<GameSlice<'_>>, Diagnostics) {
    let mut diagnostics = Diagnostics::default();
    let mut slices: BTreeMap<GameId, GameSlice<'_>> = batch
        .games
        .iter()
        .map(|game| {
            (
                game.id,
                GameSlice {
                    game,
                    events: Vec::new(),
                    shifts: Vec::new(),
                },
            )
        })
        .collect();

    for (position, event) in batch.events.iter().enumerate() {
        match slices.get_mut(&event.game_id) {
            Some(slice) => slice.events.push((position, event)),
            None => diagnostics.exclusions.push(Exclusion {
                kind: RecordKind::Event,
                game_id: event.game_id,
                position,
                reason: PbpError::UnknownGame { game_id: event.game_id },
            }),
        }
    }

    // Shifts for games without metadata have nothing to attach to; they are dropped
    // without an exclusion since no output event could have used them.
    for (position, shift) in batch.shifts.iter().enumerate() {
        if let Some(slice) = slices.get_mut(&shift.game_id) {
            slice.shifts.push((position, shift));
        }
    }

    (slices.into_values().collect(), diagnostics)
}

/// An event that survived clock parsing, with its sort keys.
struct Timed<'a> {
    position: usize,
    raw: &'a RawEvent,
    elapsed: u32,
    game_seconds: u32,
}

fn enrich_game(
    slice: &GameSlice<'_>,
    roster: &RosterDirectory,
) -> (Vec<EnrichedEvent>, Diagnostics) {
    let game = slice.game;
    let season_type = game.season_type();
    let mut diagnostics = Diagnostics::default();

    let mut timed = Vec::with_capacity(slice.events.len());
    for &(position, raw) in &slice.events {
        match event_clock(raw.period, &raw.time_in_period, season_type) {
            Ok(clock) => timed.push(Timed {
                position,
                raw,
                elapsed: clock.elapsed,
                game_seconds: clock.game_seconds,
            }),
            Err(reason) => diagnostics.exclusions.push(Exclusion {
                kind: RecordKind::Event,
                game_id: game.id,
                position,
                reason,
            }),
        }
    }
    timed.sort_by_key(|t| (t.raw.period, t.elapsed, t.position));

    let (index, rejected) = ShiftIndex::build(slice.shifts.iter().copied(), roster);
    diagnostics.exclusions.extend(rejected.into_iter().map(|(position, reason)| Exclusion {
        kind: RecordKind::Shift,
        game_id: game.id,
        position,
        reason,
    }));

    let plays: Vec<Option<Play>> = timed.iter().map(|t| Play::classify(t.raw)).collect();

    let mut state = GameState::new();
    let mut running = Vec::with_capacity(timed.len());
    let mut moments = Vec::with_capacity(timed.len());
    for (t, play) in timed.iter().zip(&plays) {
        let event_type = play.as_ref().map(Play::event_type);
        let team = game.side_of(t.raw.details.event_owner_team_id);
        let r = state.advance(event_type, team);
        moments.push(EventMoment {
            event_index: r.event_index,
            period: t.raw.period,
            game_seconds: t.game_seconds,
            event_type,
        });
        running.push(r);
    }

    let (on_ice, warnings) = reconstruct(
        game.id,
        &moments,
        &index,
        &game.home.abbrev,
        &game.away.abbrev,
    );
    diagnostics.warnings.extend(warnings);

    let events = timed
        .iter()
        .zip(&plays)
        .zip(running.iter().zip(&on_ice))
        .map(|((t, play), (r, lineups))| {
            let raw = t.raw;
            let d = &raw.details;
            let event_type = play.as_ref().map(Play::event_type);
            let participants = play.as_ref().map(Play::participants).unwrap_or([None; 3]);
            let team = game.side_of(d.event_owner_team_id);
            let home_defends = game.defending_side(raw.period);
            let geometry = shot_geometry(event_type, d.x_coord, d.y_coord, team, home_defends);
            let (home_skaters, away_skaters, strength_state) =
                aggregate::strength(&lineups.home, &lineups.away);
            let faceoff = r.faceoff_index.is_some();

            let mut ev = EnrichedEvent {
                season: game.season,
                game_id: game.id,
                game_date: game.date,
                season_type,
                event_index: r.event_index,
                period: raw.period,
                game_seconds: t.game_seconds,
                clock_time: raw.time_remaining.clone(),
                event_type,
                description: None,
                event_detail: d.shot_type.as_deref().and_then(ShotType::from_raw),
                event_zone: d.zone_code.as_deref().and_then(EventZone::from_code),
                event_team: team.map(|s| game.team(s).abbrev.clone()),
                opponent_team: team.map(|s| game.team(s.opponent()).abbrev.clone()),
                players: participants.map(|id| roster.player_ref(id)),
                penalty_type: d.desc_key.clone(),
                penalty_duration: d.duration,
                x: d.x_coord,
                y: d.y_coord,
                home_on_ice: slots(&lineups.home, roster),
                away_on_ice: slots(&lineups.away, roster),
                home_goalie: roster.player_ref(lineups.home.goalie),
                away_goalie: roster.player_ref(lineups.away.goalie),
                home_team: game.home.abbrev.clone(),
                away_team: game.away.abbrev.clone(),
                home_skaters,
                away_skaters,
                home_score: r.home_score,
                away_score: r.away_score,
                score_state: r.score_state(),
                strength_state,
                home_zone: home_zone(d.x_coord, home_defends),
                shot_distance: geometry.map(|g| g.distance),
                shot_angle: geometry.map(|g| g.angle),
                faceoff_index: r.faceoff_index,
                faceoff_winner: faceoff
                    .then(|| aggregate::handedness(roster, participants[0]))
                    .flatten(),
                faceoff_loser: faceoff
                    .then(|| aggregate::handedness(roster, participants[1]))
                    .flatten(),
                shooter: aggregate::shooter(
                    roster,
                    event_type,
                    d.x_coord.is_some() && d.y_coord.is_some(),
                    participants[0],
                ),
            };
            ev.description = describe(&ev);
            ev
        })
        .collect();

    (events, diagnostics)
}

/// Fixed-width on-ice slots; unfilled slots stay empty.
fn slots(lineup: &Lineup, roster: &RosterDirectory) -> [Option<PlayerRef>; ON_ICE_SLOTS] {
    std::array::from_fn(|i| lineup.skaters.get(i).and_then(|&id| roster.player_ref(Some(id))))
}
