use anyhow::Context;
use futures_util::{StreamExt, TryStreamExt, stream};
use log::{debug, info};
use nhl_api::client::NhlApi;
use nhl_api::{Batch, Game, GameId, Player, RawEvent, RawShift, TeamRef};
use std::collections::BTreeMap;

/// What to pull from upstream.
#[derive(Debug, Clone, Default)]
pub struct FetchPlan {
    /// First and last season start years, inclusive ("2023" is 2023-24).
    pub from: u16,
    pub to: u16,
    /// Team abbreviations; empty means every team the stats API lists.
    pub teams: Vec<String>,
    pub include_preseason: bool,
}

/// Upstream season ids ("20232024") for a span of start years.
pub fn seasons(from: u16, to: u16) -> Vec<u32> {
    (from..=to)
        .map(|year| u32::from(year) * 10_000 + u32::from(year) + 1)
        .collect()
}

/// De-duplicate schedule rows by game id and drop game types the run does not want.
/// Preseason (type 1) is dropped unless asked for.
pub fn select_games(games: impl IntoIterator<Item = Game>, include_preseason: bool) -> Vec<Game> {
    let unique: BTreeMap<GameId, Game> = games.into_iter().map(|g| (g.id, g)).collect();
    unique
        .into_values()
        .filter(|g| include_preseason || g.game_type > 1)
        .collect()
}

pub struct Fetcher {
    client: NhlApi,
    concurrency: usize,
}

impl Fetcher {
    pub fn new(client: NhlApi, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Acquire a full batch. The result is ordered by game id no matter which request
    /// finished first.
    pub async fn run(&self, plan: &FetchPlan) -> anyhow::Result<Batch> {
        let teams = self.teams(&plan.teams).await?;
        let seasons = seasons(plan.from, plan.to);
        info!("fetching {} teams over {} seasons", teams.len(), seasons.len());

        let pairs: Vec<(String, u32)> = teams
            .iter()
            .flat_map(|t| seasons.iter().map(move |&s| (t.abbrev.clone(), s)))
            .collect();

        let per_team: Vec<(Vec<Player>, Vec<Game>)> = stream::iter(pairs)
            .map(|(team, season)| async move {
                let roster = self
                    .client
                    .fetch_roster(&team, season)
                    .await
                    .with_context(|| format!("roster {team} {season}"))?;
                let schedule = self
                    .client
                    .fetch_schedule(&team, season)
                    .await
                    .with_context(|| format!("schedule {team} {season}"))?;
                debug!("{team} {season}: {} roster rows, {} games", roster.len(), schedule.len());
                anyhow::Ok((roster, schedule))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        let mut players = Vec::new();
        let mut schedule = Vec::new();
        for (roster, games) in per_team {
            players.extend(roster);
            schedule.extend(games);
        }
        let games = select_games(schedule, plan.include_preseason);
        info!("{} roster rows, {} games to fetch", players.len(), games.len());

        let mut fetched: Vec<(Game, Vec<RawEvent>, Vec<RawShift>)> = stream::iter(games)
            .map(|mut game| async move {
                let id = game.id;
                let (feed, shifts) = futures_util::future::try_join(
                    self.client.fetch_play_by_play(id),
                    self.client.fetch_shifts(id),
                )
                .await
                .with_context(|| format!("game {id}"))?;
                debug!("game {id}: {} plays, {} shifts", feed.events.len(), shifts.len());
                game.home_defending_side = feed.home_defending_side;
                anyhow::Ok((game, feed.events, shifts))
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;
        fetched.sort_by_key(|(game, _, _)| game.id);

        let mut batch = Batch {
            players,
            ..Batch::default()
        };
        for (game, events, shifts) in fetched {
            batch.games.push(game);
            batch.events.extend(events);
            batch.shifts.extend(shifts);
        }
        Ok(batch)
    }

    async fn teams(&self, wanted: &[String]) -> anyhow::Result<Vec<TeamRef>> {
        if !wanted.is_empty() {
            return Ok(wanted
                .iter()
                .map(|abbrev| TeamRef {
                    id: 0,
                    abbrev: abbrev.to_uppercase(),
                })
                .collect());
        }
        self.client.fetch_teams().await.context("team list")
    }
}
