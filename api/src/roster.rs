use crate::{Hand, Player, PlayerId, PlayerRef, Position};
use std::collections::HashMap;

/// Canonical player directory: one entry per player id.
#[derive(Debug, Clone, Default)]
pub struct RosterDirectory {
    players: HashMap<PlayerId, Player>,
}

impl RosterDirectory {
    /// Resolve roster rows into one canonical entry per id.
    ///
    /// Rows are ordered by (season, name) and the last row per id wins, so the most recent
    /// season is kept and same-season duplicates fall to the alphabetically last name.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Player>,
    {
        let mut rows: Vec<Player> = rows.into_iter().collect();
        rows.sort_by(|a, b| a.season.cmp(&b.season).then_with(|| a.name.cmp(&b.name)));

        let mut players = HashMap::with_capacity(rows.len());
        for row in rows {
            players.insert(row.id, row);
        }
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: Option<PlayerId>) -> Option<&Player> {
        self.players.get(&id?)
    }

    pub fn name(&self, id: Option<PlayerId>) -> Option<&str> {
        self.get(id).map(|p| p.name.as_str())
    }

    pub fn sweater(&self, id: Option<PlayerId>) -> Option<u16> {
        self.get(id).and_then(|p| p.sweater)
    }

    pub fn hand(&self, id: Option<PlayerId>) -> Option<Hand> {
        self.get(id).and_then(|p| p.hand)
    }

    pub fn position(&self, id: Option<PlayerId>) -> Option<Position> {
        self.get(id).map(|p| p.position)
    }

    pub fn is_goalie(&self, id: PlayerId) -> bool {
        self.position(Some(id)) == Some(Position::Goalie)
    }

    /// Output reference for an id. Unknown ids keep the id with empty name/sweater.
    pub fn player_ref(&self, id: Option<PlayerId>) -> Option<PlayerRef> {
        let id = id?;
        let player = self.players.get(&id);
        Some(PlayerRef {
            id,
            name: player.map(|p| p.name.clone()),
            sweater: player.and_then(|p| p.sweater),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: PlayerId, name: &str, season: u32, team: &str) -> Player {
        Player {
            id,
            name: name.into(),
            season,
            team: team.into(),
            ..Default::default()
        }
    }

    #[test]
    fn most_recent_season_wins() {
        let dir = RosterDirectory::build(vec![
            Player { sweater: Some(91), ..row(1, "John Tavares", 20232024, "TOR") },
            Player { sweater: Some(19), ..row(1, "John Tavares", 20112012, "NYI") },
        ]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get(Some(1)).map(|p| p.team.as_str()), Some("TOR"));
        assert_eq!(dir.sweater(Some(1)), Some(91));
    }

    #[test]
    fn same_season_tie_breaks_on_name() {
        let dir = RosterDirectory::build(vec![
            row(7, "Zach Example", 20232024, "BOS"),
            row(7, "Alex Example", 20232024, "NYR"),
        ]);
        assert_eq!(dir.name(Some(7)), Some("Zach Example"));
    }

    #[test]
    fn absent_ids_resolve_to_none() {
        let dir = RosterDirectory::build(vec![row(1, "A", 20232024, "TOR")]);
        assert_eq!(dir.name(Some(2)), None);
        assert_eq!(dir.name(None), None);
        assert_eq!(dir.hand(Some(2)), None);
        assert_eq!(dir.position(Some(2)), None);
        assert!(!dir.is_goalie(2));

        let unknown = dir.player_ref(Some(2)).expect("id is kept");
        assert_eq!(unknown.id, 2);
        assert!(unknown.name.is_none());
        assert!(dir.player_ref(None).is_none());
    }

    #[test]
    fn goalies_are_identified_by_position() {
        let dir = RosterDirectory::build(vec![Player {
            position: Position::Goalie,
            hand: Some(Hand::L),
            ..row(30, "Joseph Woll", 20232024, "TOR")
        }]);
        assert!(dir.is_goalie(30));
        assert_eq!(dir.hand(Some(30)), Some(Hand::L));
    }
}
