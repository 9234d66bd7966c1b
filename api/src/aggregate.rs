use crate::classify::EventType;
use crate::lineup::Lineup;
use crate::roster::RosterDirectory;
use crate::{Handedness, PlayerId, TeamSide};

/// Running per-game counters, advanced once per event in game order.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    events: u32,
    faceoffs: u32,
    home_score: u16,
    away_score: u16,
}

/// Counter values as of (and including) one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Running {
    pub event_index: u32,
    pub faceoff_index: Option<u32>,
    pub home_score: u16,
    pub away_score: u16,
}

impl Running {
    pub fn score_state(&self) -> String {
        format!("{}v{}", self.home_score, self.away_score)
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance past one event. A goal counts toward the score on the goal event itself.
    pub fn advance(&mut self, event_type: Option<EventType>, team: Option<TeamSide>) -> Running {
        self.events += 1;

        let faceoff_index = match event_type {
            Some(EventType::Faceoff) => {
                self.faceoffs += 1;
                Some(self.faceoffs)
            }
            _ => None,
        };

        if event_type == Some(EventType::Goal) {
            match team {
                Some(TeamSide::Home) => self.home_score += 1,
                Some(TeamSide::Away) => self.away_score += 1,
                None => log::warn!(
                    "goal at event {} has no owning team; score unchanged",
                    self.events
                ),
            }
        }

        Running {
            event_index: self.events,
            faceoff_index,
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }
}

/// Skater counts and the "{home}v{away}" strength label.
pub fn strength(home: &Lineup, away: &Lineup) -> (u8, u8, String) {
    let (h, a) = (home.skater_count(), away.skater_count());
    (h, a, format!("{h}v{a}"))
}

/// Hand and position of a player, or `None` when the roster does not know them.
pub fn handedness(roster: &RosterDirectory, id: Option<PlayerId>) -> Option<Handedness> {
    let player = roster.get(id)?;
    Some(Handedness {
        hand: player.hand,
        position: Some(player.position.code()),
    })
}

/// Shooter profile for fenwick shots with a recorded location. Position collapses to F/D.
pub fn shooter(
    roster: &RosterDirectory,
    event_type: Option<EventType>,
    has_location: bool,
    shooter_id: Option<PlayerId>,
) -> Option<Handedness> {
    if !(has_location && event_type?.is_fenwick()) {
        return None;
    }
    let player = roster.get(shooter_id)?;
    Some(Handedness {
        hand: player.hand,
        position: Some(player.position.skater_group()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hand, Player, Position};

    #[test]
    fn score_is_cumulative_and_inclusive() {
        let mut state = GameState::new();
        let seq = [
            (Some(EventType::Faceoff), Some(TeamSide::Home)),
            (Some(EventType::Goal), Some(TeamSide::Away)),
            (Some(EventType::Faceoff), Some(TeamSide::Away)),
            (Some(EventType::Goal), Some(TeamSide::Home)),
            (Some(EventType::Goal), Some(TeamSide::Home)),
            (None, None),
        ];
        let running: Vec<Running> = seq.iter().map(|&(t, s)| state.advance(t, s)).collect();

        let scores: Vec<String> = running.iter().map(Running::score_state).collect();
        assert_eq!(scores, ["0v0", "0v1", "0v1", "1v1", "2v1", "2v1"]);

        let indices: Vec<u32> = running.iter().map(|r| r.event_index).collect();
        assert_eq!(indices, [1, 2, 3, 4, 5, 6]);

        let faceoffs: Vec<Option<u32>> = running.iter().map(|r| r.faceoff_index).collect();
        assert_eq!(faceoffs, [Some(1), None, Some(2), None, None, None]);
    }

    #[test]
    fn goal_without_owner_does_not_score() {
        let mut state = GameState::new();
        let r = state.advance(Some(EventType::Goal), None);
        assert_eq!((r.home_score, r.away_score), (0, 0));
    }

    #[test]
    fn strength_excludes_goalies() {
        let home = Lineup { skaters: vec![30, 1, 2, 3, 4, 5], goalie: Some(30) };
        let away = Lineup { skaters: vec![31, 6, 7, 8, 9], goalie: Some(31) };
        assert_eq!(strength(&home, &away), (5, 4, "5v4".to_owned()));

        let pulled = Lineup { skaters: vec![1, 2, 3, 4, 5, 6], goalie: None };
        assert_eq!(strength(&pulled, &Lineup::default()), (6, 0, "6v0".to_owned()));
    }

    #[test]
    fn shooter_profile_only_for_located_fenwick_shots() {
        let roster = RosterDirectory::build(vec![
            Player {
                id: 8,
                name: "Morgan Rielly".into(),
                position: Position::Defense,
                hand: Some(Hand::L),
                ..Default::default()
            },
            Player {
                id: 34,
                name: "Auston Matthews".into(),
                position: Position::Center,
                hand: Some(Hand::L),
                ..Default::default()
            },
        ]);

        let d = shooter(&roster, Some(EventType::ShotOnGoal), true, Some(8)).expect("located shot");
        assert_eq!(d.position, Some("D"));
        let f = shooter(&roster, Some(EventType::Goal), true, Some(34)).expect("located goal");
        assert_eq!(f.position, Some("F"));
        assert_eq!(f.hand, Some(Hand::L));

        assert!(shooter(&roster, Some(EventType::BlockedShot), true, Some(34)).is_none());
        assert!(shooter(&roster, Some(EventType::MissedShot), false, Some(34)).is_none());
        assert!(shooter(&roster, Some(EventType::MissedShot), true, Some(999)).is_none());
    }

    #[test]
    fn handedness_keeps_full_position_code() {
        let roster = RosterDirectory::build(vec![Player {
            id: 91,
            position: Position::LeftWing,
            hand: Some(Hand::R),
            ..Default::default()
        }]);
        assert_eq!(
            handedness(&roster, Some(91)),
            Some(Handedness { hand: Some(Hand::R), position: Some("L") })
        );
        assert_eq!(handedness(&roster, Some(1)), None);
    }
}
