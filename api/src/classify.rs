use crate::{PlayerId, RawEvent, RawEventDetails};
use serde::{Deserialize, Serialize};

/// Canonical event type, serialized as the short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "FAC")]
    Faceoff,
    #[serde(rename = "BLK")]
    BlockedShot,
    #[serde(rename = "HIT")]
    Hit,
    #[serde(rename = "PEN")]
    Penalty,
    #[serde(rename = "GIVE")]
    Giveaway,
    #[serde(rename = "SHOT")]
    ShotOnGoal,
    #[serde(rename = "TAKE")]
    Takeaway,
    #[serde(rename = "STOP")]
    Stoppage,
    #[serde(rename = "DPEN")]
    DelayedPenalty,
    #[serde(rename = "GOAL")]
    Goal,
    #[serde(rename = "MISS")]
    MissedShot,
    #[serde(rename = "PSTR")]
    PeriodStart,
    #[serde(rename = "PEND")]
    PeriodEnd,
    #[serde(rename = "GEND")]
    GameEnd,
    #[serde(rename = "ENDSO")]
    ShootoutComplete,
    #[serde(rename = "FSHOT")]
    FailedShotAttempt,
}

impl EventType {
    /// Map the upstream `typeDescKey` vocabulary. Unknown keys are not an error.
    pub fn from_raw(raw: &str) -> Option<Self> {
        Some(match raw {
            "faceoff" => EventType::Faceoff,
            "blocked-shot" => EventType::BlockedShot,
            "hit" => EventType::Hit,
            "penalty" => EventType::Penalty,
            "giveaway" => EventType::Giveaway,
            "shot-on-goal" => EventType::ShotOnGoal,
            "takeaway" => EventType::Takeaway,
            "stoppage" => EventType::Stoppage,
            "delayed-penalty" => EventType::DelayedPenalty,
            "goal" => EventType::Goal,
            "missed-shot" => EventType::MissedShot,
            "period-start" => EventType::PeriodStart,
            "period-end" => EventType::PeriodEnd,
            "game-end" => EventType::GameEnd,
            "shootout-complete" => EventType::ShootoutComplete,
            "failed-shot-attempt" => EventType::FailedShotAttempt,
            _ => return None,
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            EventType::Faceoff => "FAC",
            EventType::BlockedShot => "BLK",
            EventType::Hit => "HIT",
            EventType::Penalty => "PEN",
            EventType::Giveaway => "GIVE",
            EventType::ShotOnGoal => "SHOT",
            EventType::Takeaway => "TAKE",
            EventType::Stoppage => "STOP",
            EventType::DelayedPenalty => "DPEN",
            EventType::Goal => "GOAL",
            EventType::MissedShot => "MISS",
            EventType::PeriodStart => "PSTR",
            EventType::PeriodEnd => "PEND",
            EventType::GameEnd => "GEND",
            EventType::ShootoutComplete => "ENDSO",
            EventType::FailedShotAttempt => "FSHOT",
        }
    }

    /// Play is dead after these; lineups use the stoppage matching rule.
    pub fn is_stoppage(&self) -> bool {
        matches!(self, EventType::Goal | EventType::Stoppage | EventType::Penalty)
    }

    /// Unblocked shot attempts, recorded at the shooter's location.
    pub fn is_fenwick(&self) -> bool {
        matches!(self, EventType::ShotOnGoal | EventType::MissedShot | EventType::Goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ShotType {
    Slap,
    Snap,
    Backhand,
    Wrist,
    TipIn,
    WrapAround,
    Deflected,
    Bat,
    Poke,
    BetweenLegs,
    Cradle,
}

impl ShotType {
    pub fn from_raw(raw: &str) -> Option<Self> {
        Some(match raw {
            "slap" => ShotType::Slap,
            "snap" => ShotType::Snap,
            "backhand" => ShotType::Backhand,
            "wrist" => ShotType::Wrist,
            "tip-in" => ShotType::TipIn,
            "wrap-around" => ShotType::WrapAround,
            "deflected" => ShotType::Deflected,
            "bat" => ShotType::Bat,
            "poke" => ShotType::Poke,
            "between-legs" => ShotType::BetweenLegs,
            "cradle" => ShotType::Cradle,
            _ => return None,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShotType::Slap => "SLAP",
            ShotType::Snap => "SNAP",
            ShotType::Backhand => "BACKHAND",
            ShotType::Wrist => "WRIST",
            ShotType::TipIn => "TIP-IN",
            ShotType::WrapAround => "WRAP-AROUND",
            ShotType::Deflected => "DEFLECTED",
            ShotType::Bat => "BAT",
            ShotType::Poke => "POKE",
            ShotType::BetweenLegs => "BETWEEN-LEGS",
            ShotType::Cradle => "CRADLE",
        }
    }
}

/// Rink zone, either from the event owner's perspective or (for `home_zone`) the home team's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventZone {
    Off,
    Neu,
    Def,
}

impl EventZone {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "O" => Some(EventZone::Off),
            "N" => Some(EventZone::Neu),
            "D" => Some(EventZone::Def),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventZone::Off => "Off",
            EventZone::Neu => "Neu",
            EventZone::Def => "Def",
        }
    }
}

/// An event with only the participants its type defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Play {
    Goal {
        scorer: Option<PlayerId>,
        assist1: Option<PlayerId>,
        assist2: Option<PlayerId>,
    },
    Faceoff {
        winner: Option<PlayerId>,
        loser: Option<PlayerId>,
    },
    BlockedShot {
        shooter: Option<PlayerId>,
        blocker: Option<PlayerId>,
    },
    ShotOnGoal {
        shooter: Option<PlayerId>,
    },
    MissedShot {
        shooter: Option<PlayerId>,
    },
    Hit {
        hitter: Option<PlayerId>,
        hittee: Option<PlayerId>,
    },
    Penalty {
        committed_by: Option<PlayerId>,
        drawn_by: Option<PlayerId>,
    },
    Takeaway {
        player: Option<PlayerId>,
    },
    Giveaway {
        player: Option<PlayerId>,
    },
    /// Types with no participant roles.
    Other(EventType),
}

impl Play {
    /// Build the tagged play from the raw role fields. `None` for unrecognized event types.
    pub fn classify(raw: &RawEvent) -> Option<Self> {
        let event_type = EventType::from_raw(&raw.type_desc_key)?;
        Some(Self::from_details(event_type, &raw.details))
    }

    pub fn from_details(event_type: EventType, d: &RawEventDetails) -> Self {
        match event_type {
            EventType::Goal => Play::Goal {
                scorer: d.scoring_player_id,
                assist1: d.assist1_player_id,
                assist2: d.assist2_player_id,
            },
            EventType::Faceoff => Play::Faceoff {
                winner: d.winning_player_id,
                loser: d.losing_player_id,
            },
            EventType::BlockedShot => Play::BlockedShot {
                shooter: d.shooting_player_id,
                blocker: d.blocking_player_id,
            },
            EventType::ShotOnGoal => Play::ShotOnGoal { shooter: d.shooting_player_id },
            EventType::MissedShot => Play::MissedShot { shooter: d.shooting_player_id },
            EventType::Hit => Play::Hit {
                hitter: d.hitting_player_id,
                hittee: d.hittee_player_id,
            },
            EventType::Penalty => Play::Penalty {
                committed_by: d.committed_by_player_id,
                drawn_by: d.drawn_by_player_id,
            },
            EventType::Takeaway => Play::Takeaway { player: d.player_id },
            EventType::Giveaway => Play::Giveaway { player: d.player_id },
            other => Play::Other(other),
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Play::Goal { .. } => EventType::Goal,
            Play::Faceoff { .. } => EventType::Faceoff,
            Play::BlockedShot { .. } => EventType::BlockedShot,
            Play::ShotOnGoal { .. } => EventType::ShotOnGoal,
            Play::MissedShot { .. } => EventType::MissedShot,
            Play::Hit { .. } => EventType::Hit,
            Play::Penalty { .. } => EventType::Penalty,
            Play::Takeaway { .. } => EventType::Takeaway,
            Play::Giveaway { .. } => EventType::Giveaway,
            Play::Other(event_type) => *event_type,
        }
    }

    /// Player 1..3 slots, per the role table.
    pub fn participants(&self) -> [Option<PlayerId>; 3] {
        match *self {
            Play::Goal { scorer, assist1, assist2 } => [scorer, assist1, assist2],
            Play::Faceoff { winner, loser } => [winner, loser, None],
            Play::BlockedShot { shooter, blocker } => [shooter, blocker, None],
            Play::ShotOnGoal { shooter } | Play::MissedShot { shooter } => [shooter, None, None],
            Play::Hit { hitter, hittee } => [hitter, hittee, None],
            Play::Penalty { committed_by, drawn_by } => [committed_by, drawn_by, None],
            Play::Takeaway { player } | Play::Giveaway { player } => [player, None, None],
            Play::Other(_) => [None; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(type_desc_key: &str, details: RawEventDetails) -> RawEvent {
        RawEvent {
            type_desc_key: type_desc_key.into(),
            details,
            ..Default::default()
        }
    }

    #[test]
    fn maps_every_known_event_type() {
        let table = [
            ("faceoff", "FAC"),
            ("blocked-shot", "BLK"),
            ("hit", "HIT"),
            ("penalty", "PEN"),
            ("giveaway", "GIVE"),
            ("shot-on-goal", "SHOT"),
            ("takeaway", "TAKE"),
            ("stoppage", "STOP"),
            ("delayed-penalty", "DPEN"),
            ("goal", "GOAL"),
            ("missed-shot", "MISS"),
            ("period-start", "PSTR"),
            ("period-end", "PEND"),
            ("game-end", "GEND"),
            ("shootout-complete", "ENDSO"),
            ("failed-shot-attempt", "FSHOT"),
        ];
        for (raw_key, code) in table {
            assert_eq!(EventType::from_raw(raw_key).map(|t| t.code()), Some(code));
        }
    }

    #[test]
    fn unknown_types_classify_to_none() {
        assert_eq!(EventType::from_raw("challenge"), None);
        assert_eq!(Play::classify(&raw("challenge", RawEventDetails::default())), None);
        assert_eq!(ShotType::from_raw("knuckler"), None);
        assert_eq!(EventZone::from_code("X"), None);
    }

    #[test]
    fn goal_takes_scorer_and_both_assists() {
        let details = RawEventDetails {
            scoring_player_id: Some(1),
            assist1_player_id: Some(2),
            assist2_player_id: Some(3),
            shooting_player_id: Some(99),
            ..Default::default()
        };
        let play = Play::classify(&raw("goal", details)).expect("goal is known");
        assert_eq!(play.participants(), [Some(1), Some(2), Some(3)]);
        assert_eq!(play.event_type(), EventType::Goal);
    }

    #[test]
    fn blocked_shot_has_shooter_then_blocker() {
        let details = RawEventDetails {
            shooting_player_id: Some(10),
            blocking_player_id: Some(20),
            ..Default::default()
        };
        let play = Play::classify(&raw("blocked-shot", details)).expect("known");
        assert_eq!(play.participants(), [Some(10), Some(20), None]);
    }

    #[test]
    fn shots_do_not_pick_up_blocker() {
        let details = RawEventDetails {
            shooting_player_id: Some(10),
            blocking_player_id: Some(20),
            ..Default::default()
        };
        for key in ["shot-on-goal", "missed-shot"] {
            let play = Play::classify(&raw(key, details.clone())).expect("known");
            assert_eq!(play.participants(), [Some(10), None, None]);
        }
    }

    #[test]
    fn role_table_for_remaining_types() {
        let details = RawEventDetails {
            winning_player_id: Some(1),
            losing_player_id: Some(2),
            hitting_player_id: Some(3),
            hittee_player_id: Some(4),
            committed_by_player_id: Some(5),
            drawn_by_player_id: Some(6),
            player_id: Some(7),
            ..Default::default()
        };
        let participants = |key: &str| {
            Play::classify(&raw(key, details.clone())).map(|p| p.participants())
        };
        assert_eq!(participants("faceoff"), Some([Some(1), Some(2), None]));
        assert_eq!(participants("hit"), Some([Some(3), Some(4), None]));
        assert_eq!(participants("penalty"), Some([Some(5), Some(6), None]));
        assert_eq!(participants("takeaway"), Some([Some(7), None, None]));
        assert_eq!(participants("giveaway"), Some([Some(7), None, None]));
        assert_eq!(participants("stoppage"), Some([None, None, None]));
        assert_eq!(participants("period-start"), Some([None, None, None]));
    }

    #[test]
    fn stoppage_and_fenwick_classes() {
        assert!(EventType::Goal.is_stoppage());
        assert!(EventType::Penalty.is_stoppage());
        assert!(EventType::Stoppage.is_stoppage());
        assert!(!EventType::DelayedPenalty.is_stoppage());
        assert!(!EventType::Faceoff.is_stoppage());

        assert!(EventType::Goal.is_fenwick());
        assert!(EventType::MissedShot.is_fenwick());
        assert!(!EventType::BlockedShot.is_fenwick());
    }

    #[test]
    fn shot_types_and_zones() {
        assert_eq!(ShotType::from_raw("tip-in"), Some(ShotType::TipIn));
        assert_eq!(ShotType::TipIn.label(), "TIP-IN");
        assert_eq!(ShotType::from_raw("between-legs").map(|s| s.label()), Some("BETWEEN-LEGS"));
        assert_eq!(EventZone::from_code("O").map(|z| z.label()), Some("Off"));
        assert_eq!(
            serde_json::to_string(&ShotType::WrapAround).unwrap(),
            "\"WRAP-AROUND\""
        );
    }
}
