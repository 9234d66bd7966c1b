use crate::classify::EventType;
use crate::{EnrichedEvent, PlayerRef};

/// Render the play-by-play line for an enriched event.
///
/// Fields the event does not carry are left out of the line rather than failing the
/// description. Stoppages and events without a canonical type have no description.
pub fn describe(ev: &EnrichedEvent) -> Option<String> {
    let event_type = ev.event_type?;

    let team = ev.event_team.as_deref().unwrap_or("");
    let opp = ev.opponent_team.as_deref().unwrap_or("");
    let [p1, p2, p3] = &ev.players;
    let zone = ev.event_zone.map(|z| format!("{}. Zone", z.label()));
    let distance = ev.shot_distance.map(|d| format!("{} ft", d.round()));
    let shot_type = ev.event_detail.map(|s| s.label());

    let line = match event_type {
        EventType::PeriodStart => "Period Start".to_owned(),
        EventType::PeriodEnd => "Period End".to_owned(),
        EventType::GameEnd => "Game End".to_owned(),
        EventType::ShootoutComplete => "Shootout Complete".to_owned(),
        EventType::FailedShotAttempt => "Failed Shot".to_owned(),
        EventType::DelayedPenalty => "Delayed Penalty".to_owned(),
        EventType::Stoppage => return None,
        EventType::Faceoff => {
            let won = join(&[team, "Faceoff won", zone.as_deref().unwrap_or("")]);
            format!(
                "{won} - {} vs {}",
                join(&[team, &player(p1.as_ref())]),
                join(&[opp, &player(p2.as_ref())])
            )
        }
        EventType::BlockedShot => clauses(
            format!(
                "{} Shot Blocked By {}",
                join(&[opp, &player(p1.as_ref())]),
                join(&[team, &player(p2.as_ref())])
            ),
            &[zone],
        ),
        EventType::Penalty => {
            let infraction = ev.penalty_type.as_deref().unwrap_or("");
            let mut head = join(&[team, &player(p1.as_ref()), infraction]);
            if let Some(minutes) = ev.penalty_duration {
                head = format!("{head} - {minutes} min");
            }
            let mut line = clauses(head, &[zone]);
            if p2.is_some() {
                line = format!("{line} Drawn By {}", join(&[opp, &player(p2.as_ref())]));
            }
            line
        }
        EventType::Giveaway => clauses(join(&[team, "Giveaway -", &player(p1.as_ref())]), &[zone]),
        EventType::Takeaway => clauses(join(&[team, "Takeaway -", &player(p1.as_ref())]), &[zone]),
        EventType::ShotOnGoal => {
            clauses(join(&[team, "SOG -", &player(p1.as_ref())]), &[zone, distance])
        }
        EventType::MissedShot => clauses(
            join(&[team, "-", &player(p1.as_ref()), shot_type.unwrap_or("")]),
            &[zone, distance],
        ),
        EventType::Hit => clauses(
            join(&[team, &player(p1.as_ref()), "Hit", &player(p2.as_ref())]),
            &[zone],
        ),
        EventType::Goal => {
            let kind = shot_type.map(|s| format!("{s} Shot"));
            let head = join(&[team, &player(p1.as_ref()), kind.as_deref().unwrap_or("")]);
            let line = clauses(head, &[zone, distance]);
            let assists: Vec<String> =
                [p2, p3].into_iter().flatten().map(|p| player(Some(p))).collect();
            if assists.is_empty() {
                format!("{line} Unassisted")
            } else {
                format!("{line} Assists: {}", assists.join(", "))
            }
        }
    };
    Some(line)
}

/// "#91 John Tavares", degrading to whatever part is known.
fn player(p: Option<&PlayerRef>) -> String {
    let Some(p) = p else {
        return String::new();
    };
    let sweater = p.sweater.map(|n| format!("#{n}"));
    let name = p.name.clone().unwrap_or_else(|| format!("Player {}", p.id));
    join(&[sweater.as_deref().unwrap_or(""), &name])
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append ", clause" for each clause that is present.
fn clauses(head: String, rest: &[Option<String>]) -> String {
    rest.iter().flatten().fold(head, |acc, c| format!("{acc}, {c}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{EventZone, ShotType};
    use crate::SeasonType;
    use chrono::NaiveDate;

    fn p(id: u64, name: &str, sweater: u16) -> Option<PlayerRef> {
        Some(PlayerRef { id, name: Some(name.into()), sweater: Some(sweater) })
    }

    fn event(event_type: Option<EventType>) -> EnrichedEvent {
        EnrichedEvent {
            season: 20232024,
            game_id: 2023020001,
            game_date: NaiveDate::from_ymd_opt(2023, 10, 10).unwrap(),
            season_type: SeasonType::Regular,
            event_index: 1,
            period: 1,
            game_seconds: 0,
            clock_time: None,
            event_type,
            description: None,
            event_detail: None,
            event_zone: None,
            event_team: Some("TOR".into()),
            opponent_team: Some("MTL".into()),
            players: [None, None, None],
            penalty_type: None,
            penalty_duration: None,
            x: None,
            y: None,
            home_on_ice: Default::default(),
            away_on_ice: Default::default(),
            home_goalie: None,
            away_goalie: None,
            home_team: "TOR".into(),
            away_team: "MTL".into(),
            home_skaters: 0,
            away_skaters: 0,
            home_score: 0,
            away_score: 0,
            score_state: "0v0".into(),
            strength_state: "0v0".into(),
            home_zone: None,
            shot_distance: None,
            shot_angle: None,
            faceoff_index: None,
            faceoff_winner: None,
            faceoff_loser: None,
            shooter: None,
        }
    }

    #[test]
    fn fixed_strings() {
        for (event_type, text) in [
            (EventType::PeriodStart, "Period Start"),
            (EventType::GameEnd, "Game End"),
            (EventType::ShootoutComplete, "Shootout Complete"),
            (EventType::FailedShotAttempt, "Failed Shot"),
            (EventType::DelayedPenalty, "Delayed Penalty"),
        ] {
            assert_eq!(describe(&event(Some(event_type))).as_deref(), Some(text));
        }
    }

    #[test]
    fn unknown_type_has_no_description() {
        assert_eq!(describe(&event(None)), None);
    }

    #[test]
    fn stoppage_has_no_description() {
        assert_eq!(describe(&event(Some(EventType::Stoppage))), None);
    }

    #[test]
    fn faceoff_line() {
        let mut ev = event(Some(EventType::Faceoff));
        ev.event_zone = Some(EventZone::Neu);
        ev.players = [p(1, "John Tavares", 91), p(2, "Nick Suzuki", 14), None];
        assert_eq!(
            describe(&ev).as_deref(),
            Some("TOR Faceoff won Neu. Zone - TOR #91 John Tavares vs MTL #14 Nick Suzuki")
        );
    }

    #[test]
    fn goal_line_with_assists() {
        let mut ev = event(Some(EventType::Goal));
        ev.event_zone = Some(EventZone::Off);
        ev.event_detail = Some(ShotType::Wrist);
        ev.shot_distance = Some(23.6);
        ev.players = [
            p(34, "Auston Matthews", 34),
            p(16, "Mitch Marner", 16),
            p(44, "Morgan Rielly", 44),
        ];
        assert_eq!(
            describe(&ev).as_deref(),
            Some(concat!(
                "TOR #34 Auston Matthews WRIST Shot, Off. Zone, 24 ft ",
                "Assists: #16 Mitch Marner, #44 Morgan Rielly"
            ))
        );
    }

    #[test]
    fn unassisted_goal() {
        let mut ev = event(Some(EventType::Goal));
        ev.players = [p(34, "Auston Matthews", 34), None, None];
        assert_eq!(describe(&ev).as_deref(), Some("TOR #34 Auston Matthews Unassisted"));
    }

    #[test]
    fn penalty_line() {
        let mut ev = event(Some(EventType::Penalty));
        ev.event_zone = Some(EventZone::Def);
        ev.penalty_type = Some("tripping".into());
        ev.penalty_duration = Some(2);
        ev.players = [p(1, "A Skater", 3), p(2, "B Skater", 4), None];
        assert_eq!(
            describe(&ev).as_deref(),
            Some("TOR #3 A Skater tripping - 2 min, Def. Zone Drawn By MTL #4 B Skater")
        );
    }

    #[test]
    fn unknown_player_still_describes() {
        let mut ev = event(Some(EventType::Faceoff));
        ev.players = [Some(PlayerRef { id: 8_000_001, name: None, sweater: None }), None, None];
        assert_eq!(
            describe(&ev).as_deref(),
            Some("TOR Faceoff won - TOR Player 8000001 vs MTL")
        );
    }

    #[test]
    fn shot_and_hit_lines() {
        let mut shot = event(Some(EventType::ShotOnGoal));
        shot.event_zone = Some(EventZone::Off);
        shot.shot_distance = Some(41.2);
        shot.players = [p(34, "Auston Matthews", 34), None, None];
        assert_eq!(
            describe(&shot).as_deref(),
            Some("TOR SOG - #34 Auston Matthews, Off. Zone, 41 ft")
        );

        let mut hit = event(Some(EventType::Hit));
        hit.event_zone = Some(EventZone::Def);
        hit.players = [p(1, "A Skater", 3), p(2, "B Skater", 4), None];
        assert_eq!(describe(&hit).as_deref(), Some("TOR #3 A Skater Hit #4 B Skater, Def. Zone"));
    }
}
