//! Shot distance/angle and rink zones.
//!
//! The rink is centered at the origin with goal lines at x = ±89 ft. The blue lines sit
//! at x = ±25 ft.

use crate::classify::{EventType, EventZone};
use crate::{Side, TeamSide};

pub const GOAL_LINE_X: f64 = 89.0;
pub const BLUE_LINE_X: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotGeometry {
    pub distance: f64,
    pub angle: f64,
}

/// Whether `team` shoots toward positive x in a period where the home team defends `home_defends`.
pub fn attacks_positive_x(team: TeamSide, home_defends: Side) -> bool {
    (team == TeamSide::Home) == (home_defends == Side::Left)
}

/// Distance and angle of a shot-class event, measured to the net the shooting team attacks.
///
/// Returns `None` for non-shots, missing coordinates, or when the attacking direction
/// cannot be resolved.
pub fn shot_geometry(
    event_type: Option<EventType>,
    x: Option<f64>,
    y: Option<f64>,
    team: Option<TeamSide>,
    home_defends: Option<Side>,
) -> Option<ShotGeometry> {
    if !event_type?.is_fenwick() {
        return None;
    }
    let (x, y) = (x?, y?);
    let toward_positive = attacks_positive_x(team?, home_defends?);
    Some(measure(x, y, toward_positive))
}

/// Raw geometry for a shot at (x, y) toward the positive or negative net.
pub fn measure(x: f64, y: f64, toward_positive: bool) -> ShotGeometry {
    let abs_x = x.abs();
    let abs_y = y.abs();
    let attacking_half = if toward_positive { x >= 0.0 } else { x <= 0.0 };

    let (distance, angle) = if attacking_half {
        let depth = GOAL_LINE_X - abs_x;
        let angle = if abs_x <= GOAL_LINE_X {
            abs_y.atan2(depth)
        } else {
            // Behind the goal line: measured off the axis behind the net.
            abs_y.atan2(abs_x - GOAL_LINE_X)
        };
        (depth.hypot(y), angle)
    } else {
        // Long shot from the defensive half.
        let depth = GOAL_LINE_X + abs_x;
        (depth.hypot(y), abs_y.atan2(depth))
    };

    ShotGeometry {
        distance: round2(distance),
        angle: round2(angle.to_degrees()),
    }
}

/// Zone of an x coordinate from the home team's point of view.
pub fn home_zone(x: Option<f64>, home_defends: Option<Side>) -> Option<EventZone> {
    let x = x?;
    let (low, high) = match home_defends? {
        Side::Left => (EventZone::Def, EventZone::Off),
        Side::Right => (EventZone::Off, EventZone::Def),
    };
    Some(if x < -BLUE_LINE_X {
        low
    } else if x > BLUE_LINE_X {
        high
    } else {
        EventZone::Neu
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
