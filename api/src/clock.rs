use crate::error::PbpError;
use serde::{Deserialize, Serialize};

/// Regulation period length in seconds.
pub const PERIOD_SECONDS: u32 = 20 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    #[serde(rename = "PRE")]
    Preseason,
    #[serde(rename = "REG")]
    Regular,
    #[serde(rename = "POST")]
    Postseason,
}

impl SeasonType {
    /// Classify the upstream numeric game type. Anything past regular season is postseason.
    pub fn from_game_type(game_type: u8) -> Self {
        match game_type {
            1 => SeasonType::Preseason,
            2 => SeasonType::Regular,
            _ => SeasonType::Postseason,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeasonType::Preseason => "PRE",
            SeasonType::Regular => "REG",
            SeasonType::Postseason => "POST",
        }
    }
}

/// Parse an "MM:SS" elapsed clock into seconds.
pub fn parse_clock(clock: &str) -> Result<u32, PbpError> {
    let malformed = || PbpError::MalformedClock { clock: clock.to_owned() };

    let (minutes, seconds) = clock.trim().split_once(':').ok_or_else(malformed)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(minutes) || !all_digits(seconds) {
        return Err(malformed());
    }

    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    let seconds: u32 = seconds.parse().map_err(|_| malformed())?;
    if seconds >= 60 {
        return Err(malformed());
    }
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(malformed)
}

fn period_offset(period: u8) -> Result<u32, PbpError> {
    if period == 0 {
        return Err(PbpError::InvalidPeriod { period });
    }
    Ok(u32::from(period - 1) * PERIOD_SECONDS)
}

/// Elapsed period seconds and game-seconds of one event clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClock {
    pub elapsed: u32,
    pub game_seconds: u32,
}

/// Parse an event clock once into both elapsed and game-seconds.
///
/// Preseason games do not receive the period offset, so their game-seconds restart at
/// zero every period. Shift boundaries always carry the offset (see [`shift_seconds`]).
pub fn event_clock(
    period: u8,
    clock: &str,
    season_type: SeasonType,
) -> Result<EventClock, PbpError> {
    let elapsed = parse_clock(clock)?;
    let game_seconds = match season_type {
        SeasonType::Preseason => {
            period_offset(period)?;
            elapsed
        }
        _ => with_offset(period, clock, elapsed)?,
    };
    Ok(EventClock {
        elapsed,
        game_seconds,
    })
}

/// Game-seconds for an event.
pub fn game_seconds(period: u8, clock: &str, season_type: SeasonType) -> Result<u32, PbpError> {
    event_clock(period, clock, season_type).map(|c| c.game_seconds)
}

/// Game-seconds for a shift boundary, independent of season type.
pub fn shift_seconds(period: u8, clock: &str) -> Result<u32, PbpError> {
    let elapsed = parse_clock(clock)?;
    with_offset(period, clock, elapsed)
}

fn with_offset(period: u8, clock: &str, elapsed: u32) -> Result<u32, PbpError> {
    period_offset(period)?
        .checked_add(elapsed)
        .ok_or_else(|| PbpError::MalformedClock {
            clock: clock.to_owned(),
        })
}
