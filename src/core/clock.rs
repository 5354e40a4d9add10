//! Displayed clock time and hand angles.
//!
//! Hours live in 1..=12 and are never observed as 0. Minutes live in 0..=59
//! and sit on the active snap increment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum minute granularity a hand may rest at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapIncrement {
    One,
    Five,
}

impl SnapIncrement {
    pub fn step(self) -> u8 {
        match self {
            SnapIncrement::One => 1,
            SnapIncrement::Five => 5,
        }
    }

    /// Largest minute value reachable with this increment (59 or 55)
    pub fn last_minute(self) -> u8 {
        60 - self.step()
    }

    /// Round a minute to this increment. May return 60, which callers carry.
    pub fn round_minute(self, minute: u32) -> u32 {
        match self {
            SnapIncrement::One => minute,
            SnapIncrement::Five => ((minute as f64 / 5.0).round() as u32) * 5,
        }
    }
}

/// Wrap any hour count onto the 12-hour dial (0 maps to 12)
pub fn wrap_hour(hour: i32) -> u8 {
    match hour.rem_euclid(12) {
        0 => 12,
        h => h as u8,
    }
}

/// Hour and minute shown on the clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Build a time, wrapping out-of-range values onto the dial
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: wrap_hour(hour as i32),
            minute: minute % 60,
        }
    }

    /// Convert a 24-hour wall-clock reading, snapping the minute.
    ///
    /// Rounding up to 60 carries into the next hour.
    pub fn from_wall_clock(hour24: u32, minute: u32, snap: SnapIncrement) -> Self {
        let rounded = snap.round_minute(minute.min(59));
        let (carry, minute) = if rounded >= 60 { (1, 0) } else { (0, rounded) };
        Self {
            hour: wrap_hour(hour24 as i32 + carry),
            minute: minute as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn with_hour(self, hour: u8) -> Self {
        Self::new(hour, self.minute)
    }

    pub fn with_minute(self, minute: u8) -> Self {
        Self::new(self.hour, minute)
    }

    /// Next hour on the dial (12 wraps to 1)
    pub fn advance_hour(self) -> Self {
        Self {
            hour: if self.hour == 12 { 1 } else { self.hour + 1 },
            ..self
        }
    }

    /// Previous hour on the dial (1 wraps to 12)
    pub fn retreat_hour(self) -> Self {
        Self {
            hour: if self.hour == 1 { 12 } else { self.hour - 1 },
            ..self
        }
    }

    /// Minutes since 0:00 treating the displayed hour literally (12:10 is 730)
    pub fn total_minutes(&self) -> i32 {
        self.hour as i32 * 60 + self.minute as i32
    }

    /// Rotation of the hour hand in degrees clockwise from 12
    pub fn hour_angle(&self) -> f64 {
        (self.hour % 12) as f64 * 30.0 + self.minute as f64 * 0.5
    }

    /// Rotation of the minute hand in degrees clockwise from 12
    pub fn minute_angle(&self) -> f64 {
        self.minute as f64 * 6.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}時{}分", self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_hour_never_zero() {
        assert_eq!(wrap_hour(0), 12);
        assert_eq!(wrap_hour(12), 12);
        assert_eq!(wrap_hour(13), 1);
        assert_eq!(wrap_hour(23), 11);
        assert_eq!(wrap_hour(-1), 11);
        for h in -30..30 {
            assert!((1..=12).contains(&wrap_hour(h)));
        }
    }

    #[test]
    fn test_hour_wraps_at_dial_edges() {
        assert_eq!(ClockTime::new(12, 30).advance_hour().hour(), 1);
        assert_eq!(ClockTime::new(1, 30).retreat_hour().hour(), 12);
        assert_eq!(ClockTime::new(5, 30).advance_hour(), ClockTime::new(6, 30));
    }

    #[test]
    fn test_from_wall_clock_snaps_and_carries() {
        assert_eq!(
            ClockTime::from_wall_clock(15, 12, SnapIncrement::Five),
            ClockTime::new(3, 10)
        );
        assert_eq!(
            ClockTime::from_wall_clock(0, 0, SnapIncrement::Five),
            ClockTime::new(12, 0)
        );
        // 11:58 rounds to 12:00
        assert_eq!(
            ClockTime::from_wall_clock(23, 58, SnapIncrement::Five),
            ClockTime::new(12, 0)
        );
        assert_eq!(
            ClockTime::from_wall_clock(23, 58, SnapIncrement::One),
            ClockTime::new(11, 58)
        );
    }

    #[test]
    fn test_hand_angles() {
        let t = ClockTime::new(3, 30);
        assert_eq!(t.hour_angle(), 105.0);
        assert_eq!(t.minute_angle(), 180.0);
        assert_eq!(ClockTime::new(12, 0).hour_angle(), 0.0);
    }

    #[test]
    fn test_display_phrase() {
        assert_eq!(ClockTime::new(4, 5).to_string(), "4時5分");
        assert_eq!(ClockTime::new(12, 0).to_string(), "12時0分");
    }

    #[test]
    fn test_snap_last_minute() {
        assert_eq!(SnapIncrement::One.last_minute(), 59);
        assert_eq!(SnapIncrement::Five.last_minute(), 55);
    }
}
