//! Pointer-drag handling for the clock hands.
//!
//! Pointer positions are measured in face units relative to the face center
//! (+x right, +y down). The face is 200 units across, so hand lengths and
//! hit-test bands read the same whatever the terminal cell size is.

use crate::core::clock::{ClockTime, SnapIncrement};

/// Radius of the clock face in face units
pub const FACE_RADIUS: f64 = 100.0;

/// Half-width of the drawable area around the face (face plus number ring)
pub const FACE_EXTENT: f64 = 110.0;

/// Which hand a gesture manipulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandTarget {
    Hour,
    Minute,
}

/// Hand lengths in face units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLengths {
    pub hour: f64,
    pub minute: f64,
}

impl Default for HandLengths {
    fn default() -> Self {
        Self {
            hour: 60.0,
            minute: 90.0,
        }
    }
}

/// Mapping from terminal cells to face units.
///
/// Matches the canvas used to draw the face: `FACE_EXTENT` on each side of
/// the center is stretched over the whole area, so a cell's units depend on
/// the area's width and height independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    center_x: f64,
    center_y: f64,
    units_per_col: f64,
    units_per_row: f64,
}

impl FaceGeometry {
    /// Geometry for a face drawn over the given cell rectangle.
    /// Returns None for an empty area.
    pub fn from_cells(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            center_x: x as f64 + width as f64 / 2.0,
            center_y: y as f64 + height as f64 / 2.0,
            units_per_col: FACE_EXTENT * 2.0 / width as f64,
            units_per_row: FACE_EXTENT * 2.0 / height as f64,
        })
    }

    /// Offset of a cell's center from the face center, in face units
    pub fn offset(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (col as f64 + 0.5 - self.center_x) * self.units_per_col,
            (row as f64 + 0.5 - self.center_y) * self.units_per_row,
        )
    }
}

/// Pick the hand under a pointer-down at (dx, dy).
///
/// The minute band is tested first, so the overlap between the two bands
/// belongs to the minute hand.
pub fn hit_test(dx: f64, dy: f64, lengths: HandLengths) -> Option<HandTarget> {
    let distance = (dx * dx + dy * dy).sqrt();
    if distance < lengths.minute * 0.8 && distance > lengths.hour * 0.5 {
        Some(HandTarget::Minute)
    } else if distance < lengths.hour * 0.8 {
        Some(HandTarget::Hour)
    } else {
        None
    }
}

/// Compass bearing of (dx, dy): 0° is up, increasing clockwise, in [0, 360)
pub fn bearing(dx: f64, dy: f64) -> f64 {
    let mut degrees = dy.atan2(dx).to_degrees() + 90.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // atan2 returns (-180, 180], so +90 can reach 270 at most; 360 only from rounding
    if degrees >= 360.0 {
        degrees -= 360.0;
    }
    degrees
}

/// Minute value for a bearing on the given increment
pub fn minute_from_bearing(bearing: f64, snap: SnapIncrement) -> u8 {
    let minute = match snap {
        SnapIncrement::One => (bearing / 6.0).round() as u32,
        SnapIncrement::Five => (bearing / 30.0).round() as u32 * 5,
    };
    (minute % 60) as u8
}

/// Hour value for a bearing (0 maps to 12)
pub fn hour_from_bearing(bearing: f64) -> u8 {
    match (bearing / 30.0).round() as u8 {
        0 => 12,
        h => h.min(12),
    }
}

/// Set a new minute, carrying into the hour when the hand crosses 12.
///
/// Only exact landings are recognized: previous = last minute and new = 0
/// moves forward an hour, previous = 0 and new = last minute moves back one.
/// A fast drag that skips the boundary leaves the hour unchanged.
pub fn apply_minute(time: ClockTime, minute: u8, snap: SnapIncrement) -> ClockTime {
    let previous = time.minute();
    let last = snap.last_minute();
    let updated = time.with_minute(minute);
    if previous == last && minute == 0 {
        updated.advance_hour()
    } else if previous == 0 && minute == last {
        updated.retreat_hour()
    } else {
        updated
    }
}

/// An in-progress drag. Exists only between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    target: HandTarget,
}

impl DragSession {
    pub fn target(&self) -> HandTarget {
        self.target
    }
}

/// Converts pointer gestures into clock time updates
#[derive(Debug, Clone)]
pub struct DragController {
    lengths: HandLengths,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(lengths: HandLengths) -> Self {
        Self {
            lengths,
            session: None,
        }
    }

    pub fn lengths(&self) -> HandLengths {
        self.lengths
    }

    /// Pointer-down: start a session if a hand was grabbed
    pub fn press(&mut self, dx: f64, dy: f64) -> Option<HandTarget> {
        self.session = hit_test(dx, dy, self.lengths).map(|target| DragSession { target });
        if let Some(session) = self.session {
            tracing::debug!("Grabbed {:?} hand at ({:.1}, {:.1})", session.target, dx, dy);
        }
        self.target()
    }

    /// Pointer-move: new time for the grabbed hand, None without a session
    pub fn drag(
        &self,
        dx: f64,
        dy: f64,
        time: ClockTime,
        snap: SnapIncrement,
    ) -> Option<ClockTime> {
        let session = self.session?;
        let bearing = bearing(dx, dy);
        let updated = match session.target {
            HandTarget::Minute => apply_minute(time, minute_from_bearing(bearing, snap), snap),
            HandTarget::Hour => time.with_hour(hour_from_bearing(bearing)),
        };
        Some(updated)
    }

    /// Pointer-up: end the session
    pub fn release(&mut self) -> Option<HandTarget> {
        self.session.take().map(|session| session.target)
    }

    pub fn target(&self) -> Option<HandTarget> {
        self.session.map(|session| session.target)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }
}
