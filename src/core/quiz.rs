//! Bonus questions about the displayed time.
//!
//! Two designs exist. The sequence quiz asks three fixed-shape questions
//! ("N ふんごは？" twice, then "N ふんまえは？"). The offset quiz asks a single
//! question whose offset is picked from a list or re-rolled.

use crate::core::clock::{wrap_hour, ClockTime};
use rand::Rng;
use std::time::{Duration, Instant};

/// Number of questions in the sequence quiz
pub const SEQUENCE_LENGTH: u8 = 3;

/// Largest offset, in minutes, the offset quiz asks about
pub const MAX_OFFSET: i32 = 60;

/// Time after `base` shifted by `offset` minutes.
///
/// The hour is normalized onto the 12-hour dial and the minute is rounded to
/// the nearest 5, carrying into the hour when rounding reaches 60.
pub fn offset_answer(base: ClockTime, offset: i32) -> ClockTime {
    let total = base.total_minutes() + offset;
    let mut hour = total.div_euclid(60);
    let mut minute = ((total.rem_euclid(60) as f64 / 5.0).round() as i32) * 5;
    if minute == 60 {
        minute = 0;
        hour += 1;
    }
    ClockTime::new(wrap_hour(hour), minute as u8)
}

/// All offsets the offset quiz can ask about: multiples of 5 in [-60, 60] without 0
pub fn offset_choices() -> Vec<i32> {
    (-MAX_OFFSET..=MAX_OFFSET)
        .step_by(5)
        .filter(|offset| *offset != 0)
        .collect()
}

/// Uniformly random offset from `offset_choices()`
pub fn random_offset<R: Rng>(rng: &mut R) -> i32 {
    let multiplier = rng.gen_range(1..=MAX_OFFSET / 5) * 5;
    if rng.gen_bool(0.5) {
        multiplier
    } else {
        -multiplier
    }
}

/// "N分後" for positive offsets, "N分前" for negative ones
pub fn offset_label(offset: i32) -> String {
    if offset < 0 {
        format!("{}分前", -offset)
    } else {
        format!("{}分後", offset)
    }
}

/// Entry in the offset picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOption {
    /// Re-roll a random offset
    Random,
    Offset(i32),
}

impl OffsetOption {
    pub fn label(&self) -> String {
        match self {
            OffsetOption::Random => "おまかせ".to_string(),
            OffsetOption::Offset(offset) => offset_label(*offset),
        }
    }
}

/// The picker's entries: "おまかせ" followed by every offset choice
pub fn offset_options() -> Vec<OffsetOption> {
    std::iter::once(OffsetOption::Random)
        .chain(offset_choices().into_iter().map(OffsetOption::Offset))
        .collect()
}

/// Direction of a sequence question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    After,
    Before,
}

/// One question of the sequence quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceQuestion {
    pub number: u8,
    pub minutes: i32,
    pub direction: Direction,
}

impl SequenceQuestion {
    /// Draw question `number` (1-based). The first asks 5–20 minutes, later ones 25–55.
    pub fn draw<R: Rng>(number: u8, rng: &mut R) -> Self {
        let minutes = if number == 1 {
            rng.gen_range(1..=4) * 5
        } else {
            rng.gen_range(5..=11) * 5
        };
        let direction = if number < SEQUENCE_LENGTH {
            Direction::After
        } else {
            Direction::Before
        };
        Self {
            number,
            minutes,
            direction,
        }
    }

    /// Signed offset in minutes
    pub fn offset(&self) -> i32 {
        match self.direction {
            Direction::After => self.minutes,
            Direction::Before => -self.minutes,
        }
    }

    pub fn prompt(&self) -> String {
        match self.direction {
            Direction::After => format!("{} ふんごは？", self.minutes),
            Direction::Before => format!("{} ふんまえは？", self.minutes),
        }
    }
}

/// Fixed three-question quiz advanced with "next"
#[derive(Debug, Clone, Default)]
pub struct SequenceQuiz {
    /// 0 before the first question, 1..=3 while asking, 4 once finished
    count: u8,
    current: Option<SequenceQuestion>,
    revealed: bool,
    next_ready_at: Option<Instant>,
}

impl SequenceQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the first question
    pub fn start<R: Rng>(&mut self, rng: &mut R, now: Instant, delay: Duration) {
        self.count = 0;
        self.show_next(rng, now, delay);
    }

    /// Whether the "next" control is enabled at `now`
    pub fn can_advance(&self, now: Instant) -> bool {
        match self.next_ready_at {
            Some(ready) => self.current.is_some() && now >= ready,
            None => false,
        }
    }

    /// Move to the next question, or finish after the last one.
    /// Returns false while the pacing delay is still running.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, now: Instant, delay: Duration) -> bool {
        if !self.can_advance(now) {
            return false;
        }
        self.show_next(rng, now, delay);
        true
    }

    fn show_next<R: Rng>(&mut self, rng: &mut R, now: Instant, delay: Duration) {
        self.count += 1;
        self.revealed = false;
        if self.count <= SEQUENCE_LENGTH {
            self.current = Some(SequenceQuestion::draw(self.count, rng));
            self.next_ready_at = Some(now + delay);
        } else {
            self.current = None;
            self.next_ready_at = None;
        }
    }

    pub fn current(&self) -> Option<&SequenceQuestion> {
        self.current.as_ref()
    }

    pub fn reveal(&mut self) -> bool {
        if self.current.is_none() || self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_finished(&self) -> bool {
        self.count > SEQUENCE_LENGTH
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Single-question quiz about a chosen offset
#[derive(Debug, Clone)]
pub struct OffsetQuiz {
    offset: i32,
    revealed: bool,
}

impl OffsetQuiz {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            offset: random_offset(rng),
            revealed: false,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Apply a picker entry. Offsets outside the choice list are ignored.
    pub fn choose<R: Rng>(&mut self, option: OffsetOption, rng: &mut R) -> bool {
        match option {
            OffsetOption::Random => self.offset = random_offset(rng),
            OffsetOption::Offset(offset) => {
                if offset == 0 || offset.abs() > MAX_OFFSET || offset % 5 != 0 {
                    return false;
                }
                self.offset = offset;
            }
        }
        self.revealed = false;
        true
    }

    pub fn prompt(&self) -> String {
        format!("{}は？", offset_label(self.offset))
    }

    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Fresh random offset with the answer hidden
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.offset = random_offset(rng);
        self.revealed = false;
    }
}

/// The bonus quiz carried by a widget variant
#[derive(Debug, Clone)]
pub enum Quiz {
    Sequence(SequenceQuiz),
    Offset(OffsetQuiz),
}

impl Quiz {
    /// Current prompt, if a question is showing
    pub fn prompt(&self) -> Option<String> {
        match self {
            Quiz::Sequence(quiz) => quiz.current().map(SequenceQuestion::prompt),
            Quiz::Offset(quiz) => Some(quiz.prompt()),
        }
    }

    /// Signed offset of the current question
    pub fn offset(&self) -> Option<i32> {
        match self {
            Quiz::Sequence(quiz) => quiz.current().map(SequenceQuestion::offset),
            Quiz::Offset(quiz) => Some(quiz.offset()),
        }
    }

    /// Answer for the current question relative to `base`
    pub fn answer(&self, base: ClockTime) -> Option<ClockTime> {
        self.offset().map(|offset| offset_answer(base, offset))
    }

    pub fn is_revealed(&self) -> bool {
        match self {
            Quiz::Sequence(quiz) => quiz.is_revealed(),
            Quiz::Offset(quiz) => quiz.is_revealed(),
        }
    }

    pub fn reveal(&mut self) -> bool {
        match self {
            Quiz::Sequence(quiz) => quiz.reveal(),
            Quiz::Offset(quiz) => quiz.reveal(),
        }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        match self {
            Quiz::Sequence(quiz) => quiz.reset(),
            Quiz::Offset(quiz) => quiz.reset(rng),
        }
    }
}
