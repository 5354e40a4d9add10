//! Clock widget state
//!
//! Owns the displayed time, the drag controller and the bonus quiz, and moves
//! through the display phases in response to explicit user actions.

use crate::core::clock::{ClockTime, SnapIncrement};
use crate::core::drag::{DragController, HandLengths, HandTarget};
use crate::core::input_result::InputResult;
use crate::core::quiz::{offset_options, OffsetOption, OffsetQuiz, Quiz, SequenceQuiz};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Which flavor of the widget is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// 1-minute snap, three-question sequence quiz
    Minute,
    /// 5-minute snap, three-question sequence quiz
    FiveMinute,
    /// 5-minute snap, single selectable offset question
    Offset,
}

impl Variant {
    pub fn snap(self) -> SnapIncrement {
        match self {
            Variant::Minute => SnapIncrement::One,
            Variant::FiveMinute | Variant::Offset => SnapIncrement::Five,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Minute => "minute",
            Variant::FiveMinute => "five-minute",
            Variant::Offset => "offset",
        }
    }
}

/// Display phase. Ordered: later phases show everything earlier ones do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Showing the clock, answer hidden
    Idle,
    /// Displayed time revealed
    AnswerRevealed,
    /// Bonus panel open, no question yet
    BonusOffered,
    /// Bonus question visible
    BonusQuestionShown,
    /// Bonus answer visible (or sequence finished)
    BonusAnswerRevealed,
}

impl Phase {
    pub fn answer_visible(self) -> bool {
        self >= Phase::AnswerRevealed
    }

    pub fn bonus_open(self) -> bool {
        self >= Phase::BonusOffered
    }
}

/// Explicit user actions (buttons and keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    RevealAnswer,
    OpenBonus,
    AskBonus,
    RevealBonus,
    NextQuestion,
    CursorUp,
    CursorDown,
    ChooseSelected,
    ChooseOption(usize),
    Speak,
    Reset,
    Quit,
}

/// The whole widget: time, drag state, quiz and phase
#[derive(Debug, Clone)]
pub struct ClockWidget {
    variant: Variant,
    time: ClockTime,
    phase: Phase,
    drag: DragController,
    quiz: Quiz,
    options: Vec<OffsetOption>,
    option_cursor: usize,
    next_delay: Duration,
}

impl ClockWidget {
    pub fn new<R: Rng>(
        variant: Variant,
        time: ClockTime,
        lengths: HandLengths,
        next_delay: Duration,
        rng: &mut R,
    ) -> Self {
        let (quiz, options) = match variant {
            Variant::Minute | Variant::FiveMinute => (Quiz::Sequence(SequenceQuiz::new()), Vec::new()),
            Variant::Offset => (Quiz::Offset(OffsetQuiz::new(rng)), offset_options()),
        };
        Self {
            variant,
            time,
            phase: Phase::Idle,
            drag: DragController::new(lengths),
            quiz,
            options,
            option_cursor: 0,
            next_delay,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn options(&self) -> &[OffsetOption] {
        &self.options
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn hand_lengths(&self) -> HandLengths {
        self.drag.lengths()
    }

    /// Hand currently being dragged
    pub fn dragging(&self) -> Option<HandTarget> {
        self.drag.target()
    }

    /// Prompt of the visible bonus question
    pub fn bonus_prompt(&self) -> Option<String> {
        if self.phase < Phase::BonusQuestionShown {
            return None;
        }
        self.quiz.prompt()
    }

    /// Answer of the bonus question, once revealed
    pub fn bonus_answer(&self) -> Option<ClockTime> {
        if self.phase < Phase::BonusAnswerRevealed || !self.quiz.is_revealed() {
            return None;
        }
        self.quiz.answer(self.time)
    }

    /// Whether the "next question" control is enabled at `now`
    pub fn can_advance(&self, now: Instant) -> bool {
        match &self.quiz {
            Quiz::Sequence(quiz) => self.phase >= Phase::BonusQuestionShown && quiz.can_advance(now),
            Quiz::Offset(_) => false,
        }
    }

    pub fn quiz_finished(&self) -> bool {
        matches!(&self.quiz, Quiz::Sequence(quiz) if quiz.is_finished())
    }

    /// Pointer-down at (dx, dy) face units from the center
    pub fn press(&mut self, dx: f64, dy: f64) -> InputResult {
        InputResult::updated_if(self.drag.press(dx, dy).is_some())
    }

    /// Pointer-move; only has an effect while a hand is grabbed
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> InputResult {
        match self.drag.drag(dx, dy, self.time, self.variant.snap()) {
            Some(time) if time != self.time => {
                tracing::debug!("Clock moved {} -> {}", self.time, time);
                self.time = time;
                InputResult::Updated
            }
            _ => InputResult::Continue,
        }
    }

    /// Pointer-up
    pub fn release(&mut self) -> InputResult {
        InputResult::updated_if(self.drag.release().is_some())
    }

    /// Apply a user action. Actions that make no sense in the current phase
    /// or variant return `InputResult::Continue` and change nothing.
    pub fn apply<R: Rng>(&mut self, action: ClockAction, rng: &mut R, now: Instant) -> InputResult {
        let result = match action {
            ClockAction::RevealAnswer => self.transition(Phase::Idle, Phase::AnswerRevealed),
            ClockAction::OpenBonus => self.transition(Phase::AnswerRevealed, Phase::BonusOffered),
            ClockAction::AskBonus => {
                if self.phase != Phase::BonusOffered {
                    return InputResult::Continue;
                }
                if let Quiz::Sequence(quiz) = &mut self.quiz {
                    quiz.start(rng, now, self.next_delay);
                }
                self.phase = Phase::BonusQuestionShown;
                InputResult::Updated
            }
            ClockAction::RevealBonus => {
                if self.phase != Phase::BonusQuestionShown || !self.quiz.reveal() {
                    return InputResult::Continue;
                }
                self.phase = Phase::BonusAnswerRevealed;
                InputResult::Updated
            }
            ClockAction::NextQuestion => self.next_question(rng, now),
            ClockAction::CursorUp => self.move_cursor(false),
            ClockAction::CursorDown => self.move_cursor(true),
            ClockAction::ChooseSelected => self.choose_option(self.option_cursor, rng),
            ClockAction::ChooseOption(index) => self.choose_option(index, rng),
            ClockAction::Speak => {
                if !self.phase.answer_visible() {
                    return InputResult::Continue;
                }
                return InputResult::Speak { time: self.time };
            }
            ClockAction::Reset => {
                self.reset(rng);
                InputResult::Updated
            }
            ClockAction::Quit => return InputResult::Quit,
        };
        if result.is_update() {
            tracing::debug!("{:?} -> phase {:?}", action, self.phase);
        }
        result
    }

    fn transition(&mut self, from: Phase, to: Phase) -> InputResult {
        if self.phase != from {
            return InputResult::Continue;
        }
        self.phase = to;
        InputResult::Updated
    }

    fn next_question<R: Rng>(&mut self, rng: &mut R, now: Instant) -> InputResult {
        if self.phase < Phase::BonusQuestionShown {
            return InputResult::Continue;
        }
        let Quiz::Sequence(quiz) = &mut self.quiz else {
            return InputResult::Continue;
        };
        if !quiz.advance(rng, now, self.next_delay) {
            return InputResult::Continue;
        }
        self.phase = if quiz.is_finished() {
            Phase::BonusAnswerRevealed
        } else {
            Phase::BonusQuestionShown
        };
        InputResult::Updated
    }

    fn move_cursor(&mut self, forward: bool) -> InputResult {
        if self.options.is_empty() || !self.phase.bonus_open() {
            return InputResult::Continue;
        }
        let len = self.options.len();
        self.option_cursor = if forward {
            (self.option_cursor + 1) % len
        } else {
            (self.option_cursor + len - 1) % len
        };
        InputResult::Updated
    }

    fn choose_option<R: Rng>(&mut self, index: usize, rng: &mut R) -> InputResult {
        if !self.phase.bonus_open() {
            return InputResult::Continue;
        }
        let Some(option) = self.options.get(index).copied() else {
            return InputResult::Continue;
        };
        let Quiz::Offset(quiz) = &mut self.quiz else {
            return InputResult::Continue;
        };
        if !quiz.choose(option, rng) {
            return InputResult::Continue;
        }
        self.option_cursor = index;
        self.phase = Phase::BonusQuestionShown;
        InputResult::Updated
    }

    /// Back to Idle with a fresh quiz. The displayed time is kept.
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.phase = Phase::Idle;
        self.quiz.reset(rng);
        self.option_cursor = 0;
        self.drag.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DELAY: Duration = Duration::from_millis(500);

    fn widget(variant: Variant, time: ClockTime) -> (ClockWidget, StdRng) {
        let mut rng = StdRng::seed_from_u64(5);
        let widget = ClockWidget::new(variant, time, HandLengths::default(), DELAY, &mut rng);
        (widget, rng)
    }

    #[test]
    fn test_display_flow_offset_variant() {
        let (mut w, mut rng) = widget(Variant::Offset, ClockTime::new(3, 0));
        let now = Instant::now();

        // Out-of-order actions are ignored
        assert_eq!(w.apply(ClockAction::OpenBonus, &mut rng, now), InputResult::Continue);
        assert_eq!(w.apply(ClockAction::Speak, &mut rng, now), InputResult::Continue);

        assert!(w.apply(ClockAction::RevealAnswer, &mut rng, now).is_update());
        assert_eq!(w.phase(), Phase::AnswerRevealed);
        assert_eq!(
            w.apply(ClockAction::Speak, &mut rng, now),
            InputResult::Speak { time: ClockTime::new(3, 0) }
        );

        assert!(w.apply(ClockAction::OpenBonus, &mut rng, now).is_update());
        assert_eq!(w.phase(), Phase::BonusOffered);
        assert!(w.bonus_prompt().is_none());

        assert!(w.apply(ClockAction::AskBonus, &mut rng, now).is_update());
        assert_eq!(w.phase(), Phase::BonusQuestionShown);
        assert!(w.bonus_prompt().is_some());
        assert!(w.bonus_answer().is_none());

        assert!(w.apply(ClockAction::RevealBonus, &mut rng, now).is_update());
        assert_eq!(w.phase(), Phase::BonusAnswerRevealed);
        assert!(w.bonus_answer().is_some());
    }

    #[test]
    fn test_choose_option_sets_offset_and_hides_answer() {
        let (mut w, mut rng) = widget(Variant::Offset, ClockTime::new(3, 0));
        let now = Instant::now();
        for action in [
            ClockAction::RevealAnswer,
            ClockAction::OpenBonus,
            ClockAction::AskBonus,
            ClockAction::RevealBonus,
        ] {
            w.apply(action, &mut rng, now);
        }

        // index 24 is "60分後"
        assert!(w.apply(ClockAction::ChooseOption(24), &mut rng, now).is_update());
        assert_eq!(w.phase(), Phase::BonusQuestionShown);
        assert_eq!(w.quiz().offset(), Some(60));
        assert_eq!(w.option_cursor(), 24);

        w.apply(ClockAction::RevealBonus, &mut rng, now);
        assert_eq!(w.bonus_answer(), Some(ClockTime::new(4, 0)));

        assert_eq!(
            w.apply(ClockAction::ChooseOption(99), &mut rng, now),
            InputResult::Continue
        );
    }

    #[test]
    fn test_cursor_wraps_and_requires_open_bonus() {
        let (mut w, mut rng) = widget(Variant::Offset, ClockTime::new(3, 0));
        let now = Instant::now();
        assert_eq!(w.apply(ClockAction::CursorDown, &mut rng, now), InputResult::Continue);

        w.apply(ClockAction::RevealAnswer, &mut rng, now);
        w.apply(ClockAction::OpenBonus, &mut rng, now);
        w.apply(ClockAction::CursorUp, &mut rng, now);
        assert_eq!(w.option_cursor(), 24);
        w.apply(ClockAction::CursorDown, &mut rng, now);
        assert_eq!(w.option_cursor(), 0);

        w.apply(ClockAction::CursorDown, &mut rng, now);
        w.apply(ClockAction::ChooseSelected, &mut rng, now);
        assert_eq!(w.quiz().offset(), Some(-60));
    }

    #[test]
    fn test_sequence_flow_finishes_after_three() {
        let (mut w, mut rng) = widget(Variant::FiveMinute, ClockTime::new(10, 0));
        let mut now = Instant::now();
        w.apply(ClockAction::RevealAnswer, &mut rng, now);
        w.apply(ClockAction::OpenBonus, &mut rng, now);
        w.apply(ClockAction::AskBonus, &mut rng, now);
        assert!(w.bonus_prompt().unwrap().ends_with("ふんごは？"));

        // Next is held back by the pacing delay
        assert!(!w.can_advance(now));
        assert_eq!(w.apply(ClockAction::NextQuestion, &mut rng, now), InputResult::Continue);

        for _ in 0..2 {
            now += DELAY;
            assert!(w.can_advance(now));
            assert!(w.apply(ClockAction::NextQuestion, &mut rng, now).is_update());
            assert_eq!(w.phase(), Phase::BonusQuestionShown);
        }
        assert!(w.bonus_prompt().unwrap().ends_with("ふんまえは？"));

        // Reveal the third answer, then finish
        assert!(w.apply(ClockAction::RevealBonus, &mut rng, now).is_update());
        let answer = w.bonus_answer().unwrap();
        assert!(answer.hour() == 9 || answer.hour() == 10);

        now += DELAY;
        assert!(w.apply(ClockAction::NextQuestion, &mut rng, now).is_update());
        assert!(w.quiz_finished());
        assert_eq!(w.phase(), Phase::BonusAnswerRevealed);
        assert!(w.bonus_prompt().is_none());
        assert!(!w.can_advance(now + DELAY));
    }

    #[test]
    fn test_reset_clears_reveals_and_rerolls() {
        let (mut w, mut rng) = widget(Variant::Offset, ClockTime::new(6, 30));
        let now = Instant::now();
        for action in [
            ClockAction::RevealAnswer,
            ClockAction::OpenBonus,
            ClockAction::AskBonus,
            ClockAction::RevealBonus,
        ] {
            w.apply(action, &mut rng, now);
        }
        assert!(w.quiz().is_revealed());

        for _ in 0..50 {
            w.apply(ClockAction::Reset, &mut rng, now);
            assert_eq!(w.phase(), Phase::Idle);
            assert!(!w.quiz().is_revealed());
            assert!(w.bonus_answer().is_none());
            let offset = w.quiz().offset().unwrap();
            assert!(offset != 0 && (-60..=60).contains(&offset));
        }
        assert_eq!(w.time(), ClockTime::new(6, 30));
    }

    #[test]
    fn test_drag_updates_time_and_carries() {
        let (mut w, _) = widget(Variant::FiveMinute, ClockTime::new(12, 55));
        // Grab the minute hand straight up, inside the minute band
        assert!(w.press(0.0, -50.0).is_update());
        assert_eq!(w.dragging(), Some(HandTarget::Minute));

        // Land on 0 from 55: hour advances 12 -> 1
        assert!(w.drag_to(1.0, -50.0).is_update());
        assert_eq!(w.time(), ClockTime::new(1, 0));

        // Back to 55: hour returns 1 -> 12
        assert!(w.drag_to(-30.0, -50.0).is_update());
        assert_eq!(w.time(), ClockTime::new(12, 55));

        assert!(w.release().is_update());
        assert_eq!(w.drag_to(50.0, 0.0), InputResult::Continue);
        assert_eq!(w.time(), ClockTime::new(12, 55));
    }

    #[test]
    fn test_press_outside_hands_is_ignored() {
        let (mut w, _) = widget(Variant::Minute, ClockTime::new(2, 17));
        assert_eq!(w.press(0.0, -95.0), InputResult::Continue);
        assert_eq!(w.drag_to(50.0, 0.0), InputResult::Continue);
        assert_eq!(w.time(), ClockTime::new(2, 17));
    }

    #[test]
    fn test_quit_passes_through() {
        let (mut w, mut rng) = widget(Variant::Minute, ClockTime::new(2, 17));
        assert_eq!(w.apply(ClockAction::Quit, &mut rng, Instant::now()), InputResult::Quit);
    }
}
