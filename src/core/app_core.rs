use crate::config::Config;
use crate::core::clock::ClockTime;
use crate::core::drag::FaceGeometry;
use crate::core::input_result::InputResult;
use crate::core::input_router;
use crate::core::state::{ClockAction, ClockWidget, Variant};
use crate::frontend::FrontendEvent;
use crate::tts::Speaker;
use chrono::Timelike;
use crossterm::event::{MouseButton, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Core application state (frontend-agnostic)
///
/// Owns the clock widget and everything that performs side effects for it:
/// the random source for quiz offsets and the speaker. Frontends feed it
/// `FrontendEvent`s and read the widget back for rendering.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// The clock widget
    pub widget: ClockWidget,

    /// Speech output (silent no-op when unavailable)
    pub speaker: Speaker,

    /// Random source for quiz offsets
    rng: StdRng,

    /// Where the face was last drawn; None until the first layout
    face: Option<FaceGeometry>,

    /// Application running flag
    pub running: bool,
}

impl AppCore {
    /// Start at the local wall-clock time
    pub fn new(config: Config) -> Self {
        let now = chrono::Local::now();
        let time = ClockTime::from_wall_clock(now.hour(), now.minute(), config.clock.variant.snap());
        Self::with_time(config, time, StdRng::from_entropy())
    }

    /// Start at a fixed time with a given random source
    pub fn with_time(config: Config, time: ClockTime, mut rng: StdRng) -> Self {
        let widget = ClockWidget::new(
            config.clock.variant,
            time,
            config.clock.hand_lengths(),
            Duration::from_millis(config.clock.next_question_delay_ms),
            &mut rng,
        );
        let speaker = Speaker::new(&config.tts);
        tracing::info!(
            "Clock widget ready: variant={}, time={}",
            config.clock.variant.name(),
            time
        );
        Self {
            config,
            widget,
            speaker,
            rng,
            face: None,
            running: true,
        }
    }

    pub fn variant(&self) -> Variant {
        self.widget.variant()
    }

    /// Record where the frontend drew the face (None hides it from hit-testing)
    pub fn set_face_geometry(&mut self, face: Option<FaceGeometry>) {
        if face.is_none() && self.widget.dragging().is_some() {
            self.widget.release();
        }
        self.face = face;
    }

    /// Handle one frontend event
    pub fn handle_event(&mut self, event: FrontendEvent, now: Instant) -> InputResult {
        match event {
            FrontendEvent::Key { code, modifiers } => match input_router::route_key(code, modifiers) {
                Some(action) => self.dispatch(action, now),
                None => InputResult::Continue,
            },
            FrontendEvent::Mouse { kind, x, y, .. } => self.handle_mouse(kind, x, y),
            FrontendEvent::Resize { .. } => InputResult::Updated,
        }
    }

    /// Apply an action and perform its side effects
    pub fn dispatch(&mut self, action: ClockAction, now: Instant) -> InputResult {
        let result = self.widget.apply(action, &mut self.rng, now);
        match result {
            InputResult::Speak { time } => self.speaker.speak_time(time),
            InputResult::Quit => {
                tracing::info!("Quit requested");
                self.running = false;
            }
            InputResult::Continue | InputResult::Updated => {}
        }
        result
    }

    fn handle_mouse(&mut self, kind: MouseEventKind, x: u16, y: u16) -> InputResult {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(face) = self.face else {
                    return InputResult::Continue;
                };
                let (dx, dy) = face.offset(x, y);
                self.widget.press(dx, dy)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(face) = self.face else {
                    return InputResult::Continue;
                };
                let (dx, dy) = face.offset(x, y);
                self.widget.drag_to(dx, dy)
            }
            MouseEventKind::Up(MouseButton::Left) => self.widget.release(),
            _ => InputResult::Continue,
        }
    }
}

impl Drop for AppCore {
    fn drop(&mut self) {
        // End any gesture still in flight
        self.widget.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Phase;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn core(variant: Variant, time: ClockTime) -> AppCore {
        let mut config = Config::default();
        config.clock.variant = variant;
        config.tts.enabled = false;
        AppCore::with_time(config, time, StdRng::seed_from_u64(2))
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> FrontendEvent {
        FrontendEvent::mouse(kind, x, y, KeyModifiers::NONE)
    }

    #[test]
    fn test_mouse_ignored_without_face() {
        let mut core = core(Variant::FiveMinute, ClockTime::new(3, 0));
        let now = Instant::now();
        let result = core.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10), now);
        assert_eq!(result, InputResult::Continue);
        assert!(core.widget.dragging().is_none());
    }

    #[test]
    fn test_mouse_drag_moves_minute_hand() {
        let mut core = core(Variant::FiveMinute, ClockTime::new(3, 0));
        let now = Instant::now();
        // 44x22 cells: 5 face units per column, 10 per row, center (22, 11)
        core.set_face_geometry(FaceGeometry::from_cells(0, 0, 44, 22));

        // Row 6 is (6.5 - 11) * 10 = -45 units: straight up, minute band
        let down = core.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 21, 6), now);
        assert!(down.is_update());

        // Column 32 is (32.5 - 22) * 5 = 52.5 units right of center: 3 o'clock
        let drag = core.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 32, 11), now);
        assert!(drag.is_update());
        assert_eq!(core.widget.time(), ClockTime::new(3, 15));

        core.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 32, 11), now);
        assert!(core.widget.dragging().is_none());
    }

    #[test]
    fn test_keys_drive_phases_and_quit() {
        let mut core = core(Variant::Offset, ClockTime::new(3, 0));
        let now = Instant::now();
        let key = |c| FrontendEvent::key(KeyCode::Char(c), KeyModifiers::NONE);

        core.handle_event(key('a'), now);
        assert_eq!(core.widget.phase(), Phase::AnswerRevealed);

        // Speaking with a disabled speaker is a silent no-op
        let spoken = core.handle_event(key('s'), now);
        assert_eq!(spoken, InputResult::Speak { time: ClockTime::new(3, 0) });
        assert!(!core.speaker.is_initialized());

        core.handle_event(FrontendEvent::key(KeyCode::Esc, KeyModifiers::NONE), now);
        assert!(!core.running);
    }

    #[test]
    fn test_hiding_face_ends_drag() {
        let mut core = core(Variant::Minute, ClockTime::new(3, 0));
        core.set_face_geometry(FaceGeometry::from_cells(0, 0, 44, 22));
        core.handle_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 21, 6),
            Instant::now(),
        );
        assert!(core.widget.dragging().is_some());
        core.set_face_geometry(None);
        assert!(core.widget.dragging().is_none());
    }
}
