use super::clock_face::ClockFace;
use super::layout::ScreenLayout;
use super::offset_picker::OffsetPicker;
use super::quiz_panel::{panel_lines, QuizPanel};
use super::ClockPalette;
use crate::core::drag::FaceGeometry;
use crate::core::quiz::OffsetOption;
use crate::core::{AppCore, ClockAction, Variant};
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Picker state from the last frame, kept for click hit-testing
struct PickerHit {
    rect: Rect,
    options: Vec<OffsetOption>,
    selected: usize,
}

/// TUI Frontend using ratatui
///
/// Renders the clock with ratatui and handles events via crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    palette: ClockPalette,
    buttons: Vec<(Rect, ClockAction)>,
    picker: Option<PickerHit>,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new(palette: ClockPalette) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            palette,
            buttons: Vec::new(),
            picker: None,
        })
    }

    /// Set poll timeout (for controlling frame rate)
    pub fn set_poll_timeout(&mut self, timeout: Duration) {
        self.poll_timeout = timeout;
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::mouse(
                mouse_event.kind,
                mouse_event.column,
                mouse_event.row,
                mouse_event.modifiers,
            )),
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

fn title_line(variant: Variant) -> Line<'static> {
    Line::from(vec![
        Span::styled("なんじなんぷん？", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  ({})", variant.name())),
    ])
}

fn footer_line(variant: Variant) -> Line<'static> {
    let mut text = String::from("[a] こたえ  [b] おまけ  [s] よみあげ  [x] さいしょから  [esc] おわる");
    if variant == Variant::Offset {
        text.push_str("  [↑↓/space] えらぶ");
    }
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::DIM)))
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        // Wait up to the poll timeout for the first event, then drain the rest
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            if let Some(frontend_event) = Self::convert_event(event::read()?) {
                events.push(frontend_event);
            }
            timeout = Duration::ZERO;
        }

        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        let variant = core.variant();
        let widget = &core.widget;
        let show_picker = variant == Variant::Offset && widget.phase().bonus_open();
        let layout = ScreenLayout::compute(area, show_picker);
        let lines = panel_lines(widget, Instant::now());

        let palette = &self.palette;
        let mut buttons = Vec::new();
        self.terminal.draw(|f| {
            let buf = f.buffer_mut();

            Paragraph::new(title_line(variant))
                .alignment(Alignment::Center)
                .render(layout.title, buf);

            ClockFace::new(widget.time(), widget.hand_lengths(), palette)
                .dragging(widget.dragging())
                .render(layout.face, buf);

            buttons = QuizPanel::new(&lines).render(layout.panel, buf, palette);

            if let Some(rect) = layout.picker {
                OffsetPicker::new(widget.options(), widget.option_cursor(), widget.quiz().offset())
                    .render(rect, buf, palette);
            }

            Paragraph::new(footer_line(variant)).render(layout.footer, buf);
        })?;

        self.buttons = buttons;
        self.picker = layout.picker.map(|rect| PickerHit {
            rect,
            options: widget.options().to_vec(),
            selected: widget.option_cursor(),
        });

        let face = layout.face;
        core.set_face_geometry(FaceGeometry::from_cells(face.x, face.y, face.width, face.height));
        Ok(())
    }

    fn action_at(&self, x: u16, y: u16) -> Option<ClockAction> {
        let button = self
            .buttons
            .iter()
            .find(|(rect, _)| x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height)
            .map(|(_, action)| *action);
        if button.is_some() {
            return button;
        }

        let hit = self.picker.as_ref()?;
        OffsetPicker::new(&hit.options, hit.selected, None)
            .check_click(x, y, hit.rect)
            .map(ClockAction::ChooseOption)
    }

    fn cleanup(&mut self) -> Result<()> {
        // Restore terminal
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
