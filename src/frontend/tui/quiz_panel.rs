//! Answer and bonus-quiz panel.
//!
//! `panel_lines` decides what the panel shows for the current phase; the
//! renderer lays the lines out top to bottom and reports where each button
//! landed so clicks can be routed back to `ClockAction`s.

use super::ClockPalette;
use crate::core::input_router::key_hint;
use crate::core::quiz::Quiz;
use crate::core::{ClockAction, ClockWidget, Phase};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::time::Instant;

/// One row of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelLine {
    Text(String),
    /// Large, highlighted value (the time or a bonus answer)
    Answer(String),
    Button {
        label: String,
        action: ClockAction,
    },
    Blank,
}

impl PanelLine {
    fn button(label: &str, action: ClockAction) -> Self {
        PanelLine::Button {
            label: label.to_string(),
            action,
        }
    }
}

/// Panel content for the widget's current phase
pub fn panel_lines(widget: &ClockWidget, now: Instant) -> Vec<PanelLine> {
    let phase = widget.phase();
    let mut lines = Vec::new();

    if !phase.answer_visible() {
        lines.push(PanelLine::button("こたえをみる", ClockAction::RevealAnswer));
        return lines;
    }

    lines.push(PanelLine::Answer(widget.time().to_string()));
    lines.push(PanelLine::button("よみあげる", ClockAction::Speak));
    lines.push(PanelLine::Blank);

    match phase {
        Phase::Idle => {}
        Phase::AnswerRevealed => {
            lines.push(PanelLine::button("おまけのもんだいをみる", ClockAction::OpenBonus));
        }
        Phase::BonusOffered => {
            lines.push(PanelLine::Text("おまけのもんだい".to_string()));
            if matches!(widget.quiz(), Quiz::Offset(_)) {
                lines.push(PanelLine::Text("なんぷんごか、なんぷんまえかをえらんでね".to_string()));
            }
            lines.push(PanelLine::button("もんだいをみる", ClockAction::AskBonus));
        }
        Phase::BonusQuestionShown | Phase::BonusAnswerRevealed => {
            if widget.quiz_finished() {
                lines.push(PanelLine::Text("おつかれさまでした！".to_string()));
            } else if let Some(prompt) = widget.bonus_prompt() {
                let prompt = match widget.quiz() {
                    Quiz::Sequence(quiz) => match quiz.current() {
                        Some(question) => format!("{}もんめ：{}", question.number, prompt),
                        None => prompt,
                    },
                    Quiz::Offset(_) => prompt,
                };
                lines.push(PanelLine::Text(prompt));
                match widget.bonus_answer() {
                    Some(answer) => lines.push(PanelLine::Answer(answer.to_string())),
                    None => lines.push(PanelLine::button("こたえをみる", ClockAction::RevealBonus)),
                }
                if widget.can_advance(now) {
                    lines.push(PanelLine::button("つぎのもんだいをみる", ClockAction::NextQuestion));
                }
            }
        }
    }

    lines.push(PanelLine::Blank);
    lines.push(PanelLine::button("さいしょから", ClockAction::Reset));
    lines
}

pub struct QuizPanel<'a> {
    lines: &'a [PanelLine],
}

impl<'a> QuizPanel<'a> {
    pub fn new(lines: &'a [PanelLine]) -> Self {
        Self { lines }
    }

    /// Draw the panel and return the clickable rows
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        palette: &ClockPalette,
    ) -> Vec<(Rect, ClockAction)> {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.face))
            .title("こたえ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut regions = Vec::new();
        let mut rendered = Vec::new();
        for (row, line) in self.lines.iter().enumerate().take(inner.height as usize) {
            let text_line = match line {
                PanelLine::Text(text) => {
                    Line::from(Span::styled(text.clone(), Style::default().fg(palette.text)))
                }
                PanelLine::Answer(text) => Line::from(Span::styled(
                    text.clone(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                PanelLine::Button { label, action } => {
                    regions.push((Rect::new(inner.x, inner.y + row as u16, inner.width, 1), *action));
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", key_hint(*action)),
                            Style::default().fg(palette.accent),
                        ),
                        Span::styled(
                            label.clone(),
                            Style::default()
                                .fg(palette.text)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                    ])
                }
                PanelLine::Blank => Line::default(),
            };
            rendered.push(text_line);
        }

        Paragraph::new(rendered).render(inner, buf);
        regions
    }
}
