//! Offset picker for the offset quiz.
//!
//! A bordered list of "おまかせ" plus every offset choice, with a cursor,
//! scrolling to keep the cursor visible, and click hit-testing.

use super::ClockPalette;
use crate::core::quiz::OffsetOption;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub struct OffsetPicker<'a> {
    options: &'a [OffsetOption],
    selected: usize,
    /// Offset the question currently uses, marked in the list
    active: Option<i32>,
}

impl<'a> OffsetPicker<'a> {
    pub fn new(options: &'a [OffsetOption], selected: usize, active: Option<i32>) -> Self {
        Self {
            options,
            selected,
            active,
        }
    }

    /// First visible index so that `selected` stays on screen
    fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 || self.selected < visible {
            0
        } else {
            (self.selected + 1 - visible).min(self.options.len().saturating_sub(visible))
        }
    }

    /// Check if a click position hits any entry.
    /// Returns the option index if clicked, None otherwise.
    pub fn check_click(&self, click_x: u16, click_y: u16, rect: Rect) -> Option<usize> {
        // Check if click is within bounds, excluding the border
        if click_x <= rect.x || click_x + 1 >= rect.x + rect.width {
            return None;
        }
        if click_y <= rect.y || click_y + 1 >= rect.y + rect.height {
            return None;
        }

        let visible = rect.height.saturating_sub(2) as usize;
        let row = (click_y - rect.y - 1) as usize;
        let index = self.scroll_offset(visible) + row;
        (index < self.options.len()).then_some(index)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, palette: &ClockPalette) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        Clear.render(area, buf);

        let visible = area.height.saturating_sub(2) as usize;
        let start = self.scroll_offset(visible);

        let lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(idx, option)| {
                let is_active = matches!(option, OffsetOption::Offset(o) if Some(*o) == self.active);
                let marker = if is_active { "▶" } else { " " };
                let style = if idx == self.selected {
                    Style::default()
                        .fg(palette.background)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.text)
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(option.label(), style),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.face))
            .title("なんぷん？");

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quiz::offset_options;

    #[test]
    fn test_check_click_without_scroll() {
        let options = offset_options();
        let picker = OffsetPicker::new(&options, 0, None);
        let rect = Rect::new(10, 5, 16, 12);

        // First row inside the border is index 0
        assert_eq!(picker.check_click(12, 6, rect), Some(0));
        assert_eq!(picker.check_click(12, 9, rect), Some(3));
        // Border rows and columns miss
        assert_eq!(picker.check_click(12, 5, rect), None);
        assert_eq!(picker.check_click(10, 6, rect), None);
        assert_eq!(picker.check_click(12, 16, rect), None);
        // Outside entirely
        assert_eq!(picker.check_click(40, 6, rect), None);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let options = offset_options();
        let rect = Rect::new(0, 0, 16, 12); // 10 visible rows
        let picker = OffsetPicker::new(&options, 24, None);
        assert_eq!(picker.scroll_offset(10), 15);
        assert_eq!(picker.check_click(2, 1, rect), Some(15));
        assert_eq!(picker.check_click(2, 10, rect), Some(24));

        let picker = OffsetPicker::new(&options, 9, None);
        assert_eq!(picker.scroll_offset(10), 0);
        let picker = OffsetPicker::new(&options, 10, None);
        assert_eq!(picker.scroll_offset(10), 1);
    }

    #[test]
    fn test_render_marks_entries() {
        let options = offset_options();
        let palette = ClockPalette::default();
        let area = Rect::new(0, 0, 16, 6);
        let mut buf = Buffer::empty(area);
        OffsetPicker::new(&options, 1, Some(-60)).render(area, &mut buf, &palette);

        // Row 2 holds index 1 ("60分前"), which is the active offset
        assert_eq!(buf[(1, 2)].symbol(), "▶");
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
