//! Screen layout: title row, clock face, answer panel, optional offset picker,
//! and a key-hint footer.

use ratatui::layout::Rect;

/// Width of the answer/quiz panel
pub const PANEL_WIDTH: u16 = 36;

/// Width of the offset picker column
pub const PICKER_WIDTH: u16 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    /// Square-looking face area: twice as wide as tall, since cells are tall
    pub face: Rect,
    pub panel: Rect,
    pub picker: Option<Rect>,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, show_picker: bool) -> Self {
        let title = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let footer = Rect::new(
            area.x,
            (area.y + area.height).saturating_sub(1).max(area.y),
            area.width,
            area.height.saturating_sub(1).min(1),
        );
        let body_y = area.y + title.height;
        let body_height = area.height.saturating_sub(title.height + footer.height);

        let picker_width = if show_picker { PICKER_WIDTH } else { 0 };
        let side_width = (PANEL_WIDTH + picker_width).min(area.width);
        let face_column = area.width - side_width;

        let face_height = body_height.min(face_column / 2);
        let face_width = face_height * 2;
        let face = Rect::new(
            area.x + (face_column - face_width) / 2,
            body_y + (body_height - face_height) / 2,
            face_width,
            face_height,
        );

        let panel_x = area.x + face_column;
        let panel_width = side_width.min(PANEL_WIDTH);
        let panel = Rect::new(panel_x, body_y, panel_width, body_height);

        let picker = show_picker.then(|| {
            Rect::new(
                panel_x + panel_width,
                body_y,
                side_width - panel_width,
                body_height,
            )
        });

        Self {
            title,
            face,
            panel,
            picker,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_is_twice_as_wide_as_tall() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40), false);
        assert_eq!(layout.face.height, 38);
        assert_eq!(layout.face.width, 76);
        assert_eq!(layout.panel, Rect::new(84, 1, PANEL_WIDTH, 38));
        assert_eq!(layout.footer, Rect::new(0, 39, 120, 1));
        assert!(layout.picker.is_none());
    }

    #[test]
    fn test_narrow_terminal_shrinks_face() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 40), true);
        // 80 - 36 - 14 = 30 columns for the face
        assert_eq!(layout.face.width, 30);
        assert_eq!(layout.face.height, 15);
        assert_eq!(layout.picker, Some(Rect::new(66, 1, PICKER_WIDTH, 38)));
        // Face centered vertically in the body
        assert_eq!(layout.face.y, 1 + (38 - 15) / 2);
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 10, 1), true);
        assert_eq!(layout.face.width, 0);
        assert_eq!(layout.footer.height, 0);
    }
}
