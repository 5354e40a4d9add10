//! Colors used by the clock screen, resolved from `[ui]` config hex strings.

use crate::config::UiConfig;
use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockPalette {
    pub face: Color,
    pub numbers: Color,
    pub hour_hand: Color,
    pub minute_hand: Color,
    pub accent: Color,
    pub text: Color,
    pub background: Color,
}

impl Default for ClockPalette {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl ClockPalette {
    /// Build from config, falling back per color when a value doesn't parse
    pub fn from_config(ui: &UiConfig) -> Self {
        let pick = |value: &str, fallback: Color| {
            parse_color(value).unwrap_or_else(|| {
                tracing::warn!("Invalid color '{}', using {:?}", value, fallback);
                fallback
            })
        };
        Self {
            face: pick(&ui.face_color, Color::Gray),
            numbers: pick(&ui.number_color, Color::White),
            hour_hand: pick(&ui.hour_hand_color, Color::Red),
            minute_hand: pick(&ui.minute_hand_color, Color::Blue),
            accent: pick(&ui.accent_color, Color::Yellow),
            text: Color::White,
            background: Color::Black,
        }
    }
}

/// Parse "#rrggbb" (leading '#' optional)
pub fn parse_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff6060"), Some(Color::Rgb(255, 96, 96)));
        assert_eq!(parse_color("00a0FF"), Some(Color::Rgb(0, 160, 255)));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#gg0000"), None);
    }

    #[test]
    fn test_invalid_config_color_falls_back() {
        let ui = UiConfig {
            accent_color: "gold".to_string(),
            ..UiConfig::default()
        };
        let palette = ClockPalette::from_config(&ui);
        assert_eq!(palette.accent, Color::Yellow);
        assert_eq!(palette.hour_hand, Color::Rgb(255, 96, 96));
    }
}
