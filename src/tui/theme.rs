use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Fill behind popups and overlays
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    /// Struck-through text of a checked item
    pub done: Color,
    pub highlight: Color,
    pub red: Color,
    pub green: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
    /// Gradient stops of the panel background at full opacity
    pub panel_edge: (u8, u8, u8),
    pub panel_middle: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x88, 0x88, 0x88),
            done: Color::Rgb(0x88, 0x88, 0x88),
            highlight: Color::Rgb(0xFF, 0xD7, 0x00),
            red: Color::Rgb(0xFF, 0x5C, 0x5C),
            green: Color::Rgb(0x4C, 0xD9, 0x64),
            border: Color::Rgb(0x64, 0x64, 0x64),
            selection_bg: Color::Rgb(0x46, 0x46, 0x46),
            search_match_bg: Color::Rgb(0xFF, 0xD7, 0x00),
            search_match_fg: Color::Rgb(0x1E, 0x1E, 0x1E),
            panel_edge: (30, 30, 30),
            panel_middle: (50, 50, 50),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let (r, g, b) = parse_hex_rgb(hex)?;
    Some(Color::Rgb(r, g, b))
}

fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` settings, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some((r, g, b)) = parse_hex_rgb(value) {
                let color = Color::Rgb(r, g, b);
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "dim" => theme.dim = color,
                    "done" => theme.done = color,
                    "highlight" => theme.highlight = color,
                    "red" => theme.red = color,
                    "green" => theme.green = color,
                    "border" => theme.border = color,
                    "selection_bg" => theme.selection_bg = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    "panel_edge" => theme.panel_edge = (r, g, b),
                    "panel_middle" => theme.panel_middle = (r, g, b),
                    _ => {}
                }
            }
        }

        theme
    }

    /// Background of panel row `row` (of `height`) at `opacity` percent.
    ///
    /// Vertical gradient edge → middle → edge, with the bottom edge at 80%
    /// strength. Lower opacity fades toward black.
    pub fn panel_bg(&self, row: u16, height: u16, opacity: u8) -> Color {
        let t = if height <= 1 {
            0.0
        } else {
            row as f32 / (height - 1) as f32
        };
        let (from, to, local, fade) = if t <= 0.5 {
            (self.panel_edge, self.panel_middle, t * 2.0, 1.0)
        } else {
            let local = (t - 0.5) * 2.0;
            (self.panel_middle, self.panel_edge, local, 1.0 - 0.2 * local)
        };
        let alpha = opacity.min(100) as f32 / 100.0 * fade;
        let channel = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * local;
            (v * alpha).round() as u8
        };
        Color::Rgb(
            channel(from.0, to.0),
            channel(from.1, to.1),
            channel(from.2, to.2),
        )
    }
}
