//! Color theme and glyphs for the ticklist TUI.
//!
//! Uses the Kanagawa Wave palette by default with an optional high-contrast
//! override.

use ratatui::style::{Color, Modifier, Style};

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const PRIMARY_DIM: Color = Color::Rgb(147, 138, 169); // springViolet1

    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
    pub const PEACH: Color = Color::Rgb(255, 160, 102); // surimiOrange
}

/// Checkbox and marker glyphs.
pub mod glyphs {
    pub const UNCHECKED: &str = "☐";
    pub const CHECKED: &str = "☑";
    pub const SELECTOR: &str = "❯ ";
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            primary_dim: colors::PRIMARY_DIM,
            green: colors::GREEN,
            yellow: colors::YELLOW,
            red: colors::RED,
            peach: colors::PEACH,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::Magenta,
            primary_dim: Color::Magenta,
            green: Color::Green,
            yellow: Color::Yellow,
            red: Color::Red,
            peach: Color::LightYellow,
        }
    }

    #[must_use]
    pub fn mode_normal(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn mode_insert(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.green)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn mode_command(&self) -> Style {
        Style::default()
            .fg(self.bg_dark)
            .bg(self.yellow)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

/// Linear interpolation between two RGB colors.
///
/// Non-RGB colors cannot be interpolated and snap to `to` at the halfway
/// point instead.
#[must_use]
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8;
            Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        let from = Color::Rgb(0, 0, 0);
        let to = Color::Rgb(200, 100, 50);
        assert_eq!(lerp_color(from, to, 0.0), from);
        assert_eq!(lerp_color(from, to, 1.0), to);
    }

    #[test]
    fn lerp_midpoint_mixes_channels() {
        let mixed = lerp_color(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 0.5);
        assert_eq!(mixed, Color::Rgb(100, 50, 25));
    }

    #[test]
    fn lerp_named_colors_snap() {
        assert_eq!(lerp_color(Color::White, Color::Black, 0.2), Color::White);
        assert_eq!(lerp_color(Color::White, Color::Black, 0.8), Color::Black);
    }
}
