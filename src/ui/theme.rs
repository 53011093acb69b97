//! Color palettes for the two themes.
//!
//! The renderer never picks colors on its own; every widget reads them from
//! the [`Palette`] derived from the app's current [`Theme`].

use crate::types::Theme;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub secondary: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::Rgb(250, 248, 244),
                fg: Color::Rgb(40, 40, 46),
                dim: Color::Rgb(128, 128, 136),
                accent: Color::Rgb(214, 88, 20),
                secondary: Color::Rgb(46, 125, 90),
                border: Color::Rgb(190, 186, 178),
                selection_bg: Color::Rgb(252, 226, 200),
                selection_fg: Color::Rgb(40, 40, 46),
                success: Color::Rgb(46, 125, 50),
                warning: Color::Rgb(180, 120, 0),
                error: Color::Rgb(198, 40, 40),
            },
            Theme::Dark => Self {
                bg: Color::Rgb(28, 28, 32),
                fg: Color::Rgb(228, 228, 232),
                dim: Color::Rgb(130, 130, 140),
                accent: Color::Rgb(255, 159, 67),
                secondary: Color::Rgb(120, 200, 160),
                border: Color::Rgb(70, 70, 80),
                selection_bg: Color::Rgb(80, 56, 36),
                selection_fg: Color::Rgb(250, 250, 250),
                success: Color::Rgb(129, 199, 132),
                warning: Color::Rgb(255, 202, 40),
                error: Color::Rgb(239, 83, 80),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.border })
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}
