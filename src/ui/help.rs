use super::Palette;
use crate::app::App;
use crate::types::{Modal, Mode};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_help_bar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let help_text = match (&app.modal, app.mode) {
        (Modal::RecipeDetail(_), _) => "j/k: Scroll | Esc: Close",
        (Modal::Auth, _) => {
            "Tab: Switch field | Enter: Submit | Ctrl+T: Sign In/Sign Up | Esc: Close"
        }
        (Modal::Submit, _) => {
            "Tab/Shift+Tab: Field | Enter: New line | Ctrl+S: Submit | Esc: Cancel"
        }
        (Modal::None, Mode::Search) => "Type to search | Enter: Search | Esc: Cancel",
        (Modal::None, Mode::Browsing) => {
            if let Some((msg, _)) = &app.status_message {
                msg.as_str()
            } else {
                concat!(
                    "j/k: Nav | Enter: Open | f: Favorite | /: Search | Tab: Switch view | ",
                    "s: Submit | a: Account | t: Theme | R: Refresh | q: Quit"
                )
            }
        }
    };

    let help = Paragraph::new(help_text)
        .style(palette.dimmed())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(false)),
        );
    f.render_widget(help, area);
}
