use super::Palette;
use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_search_input(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let input = Paragraph::new(format!("Search: {}_", app.search_query))
        .style(Style::default().fg(palette.accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(true))
                .title(" Search recipes by title, ingredient, etc. "),
        );
    f.render_widget(input, area);
}
