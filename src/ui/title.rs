use super::Palette;
use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_title(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let list = app.current_list();
    let loading = if list.loading {
        format!(" {}", app.spinner())
    } else {
        String::new()
    };
    let backend = if app.backend_url.is_empty() {
        "backend not configured"
    } else {
        app.backend_url.as_str()
    };

    let title = format!(
        " RecipeBox | {} ({}){loading} | {backend} ",
        app.view.title(),
        list.recipes.len(),
    );

    let title_block = Paragraph::new(title)
        .style(Style::default().fg(palette.accent).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(false)),
        );
    f.render_widget(title_block, area);
}
