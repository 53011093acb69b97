use super::Palette;
use crate::app::App;
use crate::types::View;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
};

pub fn render_recipe_list(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let view = app.view;
    let show_favorite = view == View::Recipes && app.is_logged_in();
    let spinner = app.spinner();

    let count = app.list(view).recipes.len();
    let mut title = match (view, app.active_search.as_deref()) {
        (View::Recipes, Some(query)) if !query.is_empty() => {
            format!(" Results for \"{query}\" ({count}) ")
        }
        (View::Recipes, _) => format!(" All Recipes ({count}) "),
        (View::Favorites, _) => format!(" Your Favorite Recipes ({count}) "),
    };

    let list = app.list_mut(view);
    if list.loading {
        title.push_str(&format!("{spinner} "));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(true))
        .title(Span::styled(title, palette.heading()));
    if let Some(error) = &list.error {
        block = block.title_bottom(Line::styled(
            format!(" ✗ {error} "),
            Style::default().fg(palette.error),
        ));
    }

    // Placeholder only once a load has settled without results
    if list.recipes.is_empty() {
        let (text, style) = if list.loading {
            (format!("{spinner} Loading recipes..."), palette.dimmed())
        } else if list.error.is_some() {
            (
                "Could not load recipes. Press R to retry.".to_string(),
                Style::default().fg(palette.error),
            )
        } else {
            (view.empty_placeholder().to_string(), palette.dimmed())
        };
        let placeholder =
            Paragraph::new(vec![Line::from(""), Line::styled(text, style).centered()])
                .wrap(Wrap { trim: true })
                .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let header_cells = ["", "Title", "Description", "Tags"]
        .iter()
        .map(|h| Cell::from(*h).style(palette.heading()));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = list.recipes.iter().map(|recipe| {
        let star = if show_favorite && recipe.is_favorited {
            Cell::from("★").style(Style::default().fg(palette.accent))
        } else if show_favorite {
            Cell::from("☆").style(palette.dimmed())
        } else {
            Cell::from(" ")
        };
        Row::new(vec![
            star,
            Cell::from(recipe.title.as_str()).style(Style::default().fg(palette.fg).bold()),
            Cell::from(recipe.short_description.as_str()).style(Style::default().fg(palette.fg)),
            Cell::from(recipe.tags_label()).style(Style::default().fg(palette.secondary)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Min(20),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(palette.selection())
    .highlight_symbol("▶ ");

    f.render_stateful_widget(table, area, &mut list.state);
}
