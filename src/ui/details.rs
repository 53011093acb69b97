use super::Palette;
use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

/// Side preview of the selected recipe. The full recipe lives in the modal.
pub fn render_details_pane(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let label = Style::default().fg(palette.dim);

    let content = if let Some(recipe) = app.current_recipe() {
        let mut lines = vec![
            Line::from(Span::styled(recipe.title.as_str(), palette.heading())),
            Line::from(""),
            Line::from(vec![
                Span::styled("By: ", label),
                Span::styled(recipe.author_label(), Style::default().fg(palette.fg)),
            ]),
        ];
        if !recipe.tags.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Tags: ", label),
                Span::styled(recipe.tags_label(), Style::default().fg(palette.secondary)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Description:", label)));
        lines.push(Line::from(Span::styled(
            recipe.short_description.as_str(),
            Style::default().fg(palette.fg),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Ingredients: ", label),
            Span::styled(
                recipe.ingredients.len().to_string(),
                Style::default().fg(palette.fg),
            ),
            Span::styled("  Steps: ", label),
            Span::styled(
                recipe.instructions.len().to_string(),
                Style::default().fg(palette.fg),
            ),
        ]));
        if app.is_logged_in() && recipe.is_favorited {
            lines.push(Line::from(Span::styled(
                "★ In your favorites",
                Style::default().fg(palette.accent),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Enter: View full recipe", label)));
        lines
    } else {
        vec![Line::from(Span::styled("No recipe selected", label))]
    };

    let details = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(palette.border_style(false))
            .title(" Details "),
    );

    f.render_widget(details, area);
}
