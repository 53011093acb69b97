use super::{centered_rect, Palette};
use crate::app::App;
use crate::types::{Recipe, ToastLevel};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Full recipe view. Draws nothing when there is no recipe to show.
pub fn render_recipe_modal(f: &mut Frame, recipe: Option<&Recipe>, scroll: u16, palette: &Palette) {
    let Some(recipe) = recipe else {
        return;
    };

    let area = f.area();
    let modal_area = centered_rect(area, (area.width * 7 / 10).max(50), area.height * 8 / 10);
    f.render_widget(Clear, modal_area);

    let label = palette.heading();
    let body = Style::default().fg(palette.fg);

    let mut text = vec![
        Line::from(vec![
            Span::styled("By: ", palette.dimmed()),
            Span::styled(recipe.author_label(), body),
        ]),
    ];
    if !recipe.tags.is_empty() {
        text.push(Line::from(Span::styled(
            recipe
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join("  "),
            Style::default().fg(palette.secondary),
        )));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("Description:", label)));
    text.push(Line::from(Span::styled(recipe.short_description.as_str(), body)));
    text.push(Line::from(""));

    text.push(Line::from(Span::styled("Ingredients:", label)));
    text.extend(
        recipe
            .ingredients
            .iter()
            .map(|item| Line::from(Span::styled(format!("  • {item}"), body))),
    );
    text.push(Line::from(""));

    text.push(Line::from(Span::styled("Steps:", label)));
    text.extend(
        recipe
            .instructions
            .iter()
            .enumerate()
            .map(|(i, step)| Line::from(Span::styled(format!("  {}. {step}", i + 1), body))),
    );

    let modal = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(true))
                .style(palette.base())
                .title(Span::styled(format!(" {} ", recipe.title), palette.heading()))
                .title_bottom(Line::styled(" j/k: Scroll | Esc: Close ", palette.dimmed())),
        );

    f.render_widget(modal, modal_area);
}

pub fn render_toasts(f: &mut Frame, app: &App, palette: &Palette) {
    if app.toasts.is_empty() {
        return;
    }

    let area = f.area();

    // Bottom-right corner, newest lowest
    for (i, toast) in app.toasts.iter().rev().enumerate() {
        let toast_width = (toast.message.chars().count() as u16 + 6).min(60);
        let toast_height = 3;

        let toast_area = Rect {
            x: area.width.saturating_sub(toast_width + 2),
            y: area
                .height
                .saturating_sub((i as u16 + 1) * (toast_height + 1) + 1),
            width: toast_width.min(area.width),
            height: toast_height.min(area.height),
        };

        let (border_color, icon) = match toast.level {
            ToastLevel::Success => (palette.success, "✓"),
            ToastLevel::Warning => (palette.warning, "⚠"),
            ToastLevel::Error => (palette.error, "✗"),
        };

        f.render_widget(Clear, toast_area);

        let toast_widget = Paragraph::new(format!("{icon} {}", toast.message))
            .style(palette.base())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            );

        f.render_widget(toast_widget, toast_area);
    }
}
