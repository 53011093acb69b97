use super::Palette;
use crate::app::App;
use crate::types::{Session, View};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

pub fn render_sidebar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(false))
        .title(Span::styled(" 🍳 RecipeBox ", palette.heading()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(6)])
        .split(inner);

    let nav_item = |view: View, key: char| {
        let active = app.view == view;
        let marker = if active { "▶ " } else { "  " };
        let style = if active {
            palette.heading()
        } else if view == View::Favorites && !app.is_logged_in() {
            palette.dimmed()
        } else {
            Style::default().fg(palette.fg)
        };
        Line::from(vec![
            Span::styled(format!("{marker}{}", view.title()), style),
            Span::styled(format!("  [{key}]"), palette.dimmed()),
        ])
    };

    let nav = vec![
        Line::from(""),
        nav_item(View::Recipes, '1'),
        nav_item(View::Favorites, '2'),
    ];
    f.render_widget(Paragraph::new(nav), chunks[0]);

    let session_line = match &app.session {
        Session::Checking => Line::styled(
            format!("{} Checking session...", app.spinner()),
            palette.dimmed(),
        ),
        Session::LoggedIn(user) => Line::from(vec![
            Span::styled("Signed in as ", palette.dimmed()),
            Span::styled(user.display_name(), Style::default().fg(palette.secondary)),
        ]),
        Session::LoggedOut => Line::styled("Not signed in", palette.dimmed()),
    };
    let account_action = if app.is_logged_in() {
        "Log out"
    } else {
        "Sign In / Register"
    };

    let actions = vec![
        Line::from(vec![
            Span::styled("[s] ", palette.dimmed()),
            Span::styled("+ Submit Recipe", Style::default().fg(palette.accent)),
        ]),
        Line::from(vec![
            Span::styled("[a] ", palette.dimmed()),
            Span::styled(account_action, Style::default().fg(palette.fg)),
        ]),
        Line::from(vec![
            Span::styled("[t] ", palette.dimmed()),
            Span::styled(app.theme.toggle_label(), Style::default().fg(palette.fg)),
        ]),
        Line::from(""),
        session_line,
    ];
    f.render_widget(Paragraph::new(actions), chunks[1]);
}
