use super::{centered_rect, Palette};
use crate::forms::{AuthField, AuthForm, SubmitField, SubmitForm, DESCRIPTION_MAX, TITLE_MAX};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

/// One bordered text input. Multi-line values scroll to keep the cursor
/// line visible.
fn render_input(
    f: &mut Frame,
    area: Rect,
    label: String,
    value: &str,
    focused: bool,
    palette: &Palette,
) {
    let mut text = value.to_string();
    if focused {
        text.push('_');
    }
    let lines = text.split('\n').count() as u16;
    let scroll = lines.saturating_sub(area.height.saturating_sub(2));

    let input = Paragraph::new(text)
        .style(Style::default().fg(palette.fg))
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style(focused))
                .title(Span::styled(
                    label,
                    if focused {
                        palette.heading()
                    } else {
                        palette.dimmed()
                    },
                )),
        );
    f.render_widget(input, area);
}

fn error_line(error: Option<&str>, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(error.unwrap_or_default().to_string())
        .style(Style::default().fg(palette.error))
        .alignment(Alignment::Center)
}

pub fn render_auth_modal(f: &mut Frame, form: &AuthForm, palette: &Palette) {
    let modal_area = centered_rect(f.area(), 54, 15);
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(true))
        .style(palette.base())
        .title(Span::styled(format!(" {} ", form.mode.title()), palette.heading()));
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    render_input(
        f,
        chunks[0],
        " Email ".to_string(),
        &form.email,
        form.focus == AuthField::Email,
        palette,
    );
    let masked = "•".repeat(form.password.chars().count());
    render_input(
        f,
        chunks[1],
        " Password ".to_string(),
        &masked,
        form.focus == AuthField::Password,
        palette,
    );

    f.render_widget(error_line(form.error.as_deref(), palette), chunks[2]);

    let button = if form.loading {
        Line::styled(form.mode.pending_label(), palette.dimmed())
    } else {
        Line::styled(
            format!(" [ {} ] ", form.mode.title()),
            Style::default()
                .fg(palette.bg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(Paragraph::new(button.centered()), chunks[4]);
    f.render_widget(
        Paragraph::new(
            Line::styled(format!("Ctrl+T: {}", form.mode.switch_label()), palette.dimmed())
                .centered(),
        ),
        chunks[5],
    );
}

pub fn render_submit_modal(f: &mut Frame, form: &SubmitForm, palette: &Palette) {
    let modal_area = centered_rect(f.area(), 76, 30);
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style(true))
        .style(palette.base())
        .title(Span::styled(" Submit a New Recipe ", palette.heading()));
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let field_height = |field: SubmitField| match field {
        SubmitField::Ingredients => Constraint::Min(5),
        SubmitField::Instructions => Constraint::Min(6),
        SubmitField::Title | SubmitField::Description | SubmitField::Tags => {
            Constraint::Length(3)
        }
    };
    let mut constraints: Vec<Constraint> =
        SubmitField::ORDER.iter().map(|field| field_height(*field)).collect();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, field) in SubmitField::ORDER.iter().copied().enumerate() {
        let value = form.value(field);
        let label = match field {
            SubmitField::Title => format!(
                " {} ({}/{TITLE_MAX}) ",
                field.label(),
                value.chars().count()
            ),
            SubmitField::Description => format!(
                " {} ({}/{DESCRIPTION_MAX}) ",
                field.label(),
                value.chars().count()
            ),
            SubmitField::Tags | SubmitField::Ingredients | SubmitField::Instructions => {
                format!(" {} ", field.label())
            }
        };
        render_input(f, chunks[i], label, value, form.focus == field, palette);
    }

    let status = SubmitField::ORDER.len();
    if form.submitting {
        f.render_widget(
            Paragraph::new("Submitting...")
                .style(palette.dimmed())
                .alignment(Alignment::Center),
            chunks[status],
        );
    } else {
        f.render_widget(error_line(form.error.as_deref(), palette), chunks[status]);
    }
    f.render_widget(
        Paragraph::new("Tab: Next field | Enter: Next/New line | Ctrl+S: Submit | Esc: Cancel")
            .style(palette.dimmed())
            .alignment(Alignment::Center),
        chunks[status + 1],
    );
}
