mod details;
mod forms;
mod help;
mod list;
mod overlays;
mod search;
mod sidebar;
mod theme;
mod title;

use crate::app::App;
use crate::types::{Modal, Mode};
use ratatui::{prelude::*, widgets::Block};

pub use theme::Palette;

pub fn render(f: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.theme);
    let area = f.area();
    f.render_widget(Block::default().style(palette.base()), area);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    title::render_title(f, app, &palette, main_chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(main_chunks[1]);

    sidebar::render_sidebar(f, app, &palette, body[0]);

    // Preview pane only when there is room for it
    let content_area = body[1];
    let (list_area, details_area) = if content_area.width >= 90 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (content_area, None)
    };

    list::render_recipe_list(f, app, &palette, list_area);

    if let Some(details) = details_area {
        details::render_details_pane(f, app, &palette, details);
    }

    if app.mode == Mode::Search {
        search::render_search_input(f, app, &palette, main_chunks[2]);
    } else {
        help::render_help_bar(f, app, &palette, main_chunks[2]);
    }

    match &app.modal {
        Modal::RecipeDetail(recipe) => {
            overlays::render_recipe_modal(f, Some(recipe.as_ref()), app.detail_scroll, &palette);
        }
        Modal::Auth => forms::render_auth_modal(f, &app.auth_form, &palette),
        Modal::Submit => forms::render_submit_modal(f, &app.submit_form, &palette),
        Modal::None => {}
    }

    // Toast notifications (always on top)
    overlays::render_toasts(f, app, &palette);
}

/// Center a `width` x `height` box inside `area`, shrinking it to fit.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
