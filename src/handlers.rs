use crate::app::App;
use crate::forms::{AuthField, FormError};
use crate::types::{Modal, Mode, View};
use crate::worker::Worker;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Mark `view` as loading and fetch it in the background.
pub fn load_view(app: &mut App, worker: &Worker, view: View) {
    app.begin_load(view);
    worker.load(view);
}

/// Route a key press. Returns true when the user asked to quit.
pub fn handle_key(app: &mut App, key: KeyEvent, worker: &Worker) -> bool {
    match app.modal {
        Modal::Auth => handle_auth_modal(app, key, worker),
        Modal::Submit => handle_submit_modal(app, key, worker),
        Modal::RecipeDetail(_) => handle_detail_modal(app, key.code),
        Modal::None => match app.mode {
            Mode::Search => handle_search_mode(app, key.code, worker),
            Mode::Browsing => return handle_browsing_mode(app, key.code, worker),
        },
    }
    false
}

pub fn handle_browsing_mode(app: &mut App, key: KeyCode, worker: &Worker) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Down | KeyCode::Char('j') => app.next(),
        KeyCode::Up | KeyCode::Char('k') => app.previous(),
        KeyCode::Enter => {
            let recipe = app.current_recipe().cloned();
            app.open_recipe_detail(recipe);
        }
        KeyCode::Char('f' | ' ') => {
            if let Some((id, favorited)) = app.favorite_target() {
                worker.toggle_favorite(id, favorited);
            }
        }
        KeyCode::Char('/') => {
            if app.view == View::Recipes {
                app.search_query.clear();
                app.mode = Mode::Search;
            } else {
                app.show_message("Search is available in the Recipes view");
            }
        }
        KeyCode::Tab => {
            let target = match app.view {
                View::Recipes => View::Favorites,
                View::Favorites => View::Recipes,
            };
            switch_to(app, worker, target);
        }
        KeyCode::Char('1') => switch_to(app, worker, View::Recipes),
        KeyCode::Char('2') => switch_to(app, worker, View::Favorites),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('a') => {
            if app.is_logged_in() {
                app.show_message("Signing out...");
                worker.logout();
            } else {
                app.open_auth();
            }
        }
        KeyCode::Char('s') => app.open_submit(),
        KeyCode::Char('R') => {
            let view = app.view;
            app.show_message("Refreshing...");
            load_view(app, worker, view);
        }
        _ => {}
    }
    false
}

/// Activating a view fetches its collection again.
fn switch_to(app: &mut App, worker: &Worker, view: View) {
    if app.switch_view(view) {
        load_view(app, worker, view);
    }
}

pub fn handle_search_mode(app: &mut App, key: KeyCode, worker: &Worker) {
    match key {
        KeyCode::Esc => {
            app.search_query.clear();
            app.mode = Mode::Browsing;
        }
        KeyCode::Enter => {
            if let Some(query) = app.begin_search() {
                worker.search(query);
            }
        }
        KeyCode::Backspace => {
            app.search_query.pop();
        }
        KeyCode::Char(c) => app.search_query.push(c),
        _ => {}
    }
}

pub fn handle_detail_modal(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

pub fn handle_auth_modal(app: &mut App, key: KeyEvent, worker: &Worker) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('t') {
            app.auth_form.toggle_mode();
        }
        return;
    }
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.auth_form.toggle_focus();
        }
        KeyCode::Enter if app.auth_form.focus == AuthField::Email => {
            app.auth_form.focus = AuthField::Password;
        }
        KeyCode::Enter => match app.auth_form.begin_submit() {
            Ok((email, password)) => worker.authenticate(app.auth_form.mode, email, password),
            Err(FormError::Busy) => {}
            Err(e) => app.auth_form.error = Some(e.to_string()),
        },
        KeyCode::Backspace => app.auth_form.pop_char(),
        KeyCode::Char(c) => app.auth_form.push_char(c),
        _ => {}
    }
}

pub fn handle_submit_modal(app: &mut App, key: KeyEvent, worker: &Worker) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('s') {
            match app.submit_form.begin_submit() {
                Ok(recipe) => worker.submit(recipe),
                Err(FormError::Busy) => {}
                Err(e) => app.submit_form.error = Some(e.to_string()),
            }
        }
        return;
    }
    let form = &mut app.submit_form;
    match key.code {
        KeyCode::Esc => app.close_modal(),
        KeyCode::Tab => form.focus = form.focus.next(),
        KeyCode::BackTab => form.focus = form.focus.previous(),
        KeyCode::Enter => form.newline(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}
