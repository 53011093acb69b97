use crate::forms::{AuthForm, SubmitForm};
use crate::types::{
    ApiEvent, Modal, Mode, Recipe, RecipeId, Session, Theme, Toast, View,
};
use ratatui::widgets::TableState;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const TOAST_TTL: Duration = Duration::from_secs(3);

/// One fetched collection of recipes plus its selection and load state.
#[derive(Default)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
    pub state: TableState,
    pub loading: bool,
    pub error: Option<String>,
}

impl RecipeList {
    pub fn replace(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        self.loading = false;
        self.error = None;
        self.state
            .select(if self.recipes.is_empty() { None } else { Some(0) });
    }

    /// Swap in the server's version of a recipe. Returns false when absent.
    pub fn merge(&mut self, recipe: &Recipe) -> bool {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(slot) => {
                slot.clone_from(recipe);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RecipeId) {
        self.recipes.retain(|r| &r.id != id);
        self.clamp_selection();
    }

    pub fn push(&mut self, recipe: Recipe) {
        self.recipes.push(recipe);
        self.clamp_selection();
    }

    pub fn selected(&self) -> Option<&Recipe> {
        self.state.selected().and_then(|i| self.recipes.get(i))
    }

    pub fn next(&mut self) {
        if self.recipes.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.recipes.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.recipes.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.recipes.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        let selected = match (self.state.selected(), self.recipes.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.state.select(selected);
    }
}

pub struct App {
    pub theme: Theme,
    pub session: Session,
    pub view: View,
    pub mode: Mode,
    pub modal: Modal,
    pub recipes: RecipeList,
    pub favorites: RecipeList,
    pub search_query: String,
    /// Query behind the list currently shown, if it came from a search.
    pub active_search: Option<String>,
    pub auth_form: AuthForm,
    pub submit_form: SubmitForm,
    pub detail_scroll: u16,
    pub toasts: Vec<Toast>,
    pub status_message: Option<(String, Instant)>,
    pub backend_url: String,
    pub spinner_tick: usize,
    pub last_tick: Instant,
}

impl App {
    pub fn new(theme: Theme, backend_url: String) -> Self {
        Self {
            theme,
            session: Session::Checking,
            view: View::Recipes,
            mode: Mode::Browsing,
            modal: Modal::None,
            recipes: RecipeList::default(),
            favorites: RecipeList::default(),
            search_query: String::new(),
            active_search: None,
            auth_form: AuthForm::default(),
            submit_form: SubmitForm::default(),
            detail_scroll: 0,
            toasts: Vec::new(),
            status_message: None,
            backend_url,
            spinner_tick: 0,
            last_tick: Instant::now(),
        }
    }

    pub fn tick(&mut self) {
        if self.last_tick.elapsed() >= Duration::from_millis(80) {
            self.spinner_tick = (self.spinner_tick + 1) % SPINNER_FRAMES.len();
            self.last_tick = Instant::now();
        }
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() > TOAST_TTL {
                self.status_message = None;
            }
        }
        self.toasts.retain(|t| t.created_at.elapsed() < TOAST_TTL);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick]
    }

    pub fn show_message(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.session, Session::LoggedIn(_))
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    // ------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------

    pub fn list(&self, view: View) -> &RecipeList {
        match view {
            View::Recipes => &self.recipes,
            View::Favorites => &self.favorites,
        }
    }

    pub fn list_mut(&mut self, view: View) -> &mut RecipeList {
        match view {
            View::Recipes => &mut self.recipes,
            View::Favorites => &mut self.favorites,
        }
    }

    pub fn current_list(&self) -> &RecipeList {
        self.list(self.view)
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.current_list().selected()
    }

    pub fn next(&mut self) {
        self.list_mut(self.view).next();
    }

    pub fn previous(&mut self) {
        self.list_mut(self.view).previous();
    }

    /// Mark a view as loading. Callers then hand the fetch to the worker.
    pub fn begin_load(&mut self, view: View) {
        if view == View::Recipes {
            self.active_search = None;
        }
        let list = self.list_mut(view);
        list.loading = true;
        list.error = None;
    }

    /// Switch to `view`. Returns false when the switch is not allowed.
    pub fn switch_view(&mut self, view: View) -> bool {
        if view == View::Favorites && !self.is_logged_in() {
            self.show_message("Sign in to see your favorites");
            return false;
        }
        self.view = view;
        self.mode = Mode::Browsing;
        true
    }

    /// Start a search with the typed query. Returns the query to send.
    pub fn begin_search(&mut self) -> Option<String> {
        self.mode = Mode::Browsing;
        if self.view != View::Recipes {
            return None;
        }
        let query = self.search_query.clone();
        self.recipes.loading = true;
        self.recipes.error = None;
        self.active_search = Some(query.clone());
        Some(query)
    }

    /// The selected recipe's id and current flag, if favoriting is allowed.
    pub fn favorite_target(&mut self) -> Option<(RecipeId, bool)> {
        if !self.is_logged_in() {
            self.show_message("Sign in to favorite recipes");
            return None;
        }
        if self.view != View::Recipes {
            self.show_message("Favorite from the Recipes view");
            return None;
        }
        self.recipes
            .selected()
            .map(|r| (r.id.clone(), r.is_favorited))
    }

    // ------------------------------------------------------------
    // Modals
    // ------------------------------------------------------------

    pub fn open_auth(&mut self) {
        self.auth_form = AuthForm::default();
        self.modal = Modal::Auth;
    }

    pub fn open_submit(&mut self) {
        self.submit_form = SubmitForm::default();
        self.modal = Modal::Submit;
    }

    /// Show full details for `recipe`. Without a recipe nothing opens.
    pub fn open_recipe_detail(&mut self, recipe: Option<Recipe>) {
        if let Some(recipe) = recipe {
            self.detail_scroll = 0;
            self.modal = Modal::RecipeDetail(Box::new(recipe));
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    // ------------------------------------------------------------
    // Background results
    // ------------------------------------------------------------

    /// Apply a finished API call. Returns a view whose collection should be
    /// fetched again because the session changed.
    pub fn apply(&mut self, event: ApiEvent) -> Option<View> {
        match event {
            // A login or logout made while the probe was in flight wins.
            ApiEvent::SessionProbed(result) if self.session != Session::Checking => {
                debug!(ok = result.is_ok(), "ignoring late session probe");
                None
            }
            ApiEvent::SessionProbed(Ok(user)) => {
                info!(user = user.display_name(), "session restored");
                self.session = Session::LoggedIn(user);
                None
            }
            ApiEvent::SessionProbed(Err(e)) => {
                // Not signed in and unreachable backend look the same here.
                debug!(kind = e.kind(), error = %e, "no active session");
                self.session = Session::LoggedOut;
                None
            }
            ApiEvent::Loaded(view, Ok(recipes)) => {
                debug!(view = view.title(), count = recipes.len(), "recipes loaded");
                self.list_mut(view).replace(recipes);
                None
            }
            ApiEvent::Loaded(view, Err(e)) => {
                let list = self.list_mut(view);
                list.loading = false;
                list.error = Some(e.to_string());
                None
            }
            ApiEvent::FavoriteToggled(Ok(Some(recipe))) => {
                self.recipes.merge(&recipe);
                if recipe.is_favorited {
                    if !self.favorites.merge(&recipe) {
                        self.favorites.push(recipe);
                    }
                } else {
                    self.favorites.remove(&recipe.id);
                }
                None
            }
            ApiEvent::FavoriteToggled(Ok(None)) => {
                debug!("favorite toggle returned no recipe");
                None
            }
            ApiEvent::FavoriteToggled(Err(e)) => {
                self.push_toast(Toast::error(format!("Favorite failed: {e}")));
                None
            }
            ApiEvent::Submitted(Ok(created)) => {
                self.submit_form = SubmitForm::default();
                if self.modal == Modal::Submit {
                    self.close_modal();
                }
                // Search results only hold what the backend matched.
                if let Some(recipe) = created.filter(|_| self.active_search.is_none()) {
                    if !self.recipes.merge(&recipe) {
                        self.recipes.push(recipe);
                    }
                }
                self.push_toast(Toast::success("Recipe submitted!"));
                None
            }
            ApiEvent::Submitted(Err(e)) => {
                warn!(error = %e, "recipe submission failed");
                self.submit_form.fail();
                None
            }
            ApiEvent::Authenticated(mode, Ok(user)) => {
                info!(user = user.display_name(), ?mode, "signed in");
                self.push_toast(Toast::success(format!(
                    "Signed in as {}",
                    user.display_name()
                )));
                self.session = Session::LoggedIn(user);
                self.auth_form.loading = false;
                if self.modal == Modal::Auth {
                    self.close_modal();
                }
                Some(self.view)
            }
            ApiEvent::Authenticated(mode, Err(e)) => {
                self.auth_form.loading = false;
                self.auth_form.error =
                    Some(e.message().unwrap_or(mode.fallback_error()).to_string());
                None
            }
            ApiEvent::LoggedOut(result) => {
                match result {
                    Ok(()) => {
                        info!("signed out");
                        self.push_toast(Toast::success("Signed out"));
                    }
                    Err(e) => {
                        warn!(error = %e, "logout request failed; signing out locally");
                        self.push_toast(Toast::warning("Signed out locally"));
                    }
                }
                self.session = Session::LoggedOut;
                self.favorites = RecipeList::default();
                self.view = View::Recipes;
                Some(View::Recipes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::types::{AuthMode, ToastLevel, User};

    fn recipe(id: i64, favorited: bool) -> Recipe {
        Recipe {
            id: RecipeId::Number(id),
            title: format!("Recipe {id}"),
            short_description: "Tasty".to_string(),
            ingredients: vec!["egg".to_string()],
            instructions: vec!["cook".to_string()],
            tags: vec![],
            author: None,
            is_favorited: favorited,
        }
    }

    fn transport_error() -> ApiError {
        ApiError::Transport("Failed to connect to the backend.".to_string())
    }

    fn logged_in_app() -> App {
        let mut app = App::new(Theme::Light, "http://localhost:8000/api".to_string());
        app.apply(ApiEvent::SessionProbed(Ok(User {
            email: Some("cook@example.com".to_string()),
        })));
        app
    }

    #[test]
    fn test_failed_probe_is_logged_out_without_message() {
        let mut app = App::new(Theme::Light, String::new());
        assert_eq!(app.session, Session::Checking);

        app.apply(ApiEvent::SessionProbed(Err(transport_error())));

        assert_eq!(app.session, Session::LoggedOut);
        assert!(app.toasts.is_empty());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_logout_always_ends_logged_out() {
        let mut app = logged_in_app();
        app.view = View::Favorites;

        let reload = app.apply(ApiEvent::LoggedOut(Err(transport_error())));

        assert_eq!(app.session, Session::LoggedOut);
        assert_eq!(app.view, View::Recipes);
        assert_eq!(reload, Some(View::Recipes));
        assert_eq!(app.toasts[0].level, ToastLevel::Warning);

        let mut app = logged_in_app();
        app.apply(ApiEvent::LoggedOut(Ok(())));
        assert!(!app.is_logged_in());
    }

    #[test]
    fn test_login_success_adopts_user_and_closes_modal() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_auth();
        app.auth_form.loading = true;

        let reload = app.apply(ApiEvent::Authenticated(
            AuthMode::Login,
            Ok(User {
                email: Some("a@b.c".to_string()),
            }),
        ));

        assert!(app.is_logged_in());
        assert_eq!(app.modal, Modal::None);
        assert!(!app.auth_form.loading);
        assert_eq!(reload, Some(View::Recipes));
    }

    #[test]
    fn test_login_failure_prefers_backend_message() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_auth();
        app.apply(ApiEvent::Authenticated(
            AuthMode::Login,
            Err(ApiError::Backend {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            }),
        ));
        assert_eq!(app.auth_form.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(app.modal, Modal::Auth);

        app.apply(ApiEvent::Authenticated(
            AuthMode::Signup,
            Err(ApiError::Backend {
                status: 500,
                message: None,
            }),
        ));
        assert_eq!(app.auth_form.error.as_deref(), Some("Failed to sign up."));
    }

    #[test]
    fn test_favorite_merges_single_entry_by_id() {
        let mut app = logged_in_app();
        app.apply(ApiEvent::Loaded(
            View::Recipes,
            Ok(vec![recipe(1, false), recipe(2, false)]),
        ));
        app.next();
        assert_eq!(app.favorite_target(), Some((RecipeId::Number(2), false)));

        app.apply(ApiEvent::FavoriteToggled(Ok(Some(recipe(2, true)))));
        assert!(app.recipes.recipes[1].is_favorited);
        assert!(!app.recipes.recipes[0].is_favorited);
        assert_eq!(app.favorites.recipes.len(), 1);

        app.apply(ApiEvent::FavoriteToggled(Ok(Some(recipe(2, false)))));
        assert!(!app.recipes.recipes[1].is_favorited);
        assert!(app.favorites.recipes.is_empty());
    }

    #[test]
    fn test_favorite_requires_login() {
        let mut app = App::new(Theme::Light, String::new());
        app.apply(ApiEvent::Loaded(View::Recipes, Ok(vec![recipe(1, false)])));
        assert_eq!(app.favorite_target(), None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_failed_load_keeps_recipes_and_shows_error() {
        let mut app = App::new(Theme::Light, String::new());
        app.apply(ApiEvent::Loaded(View::Recipes, Ok(vec![recipe(1, false)])));
        app.begin_load(View::Recipes);
        assert!(app.recipes.loading);

        app.apply(ApiEvent::Loaded(View::Recipes, Err(transport_error())));
        assert!(!app.recipes.loading);
        assert_eq!(app.recipes.recipes.len(), 1);
        assert!(app.recipes.error.is_some());
    }

    #[test]
    fn test_search_replaces_list_and_allows_empty_query() {
        let mut app = App::new(Theme::Light, String::new());
        app.apply(ApiEvent::Loaded(
            View::Recipes,
            Ok(vec![recipe(1, false), recipe(2, false)]),
        ));
        app.mode = Mode::Search;

        assert_eq!(app.begin_search(), Some(String::new()));
        assert_eq!(app.mode, Mode::Browsing);
        app.apply(ApiEvent::Loaded(View::Recipes, Ok(vec![recipe(3, false)])));
        assert_eq!(app.recipes.recipes.len(), 1);
        assert_eq!(app.current_recipe().map(|r| &r.id), Some(&RecipeId::Number(3)));
    }

    #[test]
    fn test_detail_modal_needs_a_recipe() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_recipe_detail(None);
        assert_eq!(app.modal, Modal::None);

        app.open_recipe_detail(Some(recipe(4, false)));
        assert!(matches!(app.modal, Modal::RecipeDetail(ref r) if r.id == RecipeId::Number(4)));
        app.close_modal();
        assert_eq!(app.modal, Modal::None);
    }

    #[test]
    fn test_submit_success_closes_modal_and_merges_recipe() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_submit();
        app.submit_form.title = "Soup".to_string();
        app.submit_form.submitting = true;

        app.apply(ApiEvent::Submitted(Ok(Some(recipe(8, false)))));

        assert_eq!(app.modal, Modal::None);
        assert!(app.submit_form.title.is_empty());
        assert_eq!(app.recipes.recipes.len(), 1);
    }

    #[test]
    fn test_submit_failure_keeps_text() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_submit();
        app.submit_form.title = "Soup".to_string();
        app.submit_form.submitting = true;

        app.apply(ApiEvent::Submitted(Err(transport_error())));

        assert_eq!(app.modal, Modal::Submit);
        assert_eq!(app.submit_form.title, "Soup");
        assert!(app.submit_form.error.is_some());
    }

    #[test]
    fn test_late_probe_does_not_override_login() {
        let mut app = App::new(Theme::Light, String::new());
        app.open_auth();
        app.apply(ApiEvent::Authenticated(
            AuthMode::Login,
            Ok(User {
                email: Some("a@b.c".to_string()),
            }),
        ));

        app.apply(ApiEvent::SessionProbed(Err(ApiError::Backend {
            status: 401,
            message: None,
        })));

        assert!(app.is_logged_in());
    }

    #[test]
    fn test_late_probe_does_not_override_logout() {
        let mut app = App::new(Theme::Light, String::new());
        app.apply(ApiEvent::LoggedOut(Ok(())));

        app.apply(ApiEvent::SessionProbed(Ok(User {
            email: Some("old@example.com".to_string()),
        })));

        assert_eq!(app.session, Session::LoggedOut);
    }

    #[test]
    fn test_favorite_in_favorites_view_shows_hint() {
        let mut app = logged_in_app();
        app.apply(ApiEvent::Loaded(View::Favorites, Ok(vec![recipe(1, true)])));
        assert!(app.switch_view(View::Favorites));

        assert_eq!(app.favorite_target(), None);
        assert_eq!(
            app.status_message.as_ref().map(|(msg, _)| msg.as_str()),
            Some("Favorite from the Recipes view")
        );
    }

    #[test]
    fn test_submit_during_search_leaves_results_alone() {
        let mut app = App::new(Theme::Light, String::new());
        app.apply(ApiEvent::Loaded(View::Recipes, Ok(vec![recipe(1, false)])));
        app.search_query = "soup".to_string();
        app.begin_search();
        app.apply(ApiEvent::Loaded(View::Recipes, Ok(vec![recipe(2, false)])));
        app.open_submit();

        app.apply(ApiEvent::Submitted(Ok(Some(recipe(9, false)))));

        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.recipes.recipes.len(), 1);
        assert_eq!(app.recipes.recipes[0].id, RecipeId::Number(2));
    }

    #[test]
    fn test_favorites_view_requires_login() {
        let mut app = App::new(Theme::Light, String::new());
        assert!(!app.switch_view(View::Favorites));
        assert_eq!(app.view, View::Recipes);

        let mut app = logged_in_app();
        assert!(app.switch_view(View::Favorites));
        assert_eq!(app.view, View::Favorites);
    }
}
