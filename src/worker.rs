use crate::api::ApiClient;
use crate::types::{ApiEvent, AuthMode, NewRecipe, RecipeId, View};
use std::sync::mpsc;
use std::thread;

/// Runs each API call on its own thread and reports back over `tx`.
///
/// Calls are fire-and-forget: nothing is cancelled or retried, and a result
/// arriving after the user moved on is still applied.
pub struct Worker {
    client: ApiClient,
    tx: mpsc::Sender<ApiEvent>,
}

impl Worker {
    pub fn new(client: ApiClient, tx: mpsc::Sender<ApiEvent>) -> Self {
        Self { client, tx }
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&ApiClient) -> ApiEvent + Send + 'static,
    {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The receiver only goes away when the UI is shutting down.
            let _ = tx.send(job(&client));
        });
    }

    pub fn probe_session(&self) {
        self.spawn(|client| ApiEvent::SessionProbed(client.current_user()));
    }

    pub fn load(&self, view: View) {
        self.spawn(move |client| {
            let result = match view {
                View::Recipes => client.list_recipes(),
                View::Favorites => client.list_favorites(),
            };
            ApiEvent::Loaded(view, result)
        });
    }

    pub fn search(&self, query: String) {
        self.spawn(move |client| ApiEvent::Loaded(View::Recipes, client.search_recipes(&query)));
    }

    /// Favorite or unfavorite depending on the recipe's current flag.
    pub fn toggle_favorite(&self, id: RecipeId, favorited: bool) {
        self.spawn(move |client| {
            let result = if favorited {
                client.unfavorite(&id)
            } else {
                client.favorite(&id)
            };
            ApiEvent::FavoriteToggled(result)
        });
    }

    pub fn submit(&self, recipe: NewRecipe) {
        self.spawn(move |client| ApiEvent::Submitted(client.submit_recipe(&recipe)));
    }

    pub fn authenticate(&self, mode: AuthMode, email: String, password: String) {
        self.spawn(move |client| {
            let result = match mode {
                AuthMode::Login => client.login(&email, &password),
                AuthMode::Signup => client.signup(&email, &password),
            };
            ApiEvent::Authenticated(mode, result)
        });
    }

    pub fn logout(&self) {
        self.spawn(|client| ApiEvent::LoggedOut(client.logout()));
    }
}
