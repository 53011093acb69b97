use crate::api::ApiError;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Instant;

// ============================================================
// DOMAIN TYPES
// ============================================================

/// Server-assigned recipe identifier. Backends hand these out either as
/// integers or as strings, so both are accepted and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub short_description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_favorited: bool,
}

impl Recipe {
    pub fn author_label(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.email.as_deref())
            .filter(|email| !email.is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn tags_label(&self) -> String {
        self.tags.join(", ")
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Payload for `POST /recipes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub short_description: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or("signed in")
    }
}

// ============================================================
// VIEW STATE
// ============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Startup probe still in flight.
    Checking,
    LoggedIn(User),
    LoggedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label of the toggle button: names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "🌙 Dark",
            Self::Dark => "☀ Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Recipes,
    Favorites,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            Self::Recipes => "Recipes",
            Self::Favorites => "Favorites",
        }
    }

    pub fn empty_placeholder(self) -> &'static str {
        match self {
            Self::Recipes => "No recipes found.",
            Self::Favorites => "No favorites yet.",
        }
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Mode {
    Browsing,
    Search,
}

/// At most one modal is open at any time. The detail variant owns the recipe
/// it shows, so an open detail modal always has something to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    Auth,
    RecipeDetail(Box<Recipe>),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Signup => "Sign Up",
        }
    }

    pub fn pending_label(self) -> &'static str {
        match self {
            Self::Login => "Signing in...",
            Self::Signup => "Signing up...",
        }
    }

    pub fn switch_label(self) -> &'static str {
        match self {
            Self::Login => "Need an account? Sign Up",
            Self::Signup => "Have an account? Sign In",
        }
    }

    pub fn fallback_error(self) -> &'static str {
        match self {
            Self::Login => "Login failed. Check your credentials.",
            Self::Signup => "Failed to sign up.",
        }
    }
}

// ============================================================
// TOASTS
// ============================================================

#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
        }
    }
}

// ============================================================
// CHANNEL MESSAGES
// ============================================================

#[derive(Debug)]
pub enum ApiEvent {
    SessionProbed(Result<User, ApiError>),
    /// A full list, favorites list or search result arrived for a view.
    Loaded(View, Result<Vec<Recipe>, ApiError>),
    FavoriteToggled(Result<Option<Recipe>, ApiError>),
    Submitted(Result<Option<Recipe>, ApiError>),
    Authenticated(AuthMode, Result<User, ApiError>),
    LoggedOut(Result<(), ApiError>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_decodes_camel_case_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": 7,
            "title": "Pancakes",
            "shortDescription": "Fluffy",
            "ingredients": ["egg", "flour"],
            "instructions": ["mix", "fry"],
            "tags": ["breakfast"],
            "author": {"email": "cook@example.com"},
            "isFavorited": true
        }))
        .unwrap();

        assert_eq!(recipe.id, RecipeId::Number(7));
        assert_eq!(recipe.short_description, "Fluffy");
        assert_eq!(recipe.ingredients, vec!["egg", "flour"]);
        assert!(recipe.is_favorited);
        assert_eq!(recipe.author_label(), "cook@example.com");
    }

    #[test]
    fn test_recipe_tolerates_nulls_and_missing_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "abc-1",
            "title": "Toast",
            "tags": null,
            "author": null,
            "isFavorited": null
        }))
        .unwrap();

        assert_eq!(recipe.id.to_string(), "abc-1");
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(!recipe.is_favorited);
        assert_eq!(recipe.author_label(), "Anonymous");
    }

    #[test]
    fn test_new_recipe_serializes_camel_case() {
        let payload = NewRecipe {
            title: "Soup".to_string(),
            short_description: "Warm".to_string(),
            tags: vec!["vegan".to_string()],
            ingredients: vec!["water".to_string()],
            instructions: vec!["boil".to_string()],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["shortDescription"], "Warm");
        assert_eq!(value["tags"], json!(["vegan"]));
    }

    #[test]
    fn test_theme_toggle_flips_between_two_values() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
