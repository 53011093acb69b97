use crate::types::{NewRecipe, Recipe, RecipeId, User};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api";

const NOT_CONFIGURED: &str = "The backend URL is not configured. \
     Please set RECIPEBOX_BACKEND_URL or pass --backend-url.";
const CONNECT_FAILED: &str = "Failed to connect to the backend. \
     Please check your network connection or contact the administrator.";
const GENERIC_API_ERROR: &str = "API Error";

// ============================================================
// ERRORS
// ============================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend URL was never set; no request was attempted.
    #[error("{0}")]
    Config(String),

    /// DNS, connection, TLS or other transport failure.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("{}", display_backend(.status, .message.as_deref()))]
    Backend { status: u16, message: Option<String> },
}

fn display_backend(status: impl std::fmt::Display, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("request failed with status {status}"),
        str::to_string,
    )
}

impl ApiError {
    /// The most specific human-readable message carried by this error, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Config(msg) | Self::Transport(msg) => Some(msg),
            Self::Backend { message, .. } => message.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transport(_) => "transport",
            Self::Backend { .. } => "backend",
        }
    }
}

// ============================================================
// CLIENT
// ============================================================

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Thin client for the RecipeBox REST API.
///
/// Cloning is cheap: clones share the connection pool and the cookie jar
/// that holds the session credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    /// `None` when no backend URL was configured explicitly.
    base: Option<Url>,
}

impl ApiClient {
    /// Build a client for `backend_url`. Passing `None` yields a client whose
    /// every call fails with [`ApiError::Config`].
    pub fn new(backend_url: Option<&str>) -> Result<Self, ApiError> {
        let base = backend_url.map(parse_base_url).transpose()?;
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, base })
    }

    /// The URL requests go to (the default address when unconfigured).
    pub fn base_url(&self) -> &str {
        self.base.as_ref().map_or(DEFAULT_BACKEND_URL, Url::as_str)
    }

    pub fn is_configured(&self) -> bool {
        self.base.is_some()
    }

    /// The explicitly configured URL, or an empty string when there is none.
    pub fn configured_url(&self) -> &str {
        self.base.as_ref().map_or("", Url::as_str)
    }

    pub fn list_recipes(&self) -> Result<Vec<Recipe>, ApiError> {
        let value = self.send(Method::GET, &["recipes"], |r| r)?;
        Ok(decode_recipes(value))
    }

    pub fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, ApiError> {
        let value = self.send(Method::GET, &["recipes", "search"], |r| {
            r.query(&[("q", query)])
        })?;
        Ok(decode_recipes(value))
    }

    pub fn list_favorites(&self) -> Result<Vec<Recipe>, ApiError> {
        let value = self.send(Method::GET, &["favorites"], |r| r)?;
        Ok(decode_recipes(value))
    }

    pub fn favorite(&self, id: &RecipeId) -> Result<Option<Recipe>, ApiError> {
        let id = id.to_string();
        let value = self.send(Method::POST, &["favorites", id.as_str()], |r| r)?;
        Ok(decode_recipe(value))
    }

    pub fn unfavorite(&self, id: &RecipeId) -> Result<Option<Recipe>, ApiError> {
        let id = id.to_string();
        let value = self.send(Method::DELETE, &["favorites", id.as_str()], |r| r)?;
        Ok(decode_recipe(value))
    }

    pub fn submit_recipe(&self, recipe: &NewRecipe) -> Result<Option<Recipe>, ApiError> {
        let value = self.send(Method::POST, &["recipes"], |r| r.json(recipe))?;
        Ok(decode_recipe(value))
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let value = self.send(Method::POST, &["auth", "login"], |r| {
            r.json(&Credentials { email, password })
        })?;
        Ok(decode_user(value))
    }

    pub fn signup(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let value = self.send(Method::POST, &["auth", "signup"], |r| {
            r.json(&Credentials { email, password })
        })?;
        Ok(decode_user(value))
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.send(Method::POST, &["auth", "logout"], |r| r)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<User, ApiError> {
        let value = self.send(Method::GET, &["auth", "me"], |r| r)?;
        Ok(decode_user(value))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .clone()
            .ok_or_else(|| ApiError::Config(NOT_CONFIGURED.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("Invalid backend URL: {}", self.base_url())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue exactly one request and normalize its outcome.
    fn send(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Value, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "backend request");

        let response = build(self.http.request(method.clone(), url.clone()))
            .send()
            .map_err(|e| {
                warn!(%method, %url, error = %e, "backend unreachable");
                ApiError::Transport(CONNECT_FAILED.to_string())
            })?;

        let status = response.status();
        // A body that cannot be read is handled like one that cannot be parsed.
        let body = response.bytes().unwrap_or_default();
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "backend response");

        handle_response(status, &body).inspect_err(|e| {
            warn!(%method, %url, status = status.as_u16(), error = %e, "backend returned an error");
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("Invalid backend URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::Config(format!(
            "Invalid backend URL '{raw}': expected an http(s) address"
        )));
    }
    Ok(url)
}

// ============================================================
// RESPONSE HANDLING
// ============================================================

fn empty_value() -> Value {
    Value::Object(Map::new())
}

/// Turn a raw HTTP outcome into a success value or an [`ApiError::Backend`].
///
/// `204` and unparseable success bodies both become an empty object.
pub fn handle_response(status: StatusCode, body: &[u8]) -> Result<Value, ApiError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(empty_value());
    }

    let data = serde_json::from_slice::<Value>(body).unwrap_or_else(|_| empty_value());
    if status.is_success() {
        return Ok(data);
    }

    // An array body carries no message field; callers fall back to their own text.
    let message = match &data {
        Value::Object(map) => extract_message(map),
        Value::Array(_) => None,
        _ => Some(GENERIC_API_ERROR.to_string()),
    };
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// Pick the first usable `message`, `error` or `detail` field.
fn extract_message(body: &Map<String, Value>) -> Option<String> {
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| body.get(*key).and_then(message_text))
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        // Validation errors arrive as a list of strings or `{ "msg": .. }` objects.
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(obj) => obj.get("msg").and_then(Value::as_str),
                    _ => None,
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

fn decode_recipes(value: Value) -> Vec<Recipe> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Recipe>(item) {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                warn!(error = %e, "skipping malformed recipe");
                None
            }
        })
        .collect()
}

fn decode_recipe(value: Value) -> Option<Recipe> {
    serde_json::from_value(value).ok()
}

fn decode_user(value: Value) -> User {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn recipe_json(id: i64, favorited: bool) -> Value {
        json!({
            "id": id,
            "title": format!("Recipe {id}"),
            "shortDescription": "Tasty",
            "ingredients": ["egg"],
            "instructions": ["cook"],
            "tags": ["quick"],
            "isFavorited": favorited
        })
    }

    /// The blocking client must be built, used and dropped off the async runtime.
    async fn blocking<T, F>(f: F) -> T
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f).await.unwrap()
    }

    #[test]
    fn test_no_content_is_empty_success() {
        let value = handle_response(StatusCode::NO_CONTENT, b"").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_unparseable_success_body_is_empty_success() {
        let value = handle_response(StatusCode::OK, b"<html>oops</html>").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_error_prefers_message_then_error_then_detail() {
        let err = handle_response(
            StatusCode::UNAUTHORIZED,
            br#"{"detail":"d","error":"e","message":"m"}"#,
        )
        .unwrap_err();
        assert_eq!(err.message(), Some("m"));

        let err = handle_response(StatusCode::BAD_REQUEST, br#"{"detail":"Bad email"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 400,
                message: Some("Bad email".to_string())
            }
        );
    }

    #[test]
    fn test_error_joins_validation_details() {
        let err = handle_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"msg":"field required"},{"msg":"too short"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.message(), Some("field required; too short"));
    }

    #[test]
    fn test_non_object_error_body_uses_generic_marker() {
        let err = handle_response(StatusCode::INTERNAL_SERVER_ERROR, br#""boom""#).unwrap_err();
        assert_eq!(err.message(), Some("API Error"));

        let err = handle_response(StatusCode::BAD_REQUEST, b"null").unwrap_err();
        assert_eq!(err.message(), Some("API Error"));
    }

    #[test]
    fn test_array_error_body_has_no_message() {
        let err = handle_response(StatusCode::UNPROCESSABLE_ENTITY, br#"["bad", "worse"]"#)
            .unwrap_err();
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "request failed with status 422");
    }

    #[test]
    fn test_unparseable_error_body_has_no_message() {
        let err = handle_response(StatusCode::BAD_GATEWAY, b"Bad Gateway").unwrap_err();
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "request failed with status 502");
    }

    #[test]
    fn test_unconfigured_client_fails_fast() {
        let client = ApiClient::new(None).unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(client.configured_url(), "");

        let err = client.list_recipes().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains("not configured"));
        assert!(matches!(client.logout(), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_invalid_backend_url_is_rejected() {
        assert!(matches!(
            ApiClient::new(Some("not a url")),
            Err(ApiError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new(Some("ftp://example.com")),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_appends_segments_to_base_path() {
        let client = ApiClient::new(Some("http://example.com/api/")).unwrap();
        assert_eq!(client.configured_url(), "http://example.com/api/");
        let url = client.endpoint(&["favorites", "a b"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/favorites/a%20b");
    }

    #[test]
    fn test_decode_recipes_skips_malformed_entries() {
        let recipes = decode_recipes(json!([recipe_json(1, false), {"title": "no id"}]));
        assert_eq!(recipes.len(), 1);
        assert!(decode_recipes(json!({})).is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_list_recipes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/recipes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([recipe_json(1, false), recipe_json(2, true)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let base = format!("{}/api", server.uri());
        let recipes = blocking(move || ApiClient::new(Some(&base)).unwrap().list_recipes())
            .await
            .unwrap();

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[1].id, RecipeId::Number(2));
        assert!(recipes[1].is_favorited);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_sends_query_even_when_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/search"))
            .and(query_param("q", "chili & beans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([recipe_json(3, false)])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recipes/search"))
            .and(query_param("q", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let base = server.uri();
        let (hits, empty) = blocking(move || {
            let client = ApiClient::new(Some(&base)).unwrap();
            (
                client.search_recipes("chili & beans"),
                client.search_recipes(""),
            )
        })
        .await;

        assert_eq!(hits.unwrap().len(), 1);
        assert!(empty.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_favorite_round_trip_restores_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/favorites/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json(5, true)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/favorites/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json(5, false)))
            .mount(&server)
            .await;

        let base = server.uri();
        let (after_fav, after_unfav) = blocking(move || {
            let client = ApiClient::new(Some(&base)).unwrap();
            let id = RecipeId::Number(5);
            (client.favorite(&id), client.unfavorite(&id))
        })
        .await;

        assert!(after_fav.unwrap().unwrap().is_favorited);
        assert!(!after_unfav.unwrap().unwrap().is_favorited);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_submit_sends_structured_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipes"))
            .and(body_json(json!({
                "title": "Salad",
                "shortDescription": "Green",
                "tags": ["vegan", "dessert"],
                "ingredients": ["egg", "flour"],
                "instructions": ["mix"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(recipe_json(9, false)))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let created = blocking(move || {
            let payload = NewRecipe {
                title: "Salad".to_string(),
                short_description: "Green".to_string(),
                tags: vec!["vegan".to_string(), "dessert".to_string()],
                ingredients: vec!["egg".to_string(), "flour".to_string()],
                instructions: vec!["mix".to_string()],
            };
            ApiClient::new(Some(&base)).unwrap().submit_recipe(&payload)
        })
        .await
        .unwrap();

        assert_eq!(created.map(|r| r.id), Some(RecipeId::Number(9)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_session_cookie_is_sent_on_later_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "a@b.c", "password": "pw"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "session=abc123; Path=/")
                    .set_body_json(json!({"email": "a@b.c"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("cookie", "session=abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.c"})))
            .mount(&server)
            .await;

        let base = server.uri();
        let (login, me) = blocking(move || {
            let client = ApiClient::new(Some(&base)).unwrap();
            let login = client.login("a@b.c", "pw");
            // Clones share the cookie jar.
            let me = client.clone().current_user();
            (login, me)
        })
        .await;

        assert_eq!(login.unwrap().email.as_deref(), Some("a@b.c"));
        assert_eq!(me.unwrap().email.as_deref(), Some("a@b.c"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_wrong_credentials_surface_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let base = server.uri();
        let err = blocking(move || ApiClient::new(Some(&base)).unwrap().login("a@b.c", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.message(), Some("Invalid credentials"));
        assert_eq!(err.kind(), "backend");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_logout_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let base = server.uri();
        let result = blocking(move || ApiClient::new(Some(&base)).unwrap().logout()).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_unreachable_backend_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = ApiClient::new(Some("http://127.0.0.1:9/api")).unwrap();
        let err = client.current_user().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Failed to connect to the backend"));
    }
}
