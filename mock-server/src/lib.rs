//! In-memory stand-in for the Loops API.
//!
//! Serves the same paths as `https://app.loops.so/api/` and answers with the
//! same status codes and error bodies, so the client can be exercised end to
//! end without network access. Every route under `/api` requires
//! `Authorization: Bearer <api_key>`; an optional request budget makes the
//! server answer 429 once it is spent.

mod handlers;
pub mod models;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use models::{Contact, ContactProperty, MailingList, TransactionalTemplate};

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub api_key: String,
    pub team_name: String,
    /// Requests allowed before every further request gets 429.
    pub rate_limit: Option<u32>,
    pub mailing_lists: Vec<MailingList>,
    pub templates: Vec<TransactionalTemplate>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            api_key: "test-key".to_string(),
            team_name: "Mock Team".to_string(),
            rate_limit: None,
            mailing_lists: vec![
                MailingList {
                    id: "list_newsletter".to_string(),
                    name: "Newsletter".to_string(),
                    description: Some("Monthly product news".to_string()),
                    is_public: true,
                },
                MailingList {
                    id: "list_beta".to_string(),
                    name: "Beta testers".to_string(),
                    description: None,
                    is_public: false,
                },
            ],
            templates: (1..=3)
                .map(|n| TransactionalTemplate {
                    id: format!("tid_{n}"),
                    name: format!("Template {n}"),
                    last_updated: "2024-01-01T00:00:00.000Z".to_string(),
                    data_variables: vec!["name".to_string()],
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    pub contacts: HashMap<String, Contact>,
    pub custom_properties: Vec<ContactProperty>,
    pub events: Vec<Value>,
    pub sent_emails: Vec<Value>,
    pub idempotency_keys: HashSet<String>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<MockConfig>,
    pub db: Db,
    requests: Arc<AtomicU32>,
}

impl AppState {
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            db: Arc::new(RwLock::new(Store::default())),
            requests: Arc::new(AtomicU32::new(0)),
        }
    }
}

pub fn app() -> Router {
    router(AppState::new(MockConfig::default()))
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/v1/api-key", get(handlers::test_api_key))
        .route("/v1/contacts/create", post(handlers::create_contact))
        .route("/v1/contacts/update", put(handlers::update_contact))
        .route("/v1/contacts/find", get(handlers::find_contact))
        .route("/v1/contacts/delete", post(handlers::delete_contact))
        .route(
            "/v1/contacts/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route("/v1/customFields", get(handlers::list_custom_fields))
        .route("/v1/events/send", post(handlers::send_event))
        .route("/v1/lists", get(handlers::list_mailing_lists))
        .route(
            "/v1/transactional",
            get(handlers::list_transactional).post(handlers::send_transactional),
        )
        .layer(middleware::from_fn_with_state(state.clone(), gatekeeper));

    Router::new().nest("/api", api).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, router(AppState::new(config))).await
}

/// Bearer-token check and request budget.
async fn gatekeeper(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.config.api_key);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "Invalid API key"})),
        )
            .into_response();
    }

    let Some(limit) = state.config.rate_limit else {
        return next.run(request).await;
    };

    let used = state.requests.fetch_add(1, Ordering::SeqCst) + 1;
    if used > limit {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [
                ("x-ratelimit-limit", limit.to_string()),
                ("x-ratelimit-remaining", "0".to_string()),
            ],
            Json(json!({"success": false, "error": "Rate limit exceeded"})),
        )
            .into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(limit - used));
    response
}
