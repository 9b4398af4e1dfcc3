//! Axum router for the mock scenario generation endpoint.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/generate-scenario` | Canned scenario for a category, after an artificial delay |
//!
//! The endpoint always succeeds. The body is read leniently: a missing or
//! non-string `scenarioType` counts as an unknown category (default templates,
//! generic title), and `questionCount` is coerced rather than validated.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use scenario_core::model::ScenarioCategory;
use scenario_core::templates::{DEFAULT_TITLE, template_at};
use scenario_core::wire::{DEFAULT_QUESTION_COUNT, GenerateScenarioResponse};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Default artificial latency before answering.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockApiConfig {
    pub delay: Duration,
}

impl Default for MockApiConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

pub type AppState = Arc<MockApiConfig>;

pub fn create_router(config: MockApiConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/api/generate-scenario", post(handle_generate_scenario))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

/// Request fields as the endpoint reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioQuery {
    /// `None` when absent or not a string.
    pub scenario_type: Option<String>,
    pub question_count: usize,
}

impl ScenarioQuery {
    /// Reads a raw request body. Anything that is not a JSON object reads as `{}`.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        Self {
            scenario_type: value
                .get("scenarioType")
                .and_then(Value::as_str)
                .map(str::to_string),
            question_count: value
                .get("questionCount")
                .map_or(DEFAULT_QUESTION_COUNT, lenient_count),
        }
    }
}

/// Null means absent. Negative, fractional and non-numeric counts read as 0;
/// numeric strings are parsed.
fn lenient_count(raw: &Value) -> usize {
    match raw {
        Value::Null => DEFAULT_QUESTION_COUNT,
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Builds the canned response for a raw category key.
#[must_use]
pub fn scenario_response(
    scenario_type: Option<&str>,
    question_count: usize,
    generated_at: DateTime<Utc>,
) -> GenerateScenarioResponse {
    let known = scenario_type.and_then(|raw| raw.parse::<ScenarioCategory>().ok());
    let category = known.unwrap_or(ScenarioCategory::DEFAULT);
    let title = known.map_or_else(
        || DEFAULT_TITLE.to_string(),
        |category| format!("{} Scenario", category.title()),
    );

    GenerateScenarioResponse {
        title,
        questions: (0..question_count)
            .map(|index| template_at(category, index).clone())
            .collect(),
        generated_at: Some(generated_at),
    }
}

async fn handle_health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn handle_generate_scenario(
    State(config): State<AppState>,
    body: Bytes,
) -> Json<GenerateScenarioResponse> {
    let query = ScenarioQuery::from_body(&body);
    tracing::info!(
        scenario_type = ?query.scenario_type,
        question_count = query.question_count,
        "generating mock scenario"
    );
    if !config.delay.is_zero() {
        tokio::time::sleep(config.delay).await;
    }
    Json(scenario_response(
        query.scenario_type.as_deref(),
        query.question_count,
        Utc::now(),
    ))
}
