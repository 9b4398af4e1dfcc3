//! Router tests via axum's oneshot pattern (tower::ServiceExt), no TCP binding.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mock_api::{MockApiConfig, create_router};

fn app() -> axum::Router {
    create_router(MockApiConfig {
        delay: Duration::ZERO,
    })
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn generate_request(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/generate-scenario")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["status"], "OK");
}

#[tokio::test]
async fn generate_returns_requested_count() {
    let resp = app()
        .oneshot(generate_request(serde_json::json!({
            "scenarioType": "microaggressions",
            "questionCount": 4,
            "complexity": "medium",
            "context": "workplace"
        })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp.into_body()).await;
    assert_eq!(json["title"], "Microaggressions Scenario");
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    assert_eq!(questions[0], questions[3]);
    assert!(questions[0]["options"][0]["type"].is_string());
    assert!(json["generatedAt"].is_string());
}

#[tokio::test]
async fn generate_defaults_missing_fields() {
    let resp = app()
        .oneshot(generate_request(serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp.into_body()).await;
    assert_eq!(json["title"], "Workplace Scenario");
    assert_eq!(json["questions"].as_array().unwrap().len(), 3);
}

async fn generate(body: serde_json::Value) -> serde_json::Value {
    let resp = app().oneshot(generate_request(body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp.into_body()).await
}

#[tokio::test]
async fn negative_count_yields_no_questions() {
    let json = generate(serde_json::json!({
        "scenarioType": "hiring",
        "questionCount": -1
    }))
    .await;
    assert_eq!(json["title"], "Hiring Bias Scenario");
    assert!(json["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn fractional_count_yields_no_questions() {
    let json = generate(serde_json::json!({
        "scenarioType": "hiring",
        "questionCount": 1.5
    }))
    .await;
    assert!(json["questions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn numeric_string_count_is_coerced() {
    let json = generate(serde_json::json!({
        "scenarioType": "accessibility",
        "questionCount": "2"
    }))
    .await;
    assert_eq!(json["title"], "Accessibility Scenario");
    assert_eq!(json["questions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn null_type_gets_workplace_title() {
    let json = generate(serde_json::json!({
        "scenarioType": null,
        "questionCount": 1
    }))
    .await;
    assert_eq!(json["title"], "Workplace Scenario");
    assert_eq!(json["questions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_string_type_gets_workplace_title() {
    let json = generate(serde_json::json!({
        "scenarioType": ["hiring"],
        "questionCount": 1
    }))
    .await;
    assert_eq!(json["title"], "Workplace Scenario");
}

#[tokio::test]
async fn body_without_json_still_succeeds() {
    let resp = app()
        .oneshot(
            Request::post("/api/generate-scenario")
                .body(Body::from("scenarioType=hiring"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["title"], "Workplace Scenario");
    assert_eq!(json["questions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_type_gets_workplace_title() {
    let resp = app()
        .oneshot(generate_request(serde_json::json!({
            "scenarioType": "underwater-basket-weaving",
            "questionCount": 1
        })))
        .await
        .unwrap();
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["title"], "Workplace Scenario");
}

#[tokio::test]
async fn generate_rejects_get() {
    let resp = app()
        .oneshot(
            Request::get("/api/generate-scenario")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
