//! Generation client against a live listener: the mock endpoint on success,
//! a failing route for the fallback path.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use scenario_core::model::ScenarioCategory;
use services::{GenerationError, RemoteConfig, ScenarioGenerationService};

use mock_api::{MockApiConfig, create_router};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ScenarioGenerationService {
    ScenarioGenerationService::new(Some(
        RemoteConfig::new(format!("http://{addr}/api")).with_timeout(Duration::from_secs(5)),
    ))
}

#[tokio::test]
async fn remote_success_uses_endpoint_title() {
    let addr = serve(create_router(MockApiConfig {
        delay: Duration::ZERO,
    }))
    .await;
    let client = client_for(addr);

    let draft = client
        .attempt_remote(ScenarioCategory::Leadership, 2)
        .await
        .unwrap();
    assert_eq!(draft.title, "Inclusive Leadership Scenario");
    assert_eq!(draft.questions.len(), 2);

    let draft = client.generate(ScenarioCategory::Hiring, 1).await;
    assert_eq!(draft.title, "Hiring Bias Scenario");
}

#[tokio::test]
async fn server_error_falls_back_to_templates() {
    let failing = Router::new().route(
        "/api/generate-scenario",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = client_for(serve(failing).await);

    let err = client
        .attempt_remote(ScenarioCategory::Hiring, 3)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::HttpStatus(status) if status.as_u16() == 500));

    let draft = client.generate(ScenarioCategory::Hiring, 3).await;
    assert_eq!(draft.title, "Hiring Bias");
    assert_eq!(draft.questions.len(), 3);
    assert_eq!(draft.questions[0], draft.questions[2]);
}

#[tokio::test]
async fn slow_endpoint_past_timeout_falls_back() {
    let addr = serve(create_router(MockApiConfig {
        delay: Duration::from_secs(2),
    }))
    .await;
    let client = ScenarioGenerationService::new(Some(
        RemoteConfig::new(format!("http://{addr}/api")).with_timeout(Duration::from_millis(100)),
    ));

    let draft = client.generate(ScenarioCategory::Microaggressions, 1).await;
    assert_eq!(draft.title, "Microaggressions");
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let broken = Router::new().route(
        "/api/generate-scenario",
        post(|| async { "not json at all" }),
    );
    let client = client_for(serve(broken).await);

    let err = client
        .attempt_remote(ScenarioCategory::Accessibility, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Http(_)));

    let draft = client.generate(ScenarioCategory::Accessibility, 1).await;
    assert_eq!(draft.title, "Accessibility");
}
