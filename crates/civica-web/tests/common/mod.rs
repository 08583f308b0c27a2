use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use civica_config::Config;
use civica_web::router::build_router;
use civica_web::state::AppState;
use tower::ServiceExt;

/// Build a test `Config` pointing at `agent_url` and `complaints_csv`.
pub fn test_config(agent_url: &str, complaints_csv: PathBuf) -> Config {
    let mut config = Config::default();
    config.agent.base_url = agent_url.to_string();
    config.agent.timeout_secs = 5;
    config.data.complaints_csv = complaints_csv;
    config
}

/// Build the full application router, mirroring `main.rs`.
pub fn build_test_app(agent_url: &str, complaints_csv: PathBuf) -> Router {
    let state = AppState::new(test_config(agent_url, complaints_csv)).unwrap();
    build_router(state)
}

/// Build the router from an already-tweaked `Config`.
pub fn app_with_config(config: Config) -> Router {
    build_router(AppState::new(config).unwrap())
}

pub fn app_for_agent(agent_url: &str) -> Router {
    build_test_app(agent_url, PathBuf::from("/nonexistent/complaints.csv"))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: Router, uri: &str, content_type: &str, body: impl Into<Body>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}
