//! Integration tests for the complaints feed.

mod common;

use std::path::PathBuf;

use axum::http::StatusCode;
use civica_test_utils::{body_json, write_csv, SAMPLE_COMPLAINTS_CSV};
use common::{build_test_app, get};
use pretty_assertions::assert_eq;
use serde_json::json;

const AGENT_URL: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn complaints_are_served_in_file_order() {
    let csv = write_csv(SAMPLE_COMPLAINTS_CSV);
    let app = build_test_app(AGENT_URL, csv.path().to_path_buf());

    let response = get(app, "/api/complaints").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(
        list[0],
        json!({
            "id": "1",
            "lat": 12.9716,
            "lon": 77.5946,
            "type": "Pothole",
            "ward": "Ward 12",
            "date": "2024-11-15",
            "description": "Large pothole on main road",
            "status": "open"
        })
    );
    assert_eq!(list[2]["status"], json!("resolved"));
}

#[tokio::test]
async fn missing_status_defaults_to_open() {
    let csv = write_csv(
        "id,lat,lon,type,ward,date,description,status\n\
         5,12.96,77.60,Garbage,Ward 7,2024-12-02,Uncollected waste,\n",
    );
    let app = build_test_app(AGENT_URL, csv.path().to_path_buf());

    let body = body_json(get(app, "/api/complaints").await).await;
    assert_eq!(body[0]["status"], json!("open"));
}

#[tokio::test]
async fn complaints_can_be_filtered() {
    let csv = write_csv(SAMPLE_COMPLAINTS_CSV);
    let app = build_test_app(AGENT_URL, csv.path().to_path_buf());

    let body = body_json(get(app, "/api/complaints?ward=Ward%2012&status=open").await).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn filter_by_type() {
    let csv = write_csv(SAMPLE_COMPLAINTS_CSV);
    let app = build_test_app(AGENT_URL, csv.path().to_path_buf());

    let body = body_json(get(app, "/api/complaints?type=water%20supply").await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], json!("3"));
}

#[tokio::test]
async fn missing_file_is_500() {
    let app = build_test_app(AGENT_URL, PathBuf::from("/nonexistent/test-data/complaints.csv"));

    let response = get(app, "/api/complaints").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("I/O error"));
}
