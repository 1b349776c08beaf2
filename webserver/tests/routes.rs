//! Route tests for the JSON API
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`
//! against a session backed by a mocked creature source.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{loaded_server, mock_source, send, server};

#[tokio::test]
async fn test_health_reports_load_state() {
    let server = server(mock_source(true));

    let (status, body) = send(&server, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["load_state"]["status"], "not_started");
}

#[tokio::test]
async fn test_catalog_snapshot() {
    let server = loaded_server().await;

    let (status, body) = send(&server, Method::GET, "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["load_state"]["status"], "ready");
    assert_eq!(body["total"], 4);
    assert_eq!(body["creatures"][0]["name"], "bulbasaur");
}

#[tokio::test]
async fn test_criteria_update_applies_after_debounce() {
    let server = loaded_server().await;

    let (status, body) = send(
        &server,
        Method::PUT,
        "/api/criteria",
        Some(json!({ "selected_types": ["fire"], "sort_key": "name" })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["sort_key"], "name");
    // Generations default to all when omitted
    assert_eq!(body["selected_generations"].as_array().unwrap().len(), 9);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let (_, catalog) = send(&server, Method::GET, "/api/catalog", None).await;
    assert_eq!(catalog["visible_count"], 1);
    assert_eq!(catalog["creatures"][0]["id"], 4);
}

#[tokio::test]
async fn test_criteria_floors_are_clamped() {
    let server = loaded_server().await;

    let (status, body) = send(
        &server,
        Method::PUT,
        "/api/criteria",
        Some(json!({ "min_stats": { "hp": 500, "attack": 0, "defense": 0, "speed": 0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["min_stats"]["hp"], 150);
}

#[tokio::test]
async fn test_malformed_criteria_is_bad_request() {
    let server = loaded_server().await;

    let (status, body) = send(
        &server,
        Method::PUT,
        "/api/criteria",
        Some(json!({ "selected_types": ["cosmic"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));

    let (status, _) = send(
        &server,
        Method::PUT,
        "/api/criteria",
        Some(json!({ "selected_generations": [10] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comparison_routes() {
    let server = loaded_server().await;

    for id in 1..=4 {
        let (status, _) = send(&server, Method::POST, &format!("/api/compare/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&server, Method::GET, "/api/compare", None).await;
    assert_eq!(body["kind"], "comparison");
    assert_eq!(body["capacity"], 3);
    assert_eq!(body["members"].as_array().unwrap().len(), 3);
    assert_eq!(body["chart_rows"].as_array().unwrap().len(), 6);

    let (_, body) = send(&server, Method::DELETE, "/api/compare/2", None).await;
    assert_eq!(body["members"].as_array().unwrap().len(), 2);

    let (_, body) = send(&server, Method::DELETE, "/api/compare", None).await;
    assert!(body["members"].as_array().unwrap().is_empty());
    assert!(body["averages"].is_null());
}

#[tokio::test]
async fn test_team_is_separate_from_comparison() {
    let server = loaded_server().await;

    send(&server, Method::POST, "/api/compare/1", None).await;
    let (status, body) = send(&server, Method::POST, "/api/team/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "team");
    assert_eq!(body["capacity"], 6);
    assert_eq!(body["type_coverage"]["grass"], 1);

    let (_, comparison) = send(&server, Method::GET, "/api/compare", None).await;
    assert_eq!(comparison["members"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_or_unloaded_ids() {
    let server = server(mock_source(true));

    let (status, _) = send(&server, Method::POST, "/api/team/1", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    server.session().load().await.unwrap();
    let (status, body) = send(&server, Method::POST, "/api/team/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("9999"));

    let (status, _) = send(&server, Method::POST, "/api/team/pikachu", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inspection_lifecycle() {
    let server = loaded_server().await;

    let (status, body) = send(&server, Method::POST, "/api/inspect/2", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["state"]["creature_id"], 2);

    let mut settled = json!(null);
    for _ in 0..50 {
        let (_, body) = send(&server, Method::GET, "/api/inspect", None).await;
        if body["state"]["status"] != "loading" {
            settled = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(settled["state"]["status"], "ready");
    let steps: Vec<u64> = settled["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["species_id"].as_u64().unwrap())
        .collect();
    assert_eq!(steps, vec![1, 2, 3]);

    let (_, body) = send(&server, Method::DELETE, "/api/inspect", None).await;
    assert_eq!(body["state"]["status"], "idle");
}

#[tokio::test]
async fn test_inspection_without_evolution_data() {
    let server = loaded_server().await;

    send(&server, Method::POST, "/api/inspect/4", None).await;
    let state = server.session().evolution_state().await;
    let state = if state.is_settled() {
        state
    } else {
        tokio::time::sleep(Duration::from_millis(50)).await;
        server.session().evolution_state().await
    };
    assert!(matches!(state, shared::EvolutionState::Failed { creature_id: 4, .. }));
}

#[tokio::test]
async fn test_reload_when_source_is_down() {
    let server = server(mock_source(false));

    let (status, body) = send(&server, Method::POST, "/api/reload", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    let (_, health) = send(&server, Method::GET, "/health", None).await;
    assert_eq!(health["load_state"]["status"], "failed");
}

#[tokio::test]
async fn test_reload_reports_counts() {
    let server = server(mock_source(true));

    let (status, body) = send(&server, Method::POST, "/api/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requested"], 4);
    assert_eq!(body["loaded"], 4);
    assert_eq!(body["failed"], 0);
}
