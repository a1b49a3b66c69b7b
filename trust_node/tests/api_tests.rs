/// HTTP API tests: drive the router in-process with tower's oneshot

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{healthy, FakeHost};
use geoprop_trust_node::api::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router(host: FakeHost) -> Router {
    let h = healthy(host);
    create_router(Arc::new(AppState::new(h.service)), &[])
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = router(FakeHost::office_laptop());

    for uri in ["/", "/health"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    let (status, body) = send(&app, get("/api/v1/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["features"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_tier_table_endpoint() {
    let app = router(FakeHost::office_laptop());
    let (status, body) = send(&app, get("/api/v1/trust/tiers")).await;

    assert_eq!(status, StatusCode::OK);
    let tiers = body.as_array().unwrap();
    assert_eq!(tiers.len(), 4);
    assert_eq!(tiers[0]["level"], "basic");
    assert_eq!(tiers[0]["max_bet"], "10");
    assert_eq!(tiers[3]["level"], "premium");
    assert_eq!(tiers[3]["min_score"], 95);
    assert_eq!(tiers[3]["upgrade_path"]["next_level"], "maximum");
}

#[tokio::test]
async fn test_register_then_validate_bets() {
    let app = router(FakeHost::gaming_rig());

    let (status, registration) = send(
        &app,
        post_json(
            "/api/v1/devices/register",
            json!({
                "user_id": "user_7",
                "client": { "user_agent": "GeoProp-Web/1.4", "timezone": "Europe/London" }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registration["trust_level"], "trusted");
    assert_eq!(registration["trust_score"], 90);
    assert_eq!(registration["max_bet_amount"], "200");
    assert_eq!(registration["next_upgrade_path"]["next_level"], "premium");
    assert_eq!(registration["verification_checks"].as_object().unwrap().len(), 5);

    let device_id = registration["device_id"].as_str().unwrap().to_string();

    let (status, approved) = send(
        &app,
        post_json(
            "/api/v1/bets/validate",
            json!({ "device_id": device_id, "bet_amount": "150.50" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["allowed"], true);
    assert_eq!(approved["trust_level"], "trusted");
    assert_eq!(approved["remaining_limit"], "49.50");

    let (status, denied) = send(
        &app,
        post_json(
            "/api/v1/bets/validate",
            json!({ "device_id": device_id, "bet_amount": 250 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(denied["allowed"], false);
    assert_eq!(denied["reason"], "requested amount 250 exceeds tier ceiling 200");
    assert_eq!(denied["upgrade_path"]["next_level"], "premium");
}

#[tokio::test]
async fn test_validation_errors() {
    let app = router(FakeHost::gaming_rig());

    let (status, body) = send(
        &app,
        post_json("/api/v1/devices/register", json!({ "user_id": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "user_id");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/bets/validate",
            json!({ "device_id": "abc", "bet_amount": "-5" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["field"], "bet_amount");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/bets/validate",
            json!({ "device_id": "never-registered", "bet_amount": "5" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"]["device_id"], "never-registered");
}
