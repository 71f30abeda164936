//! Integration tests for the HTTP contract, driving the router directly
//! with `tower::ServiceExt::oneshot`; no sockets involved.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

use triage_core::Config;
use triage_server::{build_router, AppState};

type App = NormalizePath<Router>;

fn test_app() -> App {
    let config = Config {
        server: triage_core::config::ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origin: "*".into(),
        },
        scoring: Default::default(),
        calibration: Default::default(),
    };
    build_router(AppState::from_config(config))
}

fn healthy_vitals() -> Value {
    json!({
        "Heart_Rate": 72.0,
        "Respiratory_Rate": 16.0,
        "Body_Temperature": 36.8,
        "Oxygen_Saturation": 98.0,
        "Systolic_Blood_Pressure": 120.0,
        "Diastolic_Blood_Pressure": 80.0,
        "Age": 40.0,
        "Gender": 0.0,
        "Weight_kg": 70.0,
        "Height_m": 1.7,
        "Derived_HRV": 55.0
    })
}

fn critical_vitals() -> Value {
    let mut v = healthy_vitals();
    v["Oxygen_Saturation"] = json!(82.0);
    v
}

async fn send_json(app: &App, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(serde_json::to_vec(&v).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok_and_queue_size() {
    let app = test_app();
    let response = send_json(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["queue_size"], 0);
}

#[tokio::test]
async fn predict_returns_stored_assessment_with_details() {
    let app = test_app();
    let response = send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(!body["patient_id"].as_str().unwrap().is_empty());
    assert_eq!(body["risk_level"], "low");
    assert_eq!(body["queue_position"], 1);
    let bmi = body["details"]["derived_bmi"].as_f64().unwrap();
    assert!((bmi - 70.0 / (1.7 * 1.7)).abs() < 1e-9);
    assert_eq!(body["details"]["derived_pulse_pressure"], 40.0);
}

#[tokio::test]
async fn predict_rejects_out_of_range_vitals_naming_the_field() {
    let app = test_app();
    let mut vitals = healthy_vitals();
    vitals["Heart_Rate"] = json!(500.0);

    let response = send_json(&app, "POST", "/predict", Some(vitals)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["field"], "heart_rate");
}

#[tokio::test]
async fn trailing_slash_paths_match_like_the_original_client() {
    // The intake front-end calls every endpoint with a trailing slash.
    let app = test_app();

    let response = send_json(&app, "POST", "/predict/", Some(healthy_vitals())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(&app, "GET", "/queue/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = send_json(&app, "POST", "/queue/update-priorities/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let served = body_json(send_json(&app, "GET", "/queue/next/", None).await).await;
    let patient_id = served["patient_id"].as_str().unwrap();

    let uri = format!(
        "/feedback/?patient_id={patient_id}&actual_wait_time=12&satisfaction_score=0.9"
    );
    let response = send_json(&app, "POST", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_json(&app, "DELETE", "/queue/clear/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn queue_orders_critical_before_healthy() {
    let app = test_app();
    send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;
    send_json(&app, "POST", "/predict", Some(critical_vitals())).await;

    let response = send_json(&app, "GET", "/queue", None).await;
    let body = body_json(response).await;
    let queue = body.as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0]["risk_level"], "high");
    assert_eq!(queue[0]["queue_position"], 1);
    assert_eq!(queue[1]["risk_level"], "low");
    assert_eq!(queue[1]["queue_position"], 2);
}

#[tokio::test]
async fn next_pops_head_then_empty_queue_is_404() {
    let app = test_app();
    send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;

    let response = send_json(&app, "GET", "/queue/next", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let popped = body_json(response).await;
    assert_eq!(popped["queue_position"], 1);

    let response = send_json(&app, "GET", "/queue/next", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_empties_the_queue() {
    let app = test_app();
    send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;
    send_json(&app, "POST", "/predict", Some(critical_vitals())).await;

    let response = send_json(&app, "DELETE", "/queue/clear", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["cleared"], 2);

    let response = send_json(&app, "GET", "/queue", None).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn update_priorities_keeps_positions_contiguous() {
    let app = test_app();
    send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;
    send_json(&app, "POST", "/predict", Some(critical_vitals())).await;

    let response = send_json(&app, "POST", "/queue/update-priorities", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["updated"], 2);

    let response = send_json(&app, "GET", "/queue", None).await;
    let body = body_json(response).await;
    for (i, entry) in body.as_array().unwrap().iter().enumerate() {
        assert_eq!(entry["queue_position"], i + 1);
    }
}

#[tokio::test]
async fn feedback_roundtrip_for_served_patient() {
    let app = test_app();
    send_json(&app, "POST", "/predict", Some(healthy_vitals())).await;
    let served = body_json(send_json(&app, "GET", "/queue/next", None).await).await;
    let patient_id = served["patient_id"].as_str().unwrap();

    let uri = format!(
        "/feedback?patient_id={patient_id}&actual_wait_time=25&satisfaction_score=0.8"
    );
    let response = send_json(&app, "POST", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "recorded");

    let stats = body_json(send_json(&app, "GET", "/stats", None).await).await;
    assert_eq!(stats["feedback_count"], 1);
}

#[tokio::test]
async fn feedback_for_unknown_patient_is_rejected() {
    let app = test_app();
    let response = send_json(
        &app,
        "POST",
        "/feedback?patient_id=nobody&actual_wait_time=10&satisfaction_score=0.5",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["field"], "patient_id");
}

#[tokio::test]
async fn config_endpoint_exposes_scoring_defaults() {
    let app = test_app();
    let body = body_json(send_json(&app, "GET", "/config", None).await).await;
    assert_eq!(body["scoring"]["base_scores"]["high"], 100.0);
    assert_eq!(body["scoring"]["elderly_age_threshold"], 65.0);
}
