// SPDX-FileCopyrightText: 2026 Rehearse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios through the gateway with a scripted model tier.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use rehearse_core::{EngineMode, Responder};
use rehearse_engine::{InterviewEngine, ModelResponder, OfflineResponder};
use rehearse_gateway::{GatewayState, build_router};
use rehearse_test_utils::{MockProvider, Outcome};
use serde_json::{Value, json};
use tower::ServiceExt;

const EVAL_JSON: &str = r#"{
    "scorecard": {"Technical Correctness": 4, "Communication": 4, "Judgment/Tradeoffs": 3,
                  "Problem Understanding": 5, "Role-Specific depth": 4},
    "strong_signals": ["clarified requirements"], "weak_signals": ["skipped tests"],
    "interviewer_expectation_met": true, "detailed_feedback": "Good round.",
    "hiring_recommendation": "Hire", "ideal_solution_summary": "Hash map in one pass.",
    "improvement_plan": "Practice testing."
}"#;

async fn call(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn start_body(level: &str) -> Value {
    json!({
        "target_company": "Google",
        "target_role": "Software Engineer",
        "target_level": level,
        "years_of_experience": 8,
        "preferred_language": "Rust",
        "round_type": "coding",
    })
}

fn cloud_engine(mock: Arc<MockProvider>, models: &[&str]) -> InterviewEngine {
    let tier: Box<dyn Responder> = Box::new(ModelResponder::new(
        EngineMode::Cloud,
        mock,
        models.iter().map(|s| s.to_string()).collect(),
        150,
    ));
    InterviewEngine::new(EngineMode::Cloud, vec![tier], OfflineResponder::default())
}

#[tokio::test]
async fn level_sets_total_rounds() {
    let app = build_router(GatewayState::new(Arc::new(InterviewEngine::offline()), 10));

    for (level, rounds) in [("L5", 5), ("L3", 3)] {
        let (status, started) = call(&app, Method::POST, "/session/start", Some(start_body(level))).await;
        assert_eq!(status, StatusCode::OK);
        let id = started["session_id"].as_str().unwrap();
        let (_, snapshot) = call(&app, Method::GET, &format!("/session/{id}"), None).await;
        assert_eq!(snapshot["state"]["total_rounds"], rounds);
    }
}

#[tokio::test]
async fn rotated_model_serves_the_round_and_grades_it() {
    let mock = Arc::new(
        MockProvider::with_responses(vec![
            "Welcome. Given an array, find two numbers that sum to a target.".into(),
            "Good. What is the complexity?".into(),
            EVAL_JSON.into(),
        ])
        .on_model("models/gemini-2.0-flash", Outcome::RateLimited),
    );
    let engine = Arc::new(cloud_engine(
        mock.clone(),
        &["models/gemini-2.0-flash", "models/gemini-1.5-flash"],
    ));
    let app = build_router(GatewayState::new(engine.clone(), 10));

    let (_, started) = call(&app, Method::POST, "/session/start", Some(start_body("L5"))).await;
    assert!(started["interviewer_message"].as_str().unwrap().starts_with("Welcome."));
    let id = started["session_id"].as_str().unwrap().to_string();

    let (_, reply) = call(
        &app,
        Method::POST,
        &format!("/session/{id}/respond"),
        Some(json!({ "candidate_message": "I'd use a hash map." })),
    )
    .await;
    assert_eq!(reply["interviewer_message"], "Good. What is the complexity?");

    let (status, eval) = call(&app, Method::POST, &format!("/session/{id}/evaluate"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(eval["hiring_recommendation"], "Hire");
    assert!(eval.get("mode").is_none());

    // First call rotated off the rate-limited model; later calls stick to the one that worked.
    assert_eq!(
        mock.attempts().await,
        vec![
            "models/gemini-2.0-flash",
            "models/gemini-1.5-flash",
            "models/gemini-1.5-flash",
            "models/gemini-1.5-flash",
        ]
    );

    let (_, health) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(health["active_mode"], "cloud");
    assert_eq!(health["tiers"][0]["models"][1], "models/gemini-1.5-flash");
}

#[tokio::test]
async fn provider_outage_degrades_to_offline_content() {
    let mock = Arc::new(
        MockProvider::new()
            .on_model("m1", Outcome::Fail("API key not valid".into())),
    );
    let app = build_router(GatewayState::new(Arc::new(cloud_engine(mock, &["m1"])), 10));

    let (status, started) = call(&app, Method::POST, "/session/start", Some(start_body("L4"))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(started["interviewer_message"].as_str().unwrap().contains("**Problem**"));
    let id = started["session_id"].as_str().unwrap().to_string();

    let (_, eval) = call(&app, Method::POST, &format!("/session/{id}/evaluate"), None).await;
    assert_eq!(eval["hiring_recommendation"], "Lean Hire");
    assert_eq!(eval["mode"], "static");

    let (_, health) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(health["configured_mode"], "cloud");
    assert_eq!(health["active_mode"], "static");
}
