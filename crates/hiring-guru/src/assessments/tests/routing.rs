use super::common::*;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::assessments::domain::RoundType;
use crate::assessments::repository::AssessmentRepository;
use crate::test_support::{get_request, json_request, predefined, read_json, user, Stores};

#[tokio::test]
async fn create_route_returns_the_stored_assessment() {
    let stores = Stores::default();
    let body = serde_json::to_value(create_request("Panel")).expect("json");

    let response = router_for(&stores, "alice")
        .oneshot(json_request("POST", "/api/custom-assessments", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json(response).await;
    assert_eq!(payload["kind"], json!("CUSTOM"));
    assert_eq!(payload["userId"], json!("alice"));
    assert_eq!(payload["totalDuration"], json!(135));
    assert_eq!(payload["rounds"][0]["roundType"], json!("SCREENING"));
}

#[tokio::test]
async fn broken_sequence_returns_forbidden() {
    let stores = Stores::default();
    let mut request = create_request("Panel");
    request.rounds[0].sequence = 1;
    let body = serde_json::to_value(request).expect("json");

    let response = router_for(&stores, "alice")
        .oneshot(json_request("POST", "/api/custom-assessments", &body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_route_includes_usage_counts() {
    let stores = Stores::default();
    service(&stores)
        .create_custom(&user("alice").id, create_request("Panel"))
        .expect("created");

    let response = router_for(&stores, "alice")
        .oneshot(get_request("/api/custom-assessments"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload[0]["name"], json!("Panel"));
    assert_eq!(payload[0]["usageCount"], json!(0));
}

#[tokio::test]
async fn update_route_applies_partial_changes() {
    let stores = Stores::default();
    let created = service(&stores)
        .create_custom(&user("alice").id, create_request("Panel"))
        .expect("created");

    let response = router_for(&stores, "alice")
        .oneshot(json_request(
            "PUT",
            &format!("/api/custom-assessments/{}", created.id),
            &json!({ "name": "Renamed" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["name"], json!("Renamed"));
    assert_eq!(payload["difficulty"], json!("HARD"));
}

#[tokio::test]
async fn predefined_routes_serve_the_catalogue() {
    let stores = Stores::default();
    let assessment = stores
        .assessments
        .insert(predefined("Frontend", &[RoundType::Screening, RoundType::Coding]))
        .expect("stored");

    let response = router_for(&stores, "alice")
        .oneshot(get_request("/api/predefined-assessments"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));

    let response = router_for(&stores, "alice")
        .oneshot(get_request(&format!(
            "/api/predefined-assessments/{}",
            assessment.id
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router_for(&stores, "alice")
        .oneshot(get_request("/api/predefined-assessments/unknown"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
