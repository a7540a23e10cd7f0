//! API Routes
//!
//! Route definitions for the Rewards API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{get_points, health, process_receipt};
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(get_points))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::dto::{PointsResponse, ProcessResponse};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use rewards_store::{IdSource, StoreConfig, Stores};
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(&ApiConfig::default()).unwrap()
    }

    fn fixture() -> Value {
        json!({
            "retailer": "Valid Retailer",
            "purchaseDate": "2022-02-23",
            "purchaseTime": "15:30",
            "items": [
                {"shortDescription": "Item 1", "price": "10.00"},
                {"shortDescription": "Item 2", "price": "10.00"}
            ],
            "total": "20.00"
        })
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/receipts/process")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn submit(app: &Router, receipt: &Value) -> String {
        let response = app
            .clone()
            .oneshot(post_json(&receipt.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: ProcessResponse = serde_json::from_str(&body_text(response).await).unwrap();
        body.id
    }

    async fn points(app: &Router, id: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(get(&format!("/receipts/{id}/points")))
            .await
            .unwrap();
        let status = response.status();
        (status, body_text(response).await)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state());

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_process_then_points_twice() {
        let app = create_router(create_test_state());
        let id = submit(&app, &fixture()).await;
        assert!(!id.is_empty());

        let (status, body) = points(&app, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"points": 113}));

        // Second retrieval answers zero
        let (status, body) = points(&app, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"points": 0}));
    }

    #[tokio::test]
    async fn test_process_returns_json_id() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(post_json(&fixture().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let app = create_router(create_test_state());

        let response = app.oneshot(post_json("{\"retailer\": ")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid JSON payload");
    }

    #[tokio::test]
    async fn test_wrong_field_type() {
        let app = create_router(create_test_state());
        let mut receipt = fixture();
        receipt["items"] = json!("not a list");

        let response = app.oneshot(post_json(&receipt.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid JSON payload");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let app = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/receipts/process")
            .body(Body::from(fixture().to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid JSON payload");
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let app = create_router(create_test_state());

        let mut bad_total = fixture();
        bad_total["total"] = json!("15.999");
        let mut mismatch = fixture();
        mismatch["total"] = json!("20.01");
        let mut no_items = fixture();
        no_items["items"] = json!([]);
        let mut missing_retailer = fixture();
        missing_retailer.as_object_mut().unwrap().remove("retailer");
        let mut null_retailer = fixture();
        null_retailer["retailer"] = Value::Null;

        let cases = [
            (bad_total, "Invalid receipt: total has invalid format"),
            (mismatch, "Invalid receipt: Total amount"),
            (no_items, "Invalid receipt: At least one item is required"),
            (missing_retailer, "Invalid receipt: retailer is required"),
            (null_retailer, "Invalid receipt: retailer is required"),
        ];

        for (receipt, expected) in cases {
            let response = app
                .clone()
                .oneshot(post_json(&receipt.to_string()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_text(response).await;
            assert!(body.starts_with(expected), "{body}");
        }
    }

    #[tokio::test]
    async fn test_rejected_receipt_is_not_stored() {
        let state = create_test_state();
        let app = create_router(state.clone());
        let mut receipt = fixture();
        receipt["purchaseDate"] = json!("2022-02-30");

        let response = app.oneshot(post_json(&receipt.to_string())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.stores.receipts().len().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = create_router(create_test_state());

        let (status, body) = points(&app, "7fb1377b-b223-49d9-a31a-5a02701dd310").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "No receipt found for that id");
    }

    #[tokio::test]
    async fn test_id_with_whitespace_is_bad_request() {
        let app = create_router(create_test_state());

        let (status, body) = points(&app, "abc%20def").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with("Invalid receipt ID format:"), "{body}");
    }

    #[tokio::test]
    async fn test_uncalculable_receipt_is_internal_error() {
        let state = create_test_state();
        let app = create_router(state.clone());

        // Stored without going through validation
        let receipt = rewards_core::Receipt {
            purchase_date: "not-a-date".to_string(),
            ..serde_json::from_value::<rewards_core::Receipt>(fixture()).unwrap()
        };
        let id = state
            .stores
            .receipts()
            .insert_with_generated_id(receipt)
            .unwrap();

        let (status, body) = points(&app, &id).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error calculating points");

        // A failed calculation does not consume the receipt
        assert!(!state.stores.markers().is_processed(&id).unwrap());
    }

    #[tokio::test]
    async fn test_expired_receipt_is_not_found() {
        let config = ApiConfig {
            store: StoreConfig::new().receipt_ttl(Duration::from_millis(20)),
            ..ApiConfig::default()
        };
        let app = create_router(AppState::new(&config).unwrap());
        let id = submit(&app, &fixture()).await;

        tokio::time::sleep(Duration::from_millis(40)).await;

        let (status, _) = points(&app, &id).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unrepresentable_receipt_ttl_is_served() {
        let vars = HashMap::from([(
            "REWARDS_RECEIPT_TTL_SECS".to_string(),
            u64::MAX.to_string(),
        )]);
        let config = ApiConfig::from_map(&vars).unwrap();
        let app = create_router(AppState::new(&config).unwrap());

        let id = submit(&app, &fixture()).await;

        let (status, body) = points(&app, &id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"points": 113}));
    }

    #[derive(Debug)]
    struct BlankIds;

    impl IdSource for BlankIds {
        fn next_id(&self) -> String {
            String::new()
        }
    }

    #[tokio::test]
    async fn test_blank_generated_id_is_internal_error() {
        let config = ApiConfig::default();
        let stores = Stores::with_id_source(config.store.clone(), Arc::new(BlankIds)).unwrap();
        let state = AppState::with_stores(stores);
        let app = create_router(state.clone());

        let response = app
            .oneshot(post_json(&fixture().to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("Invalid generated ID:"));
        assert_eq!(state.stores.receipts().len().unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_get_distinct_ids() {
        let app = create_router(create_test_state());

        let tasks: Vec<_> = (0..24)
            .map(|_| {
                let app = app.clone();
                tokio::spawn(async move { submit(&app, &fixture()).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }
        assert_eq!(ids.len(), 24);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_retrievals_serve_points_once() {
        let app = create_router(create_test_state());
        let id = submit(&app, &fixture()).await;

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let app = app.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    let (status, body) = points(&app, &id).await;
                    assert_eq!(status, StatusCode::OK);
                    serde_json::from_str::<PointsResponse>(&body).unwrap().points
                })
            })
            .collect();

        let mut served = Vec::new();
        for task in tasks {
            served.push(task.await.unwrap());
        }

        assert_eq!(served.iter().filter(|p| **p == 113).count(), 1);
        assert_eq!(served.iter().filter(|p| **p == 0).count(), 15);
    }
}
