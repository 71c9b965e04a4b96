//! End-to-end tests: the real router over the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use partsdesk_core::StockPolicy;
use partsdesk_db::{MemoryStore, Store};
use partsdesk_server::{app, AppState};

async fn test_app(policy: StockPolicy) -> Router {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let state = AppState::new(store, policy, "admin");
    state.credentials.ensure_default("123456").await.unwrap();
    app(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap()
}

/// Creates the brake pad from the worked example: cost 50, price 80, 10 on hand.
async fn brake_pad(app: &Router) -> i64 {
    let (status, body) = post(
        app,
        "/api/items",
        json!({"name": "Brake pad", "quantity": 10, "price": 80, "cost": 50, "minStock": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_item_crud() {
    let app = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&app).await;

    let (status, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "Brake pad");
    assert_eq!(number(&item["price"]), 80.0);
    assert_eq!(item["minStock"], 2);

    let (status, body) = put(
        &app,
        &format!("/api/items/{id}"),
        json!({"name": "Brake pad (front)", "quantity": 1, "price": "85.50", "cost": 50}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Item updated"}));

    let (_, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(number(&item["price"]), 85.5);
    assert_eq!(item["minStock"], 0);

    let (_, low) = get(&app, "/api/items/low-stock").await;
    assert_eq!(low.as_array().unwrap().len(), 0);

    let (status, _) = delete(&app, &format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_item_validation_and_missing_ids() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = post(&app, "/api/items", json!({"name": "  ", "price": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = put(&app, "/api/items/999", json!({"name": "Ghost", "price": 5})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/api/items/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sale_updates_stock_profit_and_summary() {
    let app = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&app).await;

    let (status, body) = post(
        &app,
        "/api/sales",
        json!({
            "items": [{"id": id, "quantity": 3, "price": 80}],
            "total": 240,
            "paymentMethod": "bank"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sale recorded");
    let sale_id = body["id"].as_i64().unwrap();

    let (_, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], 7);

    let (_, sales) = get(&app, "/api/sales/all").await;
    let sale = &sales[0];
    assert_eq!(sale["id"], sale_id);
    assert_eq!(number(&sale["profit"]), 90.0);
    assert_eq!(number(&sale["total"]), 240.0);
    assert_eq!(sale["paymentMethod"], "bank");
    assert_eq!(sale["items"][0]["id"], id);

    let (status, summary) = get(&app, "/api/financial-summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(number(&summary["totalSales"]), 240.0);
    assert_eq!(number(&summary["totalProfit"]), 90.0);
    assert_eq!(number(&summary["todaySales"]), 240.0);
    assert_eq!(number(&summary["monthProfit"]), 90.0);
    assert_eq!(number(&summary["totalPurchases"]), 0.0);
}

#[tokio::test]
async fn test_purchase_restocks() {
    let app = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&app).await;

    let (status, body) = post(
        &app,
        "/api/purchases",
        json!({"items": [{"id": id, "quantity": 5, "price": 50}], "total": 250}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Purchase recorded");

    let (_, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], 15);

    let (_, purchases) = get(&app, "/api/purchases/all").await;
    assert_eq!(purchases.as_array().unwrap().len(), 1);
    assert_eq!(number(&purchases[0]["total"]), 250.0);

    let (_, summary) = get(&app, "/api/financial-summary").await;
    assert_eq!(number(&summary["todayPurchases"]), 250.0);
}

#[tokio::test]
async fn test_sale_with_unknown_item_writes_nothing() {
    let app = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&app).await;

    let (status, body) = post(
        &app,
        "/api/sales",
        json!({
            "items": [
                {"id": id, "quantity": 1, "price": 80},
                {"id": 404, "quantity": 1, "price": 10}
            ],
            "total": 90
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (_, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], 10);
    let (_, sales) = get(&app, "/api/sales/all").await;
    assert_eq!(sales, json!([]));
}

#[tokio::test]
async fn test_empty_sale_is_rejected() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = post(&app, "/api/sales", json!({"items": [], "total": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected_without_writing() {
    let app = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&app).await;

    let (status, body) = post(
        &app,
        "/api/sales",
        json!({"items": [{"id": id, "quantity": 10000000000000000i64, "price": 80}], "total": 80}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"], "items[0].quantity is too large");

    let (status, _) = post(
        &app,
        "/api/purchases",
        json!({"items": [{"id": id, "quantity": 10000000000000000i64, "price": 50}], "total": 50}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(
        &app,
        "/api/shipments",
        json!({
            "personName": "Omar",
            "region": "Khartoum",
            "itemDescription": "Radiator",
            "itemPrice": 9e16,
            "myFee": 9e16
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = post(
        &app,
        "/api/items",
        json!({"name": "Bulk", "quantity": i64::MIN, "price": 1, "cost": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, item) = get(&app, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], 10);
    let (_, sales) = get(&app, "/api/sales/all").await;
    assert_eq!(sales, json!([]));
    let (_, shipments) = get(&app, "/api/shipments").await;
    assert_eq!(shipments, json!([]));
}

#[tokio::test]
async fn test_stock_policies() {
    let sale = |id: i64| json!({"items": [{"id": id, "quantity": 12, "price": 80}], "total": 960});

    let permissive = test_app(StockPolicy::Permissive).await;
    let id = brake_pad(&permissive).await;
    let (status, _) = post(&permissive, "/api/sales", sale(id)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, item) = get(&permissive, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], -2);

    let strict = test_app(StockPolicy::Strict).await;
    let id = brake_pad(&strict).await;
    let (status, body) = post(&strict, "/api/sales", sale(id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");
    let (_, item) = get(&strict, &format!("/api/items/{id}")).await;
    assert_eq!(item["quantity"], 10);
}

#[tokio::test]
async fn test_monthly_series_shape() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = get(&app, "/api/sales/monthly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["months"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert!(body["data"].as_array().unwrap().iter().all(|v| number(v) == 0.0));
}

#[tokio::test]
async fn test_shipment_total_ignores_client_value() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = post(
        &app,
        "/api/shipments",
        json!({
            "personName": "Ali", "region": "North", "itemDescription": "Gearbox",
            "itemPrice": 100, "myFee": 20, "total": 999
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_i64().unwrap();

    let (_, shipments) = get(&app, "/api/shipments").await;
    assert_eq!(number(&shipments[0]["total"]), 120.0);
    assert_eq!(shipments[0]["status"], "pending");

    let (status, _) = put(
        &app,
        &format!("/api/shipments/{id}"),
        json!({
            "personName": "Ali", "region": "North", "itemDescription": "Gearbox",
            "itemPrice": 100, "myFee": 30, "status": "completed"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, shipments) = get(&app, "/api/shipments").await;
    assert_eq!(number(&shipments[0]["total"]), 130.0);
    assert_eq!(shipments[0]["status"], "completed");

    let (status, _) = delete(&app, &format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = delete(&app, &format!("/api/shipments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, body) = post(
        &app,
        "/api/login",
        json!({"username": "admin", "password": "123456"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = post(&app, "/api/login", json!({"username": "admin", "password": "nope"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_FAILED");

    let (status, _) = post(&app, "/api/login", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = test_app(StockPolicy::Permissive).await;

    let (status, _) = post(
        &app,
        "/api/change-password",
        json!({"oldPassword": "wrong", "newPassword": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/api/login", json!({"username": "admin", "password": "123456"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/api/change-password",
        json!({"oldPassword": "123456", "newPassword": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed");

    let (status, _) = post(&app, "/api/login", json!({"username": "admin", "password": "s3cret"})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_without_account_is_not_found() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let router = app(AppState::new(store, StockPolicy::Permissive, "admin"));

    let (status, _) = post(
        &router,
        "/api/change-password",
        json!({"oldPassword": "123456", "newPassword": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_a_client_error() {
    let app = test_app(StockPolicy::Permissive).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}
