use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use ledger::Ledger;
use migration::MigratorTrait;

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    server::router(Ledger::new(db))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn entry_body(date: &str, kind: &str, amount: i64) -> Value {
    json!({
        "date": date,
        "type": kind,
        "category": "Sales",
        "description": "Teak order",
        "amount": amount,
    })
}

fn stock_body() -> Value {
    json!({
        "date": "2024-05-20T10:00:00Z",
        "supplier": "PT Jati Unggul",
        "driver": "Budi Santoso",
        "origin": "Jawa",
        "super": { "count": 50, "volume": 15.5, "price": 75_000_000_i64 },
        "rijek": { "count": 10, "volume": 2.1, "price": 8_000_000_i64 },
    })
}

#[tokio::test]
async fn empty_ledger_reports_nothing() {
    let router = test_router().await;

    let (status, body) = send(&router, "GET", "/api/cashflow", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dailyLog"], json!([]));
    assert_eq!(body["income"], json!([]));
    assert_eq!(body["expenses"], json!([]));
}

#[tokio::test]
async fn create_entry_returns_created_row() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        "POST",
        "/api/cashflow",
        Some(entry_body("2024-05-20", "income", 150_000_000)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["type"], "income");
    assert_eq!(body["amount"], 150_000_000);
    assert_eq!(body.get("materialStockId"), None);
}

#[tokio::test]
async fn invalid_entry_is_rejected_with_field_message() {
    let router = test_router().await;

    let mut draft = entry_body("2024-05-20", "income", 1000);
    draft["date"] = json!("2024-02-30");
    let (status, body) = send(&router, "POST", "/api/cashflow", Some(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or missing date.");
}

#[tokio::test]
async fn out_of_range_amount_is_rejected_as_bad_request() {
    let router = test_router().await;

    let mut draft = entry_body("2024-05-20", "income", 1);
    // One past i64::MAX, representable in JSON but not in the amount domain.
    draft["amount"] = json!(9_223_372_036_854_775_808_u64);
    let (status, body) = send(&router, "POST", "/api/cashflow", Some(draft)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body.");
}

#[tokio::test]
async fn overflowing_combined_stock_price_is_rejected() {
    let router = test_router().await;

    let mut body = stock_body();
    body["super"]["price"] = json!(i64::MAX);
    body["rijek"]["price"] = json!(1);
    let (status, response) = send(&router, "POST", "/api/material", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        response["message"]
            .as_str()
            .unwrap()
            .starts_with("Combined super and rijek price")
    );
}

#[tokio::test]
async fn update_of_missing_entry_is_404() {
    let router = test_router().await;

    let mut draft = entry_body("2024-05-20", "income", 1000);
    draft["id"] = json!(999);
    let (status, body) = send(&router, "PUT", "/api/cashflow", Some(draft)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Entry not found");
}

#[tokio::test]
async fn delete_without_ids_is_rejected() {
    let router = test_router().await;

    let (status, body) = send(&router, "DELETE", "/api/cashflow", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID or IDs provided.");
}

#[tokio::test]
async fn empty_batch_delete_is_a_no_op() {
    let router = test_router().await;

    let (status, _) = send(
        &router,
        "DELETE",
        "/api/cashflow",
        Some(json!({ "ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn batch_delete_removes_matched_rows_only() {
    let router = test_router().await;

    let (_, first) = send(
        &router,
        "POST",
        "/api/cashflow",
        Some(entry_body("2024-05-01", "income", 1000)),
    )
    .await;
    let (_, second) = send(
        &router,
        "POST",
        "/api/cashflow",
        Some(entry_body("2024-05-02", "expense", 400)),
    )
    .await;

    let ids = json!({ "ids": [first["id"], second["id"], 9999] });
    let (status, _) = send(&router, "DELETE", "/api/cashflow", Some(ids)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&router, "GET", "/api/cashflow", None).await;
    assert_eq!(body["dailyLog"], json!([]));
}

#[tokio::test]
async fn unsupported_verb_gets_405_with_allow_header() {
    let router = test_router().await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/cashflow")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response.headers().get(header::ALLOW).unwrap();
    assert!(allow.to_str().unwrap().contains("GET"));
}

#[tokio::test]
async fn running_balances_follow_chronological_order() {
    let router = test_router().await;

    for (date, kind, amount) in [
        ("2024-05-01", "income", 1000),
        ("2024-05-02", "expense", 400),
        ("2024-05-03", "income", 300),
    ] {
        let (status, _) = send(
            &router,
            "POST",
            "/api/cashflow",
            Some(entry_body(date, kind, amount)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, "GET", "/api/cashflow", None).await;
    assert_eq!(status, StatusCode::OK);

    // Display order is newest-first; balances still walk oldest-first.
    let log = body["dailyLog"].as_array().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0]["date"], "2024-05-03");
    assert_eq!(log[0]["runningBalance"], 900);
    assert_eq!(log[1]["runningBalance"], 600);
    assert_eq!(log[2]["runningBalance"], 1000);
}

#[tokio::test]
async fn stock_create_mirrors_an_expense_entry() {
    let router = test_router().await;

    let (status, stock) = send(&router, "POST", "/api/material", Some(stock_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let stock_id = stock["id"].as_i64().unwrap();

    let (_, body) = send(&router, "GET", "/api/cashflow", None).await;
    let log = body["dailyLog"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["type"], "expense");
    assert_eq!(log[0]["category"], "Raw Material");
    assert_eq!(log[0]["amount"], 83_000_000);
    assert_eq!(log[0]["materialStockId"], stock_id);
    assert_eq!(log[0]["runningBalance"], -83_000_000);
}

#[tokio::test]
async fn stock_update_rewrites_the_mirror() {
    let router = test_router().await;

    let (_, stock) = send(&router, "POST", "/api/material", Some(stock_body())).await;
    let stock_id = stock["id"].as_i64().unwrap();

    let mut updated = stock_body();
    updated["id"] = json!(stock_id);
    updated["super"]["price"] = json!(100_000_000_i64);
    let (status, _) = send(&router, "PUT", "/api/material", Some(updated)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, "GET", "/api/cashflow", None).await;
    let log = body["dailyLog"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["amount"], 108_000_000);
    assert_eq!(log[0]["materialStockId"], stock_id);
}

#[tokio::test]
async fn stock_delete_removes_the_mirror_too() {
    let router = test_router().await;

    let (_, stock) = send(&router, "POST", "/api/material", Some(stock_body())).await;
    let id = stock["id"].as_i64().unwrap();

    let (status, _) = send(&router, "DELETE", "/api/material", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, cashflow) = send(&router, "GET", "/api/cashflow", None).await;
    assert_eq!(cashflow["dailyLog"], json!([]));
    let (_, material) = send(&router, "GET", "/api/material", None).await;
    assert_eq!(material["totalCount"], 0);
}

#[tokio::test]
async fn deleting_missing_stock_is_404() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        "DELETE",
        "/api/material",
        Some(json!({ "id": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Stock entry not found");
}

#[tokio::test]
async fn material_listing_paginates_and_summarizes() {
    let router = test_router().await;

    for origin in ["Jawa", "Sumatra", "Jawa"] {
        let mut body = stock_body();
        body["origin"] = json!(origin);
        let (status, _) = send(&router, "POST", "/api/material", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, "GET", "/api/material?page=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["summary"]["totalLogs"], 180);
    assert_eq!(body["summary"]["allOrigins"], json!(["Jawa", "Sumatra"]));

    let (_, filtered) = send(&router, "GET", "/api/material?origin=Jawa", None).await;
    assert_eq!(filtered["totalCount"], 2);
    assert_eq!(filtered["summary"]["totalValue"], 166_000_000_i64);
    // The origin list always covers the whole table.
    assert_eq!(filtered["summary"]["allOrigins"], json!(["Jawa", "Sumatra"]));
}

#[tokio::test]
async fn invalid_stock_volume_is_rejected() {
    let router = test_router().await;

    let mut body = stock_body();
    body["super"]["volume"] = json!(15.505);
    let (status, response) = send(&router, "POST", "/api/material", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response["message"],
        "Super volume cannot have more than 2 decimal places."
    );
}
