#![cfg(feature = "web")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use medicine_dashboard::app::router;
use medicine_dashboard::{Dataset, MedicineRecord};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    router(Dataset::from_records(vec![
        MedicineRecord::new("A", 10.0, 5.0, 2, "Pain"),
        MedicineRecord::new("B", 50.0, 10.0, 1, "Fever"),
    ]))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), content_type)
}

async fn get_json(uri: &str) -> Value {
    let (status, body, _) = get(uri).await;
    assert_eq!(status, StatusCode::OK, "GET {uri}");
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn serves_the_dashboard_page() {
    let (status, body, content_type) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(String::from_utf8(body).unwrap().contains("Interactive Medicine Dashboard"));
}

#[tokio::test]
async fn options_seed_the_controls() {
    let options = get_json("/api/options").await;
    assert_eq!(options["categories"][0]["value"], "All");
    assert_eq!(options["categories"][1]["value"], "Pain");
    assert_eq!(options["categories"][2]["value"], "Fever");
    assert_eq!(options["price"]["min"], 10.0);
    assert_eq!(options["price"]["max"], 50.0);
    assert_eq!(options["price"]["marks"], json!([10, 20, 30, 40]));
    assert_eq!(options["graph_types"][4]["value"], "all");
}

#[tokio::test]
async fn render_defaults_to_the_initial_view() {
    let result = get_json("/api/render").await;
    assert_eq!(result["table_rows"].as_array().unwrap().len(), 2);
    for kind in ["category_dist", "price_dist", "dosage_price", "quantity"] {
        assert_eq!(result["visibility"][kind], true);
    }
}

#[tokio::test]
async fn render_filters_by_query() {
    let result =
        get_json("/api/render?graph_type=price_dist&category=Pain&price_min=0&price_max=100").await;
    let rows = result["table_rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Medicine"], "A");
    assert_eq!(result["visibility"]["price_dist"], true);
    assert_eq!(result["visibility"]["quantity"], false);
}

#[tokio::test]
async fn render_accepts_json_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/render")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"graph_type": "all", "category": "All", "price_min": 60.0, "price_max": 100.0})
                .to_string(),
        ))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result: Value = serde_json::from_slice(&body).unwrap();
    assert!(result["table_rows"].as_array().unwrap().is_empty());
    assert_eq!(result["visibility"]["category_dist"], false);
}

#[tokio::test]
async fn visible_chart_is_svg() {
    let (status, body, content_type) = get("/api/chart/quantity?graph_type=quantity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(String::from_utf8(body).unwrap().contains("<svg"));
}

#[tokio::test]
async fn hidden_or_empty_chart_has_no_content() {
    let (status, _, _) = get("/api/chart/quantity?graph_type=price_dist").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = get("/api/chart/quantity?price_min=60&price_max=100").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_chart_kind_is_not_found() {
    let (status, _, _) = get("/api/chart/histogram").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn csv_export_contains_filtered_rows() {
    let (status, body, content_type) = get("/api/export/csv?category=Fever").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/csv"));
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Medicine,Price,Dosage,Quantity,Category\nB,50.0,10.0,1,Fever\n"
    );
}

#[tokio::test]
async fn xlsx_export_is_a_workbook() {
    let (status, body, _) = get("/api/export/xlsx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..2], b"PK");
}
