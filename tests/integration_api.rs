//! Router-level tests driven through `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestHarness;
use http_body_util::BodyExt;
use mercato::catalog::NewItem;
use mercato::server::create_router;
use tower::ServiceExt;

/// Helper to get response body as JSON
async fn body_to_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn seed(h: &TestHarness, name: &str, category: &str) {
    h.ctx
        .catalog
        .submit_item(NewItem {
            name: name.to_string(),
            category: category.to_string(),
            image: None,
        })
        .unwrap();
}

#[tokio::test]
async fn test_health_endpoint() {
    let h = TestHarness::new();
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_item_endpoint() {
    let h = TestHarness::new();
    seed(&h, "Chair", "furniture");
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(Request::get("/items/1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1,
            "name": "Chair",
            "category": "furniture",
            "image_name": null,
        })
    );
}

#[tokio::test]
async fn test_search_endpoint_url_encoded_keyword() {
    let h = TestHarness::new();
    seed(&h, "Used iPhone 16e", "phone");
    seed(&h, "Phone case", "accessories");
    seed(&h, "Chair", "furniture");
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(
            Request::get("/search?keyword=iPhone%2016")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Used iPhone 16e");
}

#[tokio::test]
async fn test_post_items_requires_multipart() {
    let h = TestHarness::new();
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(
            Request::post("/items")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Chair","category":"furniture"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(h.ctx.catalog.list_items().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let h = TestHarness::new();
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(
            Request::get("/items")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let h = TestHarness::new();
    let app = create_router(h.ctx.clone());

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
