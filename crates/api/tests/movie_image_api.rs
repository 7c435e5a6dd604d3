//! HTTP-level integration tests for the movie image endpoints.
//!
//! These endpoints never touch the database, so the router is built over a
//! lazy pool and an in-memory blob store that the tests inspect directly.

mod common;

use std::io::Cursor;
use std::sync::Arc;

use axum::http::StatusCode;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use common::{
    body_json, build_test_app_with_store, delete, get, lazy_pool, post_json, put_bytes,
    CONTAINER, PUBLIC_BASE_URL,
};
use festival_storage::MemoryBlobStore;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::json;

const SIZES: [&str; 5] = ["original", "large", "medium", "thumbnail", "small"];

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 160, 90]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn app(store: &Arc<MemoryBlobStore>) -> axum::Router {
    build_test_app_with_store(lazy_pool(), Arc::clone(store))
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_upload_returns_five_urls() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = put_bytes(app(&store), "/api/v1/movies/2024/15/images", png(1400, 700)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["base_path"], "2024/15");
    let urls = json["data"]["urls"].as_object().unwrap();
    assert_eq!(urls.len(), 5);
    for size in SIZES {
        assert_eq!(
            urls[size],
            format!("{PUBLIC_BASE_URL}/{CONTAINER}/2024/15/{size}.jpg")
        );
    }

    assert_eq!(store.keys().await.len(), 5);
}

#[tokio::test]
async fn test_upload_empty_body_returns_400() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = put_bytes(app(&store), "/api/v1/movies/2024/15/images", Vec::new()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.keys().await.is_empty());
}

#[tokio::test]
async fn test_upload_undecodable_body_returns_500() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = put_bytes(
        app(&store),
        "/api/v1/movies/2024/15/images",
        b"definitely not an image".to_vec(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_upload_over_body_limit_returns_413() {
    let store = Arc::new(MemoryBlobStore::new());
    let oversized = vec![0u8; 2 * 1024 * 1024];
    let response = put_bytes(app(&store), "/api/v1/movies/2024/15/images", oversized).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(store.keys().await.is_empty());
}

#[tokio::test]
async fn test_upload_storage_failure_returns_500_and_keeps_earlier_variants() {
    let store = Arc::new(MemoryBlobStore::new());
    store.fail_puts_for("2024/15/medium.jpg").await;

    let response = put_bytes(app(&store), "/api/v1/movies/2024/15/images", png(900, 600)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        store.keys().await,
        vec!["2024/15/large.jpg", "2024/15/original.jpg"]
    );
}

// ---------------------------------------------------------------------------
// Status / URL lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_status_reflects_upload() {
    let store = Arc::new(MemoryBlobStore::new());

    let json = body_json(get(app(&store), "/api/v1/movies/2023/8/images").await).await;
    assert_eq!(json["data"]["exists"], false);
    assert_eq!(json["data"]["urls"].as_object().unwrap().len(), 5);

    put_bytes(app(&store), "/api/v1/movies/2023/8/images", png(64, 64)).await;

    let json = body_json(get(app(&store), "/api/v1/movies/2023/8/images").await).await;
    assert_eq!(json["data"]["exists"], true);
    assert_eq!(json["data"]["base_path"], "2023/8");
}

#[tokio::test]
async fn test_status_reports_missing_when_storage_errors() {
    let store = Arc::new(MemoryBlobStore::new());
    put_bytes(app(&store), "/api/v1/movies/2023/8/images", png(64, 64)).await;
    store.fail_exists_for("2023/8/original.jpg").await;

    let json = body_json(get(app(&store), "/api/v1/movies/2023/8/images").await).await;
    assert_eq!(json["data"]["exists"], false);
}

#[tokio::test]
async fn test_variant_url_lookup() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = get(app(&store), "/api/v1/movies/2023/8/images/thumbnail").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["data"]["url"],
        format!("{PUBLIC_BASE_URL}/{CONTAINER}/2023/8/thumbnail.jpg")
    );
}

#[tokio::test]
async fn test_unknown_variant_returns_400() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = get(app(&store), "/api/v1/movies/2023/8/images/bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_removes_variants() {
    let store = Arc::new(MemoryBlobStore::new());
    put_bytes(app(&store), "/api/v1/movies/2022/3/images", png(32, 32)).await;

    let response = delete(app(&store), "/api/v1/movies/2022/3/images").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.keys().await.is_empty());
}

#[tokio::test]
async fn test_delete_succeeds_despite_storage_failures() {
    let store = Arc::new(MemoryBlobStore::new());
    put_bytes(app(&store), "/api/v1/movies/2022/3/images", png(32, 32)).await;
    store.fail_deletes_for("2022/3/large.jpg").await;

    let response = delete(app(&store), "/api/v1/movies/2022/3/images").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.keys().await, vec!["2022/3/large.jpg"]);
}

// ---------------------------------------------------------------------------
// Base64 migration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_migrate_data_uri() {
    let store = Arc::new(MemoryBlobStore::new());
    let data = format!("data:image/png;base64,{}", STANDARD.encode(png(48, 27)));

    let response = post_json(
        app(&store),
        "/api/v1/movies/2021/9/images/migrate",
        json!({ "data": data }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["base_path"], "2021/9");
    assert!(store.get("2021/9/original.jpg").await.is_some());
}

#[tokio::test]
async fn test_migrate_invalid_base64_returns_400() {
    let store = Arc::new(MemoryBlobStore::new());
    let response = post_json(
        app(&store),
        "/api/v1/movies/2021/9/images/migrate",
        json!({ "data": "!!not base64!!" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.keys().await.is_empty());
}
