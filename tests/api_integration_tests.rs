//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use paper_cache::{
    api::create_router,
    storage::{FileBackend, MemoryBackend, StorageBackend},
    AppState, CacheConfig, DocumentCache,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn test_config(max_files: usize, max_file_size: usize) -> CacheConfig {
    CacheConfig {
        max_files,
        max_file_size,
        ..CacheConfig::default()
    }
}

fn create_app(backend: Box<dyn StorageBackend>, config: CacheConfig) -> Router {
    let max_file_size = config.max_file_size;
    create_router(AppState::new(DocumentCache::new(backend, config)), max_file_size)
}

fn create_test_app() -> Router {
    create_app(Box::new(MemoryBackend::new()), test_config(5, 1024 * 1024))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload(app: &Router, name: &str, content: Vec<u8>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/documents/{}", name))
                .header("content-type", "application/pdf")
                .body(Body::from(content))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn listed_names(list: &Value) -> Vec<String> {
    list["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect()
}

// == Upload Endpoint Tests ==

#[tokio::test]
async fn test_upload_and_fetch_roundtrip() {
    let app = create_test_app();
    let content = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3 binary".to_vec();

    let (status, saved) = upload(&app, "paper.pdf", content.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["name"], "paper.pdf");
    assert_eq!(saved["size"], content.len());
    let id = saved["id"].as_str().unwrap().to_string();

    let (status, doc) = get_json(&app, &format!("/documents/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["id"], id.as_str());
    assert_eq!(doc["size"], content.len());
    assert!(doc["data"]
        .as_str()
        .unwrap()
        .starts_with("data:application/pdf;base64,"));
    assert!(doc.get("uploadDate").is_some());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/documents/{}/raw", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    let raw = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(raw.to_vec(), content);
}

#[tokio::test]
async fn test_upload_oversized_returns_413() {
    let app = create_app(Box::new(MemoryBackend::new()), test_config(5, 10));

    let (status, body) = upload(&app, "big.pdf", vec![0u8; 11]).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("exceeds"));

    let (_, list) = get_json(&app, "/documents").await;
    assert!(list["documents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_far_over_limit_is_refused() {
    let app = create_app(Box::new(MemoryBackend::new()), test_config(5, 10));

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/documents/huge.pdf")
                .body(Body::from(vec![0u8; 4096]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_upload_storage_full_returns_507() {
    let app = create_app(
        Box::new(MemoryBackend::with_quota(256)),
        test_config(5, 4096),
    );

    let (status, body) = upload(&app, "paper.pdf", vec![1u8; 1024]).await;
    assert_eq!(status, StatusCode::INSUFFICIENT_STORAGE);
    assert!(body["error"].as_str().unwrap().contains("Storage full"));
}

// == Listing And Eviction Tests ==

#[tokio::test]
async fn test_cap_respected_over_http() {
    let app = create_app(Box::new(MemoryBackend::new()), test_config(2, 4096));

    for name in ["A.pdf", "B.pdf", "C.pdf"] {
        let (status, _) = upload(&app, name, vec![0u8; 1024]).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, list) = get_json(&app, "/documents").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed_names(&list), vec!["B.pdf", "C.pdf"]);
    assert!(list["documents"][0].get("data").is_none());

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["evictions"], 1);
    assert_eq!(stats["saves"], 3);
    assert_eq!(stats["total_entries"], 2);
}

#[tokio::test]
async fn test_quota_recovery_over_http() {
    let app = create_app(
        Box::new(MemoryBackend::with_quota(1200)),
        test_config(5, 4096),
    );

    upload(&app, "first.pdf", vec![1u8; 500]).await;
    let (status, saved) = upload(&app, "second.pdf", vec![2u8; 500]).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = get_json(&app, "/documents").await;
    assert_eq!(listed_names(&list), vec!["second.pdf"]);
    assert_eq!(list["documents"][0]["id"], saved["id"]);

    let (_, stats) = get_json(&app, "/stats").await;
    assert_eq!(stats["quota_recoveries"], 1);
}

// == Clear And Usage Tests ==

#[tokio::test]
async fn test_clear_and_usage() {
    let app = create_test_app();
    upload(&app, "paper.pdf", vec![9u8; 300]).await;

    let (_, usage) = get_json(&app, "/usage").await;
    assert!(usage["used_bytes"].as_u64().unwrap() > 300);
    assert_eq!(usage["total_budget_bytes"], 5 * 1024 * 1024);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (_, usage) = get_json(&app, "/usage").await;
    assert_eq!(usage["used_bytes"], 0);
    let (_, list) = get_json(&app, "/documents").await;
    assert!(list["documents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let app = create_test_app();
    upload(&app, "paper.pdf", b"%PDF".to_vec()).await;

    let (status, body) = get_json(&app, "/documents/nonexistent-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nonexistent-id"));

    let (status, _) = get_json(&app, "/documents/nonexistent-id/raw").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let backend = FileBackend::open(dir.path(), None).unwrap();
        let app = create_app(Box::new(backend), test_config(5, 4096));
        let (_, saved) = upload(&app, "kept.pdf", b"%PDF-kept".to_vec()).await;
        saved["id"].as_str().unwrap().to_string()
    };

    let backend = FileBackend::open(dir.path(), None).unwrap();
    let app = create_app(Box::new(backend), test_config(5, 4096));
    let (status, doc) = get_json(&app, &format!("/documents/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["name"], "kept.pdf");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

// == End-to-End Test ==

#[tokio::test]
async fn test_served_over_tcp() {
    let app = create_test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let saved: Value = client
        .put(format!("{}/documents/paper.pdf", base))
        .body(b"%PDF-over-tcp".to_vec())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["size"], 13);

    let list: Value = client
        .get(format!("{}/documents", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed_names(&list), vec!["paper.pdf"]);

    let raw = client
        .get(format!("{}/documents/{}/raw", base, saved["id"].as_str().unwrap()))
        .send()
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&raw[..], b"%PDF-over-tcp");

    server.abort();
}
