//! API integration tests

use std::net::SocketAddr;

use book_api_server::{api::create_router, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start the server on a random port and return its base URL
async fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr: SocketAddr = listener.local_addr().expect("Failed to get local address");

    let app = create_router(AppState::new());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn checkout(client: &Client, base_url: &str, id: &str) -> reqwest::Response {
    client
        .patch(format!("{}/checkout", base_url))
        .query(&[("id", id)])
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
async fn test_list_books_after_startup() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/books", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 4);
    assert_eq!(books[0], json!({ "id": "1", "title": "A1", "author": "a1", "quantity": 1 }));
    assert_eq!(books[3]["id"], "4");
}

#[tokio::test]
async fn test_create_then_get() {
    let base_url = spawn_app().await;
    let client = Client::new();
    let new_book = json!({ "id": "5", "title": "H", "author": "A", "quantity": 4 });

    let response = client
        .post(format!("{}/books", base_url))
        .json(&new_book)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, new_book);

    let response = client
        .get(format!("{}/books/5", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, new_book);
}

#[tokio::test]
async fn test_create_empty_object_uses_defaults() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = client
        .get(format!("{}/books", base_url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 5);
    assert_eq!(books[4], json!({ "id": "", "title": "", "author": "", "quantity": 0 }));
}

#[tokio::test]
async fn test_create_duplicate_id_keeps_first_for_lookup() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&json!({ "id": "2", "title": "Dup", "author": "d", "quantity": 7 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = client
        .get(format!("{}/books/2", base_url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["title"], "A2");
}

#[tokio::test]
async fn test_create_invalid_body() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .header("Content-Type", "application/json")
        .body(r#"{"id": 5}"#)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_array_body_rejected() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&json!(["5", "H", "A", 4]))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_checkout_id_needing_escape() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base_url))
        .json(&json!({ "id": "a&b c", "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = checkout(&client, &base_url, "a&b c").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let base_url = spawn_app().await;
    let client = Client::new();

    for id in ["0", "99", "abc"] {
        let response = client
            .get(format!("{}/books/{}", base_url, id))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["message"], "book not found");
    }
}

#[tokio::test]
async fn test_checkout_succeeds_quantity_times() {
    let base_url = spawn_app().await;
    let client = Client::new();

    for expected in [2, 1, 0] {
        let response = checkout(&client, &base_url, "3").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["quantity"], expected);
    }

    let response = checkout(&client, &base_url, "3").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not available.");
}

#[tokio::test]
async fn test_checkout_unknown_book() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = checkout(&client, &base_url, "42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book not found");
}

#[tokio::test]
async fn test_checkout_missing_id() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .patch(format!("{}/checkout", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing id query parameter");
}

#[tokio::test]
async fn test_concurrent_checkouts() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let client = client.clone();
            let base_url = base_url.clone();
            tokio::spawn(async move { checkout(&client, &base_url, "4").await.status() })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        if handle.await.expect("Task failed") == StatusCode::OK {
            ok += 1;
        }
    }
    assert_eq!(ok, 4);

    let body: Value = client
        .get(format!("{}/books/4", base_url))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn test_health_check() {
    let base_url = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}
