//! End-to-end tests against a running gateway and server
//!
//! Start both services on a fresh database, then run:
//! cargo test --test api_tests -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";
const SHARER: &str = "X-Sharer-User-Id";

/// Create a user with a unique email and return its id
async fn create_user(client: &Client, name: &str) -> i64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}{}@example.com", name.to_lowercase(), nanos)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_get_unknown_user() {
    let client = Client::new();

    let response = client
        .get(format!("{}/users/{}", BASE_URL, i64::MAX))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NotFoundError");
}

#[tokio::test]
#[ignore]
async fn test_item_flow() {
    let client = Client::new();
    let owner = create_user(&client, "Owner").await;
    let stranger = create_user(&client, "Stranger").await;

    let response = client
        .post(format!("{}/items", BASE_URL))
        .header(SHARER, owner)
        .json(&json!({"name": "Drill", "description": "Cordless drill", "available": true}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let item: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .patch(format!("{}/items/{}", BASE_URL, item["id"]))
        .header(SHARER, stranger)
        .json(&json!({"name": "Stolen"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/items/search?text=cordless", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let found: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(found.iter().any(|i| i["id"] == item["id"]));
}

#[tokio::test]
#[ignore]
async fn test_unknown_booking_state() {
    let client = Client::new();
    let user = create_user(&client, "Booker").await;

    let response = client
        .get(format!("{}/bookings/owner?state=UNSUPPORTED_STATUS", BASE_URL))
        .header(SHARER, user)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"error": "Unknown state: UNSUPPORTED_STATUS"}));
}
