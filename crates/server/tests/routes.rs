//! Route tests against a server bound to an ephemeral port.

use serde_json::{json, Value};
use server::{router, AppState, Store};

async fn spawn() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(AppState::new(Store::demo())))
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().cookie_store(true).build().unwrap()
}

/// Visit the board page and return the issued CSRF token
async fn csrf_token(client: &reqwest::Client, base: &str) -> String {
    let resp = client.get(format!("{base}/search/9")).send().await.unwrap();
    let token = resp
        .cookies()
        .find(|c| c.name() == "csrftoken")
        .map(|c| c.value().to_string())
        .expect("csrftoken cookie");
    token
}

#[tokio::test]
async fn test_health() {
    let base = spawn().await;
    let body: Value = client()
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_board_issues_cookie_once() {
    let base = spawn().await;
    let client = client();
    let first = client.get(format!("{base}/search/9")).send().await.unwrap();
    assert!(first.cookies().any(|c| c.name() == "csrftoken"));
    let body: Value = first.json().await.unwrap();
    assert_eq!(body["shops"].as_array().unwrap().len(), 4);

    let second = client.get(format!("{base}/search/9")).send().await.unwrap();
    assert!(second.cookies().all(|c| c.name() != "csrftoken"));
}

#[tokio::test]
async fn test_submit_requires_csrf_header() {
    let base = spawn().await;
    let client = client();
    csrf_token(&client, &base).await;

    let resp = client
        .post(format!("{base}/search/2"))
        .json(&json!({"shops": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("CSRF"));
}

#[tokio::test]
async fn test_submit_wrong_token() {
    let base = spawn().await;
    let client = client();
    csrf_token(&client, &base).await;

    let resp = client
        .post(format!("{base}/search/2"))
        .header("X-CSRFToken", "forged")
        .json(&json!({"shops": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_submit_stores_pin_selection() {
    let base = spawn().await;
    let client = client();
    let token = csrf_token(&client, &base).await;

    let resp = client
        .post(format!("{base}/search/2"))
        .header("X-CSRFToken", &token)
        .json(&json!({"shops": [
            {"location": {"lat": 35.0, "lng": 139.0}, "name": "Picked A", "place_id": "a"},
            {"location": {"lat": 35.1, "lng": 139.1}, "name": "Picked B"}
        ]}))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    let board: Value = client
        .get(format!("{base}/search/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let shops = board["shops"].as_array().unwrap();
    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0]["shop_name"], "Picked A");
    assert_eq!(shops[0]["geometry"]["location"]["lat"], "35");
}

#[tokio::test]
async fn test_submit_invalid_body() {
    let base = spawn().await;
    let client = client();
    let token = csrf_token(&client, &base).await;

    let resp = client
        .post(format!("{base}/search/2"))
        .header("X-CSRFToken", &token)
        .json(&json!({"shops": [{"name": "no location"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_other_code_rejected() {
    let base = spawn().await;
    let client = client();
    let token = csrf_token(&client, &base).await;

    let resp = client
        .post(format!("{base}/search/1"))
        .header("X-CSRFToken", &token)
        .json(&json!({"shops": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_found_and_missing() {
    let base = spawn().await;
    let client = client();

    let body: Value = client
        .get(format!("{base}/search/detail/demo-cafe"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["detail"]["name"], "Marunouchi Cafe");

    let resp = client
        .get(format!("{base}/search/detail/unknown"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("unknown"));
}

#[tokio::test]
async fn test_detail_post_checks_csrf() {
    let base = spawn().await;
    let client = client();
    let token = csrf_token(&client, &base).await;

    let denied = client
        .post(format!("{base}/search/detail/demo-cafe"))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), reqwest::StatusCode::FORBIDDEN);

    let allowed = client
        .post(format!("{base}/search/detail/demo-cafe"))
        .header("X-CSRFToken", &token)
        .send()
        .await
        .unwrap();
    assert!(allowed.status().is_success());
}
