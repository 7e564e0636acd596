mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn greeting_is_served_at_root() -> anyhow::Result<()> {
    let base = common::spawn_server().await;

    let response = reqwest::get(format!("{base}/")).await?;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await?,
        "Hello Vishal 🚀 — Your Rust backend is running!"
    );
    Ok(())
}

#[tokio::test]
async fn user_list_is_fixed_and_idempotent() -> anyhow::Result<()> {
    let base = common::spawn_server().await;
    let expected = json!([
        {"id": 1, "name": "Vishal"},
        {"id": 2, "name": "AI Enthusiast"}
    ]);

    for _ in 0..2 {
        let response = reqwest::get(format!("{base}/api/users")).await?;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await?;
        assert_eq!(body, expected);
    }
    Ok(())
}

#[tokio::test]
async fn created_user_is_echoed_in_envelope() -> anyhow::Result<()> {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/users"))
        .json(&json!({"name": "X"}))
        .send()
        .await?;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await?;
    assert_eq!(body, json!({"message": "User created ✅", "user": {"name": "X"}}));
    Ok(())
}

#[tokio::test]
async fn nested_payloads_are_echoed_verbatim() -> anyhow::Result<()> {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();
    let payload = json!({
        "name": "X",
        "tags": ["a", "b"],
        "profile": {"age": 30, "active": true}
    });

    let response = client
        .post(format!("{base}/api/users"))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await?;
    assert_eq!(body["user"], payload);
    Ok(())
}

#[tokio::test]
async fn empty_body_creates_empty_user() -> anyhow::Result<()> {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    let response = client.post(format!("{base}/api/users")).send().await?;
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await?;
    assert_eq!(body["message"], "User created ✅");
    assert_eq!(body["user"], json!({}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> anyhow::Result<()> {
    let base = common::spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_return_not_found() -> anyhow::Result<()> {
    let base = common::spawn_server().await;

    let response = reqwest::get(format!("{base}/api/definitely/not/here")).await?;
    assert_eq!(response.status(), 404);
    Ok(())
}
