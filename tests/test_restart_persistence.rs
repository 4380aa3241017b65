//! Restart test:
//! 1) Start a server on a fresh directory and write a few products.
//! 2) Stop it (simulated restart).
//! 3) Start a second server on the same `db.json` and check the collection came back intact.

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_restart_restores_collection() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let client = common::client()?;

    // --- Phase A: empty store, write through the API ---
    let server_a = common::spawn_server(dir.path()).await?;

    let empty: Vec<Value> = client.get(server_a.url("/products")).send().await?.json().await?;
    assert!(empty.is_empty());

    let mut ids = Vec::new();
    for (name, price) in [("Laptop", 999.99), ("Phone", 599.0), ("Desk", 250.5)] {
        let created: Value = client
            .post(server_a.url("/products"))
            .json(&json!({"name": name, "category": "Misc", "price": price}))
            .send()
            .await?
            .json()
            .await?;
        ids.push(created["id"].as_str().unwrap_or_default().to_string());
    }
    client
        .put(server_a.url(&format!("/products/{}", ids[0])))
        .json(&json!({"price": 799.99}))
        .send()
        .await?;
    client
        .delete(server_a.url(&format!("/products/{}", ids[1])))
        .send()
        .await?;

    let before: Vec<Value> = client.get(server_a.url("/products")).send().await?.json().await?;
    server_a.shutdown().await;

    // The durable document is a single object with a `products` array.
    let on_disk: Value = serde_json::from_slice(&std::fs::read(dir.path().join("db.json"))?)?;
    assert_eq!(on_disk, json!({"products": before.clone()}));

    // --- Phase B: new server, same file ---
    let server_b = common::spawn_server(dir.path()).await?;

    let after: Vec<Value> = client.get(server_b.url("/products")).send().await?.json().await?;
    assert_eq!(after, before);
    assert_eq!(after.len(), 2);
    assert_eq!(after[0]["price"], 799.99);

    let fetched = client
        .get(server_b.url(&format!("/products/{}", ids[2])))
        .send()
        .await?;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>().await?["name"], "Desk");

    server_b.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_corrupt_document_refuses_to_start() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("db.json"), "{\"products\": [")?;

    let result = common::spawn_server(dir.path()).await;
    assert!(result.is_err());

    // The broken file is left alone for an operator to inspect.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("db.json"))?,
        "{\"products\": ["
    );
    Ok(())
}
