use std::net::SocketAddr;

use configs::{AppConfig, StorageBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

/// Serve the real router on an ephemeral port. Postgres is used when
/// `DATABASE_URL` is set and `SKIP_DB_TESTS` is not, memory otherwise.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    let use_db = std::env::var("DATABASE_URL").is_ok() && std::env::var("SKIP_DB_TESTS").is_err();
    if use_db {
        cfg.database.normalize_from_env();
        cfg.storage.backend = StorageBackend::Postgres;
    } else {
        cfg.storage.backend = StorageBackend::Memory;
    }

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_item_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    // unique per run so a shared database does not trip duplicate suppression
    let description = format!("e2e {}", uuid::Uuid::new_v4());

    let res = c.post(format!("{}/items", app.base_url))
        .json(&json!({ "description": format!("  {description}  ") }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let location = res.headers().get("location").map(|v| v.to_str().unwrap_or_default().to_string());
    let item = res.json::<Value>().await?;
    assert_eq!(item["description"], description.as_str());
    let id = item["id"].as_str().unwrap_or_default().to_string();
    assert_eq!(location, Some(format!("/items/{id}")));

    let res = c.post(format!("{}/items", app.base_url))
        .json(&json!({ "description": description }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    assert_eq!(res.text().await?, "An incomplete item with the same description already exists.");

    let res = c.put(format!("{}/items/{}", app.base_url, id))
        .json(&json!({ "id": id, "description": description, "isCompleted": true, "version": item["version"] }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let list = c.get(format!("{}/items", app.base_url)).send().await?.json::<Vec<Value>>().await?;
    assert!(!list.iter().any(|i| i["id"] == id.as_str()));

    let res = c.get(format!("{}/items/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["isCompleted"], true);
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/items", app.base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send().await?;
    assert!(res.status().is_success());
    assert!(res.headers().get("access-control-allow-origin").is_some());
    Ok(())
}

#[tokio::test]
async fn e2e_long_description_is_stored() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    // random hex so the row cannot be compressed below one page
    let description: String = (0..320).map(|_| uuid::Uuid::new_v4().simple().to_string()).collect();

    let res = c.post(format!("{}/items", app.base_url))
        .json(&json!({ "description": description }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let item = res.json::<Value>().await?;
    let id = item["id"].as_str().unwrap_or_default().to_string();

    let res = c.get(format!("{}/items/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<Value>().await?;
    assert_eq!(fetched["description"].as_str().map(str::len), Some(description.len()));
    Ok(())
}
