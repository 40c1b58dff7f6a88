#![allow(dead_code)] // each test file uses a different part of this

use reqwest::Client;
use sea_orm::{ConnectOptions, Database};
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;

use avatar_catalog::{create_api_router, setup_schema, BotApiClient};

pub const BOT_TOKEN: &str = "123456:TEST-token";

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Serves the full router on an ephemeral port over a fresh in-memory store.
pub async fn spawn_app(bot_api_url: &str) -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");

    let bot = BotApiClient::new(bot_api_url, BOT_TOKEN, Duration::from_secs(5))
        .expect("Failed to build Bot API client");

    let app = create_api_router(Arc::new(db), bot);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!(
        "http://{}",
        listener.local_addr().expect("Failed to read local address")
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    TestApp {
        address,
        client: Client::new(),
    }
}

/// For catalog tests, which never reach the Bot API.
pub async fn spawn_catalog_app() -> TestApp {
    spawn_app("http://127.0.0.1:9").await
}
