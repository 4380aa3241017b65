#![allow(dead_code)]

use product_inventory_api::{transport, ProductService, ServerConfig};
use std::path::Path;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub base_url: String,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Starts the full application on an ephemeral port, storing products in `<dir>/db.json`
/// and serving static files from `<dir>/build`.
pub async fn spawn_server(dir: &Path) -> Result<TestServer, Box<dyn std::error::Error>> {
    spawn_server_with_origins(dir, Vec::new()).await
}

/// Like [`spawn_server`], restricting CORS to `cors_origins` when non-empty.
pub async fn spawn_server_with_origins(
    dir: &Path,
    cors_origins: Vec<String>,
) -> Result<TestServer, Box<dyn std::error::Error>> {
    let service = ProductService::open(dir.join("db.json"))?;
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        static_dir: dir.join("build"),
        cors_origins,
        ..ServerConfig::default()
    };
    let app = transport::http::build_app(transport::http::AppState::new(service), &config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        handle,
    })
}

pub fn client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
}
