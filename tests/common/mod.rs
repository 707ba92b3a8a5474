//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use computer_database::codec::ApiUrls;
use computer_database::config::ServerConfig;
use computer_database::http::HttpServer;
use computer_database::lifecycle::Shutdown;
use computer_database::store::{ResourceStore, SharedStore, Snapshot};

/// A server running in the background for one test.
pub struct TestServer {
    pub base_url: String,
    pub urls: ApiUrls,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub store: SharedStore,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on a fixed local port with the given store.
pub async fn start_server(port: u16, store: ResourceStore) -> TestServer {
    let addr: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();

    let mut config = ServerConfig::default();
    config.listener.host = addr.ip().to_string();
    config.listener.port = addr.port();

    let urls = ApiUrls::from_config(&config);
    let base_url = urls.base_url().to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store).unwrap();
    let store = server.store();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    TestServer {
        base_url,
        urls,
        shutdown,
        store,
    }
}

/// A store loaded from an inline dataset.
#[allow(dead_code)]
pub fn store_from_json(dataset: &str) -> ResourceStore {
    let snapshot: Snapshot = serde_json::from_str(dataset).unwrap();
    ResourceStore::from_snapshot(snapshot).unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
