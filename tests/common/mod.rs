#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use geodocs::app::{build_router, AppState};
use geodocs::db::memory::InMemoryDocumentRepository;
use geodocs::db::repository::{DocumentRepository, MongoDocumentRepository};

/// Router and repository for HTTP-level tests.
///
/// `start` uses the in-memory store; `start_mongo` runs MongoDB in a
/// container that is kept alive for as long as this struct lives.
pub struct TestEnv {
    _mongo: Option<ContainerAsync<Mongo>>,
    pub router: Router,
    pub repo: Arc<dyn DocumentRepository>,
}

impl TestEnv {
    /// Build a router backed by a fresh in-memory store.
    pub fn start() -> Self {
        let repo: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
        Self {
            _mongo: None,
            router: build_router(AppState::new(repo.clone(), Duration::from_secs(5))),
            repo,
        }
    }

    /// Spin up MongoDB and build a router wired to it.
    pub async fn start_mongo() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("geodocs_test");

        let mongo_repo = MongoDocumentRepository::new(&mongo_db, "documents");
        mongo_repo
            .ensure_indexes()
            .await
            .expect("Failed to create indexes");
        let repo: Arc<dyn DocumentRepository> = Arc::new(mongo_repo);

        Self {
            _mongo: Some(mongo_container),
            router: build_router(AppState::new(repo.clone(), Duration::from_secs(5))),
            repo,
        }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }

    /// Helper: create a document via the API.
    pub async fn create(
        &self,
        server: &axum_test::TestServer,
        title: &str,
        author: &str,
        content: &str,
        coords: Option<(f64, f64)>,
    ) -> axum_test::TestResponse {
        let mut body = serde_json::json!({
            "titulo": title,
            "autor": author,
            "conteudo": content,
            "data": "2025-01-15"
        });
        if let Some((latitude, longitude)) = coords {
            body["latitude"] = serde_json::json!(latitude);
            body["longitude"] = serde_json::json!(longitude);
        }
        server.post("/documentos").json(&body).await
    }
}

/// Titles of a search response, in response order.
pub fn titles(response: &axum_test::TestResponse) -> Vec<String> {
    let results: Vec<serde_json::Value> = response.json();
    results
        .iter()
        .map(|r| r["titulo"].as_str().unwrap_or_default().to_string())
        .collect()
}
