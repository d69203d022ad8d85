mod common;

use axum::http::StatusCode;
use geodocs::db::repository::DocumentRepository;

#[tokio::test]
async fn create_returns_201_with_id() {
    let env = common::TestEnv::start();
    let server = env.server();

    let response = env
        .create(
            &server,
            "História de Porto Alegre",
            "João Silva",
            "Porto Alegre é a capital do Rio Grande do Sul.",
            Some((-30.0346, -51.2177)),
        )
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["_id"].is_string(), "Created document should carry an id");
    assert_eq!(body["titulo"], "História de Porto Alegre");
    assert_eq!(body["autor"], "João Silva");
    assert_eq!(body["data"], "2025-01-15");
    assert_eq!(body["latitude"], -30.0346);
    assert_eq!(body["longitude"], -51.2177);
}

#[tokio::test]
async fn create_without_coordinates() {
    let env = common::TestEnv::start();
    let server = env.server();

    let response = env
        .create(&server, "Sem local", "Autor", "Texto", None)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["latitude"].is_null());
    assert!(body["longitude"].is_null());
}

#[tokio::test]
async fn create_rejects_latitude_out_of_range() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = env
        .create(&server, "Fora", "Autor", "Texto", Some((95.0, -51.0)))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(
        body["error"].as_str().unwrap().contains("latitude"),
        "Error should name the coordinate: {body}"
    );
}

#[tokio::test]
async fn create_rejects_unpaired_coordinates() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/documentos")
        .json(&serde_json::json!({
            "titulo": "Meio",
            "autor": "Autor",
            "conteudo": "Texto",
            "data": "2025-01-15",
            "latitude": -30.0
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/documentos")
        .json(&serde_json::json!({
            "autor": "Autor",
            "conteudo": "Texto",
            "data": "2025-01-15"
        }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("titulo"));
}

#[tokio::test]
async fn create_rejects_malformed_date() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/documentos")
        .json(&serde_json::json!({
            "titulo": "Data ruim",
            "autor": "Autor",
            "conteudo": "Texto",
            "data": "15/01/2025"
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/documentos")
        .content_type("application/json")
        .text("{ not json")
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn rejected_documents_are_not_persisted() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    env.create(&server, "Inválido", "Autor", "carros", Some((95.0, 0.0)))
        .await
        .assert_status_bad_request();

    let candidates = env.repo.find_candidates(&[]).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let env = common::TestEnv::start();
    let server = env.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
