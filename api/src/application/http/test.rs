use std::sync::Arc;

use axum_test::TestServer;
use clap::Parser;
use serde_json::{Value, json};

use crate::application::http::server::http_server;
use crate::args::Args;

const ADMIN_TOKEN: &str = "test-admin";

/// Boots a server on a temp data directory with every external
/// integration disabled.
async fn test_server(data_dir: &std::path::Path) -> TestServer {
    let args = Args::try_parse_from([
        "ladle-api",
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--mealdb-enabled",
        "false",
        "--admin-token",
        ADMIN_TOKEN,
    ])
    .unwrap();

    let state = http_server::state(Arc::new(args)).await.unwrap();
    let router = http_server::router(state).unwrap();

    TestServer::new(router)
}

fn chicken_curry_payload() -> Value {
    json!({
        "title": "Chicken Curry",
        "description": "A weeknight chicken curry.",
        "cuisines": ["Indian"],
        "tags": ["dinner"],
        "ingredients": [
            {"name": "chicken thighs", "amount": 500.0, "unit": "g", "original": "500 g chicken thighs"},
            {"name": "curry paste", "amount": 2.0, "unit": "tbsp", "original": "2 tbsp curry paste"}
        ],
        "instructions": ["Brown the chicken.", "Simmer in the sauce."]
    })
}

#[tokio::test]
async fn test_recipe_crud_flow() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let created = server.post("/api/recipes").json(&chicken_curry_payload()).await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = created.json();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("user-"));

    let fetched = server.get(&format!("/api/recipes/{id}")).await;
    fetched.assert_status_ok();
    let body: Value = fetched.json();
    assert_eq!(body["data"]["title"], "Chicken Curry");
    assert_eq!(body["data"]["source"], "user");

    let searched = server.get("/api/recipes").add_query_param("query", "curry").await;
    searched.assert_status_ok();
    let body: Value = searched.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let updated = server
        .put(&format!("/api/recipes/{id}"))
        .json(&json!({"description": "Richer and spicier."}))
        .await;
    updated.assert_status_ok();
    let body: Value = updated.json();
    assert_eq!(body["data"]["description"], "Richer and spicier.");
    assert_eq!(body["data"]["title"], "Chicken Curry");

    let deleted = server.delete(&format!("/api/recipes/{id}")).await;
    deleted.assert_status(axum::http::StatusCode::NO_CONTENT);

    let gone = server.get(&format!("/api/recipes/{id}")).await;
    gone.assert_status_not_found();
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let response = server.post("/api/recipes").json(&json!({"title": ""})).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "E_UNPROCESSABLE");
}

#[tokio::test]
async fn test_preferences_default_then_replace() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let defaults = server.get("/api/preferences/profile-1").await;
    defaults.assert_status_ok();
    let body: Value = defaults.json();
    assert_eq!(body["data"]["diets"], json!([]));
    assert_eq!(body["data"]["target_calories"], Value::Null);

    let put = server
        .put("/api/preferences/profile-1")
        .json(&json!({
            "diets": ["Vegetarian", "vegetarian"],
            "excluded_ingredients": ["peanuts"],
            "target_calories": 1800.0
        }))
        .await;
    put.assert_status_ok();
    let body: Value = put.json();
    assert_eq!(body["data"]["diets"], json!(["Vegetarian"]));

    let stored = server.get("/api/preferences/profile-1").await;
    let body: Value = stored.json();
    assert_eq!(body["data"]["target_calories"], json!(1800.0));
    assert_eq!(body["data"]["excluded_ingredients"], json!(["peanuts"]));
}

#[tokio::test]
async fn test_admin_requires_token() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let anonymous = server.get("/api/admin/stats").await;
    anonymous.assert_status_unauthorized();

    let wrong = server
        .get("/api/admin/stats")
        .add_header("x-admin-token", "nope")
        .await;
    wrong.assert_status_unauthorized();

    let authorized = server
        .get("/api/admin/stats")
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    authorized.assert_status_ok();
    let body: Value = authorized.json();
    assert_eq!(body["data"]["total_recipes"], json!(0));
}

#[tokio::test]
async fn test_dedup_keeps_most_complete_copy() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let rich = server.post("/api/recipes").json(&chicken_curry_payload()).await;
    let rich_id = rich.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    // A sparse duplicate under a differently punctuated title.
    let sparse = server
        .post("/api/recipes")
        .json(&json!({"title": "Chicken  Curry!"}))
        .await;
    let sparse_id = sparse.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    let dry = server
        .post("/api/admin/dedup")
        .add_query_param("dry_run", "true")
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    dry.assert_status_ok();
    let body: Value = dry.json();
    assert_eq!(body["data"]["deleted"], json!(1));
    assert_eq!(body["data"]["dry_run"], json!(true));

    // Dry run must not remove anything.
    server
        .get(&format!("/api/recipes/{sparse_id}"))
        .await
        .assert_status_ok();

    let real = server
        .post("/api/admin/dedup")
        .add_header("x-admin-token", ADMIN_TOKEN)
        .await;
    real.assert_status_ok();
    let body: Value = real.json();
    assert_eq!(body["data"]["deleted"], json!(1));
    assert_eq!(body["data"]["groups"][0]["kept_id"], json!(rich_id.clone()));

    server
        .get(&format!("/api/recipes/{rich_id}"))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/recipes/{sparse_id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_nutrition_unavailable_without_backend() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    let created = server.post("/api/recipes").json(&chicken_curry_payload()).await;
    let id = created.json::<Value>()["data"]["id"].as_str().unwrap().to_string();

    let response = server.post(&format!("/api/recipes/{id}/nutrition")).await;
    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let dir = tempfile::tempdir().unwrap();
    let server = test_server(dir.path()).await;

    server.post("/api/recipes").json(&chicken_curry_payload()).await;

    let health = server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["status"], "ok");

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    let body: Value = ready.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["recipe_count"], json!(1));
}
