//! Pet API Tests
//!
//! Drives the full router (timeouts and tracing included) against an
//! in-memory store:
//! - Malformed path segments and bodies are rejected with 400
//! - Missing pets answer 404
//! - Create/get/update/delete round trips
//! - List window coercion

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use petstore::http_server::{HttpServer, HttpServerConfig, PetService};
use petstore::pet::Pet;
use petstore::rest_api::url_for;
use petstore::store::{PetStore, SqlitePetStore};

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> PetService {
    let store = SqlitePetStore::open_in_memory().unwrap();
    HttpServer::new(HttpServerConfig::default(), store).service()
}

fn app_with(names: &[&str]) -> PetService {
    let store = SqlitePetStore::open_in_memory().unwrap();
    for name in names {
        store.insert(name).unwrap();
    }
    HttpServer::new(HttpServerConfig::default(), store).service()
}

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    fn error(&self) -> String {
        self.json()["error"].as_str().unwrap_or_default().to_string()
    }
}

async fn send(app: &PetService, method: &str, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

const MALFORMED_SEGMENTS: &[&str] = &["8&6%434", "%21%40abc", "abc", "1.5", "99999999999999999999"];

// =============================================================================
// Validation Tests
// =============================================================================

#[tokio::test]
async fn test_malformed_request_body_add_pet() {
    let app = app();
    let response = send(&app, "POST", "/v2/pet/10", "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request payload");
}

#[tokio::test]
async fn test_malformed_request_url_add_pet() {
    let app = app();
    let response = send(&app, "POST", "/v2/pet/8&6%434", r#"{"id":10,"name":"grrr"}"#).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "Invalid request");
}

#[tokio::test]
async fn test_malformed_request_url_every_endpoint() {
    let app = app_with(&["woof"]);
    let body = r#"{"id":1,"name":"smile"}"#;

    for segment in MALFORMED_SEGMENTS {
        let uri = format!("/v2/pet/{}", segment);
        for method in ["GET", "POST", "PUT", "DELETE"] {
            let response = send(&app, method, &uri, body).await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert_eq!(response.error(), "Invalid request", "{} {}", method, uri);
        }
    }
}

#[tokio::test]
async fn test_malformed_request_body_update_pet() {
    let app = app_with(&["grrr"]);

    for body in ["", "{", "[]", r#"{"id":1}"#, r#"{"name":5}"#] {
        let response = send(&app, "PUT", "/v2/pet/1", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(response.error(), "Invalid request payload");
    }
}

#[tokio::test]
async fn test_path_checked_before_body() {
    let app = app();
    let response = send(&app, "PUT", "/v2/pet/abc", "").await;
    assert_eq!(response.error(), "Invalid request");
}

// =============================================================================
// Not Found Tests
// =============================================================================

#[tokio::test]
async fn test_get_non_existent_pet() {
    let app = app();
    let response = send(&app, "GET", "/v2/pet/45", "").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "Pet not found"}));
}

#[tokio::test]
async fn test_update_non_existent_pet() {
    let app = app();
    let response = send(&app, "PUT", "/v2/pet/45", r#"{"id":45,"name":"smile"}"#).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Pet not found");
}

#[tokio::test]
async fn test_delete_non_existent_pet() {
    let app = app();
    let response = send(&app, "DELETE", "/v2/pet/45", "").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error(), "Pet not found");
}

// =============================================================================
// CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_add_pet() {
    let app = app();
    let response = send(&app, "POST", "/v2/pet/1", r#"{"id":1,"name":"grrr"}"#).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.content_type.as_deref(),
        Some("application/json; charset=UTF-8")
    );

    let pet: Pet = serde_json::from_str(&response.body).unwrap();
    assert_eq!(pet.name, "grrr");
    assert_eq!(pet.id, 1);
}

#[tokio::test]
async fn test_add_pet_echoes_wire_fields() {
    let app = app();
    let body = json!({
        "id": 77,
        "name": "meow",
        "category": {"id": 2, "name": "cat"},
        "status": "active",
        "tags": [{"id": 1, "name": "tag-cat-3"}],
        "photoUrls": ["cat-x"]
    });
    let response = send(&app, "POST", "/v2/pet/77", &body.to_string()).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let created = response.json();
    assert_eq!(created["id"], 1);
    assert_eq!(created["status"], "active");
    assert_eq!(created["photoUrls"], json!(["cat-x"]));

    // only id and name are persisted
    let fetched = send(&app, "GET", "/v2/pet/1", "").await;
    assert_eq!(fetched.json(), json!({"id": 1, "name": "meow"}));
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app_with(&["woof", "meow"]);

    let created = send(&app, "POST", "/v2/pet/0", r#"{"name":"grrr"}"#).await;
    let id = created.json()["id"].as_i64().unwrap();

    let uri = url_for("getPetByID", Some(&id.to_string())).unwrap();
    let fetched = send(&app, "GET", &uri, "").await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["name"], "grrr");
}

#[tokio::test]
async fn test_update_pet() {
    let app = app();

    send(&app, "POST", "/v2/pet/1", r#"{"id":1,"name":"grrr"}"#).await;
    let response = send(&app, "PUT", "/v2/pet/1", r#"{"id":1,"name":"smile"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    let pet: Pet = serde_json::from_str(&response.body).unwrap();
    assert_eq!(pet.name, "smile");

    let fetched = send(&app, "GET", "/v2/pet/1", "").await;
    assert_eq!(fetched.json()["name"], "smile");
}

#[tokio::test]
async fn test_delete_pet() {
    let app = app_with(&["grrr"]);

    let response = send(&app, "DELETE", "/v2/pet/1", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "null");

    let response = send(&app, "GET", "/v2/pet/1", "").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// List Tests
// =============================================================================

#[tokio::test]
async fn test_get_pets() {
    let app = app_with(&["grrr"]);
    let response = send(&app, "GET", "/v2/pets", "").await;

    assert_eq!(response.status, StatusCode::OK);
    let pets: Vec<Pet> = serde_json::from_str(&response.body).unwrap();
    assert_eq!(pets, vec![Pet::new(1, "grrr")]);
}

#[tokio::test]
async fn test_get_pets_empty_is_array() {
    let app = app();
    let response = send(&app, "GET", "/v2/pets", "").await;
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_get_pets_repeated_key_uses_first() {
    let names: Vec<String> = (1..=15).map(|i| format!("pet-{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let app = app_with(&refs);

    let response = send(&app, "GET", "/v2/pets?count=3&count=20", "").await;
    let pets: Vec<Pet> = serde_json::from_str(&response.body).unwrap();
    assert_eq!(pets.len(), 3);

    let response = send(&app, "GET", "/v2/pets?start=14&count=2&start=0", "").await;
    let pets: Vec<Pet> = serde_json::from_str(&response.body).unwrap();
    assert_eq!(pets, vec![Pet::new(15, "pet-15")]);
}

#[tokio::test]
async fn test_get_pets_window_coercion() {
    let names: Vec<String> = (1..=15).map(|i| format!("pet-{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let app = app_with(&refs);

    let cases = [
        ("/v2/pets", 10),
        ("/v2/pets?count=3", 3),
        ("/v2/pets?count=0", 10),
        ("/v2/pets?count=11", 10),
        ("/v2/pets?count=-2", 10),
        ("/v2/pets?count=abc", 10),
        ("/v2/pets?start=-5&count=2", 2),
        ("/v2/pets?start=12", 3),
        ("/v2/pets?start=15", 0),
        ("/v2/pets?start=x&count=y", 10),
    ];

    for (uri, expected) in cases {
        let response = send(&app, "GET", uri, "").await;
        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        let pets: Vec<Pet> = serde_json::from_str(&response.body).unwrap();
        assert_eq!(pets.len(), expected, "{}", uri);
    }
}

// =============================================================================
// Routing Tests
// =============================================================================

#[tokio::test]
async fn test_trailing_slash_routes_like_bare_path() {
    let app = app_with(&["grrr"]);

    let response = send(&app, "GET", "/v2/pets/", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([{"id": 1, "name": "grrr"}]));

    let response = send(&app, "GET", "/v2/pet/1/", "").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["name"], "grrr");
}

#[tokio::test]
async fn test_unmatched_routes_are_framework_not_found() {
    let app = app_with(&["grrr"]);

    for (method, uri) in [
        ("GET", "/v1/pet/1"),
        ("GET", "/v2/pet/1/photo"),
        ("PATCH", "/v2/pet/1"),
        ("POST", "/v2/pets"),
        ("GET", "/v2/pet"),
    ] {
        let response = send(&app, method, uri, "").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert!(response.body.is_empty(), "{} {}", method, uri);
    }
}
