#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stocklet_api::types::{ProductWrite, PurchaseCreate};
use stocklet_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base_url).unwrap();
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_owned().into()
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_returns_token_pair() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "acc-token",
            "refresh": "ref-token",
            "user": {"id": 1, "username": "alice", "role": "admin"}
        })))
        .mount(&server)
        .await;

    let tokens = client.login("alice", &secret("pw")).await.unwrap();

    assert_eq!(tokens.access, "acc-token");
    assert_eq!(tokens.refresh, "ref-token");
    assert_eq!(tokens.user.unwrap().role, "admin");
}

#[tokio::test]
async fn test_login_tolerates_bare_token_pair() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "a", "refresh": "r"
        })))
        .mount(&server)
        .await;

    let tokens = client.login("alice", &secret("pw")).await.unwrap();
    assert!(tokens.user.is_none());
}

#[tokio::test]
async fn test_login_rejection_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let result = client.login("alice", &secret("nope")).await;

    match result {
        Err(Error::Unauthorized { ref message }) => {
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_field_error_extraction() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "username": ["A user with that username already exists."]
        })))
        .mount(&server)
        .await;

    let result = client
        .register("alice", "alice@example.com", &secret("pw"), "customer")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }));
    assert_eq!(err.field(), Some("username"));
    assert_eq!(
        err.server_message(),
        Some("A user with that username already exists.")
    );
}

// ── Bearer injection ────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_header_injected_when_token_present() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/auth/me/"))
        .and(header("Authorization", "Bearer tkn-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "username": "alice", "role": "customer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client.set_access_token("tkn-123".into());
    let user = client.me().await.unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_no_bearer_header_after_clear() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    client.set_access_token("tkn".into());
    client.clear_access_token();
    assert!(!client.has_access_token());

    let products = client.list_products().await.unwrap();
    assert!(products.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert!(
        requests
            .iter()
            .all(|r| !r.headers.contains_key("authorization")),
        "expected no Authorization header after clear"
    );
}

// ── Product tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"id": 1, "name": "Widget", "quantity": 5, "price": 9.99},
                {"id": 2, "name": "Gadget", "quantity": 0, "price": 3.5}
            ]
        })))
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Widget");
    assert_eq!(products[0].quantity, 5);
    assert!((products[0].price - 9.99).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_add_product_posts_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/products/add/"))
        .and(body_json(
            json!({"name": "Widget", "quantity": 5, "price": 9.99}),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10, "name": "Widget", "quantity": 5, "price": 9.99
        })))
        .mount(&server)
        .await;

    let created = client
        .add_product(&ProductWrite {
            name: "Widget".into(),
            quantity: 5,
            price: 9.99,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 10);
}

#[tokio::test]
async fn test_delete_product_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/products/delete/4/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_product(4).await.unwrap();
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    client.set_access_token("stale".into());
    let result = client.list_products().await;

    assert!(
        matches!(result, Err(ref e) if e.is_unauthorized()),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_message_extraction() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/products/add/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Quantity must be positive"})),
        )
        .mount(&server)
        .await;

    let result = client
        .add_product(&ProductWrite {
            name: "Widget".into(),
            quantity: 5,
            price: 9.99,
        })
        .await;

    match result {
        Err(Error::Api { ref message, .. }) => {
            assert_eq!(message, "Quantity must be positive");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_multibyte_error_body_becomes_api_error() {
    let (server, client) = setup().await;

    // Non-JSON failure body whose 200th byte lands inside a character.
    Mock::given(method("POST"))
        .and(path("/products/add/"))
        .respond_with(ResponseTemplate::new(400).set_body_string("€".repeat(100)))
        .mount(&server)
        .await;

    let result = client
        .add_product(&ProductWrite {
            name: "Widget".into(),
            quantity: 5,
            price: 9.99,
        })
        .await;

    match result {
        Err(Error::Api {
            status: 400,
            ref message,
            ..
        }) => {
            assert!(message.starts_with("HTTP 400"), "got: {message}");
            assert!(message.ends_with('€'), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Purchase tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_purchase_and_status_update() {
    let (server, client) = setup().await;

    let created = json!({
        "id": 3,
        "customer_name": "Bob",
        "customer_email": "bob@example.com",
        "customer_mobile": "0700000000",
        "customer_address": "1 Main St",
        "product_id": 1,
        "quantity": 2,
        "notes": null,
        "status": "pending",
        "total_price": 19.98,
        "created_at": "2025-06-15T10:30:00Z"
    });

    Mock::given(method("POST"))
        .and(path("/purchases/create/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/purchases/update-status/3/"))
        .and(body_json(json!({"status": "shipped"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "customer_name": "Bob",
            "customer_email": "bob@example.com",
            "customer_mobile": "0700000000",
            "customer_address": "1 Main St",
            "product_id": 1,
            "quantity": 2,
            "status": "shipped"
        })))
        .mount(&server)
        .await;

    let purchase = client
        .create_purchase(&PurchaseCreate {
            customer_name: "Bob".into(),
            customer_email: "bob@example.com".into(),
            customer_mobile: "0700000000".into(),
            customer_address: "1 Main St".into(),
            product_id: 1,
            quantity: 2,
            notes: None,
        })
        .await
        .unwrap();

    assert_eq!(purchase.status, "pending");
    assert_eq!(purchase.total_price, Some(19.98));

    let updated = client.update_purchase_status(3, "shipped").await.unwrap();
    assert_eq!(updated.status, "shipped");
    assert!(updated.total_price.is_none());
}
