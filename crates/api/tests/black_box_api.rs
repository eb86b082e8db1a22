use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use ballotgate_api::app::{AppServices, build_app};
use ballotgate_auth::{Password, Role, SessionTokenCodec};
use ballotgate_core::VoterId;
use ballotgate_infra::bootstrap_admin;

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod over an in-memory store seeded with admin `a1`.
    async fn spawn() -> Self {
        let codec = SessionTokenCodec::new(SECRET.as_bytes(), ChronoDuration::minutes(10));
        let services = AppServices::in_memory(codec);
        bootstrap_admin(
            services.store().as_ref(),
            VoterId::parse("a1").unwrap(),
            Password::new("secretpw"),
        )
        .await
        .expect("failed to seed admin");

        let app = build_app(services, &["http://localhost:8080".to_string()]);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(
    client: &reqwest::Client,
    srv: &TestServer,
    voter_id: &str,
    password: &str,
) -> reqwest::Response {
    client
        .get(srv.url("/login"))
        .query(&[("voter_id", voter_id), ("password", password)])
        .send()
        .await
        .unwrap()
}

async fn login_token(client: &reqwest::Client, srv: &TestServer, voter_id: &str, password: &str) -> String {
    let res = login(client, srv, voter_id, password).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_registers_and_lists_voters_then_voter_is_forbidden() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Admin login
    let res = login(&client, &srv, "a1", "secretpw").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "admin");
    let admin_token = body["token"].as_str().unwrap().to_string();

    // Register v1
    let res = client
        .post(srv.url("/register_voter"))
        .bearer_auth(&admin_token)
        .json(&json!({ "voter_id": "v1", "password": "pw1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Voter Registered Successfully");

    // List
    let res = client
        .get(srv.url("/get_voters"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let voters: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(voters.contains(&json!({ "voter_id": "v1", "role": "voter" })));
    assert!(voters.iter().all(|v| v.get("password").is_none()));

    // Voter login
    let res = login(&client, &srv, "v1", "pw1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "voter");
    let voter_token = body["token"].as_str().unwrap().to_string();

    // Voter cannot register or list
    let res = client
        .post(srv.url("/register_voter"))
        .bearer_auth(&voter_token)
        .json(&json!({ "voter_id": "v2", "password": "pw2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");

    let res = client
        .get(srv.url("/get_voters"))
        .bearer_auth(&voter_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wrong_secret_and_unknown_voter_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let wrong = login(&client, &srv, "a1", "not-it").await;
    let unknown = login(&client, &srv, "nobody", "secretpw").await;
    let empty = login(&client, &srv, "", "").await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(empty.status(), StatusCode::UNAUTHORIZED);

    let wrong: serde_json::Value = wrong.json().await.unwrap();
    let unknown: serde_json::Value = unknown.json().await.unwrap();
    assert_eq!(wrong, unknown);
    assert_eq!(wrong["message"], "Invalid voter id or password");
}

#[tokio::test]
async fn duplicate_registration_keeps_first_record() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login_token(&client, &srv, "a1", "secretpw").await;

    for (password, expected) in [("first", StatusCode::OK), ("second", StatusCode::BAD_REQUEST)] {
        let res = client
            .post(srv.url("/register_voter"))
            .bearer_auth(&token)
            .json(&json!({ "voter_id": "v1", "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), expected);
    }

    assert_eq!(login(&client, &srv, "v1", "first").await.status(), StatusCode::OK);
    assert_eq!(
        login(&client, &srv, "v1", "second").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn invalid_registration_body_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login_token(&client, &srv, "a1", "secretpw").await;

    for body in [
        json!({ "voter_id": "", "password": "pw" }),
        json!({ "voter_id": "v9", "password": "" }),
        json!({ "voter_id": "v9" }),
    ] {
        let res = client
            .post(srv.url("/register_voter"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn credential_header_failures_are_unauthorized() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // No header at all
    let res = client.get(srv.url("/get_voters")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing_credential");

    // Wrong scheme
    let res = client
        .get(srv.url("/get_voters"))
        .header("Authorization", "Basic YTE6c2VjcmV0cHc=")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_token");

    // Garbage bearer
    let res = client
        .get(srv.url("/get_voters"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let codec = SessionTokenCodec::new(SECRET.as_bytes(), ChronoDuration::minutes(10));
    let stale = codec
        .encode_at(
            &VoterId::parse("a1").unwrap(),
            &Role::ADMIN,
            Utc::now() - ChronoDuration::hours(1),
        )
        .unwrap();

    let res = client
        .get(srv.url("/get_voters"))
        .bearer_auth(stale)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "token_expired");
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn foreign_tokens_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let now = Utc::now().timestamp();

    let claims = json!({ "voter_id": "a1", "role": "admin", "iat": now, "exp": now + 600 });
    let wrong_key = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"someone-elses-secret"),
    )
    .unwrap();

    // Right key, but no expiry claim.
    let no_expiry = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "voter_id": "a1", "role": "admin" }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    for token in [wrong_key, no_expiry] {
        let res = client
            .get(srv.url("/get_voters"))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_token");
    }
}

#[tokio::test]
async fn only_registry_routes_are_served() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login_token(&client, &srv, "a1", "secretpw").await;

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
