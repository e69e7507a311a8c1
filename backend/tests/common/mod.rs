//! Shared helpers for backend integration tests.
//!
//! Each test crate under `backend/tests/` compiles separately, so the server
//! bootstrap lives here rather than being repeated.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::web;
use awc::Client;
use mockable::DefaultClock;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use tweetshare::inbound::http::health::HealthState;
use tweetshare::server::{ServiceSettings, Stores, build_http_state, create_server};

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub base_url: String,
    handle: ServerHandle,
}

impl TestServer {
    /// Start a server over in-memory stores. Must run inside an actix system.
    pub fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");
        let settings = ServiceSettings {
            jwt_secret: Zeroizing::new(b"integration-test-secret-0123456789".to_vec()),
            token_ttl_days: 1,
            bcrypt_cost: 4,
            mail_from: "noreply@example.com".to_owned(),
        };
        let http_state = web::Data::new(build_http_state(
            Stores::InMemory,
            &settings,
            Arc::new(DefaultClock),
        ));
        let server = create_server(web::Data::new(HealthState::new()), http_state, listener)
            .expect("server starts");
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// A registered account as seen by the client.
pub struct Account {
    pub id: String,
    pub token: String,
}

/// Register `handle@example.com` with password `secret1`.
pub async fn register(client: &Client, server: &TestServer, handle: &str) -> Account {
    let mut res = client
        .post(server.url("/api/auth/register"))
        .send_json(&json!({
            "email": format!("{handle}@example.com"),
            "password": "secret1",
            "name": handle,
        }))
        .await
        .expect("register request");
    assert_eq!(res.status().as_u16(), 201, "register {handle}");
    let body: Value = res.json().await.expect("register body");
    Account {
        id: body["user"]["id"].as_str().expect("user id").to_owned(),
        token: body["access_token"].as_str().expect("token").to_owned(),
    }
}
