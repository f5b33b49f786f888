#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use fx_gate::app::build_router;
use fx_gate::config::{AdminAuthMode, AppEnv, Config, DEFAULT_MAX_HEADER_BYTES, UserAuthMode};
use fx_gate::services::accounts::InMemoryAccounts;
use fx_gate::services::auth::token_codec::{ADMIN_TOKEN_TTL_SECONDS, USER_TOKEN_TTL_SECONDS};
use fx_gate::services::auth::{ManualClock, TokenCodec, build_state};

pub const SECRET: &str = "integration-secret";
pub const START: i64 = 1_700_000_000;
pub const ADMIN_USER: &str = "root";
pub const ADMIN_PASS: &str = "hunter2";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub codec: Arc<TokenCodec>,
}

pub fn config(admin: AdminAuthMode, user: UserAuthMode) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        jwt_secret: SECRET.to_string(),
        admin_auth_mode: admin,
        user_auth_mode: user,
        admin_user: Some(ADMIN_USER.to_string()),
        admin_pass: Some(ADMIN_PASS.to_string()),
        max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        admin_token_ttl_seconds: ADMIN_TOKEN_TTL_SECONDS,
        user_token_ttl_seconds: USER_TOKEN_TTL_SECONDS,
    }
}

/// Accounts: user `u1` (tg-100), user `u2` (no telegram id), admin `a1` (tg-900).
pub fn accounts() -> InMemoryAccounts {
    InMemoryAccounts::new()
        .with_user("u1", Some("tg-100"))
        .with_user("u2", None)
        .with_admin("a1", Some("tg-900"))
}

pub fn app(admin: AdminAuthMode, user: UserAuthMode) -> TestApp {
    app_with(config(admin, user))
}

pub fn app_with(config: Config) -> TestApp {
    let clock = Arc::new(ManualClock::new(START));
    let state = build_state(&config, clock.clone(), Arc::new(accounts())).unwrap();
    let codec = state.codec.clone();

    TestApp {
        router: build_router(state, &config),
        clock,
        codec,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = self.send(builder.body(Body::empty()).unwrap()).await;
        split(response).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        split(self.send(req).await).await
    }
}

pub async fn split(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
