//! Router-level plumbing around the gates.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{app, bearer};
use fx_gate::config::{AdminAuthMode, UserAuthMode};

#[tokio::test]
async fn health_needs_no_credentials() {
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Bearer);

    let response = app
        .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn rejected_requests_still_pass_through_outer_layers() {
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Bearer);

    let response = app
        .send(
            Request::builder()
                .uri("/api/v1/admin/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_paths_are_not_found_rather_than_unauthorized() {
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Bearer);

    let (status, _) = app.get("/api/v1/admin/nope", &[]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_token_does_not_open_admin_routes_and_vice_versa() {
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Bearer);
    let user = app.codec.encode("u1", false, 60).unwrap();
    let admin = app.codec.encode("a1", true, 60).unwrap();

    let (status, body) = app
        .get("/api/v1/admin/me", &[("authorization", bearer(&user).as_str())])
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "admin access required"}));

    let (status, body) = app.get("/api/v1/me", &[("authorization", bearer(&admin).as_str())]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "admin accounts cannot use user routes"}));
}

#[tokio::test]
async fn concurrent_requests_do_not_share_identity() {
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Telegram);

    let mut handles = Vec::new();
    for i in 0..32 {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            use tower::ServiceExt;
            let mut req = Request::builder().uri("/api/v1/me");
            if i % 2 == 0 {
                req = req.header("x-telegram-id", "tg-100");
            }
            let response = router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
            (i, common::split(response).await)
        }));
    }

    for handle in handles {
        let (i, (status, body)) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["user_id"], "u1");
        } else {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({"error": "telegram id header required"}));
        }
    }
}
