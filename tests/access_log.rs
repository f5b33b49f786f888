//! The access log sees every request, including the ones a gate refused.

mod common;

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use tracing_subscriber::fmt::MakeWriter;

use common::app;
use fx_gate::config::{AdminAuthMode, UserAuthMode};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
}

#[tokio::test]
async fn rejected_request_is_logged_with_method_path_and_status() {
    let (captured, _guard) = capture();
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Bearer);

    let (status, _) = app.get("/api/v1/admin/me", &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let log = captured.text();
    let line = log
        .lines()
        .find(|l| l.contains("finished processing request"))
        .unwrap_or_else(|| panic!("no access log line in:\n{log}"));
    assert!(line.contains("method=GET"), "{line}");
    assert!(line.contains("/api/v1/admin/me"), "{line}");
    assert!(line.contains("status=401"), "{line}");
    assert!(log.contains("admin gate rejected request"), "{log}");
}

#[tokio::test]
async fn credentials_never_reach_the_log() {
    let (captured, _guard) = capture();
    let app = app(AdminAuthMode::Bearer, UserAuthMode::Telegram);
    let token = app.codec.encode("a1", false, 60).unwrap();
    let header = common::bearer(&token);

    let (status, _) = app
        .get("/api/v1/admin/me", &[("authorization", header.as_str())])
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/v1/me", &[("x-telegram-id", "tg-100")]).await;
    assert_eq!(status, StatusCode::OK);

    let log = captured.text();
    assert!(log.contains("status=200"), "{log}");
    assert!(!log.contains(&token), "{log}");
    assert!(!log.contains("tg-100"), "{log}");
}
