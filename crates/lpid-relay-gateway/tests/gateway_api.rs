//! Gateway behavior with the outbound boundaries stubbed out.
//!
//! These tests pin the request-gate contract and the relay properties:
//! what reaches the handlers, what reaches the upstream clients, and what
//! the caller sees back.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    AUTHORIZATION, CONTENT_TYPE,
};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt as _;

use lpid_relay_auth::{MockExchanger, PlatformToken};
use lpid_relay_gateway::{create_router, GatewayState};
use lpid_relay_upstream::{RelayTarget, RelayedResponse, UpstreamClient, UpstreamError};

/// What one `fetch` invocation looked like from the upstream's side.
#[derive(Debug, Clone)]
struct SeenFetch {
    target: RelayTarget,
    token: String,
    party: Option<String>,
}

/// Replays a canned upstream response and records every fetch.
struct StubUpstream {
    status: u16,
    body: Vec<u8>,
    calls: AtomicUsize,
    seen: Mutex<Vec<SeenFetch>>,
}

impl StubUpstream {
    fn replying(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            body: body.to_vec(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_seen(&self) -> SeenFetch {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl UpstreamClient for StubUpstream {
    async fn fetch(
        &self,
        target: RelayTarget,
        token: &PlatformToken,
        party: Option<&str>,
    ) -> Result<RelayedResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenFetch {
            target,
            token: token.as_str().to_string(),
            party: party.map(ToString::to_string),
        });

        Ok(RelayedResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn router_with(
    exchanger: MockExchanger,
    upstream: StubUpstream,
) -> (Router, Arc<MockExchanger>, Arc<StubUpstream>) {
    let exchanger = Arc::new(exchanger);
    let upstream = Arc::new(upstream);
    let router = create_router(GatewayState::new(
        Arc::clone(&exchanger),
        Arc::clone(&upstream),
    ));
    (router, exchanger, upstream)
}

fn happy_router() -> (Router, Arc<MockExchanger>, Arc<StubUpstream>) {
    router_with(
        MockExchanger::succeeding("tok123"),
        StubUpstream::replying(200, br#"{"ok":true}"#),
    )
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn authed_get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(AUTHORIZATION, "idp-token")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_authorization_is_forbidden() {
    let (router, exchanger, upstream) = happy_router();

    let (status, _, _) = send(&router, get("/api/v1/company")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(exchanger.calls(), 0);
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn empty_authorization_is_forbidden() {
    let (router, exchanger, _) = happy_router();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/company")
        .header(AUTHORIZATION, "")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(exchanger.calls(), 0);
}

#[tokio::test]
async fn forbidden_response_carries_cors_headers() {
    let (router, _, _) = happy_router();

    let (status, headers, _) = send(&router, get("/api/v1/lpid")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_answers_no_content_without_invoking_handlers() {
    let (router, exchanger, upstream) = happy_router();

    // No Authorization header at all; preflight must still pass.
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/company")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
    assert_eq!(
        headers[ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization, Party"
    );
    assert_eq!(exchanger.calls(), 0);
    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn company_success_copies_upstream_through() {
    let (router, exchanger, upstream) = happy_router();

    let (status, headers, body) = send(&router, authed_get("/api/v1/company")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(&body[..], br#"{"ok":true}"#);

    assert_eq!(exchanger.calls(), 1);
    assert_eq!(upstream.calls(), 1);

    let seen = upstream.last_seen();
    assert_eq!(seen.target, RelayTarget::CompanyParties);
    assert_eq!(seen.token, "Bearer tok123");
    assert_eq!(seen.party, None);
}

#[tokio::test]
async fn company_never_forwards_party() {
    let (router, _, upstream) = happy_router();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/company")
        .header(AUTHORIZATION, "idp-token")
        .header("Party", "987654321")
        .body(Body::empty())
        .unwrap();
    send(&router, request).await;

    assert_eq!(upstream.last_seen().party, None);
}

#[tokio::test]
async fn lpid_forwards_party_verbatim() {
    let (router, _, upstream) = happy_router();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/lpid")
        .header(AUTHORIZATION, "idp-token")
        .header("Party", "987654321")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::OK);

    let seen = upstream.last_seen();
    assert_eq!(seen.target, RelayTarget::LpidData);
    assert_eq!(seen.token, "Bearer tok123");
    assert_eq!(seen.party.as_deref(), Some("987654321"));
}

#[tokio::test]
async fn lpid_without_party_forwards_empty_value() {
    let (router, _, upstream) = happy_router();

    send(&router, authed_get("/api/v1/lpid")).await;

    assert_eq!(upstream.last_seen().party.as_deref(), Some(""));
}

#[tokio::test]
async fn failed_exchange_suppresses_the_data_call() {
    let (router, exchanger, upstream) = router_with(
        MockExchanger::failing(),
        StubUpstream::replying(200, br#"{"ok":true}"#),
    );

    let (status, _, body) = send(&router, authed_get("/api/v1/lpid")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(exchanger.calls(), 1);
    assert_eq!(upstream.calls(), 0);

    // Fixed generic message; the upstream's status text must not leak.
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "exchange_failed");
    assert!(!String::from_utf8_lossy(&body).contains("403"));
}

#[tokio::test]
async fn upstream_error_status_is_passed_through() {
    let (router, _, _) = router_with(
        MockExchanger::succeeding("tok123"),
        StubUpstream::replying(502, b"upstream broke"),
    );

    let (status, headers, body) = send(&router, authed_get("/api/v1/company")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    assert_eq!(&body[..], b"upstream broke");
}

#[tokio::test]
async fn identical_requests_are_never_cached() {
    let (router, exchanger, upstream) = happy_router();

    for _ in 0..2 {
        send(&router, authed_get("/api/v1/company")).await;
    }

    assert_eq!(exchanger.calls(), 2);
    assert_eq!(upstream.calls(), 2);
}

#[tokio::test]
async fn health_is_public() {
    let (router, _, _) = happy_router();

    let (status, _, body) = send(&router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn unknown_paths_are_not_gated() {
    let (router, exchanger, _) = happy_router();

    let (status, _, _) = send(&router, get("/api/v2/other")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(exchanger.calls(), 0);
}
