//! Integration tests for the authenticated request client.
//!
//! Covers renewal-and-retry, 204 handling, error normalization, header
//! merging, timeouts and cancellation against a mock backend.

mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use portal::{ApiClient, ApiError, PortalConfig, RequestOptions};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Value};
use support::{can_bind_localhost, client_for, closed_origin};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

macro_rules! require_localhost {
    () => {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
    };
}

#[tokio::test]
async fn test_renews_once_and_retries_with_new_credential() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet-info/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Token expired" })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh/"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "access_token=renewed; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wallet-info/"))
        .and(header("cookie", "access_token=renewed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "currency": "USD", "balance": "42.50" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .fetch_with_auth("/wallet-info/", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(body, Some(json!({ "currency": "USD", "balance": "42.50" })));
}

#[tokio::test]
async fn test_second_401_after_renewal_is_not_renewed_again() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/deposits/create/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Not authenticated" })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_with_auth("/deposits/create/", RequestOptions::get())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Request {
            status: 401,
            message: "Not authenticated".to_string()
        }
    );
}

#[tokio::test]
async fn test_failed_renewal_surfaces_original_401() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crypto-wallets/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Refresh token expired" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_with_auth("/crypto-wallets/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Request failed with status 401");
}

#[tokio::test]
async fn test_retry_disabled_skips_renewal() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/check_admin_auth/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_with_auth("/check_admin_auth/", RequestOptions::get().without_retry())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_no_content_skips_body_parsing() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/update-avatar/"))
        .respond_with(ResponseTemplate::new(204).set_body_string("{not json"))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::post(&json!({ "image_url": "https://cdn.example.com/a.png" })).unwrap();

    assert_eq!(client.fetch_with_auth("/update-avatar/", options.clone()).await, Ok(None));
    let typed: Option<Value> = client.fetch("/update-avatar/", options).await.unwrap();
    assert_eq!(typed, None);
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/complete-profile/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let options = RequestOptions::post(&json!({})).unwrap();
    let body = client_for(&server)
        .fetch_with_auth("/complete-profile/", options)
        .await
        .unwrap();

    assert_eq!(body, Some(Value::Null));
}

#[tokio::test]
async fn test_connection_failure_is_network_error_naming_origin() {
    require_localhost!();
    let origin = closed_origin();
    let client = ApiClient::new(&PortalConfig::new(origin.clone())).unwrap();

    let err = client
        .fetch_with_auth("/wallet-info/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(err.is_network(), "expected network error, got {err:?}");
    assert!(err.message().contains(&origin));
}

#[tokio::test]
async fn test_server_error_uses_detail() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet-info/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "x" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_with_auth("/wallet-info/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(!err.is_network());
    assert_eq!(
        err,
        ApiError::Request {
            status: 500,
            message: "x".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_without_detail_serializes_body() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Insufficient balance" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/deposits/create/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::post(&json!({})).unwrap();

    let err = client.fetch_with_auth("/exchange/", options.clone()).await.unwrap_err();
    assert_eq!(err.message(), r#"{"error":"Insufficient balance"}"#);

    let err = client.fetch_with_auth("/deposits/create/", options).await.unwrap_err();
    assert_eq!(err.message(), "Request failed with status 502");
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet-info/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_with_auth("/wallet-info/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_caller_headers_merge_over_default_content_type() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exchange/"))
        .and(header("content-type", "application/json"))
        .and(header("x-client", "portal-tests"))
        .and(body_json(json!({ "amount": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/exchange/"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "plain" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let options = RequestOptions::post(&json!({ "amount": 5 }))
        .unwrap()
        .header(HeaderName::from_static("x-client"), HeaderValue::from_static("portal-tests"));
    let body = client.fetch_with_auth("/exchange/", options).await.unwrap();
    assert_eq!(body, Some(json!({ "message": "ok" })));

    let options = RequestOptions::get()
        .method(Method::PUT)
        .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    let body = client.fetch_with_auth("/exchange/", options).await.unwrap();
    assert_eq!(body, Some(json!({ "message": "plain" })));
}

#[tokio::test]
async fn test_timeout_covers_the_whole_call() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallet-info/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_with_auth(
            "/wallet-info/",
            RequestOptions::get().timeout(Duration::from_millis(100)),
        )
        .await
        .unwrap_err();

    match err {
        ApiError::Timeout { origin, after } => {
            assert_eq!(origin, client.origin());
            assert_eq!(after, Duration::from_millis(100));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cancellation_token_aborts_call() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crypto-wallets/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client_for(&server)
        .fetch_with_auth("/crypto-wallets/", RequestOptions::get().cancel_with(token))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Cancelled);
}

#[tokio::test]
async fn test_login_cookie_is_sent_until_cleared() {
    require_localhost!();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/log-in/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sessionid=abc123; Path=/; HttpOnly")
                .set_body_json(json!({ "message": "Login successful" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check_admin_auth/"))
        .and(header("cookie", "sessionid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "is_authenticated": true, "user": null })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let login_body = json!({ "email": "ada@example.com", "password": "secret" });
    let _: Value = client.post("/log-in/", &login_body).await.unwrap();

    let url = reqwest::Url::parse(client.origin()).unwrap();
    assert!(client.credentials().has_credentials(&url));

    let status: Value = client.get("/check_admin_auth/").await.unwrap();
    assert_eq!(status["is_authenticated"], json!(true));

    client.clear_credentials();
    assert!(!client.credentials().has_credentials(&url));
}

#[tokio::test]
async fn test_renewal_against_unreachable_backend_is_false() {
    require_localhost!();
    let client = ApiClient::new(&PortalConfig::new(closed_origin())).unwrap();

    assert!(!client.renew_session().await);
}

/// Answers every request with `401`, except the renewal call, whose
/// connection is dropped without a response.
async fn spawn_backend_dropping_renewal(hits: Arc<AtomicUsize>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let hits = Arc::clone(&hits);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                if request.starts_with(b"POST /refresh/") {
                    hits.fetch_add(1, Ordering::SeqCst);
                    return;
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                    .await;
            });
        }
    });

    origin
}

#[tokio::test]
async fn test_unreachable_renewal_surfaces_original_401() {
    require_localhost!();
    let renewal_hits = Arc::new(AtomicUsize::new(0));
    let origin = spawn_backend_dropping_renewal(Arc::clone(&renewal_hits)).await;
    let client = ApiClient::new(&PortalConfig::new(origin)).unwrap();

    let err = client
        .fetch_with_auth("/wallet-info/", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(!err.is_network(), "expected request error, got {err:?}");
    assert_eq!(
        err,
        ApiError::Request {
            status: 401,
            message: "Request failed with status 401".to_string()
        }
    );
    assert!(renewal_hits.load(Ordering::SeqCst) >= 1);
}
