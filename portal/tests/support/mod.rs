//! Shared helpers for the integration tests.

#![allow(dead_code)]

use portal::{ApiClient, PortalConfig};
use wiremock::MockServer;

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&PortalConfig::new(server.uri())).expect("valid mock server config")
}

/// An origin on which nothing is listening.
pub fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
