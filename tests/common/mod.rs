//! Shared helpers for Beepsend integration tests.

use beepsend::{Auth, BeepsendClient, TokenPlacement};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";
#[allow(dead_code)]
pub const TEST_HLR_TOKEN: &str = "hlr-token";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, sending the token as a header.
pub fn client_for(server: &MockServer) -> BeepsendClient {
    client_with(server, auth(), TokenPlacement::Header)
}

pub fn client_with(server: &MockServer, auth: Auth, placement: TokenPlacement) -> BeepsendClient {
    BeepsendClient::builder(auth)
        .base_url(server.uri())
        .token_placement(placement)
        .build()
        .expect("mock server uri should be a valid base url")
}

pub fn auth() -> Auth {
    Auth::token(TEST_TOKEN).expect("test token is not empty")
}
