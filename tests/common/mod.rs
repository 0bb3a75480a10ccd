//! Shared test utilities.

#![allow(dead_code)]

use std::time::Duration;

use gemshop::config::GatewayConfig;
use gemshop::gateway::Gateway;
use gemshop::models::Secret;
use gemshop::session::Session;

/// Path prefix the gateway serves its API under.
pub const API_PREFIX: &str = "/api";

/// Builds a gateway client pointed at a mock server.
pub fn gateway_for(server: &mockito::ServerGuard) -> Gateway {
    let mut config = GatewayConfig::new(format!("{}{API_PREFIX}", server.url()));
    config.timeout = Duration::from_secs(5);
    Gateway::new(&config).expect("failed to build gateway")
}

/// A signed-in test user.
pub fn alice() -> Session {
    Session::new("alice", Secret::new("test-token"))
}

/// Expected `Authorization` header for [`alice`].
pub const ALICE_AUTH: &str = "Bearer test-token";
