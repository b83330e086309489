//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use storefront_client::{
	auth::CredentialPair,
	client::StorefrontClient,
	config::ClientConfig,
	http::ReqwestTransport,
	reqwest::Client as ReqwestClient,
	store::{MemoryStore, SessionStore},
};

pub type TestClient = StorefrontClient<ReqwestTransport>;

/// Builds a reqwest-backed client rooted at `<mock server>/api` with an empty session.
pub fn build_client(server: &MockServer) -> (TestClient, Arc<MemoryStore>) {
	build_client_with(server, MemoryStore::default())
}

/// Builds a reqwest-backed client whose session already holds `access` + `refresh`.
pub fn build_signed_in_client(
	server: &MockServer,
	access: &str,
	refresh: &str,
) -> (TestClient, Arc<MemoryStore>) {
	build_client_with(server, MemoryStore::with_credentials(CredentialPair::new(access, refresh)))
}

/// Builds a reqwest transport that accepts the self-signed certificates `httpmock` serves.
pub fn test_reqwest_transport() -> ReqwestTransport {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure reqwest client for tests.");

	ReqwestTransport::with_client(client)
}

pub fn build_client_with(server: &MockServer, store: MemoryStore) -> (TestClient, Arc<MemoryStore>) {
	let store_backend = Arc::new(store);
	let store: Arc<dyn SessionStore> = store_backend.clone();
	let config = ClientConfig::builder()
		.base_url(server.url("/api"))
		.build()
		.expect("Mock server URL should form a valid client config.");
	let client = StorefrontClient::with_transport(config, store, Arc::new(test_reqwest_transport()));

	(client, store_backend)
}

pub fn profile_json() -> serde_json::Value {
	serde_json::json!({
		"id": 3,
		"email": "a@b.com",
		"first_name": "Asha",
		"last_name": "Rao",
		"phone": "9876543210",
		"dob": "1999-04-12"
	})
}

pub fn unauthorized_json() -> serde_json::Value {
	serde_json::json!({
		"detail": "Given token not valid for any token type",
		"code": "token_not_valid"
	})
}
