//! Authenticated storefront client and its request pipeline.
//!
//! [`StorefrontClient`] owns the configuration, the transport, the session store, and the
//! single-flight renewal gate. Every endpoint operation funnels through
//! [`StorefrontClient::execute`], which attaches the stored bearer credential, and on a first
//! 401 renews the credential once for all concurrent callers before replaying each failed
//! request.

mod gate;
mod pipeline;
mod refresh;

pub use refresh::{REFRESH_PATH, RefreshMetrics, RefreshResponse};

// crates.io
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	client::gate::RefreshGate,
	config::ClientConfig,
	http::{ApiRequest, Transport},
	store::SessionStore,
};

/// Client type alias backed by the bundled reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestStorefrontClient = StorefrontClient<ReqwestTransport>;

/// Entry point for every storefront operation.
///
/// Cloning is cheap and every clone shares the transport, the store, the refresh counters, and
/// the renewal gate, so at most one renewal is outstanding across all clones.
pub struct StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	config: ClientConfig,
	transport: Arc<T>,
	store: Arc<dyn SessionStore>,
	refresh_metrics: Arc<RefreshMetrics>,
	gate: Arc<RefreshGate>,
}
impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Creates a client around a caller-supplied transport.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		transport: Arc<T>,
	) -> Self {
		Self {
			config,
			transport,
			store,
			refresh_metrics: Default::default(),
			gate: Default::default(),
		}
	}

	/// Returns the validated configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the session store backing this client.
	pub fn store(&self) -> &Arc<dyn SessionStore> {
		&self.store
	}

	/// Returns the transport used for every call.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Returns the shared renewal counters.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		&self.refresh_metrics
	}

	/// Returns `true` while a credential renewal is outstanding.
	pub fn is_refreshing(&self) -> bool {
		self.gate.is_refreshing()
	}

	/// Resolves a product image path against the configured site root.
	pub fn media_url(&self, path: &str) -> String {
		self.config.media_url(path)
	}

	pub(crate) async fn call_json<R>(&self, request: ApiRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.execute(request).await?.json()
	}

	/// Like [`Self::call_json`] but maps an empty (204) body to `None`.
	pub(crate) async fn call_optional<R>(&self, request: ApiRequest) -> Result<Option<R>>
	where
		R: DeserializeOwned,
	{
		let response = self.execute(request).await?;

		if response.is_empty() { Ok(None) } else { response.json().map(Some) }
	}

	pub(crate) async fn call_empty(&self, request: ApiRequest) -> Result<()> {
		self.execute(request).await.map(|_| ())
	}
}
#[cfg(feature = "reqwest")]
impl StorefrontClient<ReqwestTransport> {
	/// Creates a client with a reqwest transport honoring the configured timeout and user agent.
	pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
		let transport = ReqwestTransport::from_config(&config)?;

		Ok(Self::with_transport(config, store, Arc::new(transport)))
	}
}
impl<T> Clone for StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			transport: self.transport.clone(),
			store: self.store.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
			gate: self.gate.clone(),
		}
	}
}
impl<T> Debug for StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StorefrontClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("refreshing", &self.is_refreshing())
			.field("refresh_metrics", &self.refresh_metrics)
			.finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryStore;

	#[test]
	fn clones_share_gate_and_counters() {
		let config = ClientConfig::builder()
			.base_url("https://shop.example.com/api")
			.build()
			.expect("Shop URL should form a valid client config.");
		let client = ReqwestStorefrontClient::new(config, Arc::new(MemoryStore::default()))
			.expect("Reqwest-backed client should build.");
		let clone = client.clone();

		assert!(Arc::ptr_eq(&client.gate, &clone.gate));
		assert!(Arc::ptr_eq(&client.refresh_metrics, &clone.refresh_metrics));
		assert!(!clone.is_refreshing());
		assert_eq!(
			clone.media_url("/media/products/tee.jpg"),
			"https://shop.example.com/media/products/tee.jpg"
		);

		let rendered = format!("{client:?}");

		assert!(rendered.contains("https://shop.example.com/api/"));
		assert!(rendered.contains("refreshing: false"));
	}
}
