//! Client configuration: backend location, transport limits, and media URL resolution.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, error::ConfigError};

/// Backend base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Validated client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Backend API root; always ends with `/` so relative paths join beneath it.
	pub base_url: Url,
	/// Per-request timeout applied by the bundled transport.
	pub timeout: StdDuration,
	/// `User-Agent` header sent by the bundled transport.
	pub user_agent: String,
}
impl ClientConfig {
	/// Returns a builder seeded with the defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Resolves an API path such as `/cart/` against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source })
	}

	/// Resolves an API path and appends query pairs in order.
	pub fn endpoint_with_query(
		&self,
		path: &str,
		query: &[(String, String)],
	) -> Result<Url, ConfigError> {
		let mut url = self.endpoint(path)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}

	/// Turns a product image path into an absolute URL.
	///
	/// Absolute `http(s)` URLs pass through, empty paths stay empty, and anything else
	/// is rooted at the site origin (the base URL without its trailing `/api`).
	pub fn media_url(&self, path: &str) -> String {
		if path.is_empty() {
			return String::new();
		}
		if path.starts_with("http") {
			return path.to_owned();
		}

		let root = self.base_url.as_str().trim_end_matches('/');
		let root = root.strip_suffix("/api").unwrap_or(root);

		if path.starts_with('/') { format!("{root}{path}") } else { format!("{root}/{path}") }
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	/// Raw base URL.
	pub base_url: String,
	/// Per-request timeout.
	pub timeout: StdDuration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_owned(),
			timeout: DEFAULT_TIMEOUT,
			user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_owned(),
		}
	}
}
impl ClientConfigBuilder {
	/// Sets the backend API root, e.g. `https://shop.example.com/api`.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Sets the per-request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let mut base_url = Url::parse(self.base_url.trim()).map_err(|source| {
			ConfigError::InvalidBaseUrl { url: self.base_url.clone(), source }
		})?;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { scheme: base_url.scheme().to_owned() });
		}
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: base_url.to_string() });
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		base_url.set_query(None);
		base_url.set_fragment(None);

		Ok(ClientConfig { base_url, timeout: self.timeout, user_agent: self.user_agent })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config(base: &str) -> ClientConfig {
		ClientConfig::builder().base_url(base).build().expect("Config fixture should build.")
	}

	#[test]
	fn defaults_point_at_local_backend() {
		let config = ClientConfig::builder().build().expect("Default config should build.");

		assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/");
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
		assert!(config.user_agent.starts_with("storefront-client/"));
	}

	#[test]
	fn builder_rejects_invalid_settings() {
		let err = ClientConfig::builder()
			.base_url("ftp://shop.example.com/api")
			.build()
			.expect_err("Non-HTTP schemes should be rejected.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { ref scheme } if scheme == "ftp"));

		let err = ClientConfig::builder()
			.base_url("not a url")
			.build()
			.expect_err("Unparseable URLs should be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

		let err = ClientConfig::builder()
			.timeout(StdDuration::ZERO)
			.build()
			.expect_err("Zero timeouts should be rejected.");

		assert!(matches!(err, ConfigError::ZeroTimeout));
	}

	#[test]
	fn endpoints_join_beneath_the_api_root() {
		let config = config("https://shop.example.com/api");

		assert_eq!(
			config.endpoint("/auth/token/refresh/").expect("Refresh path should join.").as_str(),
			"https://shop.example.com/api/auth/token/refresh/"
		);
		assert_eq!(
			config.endpoint("products/12/").expect("Relative path should join.").as_str(),
			"https://shop.example.com/api/products/12/"
		);

		let with_query = config
			.endpoint_with_query(
				"/products/",
				&[("collection".into(), "t shirts".into()), ("minPrice".into(), "499".into())],
			)
			.expect("Query should append.");

		assert_eq!(
			with_query.as_str(),
			"https://shop.example.com/api/products/?collection=t+shirts&minPrice=499"
		);
		assert_eq!(
			config.endpoint_with_query("/cart/", &[]).expect("Bare path should join.").as_str(),
			"https://shop.example.com/api/cart/"
		);
	}

	#[test]
	fn media_urls_resolve_against_site_root() {
		let config = config("http://localhost:8000/api/");

		assert_eq!(config.media_url(""), "");
		assert_eq!(
			config.media_url("https://cdn.example.com/p/1.jpg"),
			"https://cdn.example.com/p/1.jpg"
		);
		assert_eq!(
			config.media_url("/media/products/tee.jpg"),
			"http://localhost:8000/media/products/tee.jpg"
		);
		assert_eq!(
			config.media_url("media/products/tee.jpg"),
			"http://localhost:8000/media/products/tee.jpg"
		);
		assert_eq!(
			self::config("https://shop.example.com/v2").media_url("/media/a.png"),
			"https://shop.example.com/v2/media/a.png"
		);
	}
}
