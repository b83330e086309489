//! Transport primitives for storefront API calls.
//!
//! The module exposes [`ApiRequest`], [`ApiResponse`], and the [`Transport`] trait so
//! downstream crates can plug in their own HTTP stack without losing the client's
//! interception pipeline. A transport only moves bytes: it never reads the session
//! store, never retries, and reports every HTTP status (including 401) as a successful
//! [`ApiResponse`]. Only failures to obtain a response at all become [`TransportError`]s.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};
use crate::{_prelude::*, auth::TokenSecret, error::TransportError};

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of delivering storefront requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back a client
/// shared across tasks, and the futures they return must be `Send`.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` to the fully resolved `url` and returns the raw response.
	///
	/// Attach [`ApiRequest::bearer`] as an `Authorization: Bearer` header when present and
	/// encode [`ApiRequest::body`] as JSON.
	fn send<'a>(&'a self, url: Url, request: &'a ApiRequest) -> TransportFuture<'a>;
}

/// HTTP methods used by the storefront backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Returns the canonical method token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// One outbound call, kept intact so it can be replayed after credential renewal.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the configured base URL (a leading `/` is ignored).
	pub path: String,
	/// Query pairs appended in order.
	pub query: Vec<(String, String)>,
	/// JSON body, if any.
	pub body: Option<serde_json::Value>,
	/// Bearer credential attached by the request interceptor or a replay.
	pub bearer: Option<TokenSecret>,
	/// Set once the request has been through 401 recovery; a retried request is never
	/// recovered again.
	pub retried: bool,
	/// Whether a 401 on this request may trigger credential renewal.
	pub intercept: bool,
}
impl ApiRequest {
	/// Creates a request for `method` + `path` with no query, body, or credential.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: None,
			bearer: None,
			retried: false,
			intercept: true,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Serializes `body` as the JSON payload.
	pub fn with_json<B>(mut self, body: &B) -> Result<Self, crate::error::ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body)?);

		Ok(self)
	}

	/// Appends query pairs.
	pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.query.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));

		self
	}

	/// Excludes this request from 401 recovery.
	pub fn without_interception(mut self) -> Self {
		self.intercept = false;

		self
	}
}

/// Raw backend response: status plus body bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes (empty for 204).
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Wraps a status + body pair.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns `true` for 401.
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Returns `true` when the response carries no body.
	pub fn is_empty(&self) -> bool {
		self.body.iter().all(u8::is_ascii_whitespace)
	}

	/// Decodes the body as JSON, naming the failing field path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source, status: self.status })
	}

	/// Extracts a human-readable failure message.
	///
	/// Prefers the backend's `{"detail": ...}` field, then flattens field-error maps such
	/// as `{"email": ["Enter a valid email address."]}`, and finally falls back to the
	/// bare status.
	pub fn detail(&self) -> String {
		let fallback = || format!("HTTP {}", self.status);
		let Ok(serde_json::Value::Object(map)) =
			serde_json::from_slice::<serde_json::Value>(&self.body)
		else {
			return fallback();
		};

		if let Some(serde_json::Value::String(detail)) = map.get("detail") {
			return detail.to_owned();
		}

		let fields = map
			.iter()
			.filter_map(|(field, value)| {
				let messages = match value {
					serde_json::Value::String(message) => message.to_owned(),
					serde_json::Value::Array(items) => items
						.iter()
						.filter_map(serde_json::Value::as_str)
						.collect::<Vec<_>>()
						.join(" "),
					_ => return None,
				};

				(!messages.is_empty()).then(|| format!("{field}: {messages}"))
			})
			.collect::<Vec<_>>();

		if fields.is_empty() { fallback() } else { fields.join("; ") }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client honoring the configured timeout and user agent.
	pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.user_agent(config.user_agent.as_str())
			.build()
			.map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn send<'a>(&'a self, url: Url, request: &'a ApiRequest) -> TransportFuture<'a> {
		Box::pin(async move {
			let mut builder =
				self.0.request(request.method.into(), url).header(ACCEPT, "application/json");

			if let Some(bearer) = request.bearer.as_ref() {
				builder = builder.bearer_auth(bearer.expose());
			}
			if let Some(body) = request.body.as_ref() {
				let bytes = serde_json::to_vec(body).map_err(TransportError::network)?;

				builder = builder.header(CONTENT_TYPE, "application/json").body(bytes);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse::new(status, body))
		})
	}
}
