//! Client-level error types shared across the request pipeline, stores, and endpoint operations.

// self
use crate::{_prelude::*, http::ApiResponse};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Backend answered 401 and the pipeline could not recover.
	#[error("Request was not authorized: {detail}")]
	Unauthorized {
		/// Backend-supplied detail message.
		detail: String,
	},
	/// The credential renewal call itself failed; stored credentials were cleared.
	#[error("Credential renewal failed.")]
	RefreshFailed {
		/// Failure returned by the renewal call.
		#[source]
		source: Box<Error>,
	},
	/// Backend answered 404.
	#[error("Resource not found: {detail}")]
	NotFound {
		/// Backend-supplied detail message.
		detail: String,
	},
	/// Backend rejected the request with any other non-success status.
	#[error("Backend rejected the request with status {status}: {detail}")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Backend-supplied detail message, or a flattened field-error map.
		detail: String,
	},
	/// Response body did not match the expected shape.
	#[error("Response body (status {status}) could not be decoded.")]
	Decode {
		/// Structured parsing failure naming the offending field path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the undecodable response.
		status: u16,
	},
}
impl Error {
	/// Classifies a non-success response into the matching variant.
	pub fn from_response(response: &ApiResponse) -> Self {
		let detail = response.detail();

		match response.status {
			401 => Self::Unauthorized { detail },
			404 => Self::NotFound { detail },
			status => Self::Api { status, detail },
		}
	}

	/// Returns the HTTP status behind this error, when one exists.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Unauthorized { .. } => Some(401),
			Self::NotFound { .. } => Some(404),
			Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
			Self::RefreshFailed { source } => source.status(),
			_ => None,
		}
	}

	/// Returns `true` when the session is no longer usable and the caller should log in again.
	pub fn is_auth_failure(&self) -> bool {
		matches!(self, Self::Unauthorized { .. } | Self::RefreshFailed { .. })
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http or https.
	#[error("Base URL scheme `{scheme}` is not supported; use http or https.")]
	UnsupportedScheme {
		/// Rejected scheme.
		scheme: String,
	},
	/// Base URL cannot have relative paths joined onto it.
	#[error("Base URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Rejected URL.
		url: String,
	},
	/// Request timeout must be non-zero.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Endpoint path cannot be joined onto the base URL.
	#[error("Endpoint path `{path}` is invalid.")]
	InvalidPath {
		/// Path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the storefront backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the storefront backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn responses_classify_by_status() {
		let unauthorized = Error::from_response(&ApiResponse::new(
			401,
			br#"{"detail":"Given token not valid for any token type"}"#.to_vec(),
		));

		assert!(matches!(
			&unauthorized,
			Error::Unauthorized { detail } if detail == "Given token not valid for any token type"
		));
		assert!(unauthorized.is_auth_failure());

		let missing = Error::from_response(&ApiResponse::new(
			404,
			br#"{"detail":"Product not found."}"#.to_vec(),
		));

		assert!(matches!(missing, Error::NotFound { .. }));
		assert_eq!(missing.status(), Some(404));

		let rejected = Error::from_response(&ApiResponse::new(
			400,
			br#"{"detail":"Cart is empty."}"#.to_vec(),
		));

		assert!(matches!(&rejected, Error::Api { status: 400, detail } if detail == "Cart is empty."));
		assert!(!rejected.is_auth_failure());
	}

	#[test]
	fn refresh_failure_exposes_renewal_error_as_source() {
		let err = Error::RefreshFailed {
			source: Box::new(Error::Unauthorized { detail: "Token is blacklisted".into() }),
		};
		let source = StdError::source(&err).expect("Refresh failure should expose its cause.");

		assert_eq!(source.to_string(), "Request was not authorized: Token is blacklisted");
		assert_eq!(err.status(), Some(401));
		assert!(err.is_auth_failure());
	}
}
