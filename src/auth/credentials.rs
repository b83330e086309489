//! Bearer credential pair persisted for an authenticated session.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Access + refresh credentials issued by the backend.
///
/// The pair is stored as a single record; its absence means the session is
/// unauthenticated. Renewal replaces `access` in place and keeps `refresh` unless the
/// backend rotates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
	/// Short-lived bearer credential attached to every call.
	pub access: TokenSecret,
	/// Longer-lived credential used only to obtain a new `access` value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh: Option<TokenSecret>,
}
impl CredentialPair {
	/// Creates a renewable pair.
	pub fn new(access: impl Into<TokenSecret>, refresh: impl Into<TokenSecret>) -> Self {
		Self { access: access.into(), refresh: Some(refresh.into()) }
	}

	/// Creates a pair that cannot be renewed.
	pub fn access_only(access: impl Into<TokenSecret>) -> Self {
		Self { access: access.into(), refresh: None }
	}

	/// Returns `true` when a non-empty refresh credential is present.
	pub fn can_renew(&self) -> bool {
		self.refresh.as_ref().is_some_and(|refresh| !refresh.is_empty())
	}

	/// Returns the refresh credential, if it is usable.
	pub fn renewable_refresh(&self) -> Option<&TokenSecret> {
		self.refresh.as_ref().filter(|refresh| !refresh.is_empty())
	}

	/// Replaces the access credential and, when the backend rotated it, the refresh
	/// credential.
	pub fn renewed(mut self, access: TokenSecret, refresh: Option<TokenSecret>) -> Self {
		self.access = access;

		if let Some(refresh) = refresh {
			self.refresh = Some(refresh);
		}

		self
	}
}
