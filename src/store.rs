//! Session storage contracts and built-in stores for credentials and the cached profile.
//!
//! A session holds two records under fixed keys: the [`CredentialPair`] under
//! [`CREDENTIALS_KEY`] and the [`UserProfile`] snapshot under [`USER_KEY`]. Both are
//! cleared together on logout or when credential renewal fails for good.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret, UserProfile},
};

/// Fixed key holding the serialized [`CredentialPair`].
pub const CREDENTIALS_KEY: &str = "authTokens";
/// Fixed key holding the serialized [`UserProfile`] snapshot.
pub const USER_KEY: &str = "authUser";

/// Boxed future returned by every [`SessionStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Durable client-side storage for one storefront session.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Fetches the stored credential pair, if any.
	fn load_credentials(&self) -> StoreFuture<'_, Option<CredentialPair>>;

	/// Persists or replaces the credential pair.
	fn save_credentials(&self, pair: CredentialPair) -> StoreFuture<'_, ()>;

	/// Atomically swaps in a renewed access credential if the stored refresh credential
	/// still equals `expected_refresh`.
	fn rotate_access<'a>(
		&'a self,
		expected_refresh: &'a str,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> StoreFuture<'a, RotateOutcome>;

	/// Fetches the cached user profile, if any.
	fn load_user(&self) -> StoreFuture<'_, Option<UserProfile>>;

	/// Persists or replaces the cached user profile.
	fn save_user(&self, user: UserProfile) -> StoreFuture<'_, ()>;

	/// Removes both the credential pair and the user profile.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Result of a [`SessionStore::rotate_access`] attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateOutcome {
	/// The refresh credential matched and the access credential was replaced.
	Updated,
	/// A pair exists but carries a different refresh credential (a new login happened).
	RefreshMismatch,
	/// No pair is stored (the session was cleared).
	Missing,
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Everything a store keeps for one session, keyed the way it is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
	/// Stored credential pair.
	#[serde(rename = "authTokens", default, skip_serializing_if = "Option::is_none")]
	pub credentials: Option<CredentialPair>,
	/// Stored user profile.
	#[serde(rename = "authUser", default, skip_serializing_if = "Option::is_none")]
	pub user: Option<UserProfile>,
}
impl SessionSnapshot {
	/// Returns `true` when neither record is present.
	pub fn is_empty(&self) -> bool {
		self.credentials.is_none() && self.user.is_none()
	}

	/// Applies the compare-and-swap rule shared by every store.
	pub fn rotate(
		&mut self,
		expected_refresh: &str,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> RotateOutcome {
		match self.credentials.take() {
			Some(pair)
				if pair.refresh.as_ref().map(TokenSecret::expose) == Some(expected_refresh) =>
			{
				self.credentials = Some(pair.renewed(access, refresh));

				RotateOutcome::Updated
			},
			Some(pair) => {
				self.credentials = Some(pair);

				RotateOutcome::RefreshMismatch
			},
			None => RotateOutcome::Missing,
		}
	}

	/// Drops both records.
	pub fn clear(&mut self) {
		self.credentials = None;
		self.user = None;
	}
}
