//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret, UserProfile},
	store::{RotateOutcome, SessionSnapshot, SessionStore, StoreFuture},
};

type SharedSnapshot = Arc<RwLock<SessionSnapshot>>;

/// Storage backend that keeps the session in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(SharedSnapshot);
impl MemoryStore {
	/// Creates a store already holding `pair`.
	pub fn with_credentials(pair: CredentialPair) -> Self {
		Self(Arc::new(RwLock::new(SessionSnapshot { credentials: Some(pair), user: None })))
	}

	/// Returns a copy of everything currently stored.
	pub fn snapshot(&self) -> SessionSnapshot {
		self.0.read().clone()
	}

	fn rotate_now(
		snapshot: SharedSnapshot,
		expected_refresh: &str,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> RotateOutcome {
		snapshot.write().rotate(expected_refresh, access, refresh)
	}
}
impl SessionStore for MemoryStore {
	fn load_credentials(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		let snapshot = self.0.clone();

		Box::pin(async move { Ok(snapshot.read().credentials.clone()) })
	}

	fn save_credentials(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		let snapshot = self.0.clone();

		Box::pin(async move {
			snapshot.write().credentials = Some(pair);

			Ok(())
		})
	}

	fn rotate_access<'a>(
		&'a self,
		expected_refresh: &'a str,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> StoreFuture<'a, RotateOutcome> {
		let snapshot = self.0.clone();

		Box::pin(async move { Ok(Self::rotate_now(snapshot, expected_refresh, access, refresh)) })
	}

	fn load_user(&self) -> StoreFuture<'_, Option<UserProfile>> {
		let snapshot = self.0.clone();

		Box::pin(async move { Ok(snapshot.read().user.clone()) })
	}

	fn save_user(&self, user: UserProfile) -> StoreFuture<'_, ()> {
		let snapshot = self.0.clone();

		Box::pin(async move {
			snapshot.write().user = Some(user);

			Ok(())
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		let snapshot = self.0.clone();

		Box::pin(async move {
			snapshot.write().clear();

			Ok(())
		})
	}
}
