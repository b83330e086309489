//! Simple file-backed [`SessionStore`] that keeps a session across process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret, UserProfile},
	store::{RotateOutcome, SessionSnapshot, SessionStore, StoreError, StoreFuture},
};

/// Persists the session to a JSON document after each mutation.
///
/// The document is an object with the fixed `authTokens` and `authUser` keys.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<SessionSnapshot>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Returns the backing file path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<SessionSnapshot, StoreError> {
		if !path.exists() {
			return Ok(SessionSnapshot::default());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(SessionSnapshot::default());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &SessionSnapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize session snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn mutate<R>(&self, apply: impl FnOnce(&mut SessionSnapshot) -> R) -> Result<R, StoreError> {
		let mut guard = self.inner.write();
		let result = apply(&mut *guard);

		self.persist_locked(&guard)?;

		Ok(result)
	}
}
impl SessionStore for FileStore {
	fn load_credentials(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		Box::pin(async move { Ok(self.inner.read().credentials.clone()) })
	}

	fn save_credentials(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.mutate(|snapshot| snapshot.credentials = Some(pair)) })
	}

	fn rotate_access<'a>(
		&'a self,
		expected_refresh: &'a str,
		access: TokenSecret,
		refresh: Option<TokenSecret>,
	) -> StoreFuture<'a, RotateOutcome> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let outcome = guard.rotate(expected_refresh, access, refresh);

			if matches!(outcome, RotateOutcome::Updated) {
				self.persist_locked(&guard)?;
			}

			Ok(outcome)
		})
	}

	fn load_user(&self) -> StoreFuture<'_, Option<UserProfile>> {
		Box::pin(async move { Ok(self.inner.read().user.clone()) })
	}

	fn save_user(&self, user: UserProfile) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.mutate(|snapshot| snapshot.user = Some(user)) })
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move { self.mutate(SessionSnapshot::clear) })
	}
}
