// std
use std::sync::Arc;
// crates.io
use time::macros;
// self
use storefront_client::{
	auth::{CredentialPair, TokenSecret, UserProfile},
	store::{FileStore, MemoryStore, RotateOutcome, SessionStore},
};

fn profile() -> UserProfile {
	UserProfile {
		id: Some(3),
		email: "a@b.com".into(),
		first_name: "Asha".into(),
		last_name: "Rao".into(),
		phone: "9876543210".into(),
		dob: Some(macros::date!(1999 - 04 - 12)),
	}
}

async fn exercise_store(store: &dyn SessionStore) {
	assert!(store.load_credentials().await.expect("Empty store should load.").is_none());

	store
		.save_credentials(CredentialPair::new("tokA", "tokR"))
		.await
		.expect("Saving credentials should succeed.");
	store.save_user(profile()).await.expect("Saving the profile should succeed.");

	let outcome = store
		.rotate_access("stale-refresh", TokenSecret::new("tokX"), None)
		.await
		.expect("Mismatched rotation should not error.");

	assert_eq!(outcome, RotateOutcome::RefreshMismatch);

	let outcome = store
		.rotate_access("tokR", TokenSecret::new("tokA2"), None)
		.await
		.expect("Matching rotation should succeed.");

	assert_eq!(outcome, RotateOutcome::Updated);
	assert_eq!(
		store.load_credentials().await.expect("Credentials should load."),
		Some(CredentialPair::new("tokA2", "tokR"))
	);
	assert_eq!(store.load_user().await.expect("Profile should load."), Some(profile()));

	store.clear().await.expect("Clearing should succeed.");

	assert!(store.load_credentials().await.expect("Credentials should load.").is_none());
	assert!(store.load_user().await.expect("Profile should load.").is_none());

	let outcome = store
		.rotate_access("tokR", TokenSecret::new("tokA3"), None)
		.await
		.expect("Rotation on an empty store should not error.");

	assert_eq!(outcome, RotateOutcome::Missing);
	assert!(store.load_credentials().await.expect("Credentials should load.").is_none());
}

#[tokio::test]
async fn memory_store_honors_session_contract() {
	exercise_store(&MemoryStore::default()).await;
}

#[tokio::test]
async fn file_store_honors_session_contract() {
	let path = std::env::temp_dir()
		.join(format!("storefront_client_contract_{}.json", std::process::id()));
	let store = FileStore::open(&path).expect("File store should open.");

	exercise_store(&store).await;

	std::fs::remove_file(&path).expect("Snapshot file should be removable.");
}

#[tokio::test]
async fn concurrent_rotations_update_exactly_once() {
	let store = Arc::new(MemoryStore::with_credentials(CredentialPair::new("tokA", "tokR")));
	let mut handles = Vec::new();

	for attempt in 0..8 {
		let store = store.clone();

		handles.push(tokio::spawn(async move {
			let access = TokenSecret::new(format!("tokA-{attempt}"));
			let refresh = TokenSecret::new(format!("tokR-{attempt}"));

			store.rotate_access("tokR", access, Some(refresh)).await.expect("Rotation should not error.")
		}));
	}

	let mut updated = 0;

	for handle in handles {
		if handle.await.expect("Rotation task should not panic.") == RotateOutcome::Updated {
			updated += 1;
		}
	}

	assert_eq!(updated, 1);
}
