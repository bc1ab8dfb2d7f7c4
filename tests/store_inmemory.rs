// std
use std::sync::Arc;
// self
use yilianyun::store::{MemoryStore, TokenStore};

#[tokio::test]
async fn absent_client_resolves_to_none() {
	let store = MemoryStore::default();
	let fetched =
		store.get("unknown-client").await.expect("Fetching an absent token should not error.");

	assert_eq!(fetched, None);
}

#[tokio::test]
async fn set_then_get_round_trip_and_overwrite() {
	let store = MemoryStore::default();

	store.set("client-a", "abc").await.expect("Storing the first token should succeed.");

	let first = store
		.get("client-a")
		.await
		.expect("Fetching the stored token should succeed.")
		.expect("Stored token should be present.");

	assert_eq!(first, "abc");

	store.set("client-a", "def").await.expect("Overwriting the token should succeed.");

	let second = store
		.get("client-a")
		.await
		.expect("Fetching the overwritten token should succeed.")
		.expect("Overwritten token should be present.");

	assert_eq!(second, "def");
}

#[tokio::test]
async fn clones_share_the_same_map() {
	let store = MemoryStore::default();
	let alias = store.clone();

	store.set("client-a", "shared").await.expect("Storing through the original should succeed.");

	let via_alias = alias
		.get("client-a")
		.await
		.expect("Fetching through the clone should succeed.")
		.expect("Clone should observe the shared entry.");

	assert_eq!(via_alias, "shared");
}

#[tokio::test]
async fn concurrent_writers_keep_entries_atomic() {
	let store = Arc::new(MemoryStore::default());
	let mut tasks = Vec::new();

	for i in 0..16 {
		let store = store.clone();

		tasks.push(tokio::spawn(async move {
			let client_id = format!("client-{}", i % 4);

			store.set(&client_id, "token").await
		}));
	}

	for task in tasks {
		task.await
			.expect("Writer task should not panic.")
			.expect("Concurrent set should succeed.");
	}

	for i in 0..4 {
		let token = store
			.get(&format!("client-{i}"))
			.await
			.expect("Fetching after concurrent writes should succeed.")
			.expect("Every written client should have a token.");

		assert_eq!(token, "token");
	}
}
