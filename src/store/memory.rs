//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Thread-safe token cache that keeps entries in-process.
///
/// Clones share the same underlying map, so one store can back several
/// [`Client`](crate::Client) instances.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	fn get_now(map: StoreMap, client_id: String) -> Option<String> {
		map.read().get(&client_id).cloned()
	}

	fn set_now(map: StoreMap, client_id: String, token: String) -> Result<(), StoreError> {
		map.write().insert(client_id, token);

		Ok(())
	}
}
impl TokenStore for MemoryStore {
	fn get<'a>(&'a self, client_id: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();
		let client_id = client_id.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, client_id)) })
	}

	fn set<'a>(&'a self, client_id: &'a str, token: &'a str) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let client_id = client_id.to_owned();
		let token = token.to_owned();

		Box::pin(async move { Self::set_now(map, client_id, token) })
	}
}
