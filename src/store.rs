//! Storage contracts and built-in token-cache implementations.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// self
use crate::_prelude::*;

/// Boxed future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Token-cache contract keyed by client identifier.
///
/// A missing entry resolves to `Ok(None)`—absence is not an error condition
/// and is distinct from a store failure. Tokens are never expired or evicted
/// by the store; a cached token lives until [`set`](TokenStore::set)
/// overwrites it.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Fetches the cached token for `client_id`, if any.
	fn get<'a>(&'a self, client_id: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Persists or replaces the token for `client_id`.
	fn set<'a>(&'a self, client_id: &'a str, token: &'a str) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// The configured table name is not a valid SQL identifier.
	#[error("Invalid token table name: `{name}`.")]
	InvalidTable {
		/// The rejected identifier.
		name: String,
	},
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let crate_error: Error = store_error.clone().into();

		assert!(matches!(crate_error, Error::Storage(_)));
		assert!(crate_error.to_string().contains("database unreachable"));

		let source = StdError::source(&crate_error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
