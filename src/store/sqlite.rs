//! Durable [`TokenStore`] backed by a SQLite table, one row per client identifier.

// std
use std::path::Path;
// crates.io
use rusqlite::{Connection, OptionalExtension, params};
// self
use crate::{
	_prelude::*,
	store::{StoreError, StoreFuture, TokenStore},
};

/// Persists tokens in a SQLite table with primary key `client_id` and column `token`.
///
/// Writes go through a conflict-resolving upsert, so `set` atomically inserts
/// or replaces the row for one client identifier. All I/O is blocking and runs
/// inline inside the returned future; callers on a multi-threaded runtime may
/// wrap operations in `spawn_blocking` if contention matters.
#[derive(Clone)]
pub struct SqliteStore {
	conn: Arc<Mutex<Connection>>,
	table: String,
}
impl SqliteStore {
	/// Opens (or creates) the database at `path` and ensures the token table exists.
	///
	/// The table name must be a plain SQL identifier (ASCII alphanumerics or
	/// `_`, not starting with a digit); anything else is rejected with
	/// [`StoreError::InvalidTable`] since the name is interpolated into SQL.
	pub fn open(path: impl AsRef<Path>, table: impl Into<String>) -> Result<Self, StoreError> {
		let conn = Connection::open(path).map_err(Self::backend)?;

		Self::with_connection(conn, table)
	}

	/// Wraps an already-open connection, ensuring the token table exists.
	pub fn with_connection(
		conn: Connection,
		table: impl Into<String>,
	) -> Result<Self, StoreError> {
		let table = table.into();

		validate_table_name(&table)?;

		conn.execute(
			&format!(
				"CREATE TABLE IF NOT EXISTS {table} (client_id TEXT PRIMARY KEY, token TEXT NOT NULL)"
			),
			params![],
		)
		.map_err(Self::backend)?;

		Ok(Self { conn: Arc::new(Mutex::new(conn)), table })
	}

	fn backend(e: rusqlite::Error) -> StoreError {
		StoreError::Backend { message: e.to_string() }
	}

	fn get_now(&self, client_id: &str) -> Result<Option<String>, StoreError> {
		self.conn
			.lock()
			.query_row(
				&format!("SELECT token FROM {} WHERE client_id = ?1", self.table),
				params![client_id],
				|row| row.get(0),
			)
			.optional()
			.map_err(Self::backend)
	}

	fn set_now(&self, client_id: &str, token: &str) -> Result<(), StoreError> {
		self.conn
			.lock()
			.execute(
				&format!(
					"INSERT INTO {} (client_id, token) VALUES (?1, ?2) \
					 ON CONFLICT(client_id) DO UPDATE SET token = excluded.token",
					self.table
				),
				params![client_id, token],
			)
			.map_err(Self::backend)?;

		Ok(())
	}
}
impl Debug for SqliteStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SqliteStore").field("table", &self.table).finish_non_exhaustive()
	}
}
impl TokenStore for SqliteStore {
	fn get<'a>(&'a self, client_id: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move { self.get_now(client_id) })
	}

	fn set<'a>(&'a self, client_id: &'a str, token: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.set_now(client_id, token) })
	}
}

fn validate_table_name(name: &str) -> Result<(), StoreError> {
	let mut chars = name.chars();
	let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

	if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
		Ok(())
	} else {
		Err(StoreError::InvalidTable { name: name.to_owned() })
	}
}
