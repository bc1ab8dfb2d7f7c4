//! Legacy request-signing and identifier utilities required by the Open API.
//!
//! The service predates HMAC-style schemes: every request carries an MD5 digest
//! over `client_id + timestamp + client_secret`, concatenated in that exact
//! order with no separators. The concatenation order, hash algorithm, and
//! lowercase hex encoding are wire-compatibility constraints, not choices.

// crates.io
use md5::{Digest, Md5};
use rand::{Rng, distr::Alphanumeric};
use time::OffsetDateTime;
use uuid::Uuid;

/// Computes the lowercase hex MD5 signature for one request.
///
/// The same `timestamp` string must be sent as the `timestamp` form field of
/// the request being signed.
pub fn signature(client_id: &str, timestamp: &str, client_secret: &str) -> String {
	let mut hasher = Md5::new();

	hasher.update(client_id.as_bytes());
	hasher.update(timestamp.as_bytes());
	hasher.update(client_secret.as_bytes());

	hex::encode(hasher.finalize())
}

/// Returns a fresh UUID v4 in standard textual form.
///
/// Sent as the `id` field on every request; the service uses it for tracing
/// and deduplication.
pub fn request_id() -> String {
	Uuid::new_v4().to_string()
}

/// Returns the current Unix epoch seconds as a decimal string.
pub fn timestamp_str() -> String {
	OffsetDateTime::now_utc().unix_timestamp().to_string()
}

/// Returns `len` characters sampled uniformly from `[0-9A-Za-z]`.
///
/// Used for client-generated idempotency tokens such as `origin_id`. Not
/// cryptographically secure.
pub fn rand_alnum(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
