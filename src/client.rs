//! API client orchestrating authorization, request signing, and dispatch.

// self
use crate::{
	_prelude::*,
	envelope::ApiResponse,
	sign,
	store::TokenStore,
};

/// Base URL of the production Open API.
pub const API_URL: &str = "https://open-api.10ss.net/";

const AUTHORIZE_PATH: &str = "oauth/oauth";
const ADD_PRINTER_PATH: &str = "printer/addprinter";
const DELETE_PRINTER_PATH: &str = "printer/deleteprinter";
const PRINT_PATH: &str = "print/index";
const PRINTER_STATUS_PATH: &str = "printer/getprintstatus";

const ORIGIN_ID_LEN: usize = 32;

/// Client for the Yilianyun cloud print Open API.
///
/// One client holds a single `client_id`/`client_secret` pair plus an injected
/// [`TokenStore`] that caches the access token issued by [`authorize`](Client::authorize).
/// The store is an explicit constructor dependency so tests can inspect it and
/// several clients can share one cache; nothing is kept in global state.
///
/// ```no_run
/// use std::sync::Arc;
/// use yilianyun::{Client, store::MemoryStore};
///
/// # async fn demo() -> yilianyun::Result<()> {
/// let client = Client::new("client-id", "client-secret", Arc::new(MemoryStore::default()));
///
/// client.print("machine-code", "hello").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
	http: ReqwestClient,
	base: Url,
	client_id: String,
	client_secret: String,
	store: Arc<dyn TokenStore>,
}
impl Client {
	/// Creates a client against the production [`API_URL`].
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		store: Arc<dyn TokenStore>,
	) -> Self {
		Self {
			http: ReqwestClient::default(),
			base: Url::parse(API_URL).expect("API_URL is a valid URL"),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			store,
		}
	}

	/// Replaces the base URL; primarily for tests and staging environments.
	pub fn with_base_url(mut self, base: Url) -> Self {
		self.base = base;

		self
	}

	/// Replaces the underlying HTTP client.
	pub fn with_http_client(mut self, http: ReqwestClient) -> Self {
		self.http = http;

		self
	}

	/// Performs the client-credentials grant and caches the issued token.
	///
	/// If the store already holds a non-empty token for this `client_id` the
	/// call returns immediately without touching the network. On a failed
	/// grant the store is left untouched.
	pub async fn authorize(&self) -> Result<()> {
		if self.cached_token().await?.is_some() {
			tracing::debug!(client_id = %self.client_id, "reusing cached access token");

			return Ok(());
		}

		let form = vec![("grant_type", "client_credentials".to_owned()), ("scope", "all".to_owned())];
		let envelope = self.post_form(AUTHORIZE_PATH, form).await?;
		// An envelope that omits access_token caches the empty string, which
		// the next call treats as absent. Matches the live API contract.
		let token = envelope.access_token().unwrap_or_default().to_owned();

		self.store.set(&self.client_id, &token).await?;
		tracing::debug!(client_id = %self.client_id, "cached freshly issued access token");

		Ok(())
	}

	/// Binds a printer terminal to this client.
	pub async fn add_printer(
		&self,
		machine_code: impl AsRef<str>,
		msign: impl AsRef<str>,
	) -> Result<ApiResponse> {
		let token = self.ensure_token().await?;
		let form = vec![
			("access_token", token),
			("machine_code", machine_code.as_ref().to_owned()),
			("msign", msign.as_ref().to_owned()),
		];

		self.post_form(ADD_PRINTER_PATH, form).await
	}

	/// Unbinds a printer terminal from this client.
	pub async fn delete_printer(&self, machine_code: impl AsRef<str>) -> Result<ApiResponse> {
		let token = self.ensure_token().await?;
		let form =
			vec![("access_token", token), ("machine_code", machine_code.as_ref().to_owned())];

		self.post_form(DELETE_PRINTER_PATH, form).await
	}

	/// Submits a text print job to the given printer terminal.
	///
	/// Each submission carries a fresh 32-character alphanumeric `origin_id`
	/// so the service can deduplicate resubmitted jobs.
	pub async fn print(
		&self,
		machine_code: impl AsRef<str>,
		content: impl AsRef<str>,
	) -> Result<ApiResponse> {
		let token = self.ensure_token().await?;
		let form = vec![
			("access_token", token),
			("machine_code", machine_code.as_ref().to_owned()),
			("content", content.as_ref().to_owned()),
			("origin_id", sign::rand_alnum(ORIGIN_ID_LEN)),
		];

		self.post_form(PRINT_PATH, form).await
	}

	/// Queries the online/offline status of a printer terminal.
	pub async fn get_printer_status(&self, machine_code: impl AsRef<str>) -> Result<ApiResponse> {
		let token = self.ensure_token().await?;
		let form =
			vec![("access_token", token), ("machine_code", machine_code.as_ref().to_owned())];

		self.post_form(PRINTER_STATUS_PATH, form).await
	}

	/// Reads the cached token, treating the empty string as absent.
	async fn cached_token(&self) -> Result<Option<String>> {
		Ok(self.store.get(&self.client_id).await?.filter(|token| !token.is_empty()))
	}

	/// Returns the cached token, authorizing first when the cache is cold.
	async fn ensure_token(&self) -> Result<String> {
		if let Some(token) = self.cached_token().await? {
			return Ok(token);
		}

		self.authorize().await?;

		Ok(self.store.get(&self.client_id).await?.unwrap_or_default())
	}

	/// Signs and dispatches one form-encoded request, decoding the envelope.
	///
	/// The timestamp is computed once per call and used both as the
	/// `timestamp` field and as signature input, as the protocol requires.
	async fn post_form(
		&self,
		path: &str,
		mut form: Vec<(&'static str, String)>,
	) -> Result<ApiResponse> {
		let timestamp = sign::timestamp_str();

		form.push(("client_id", self.client_id.clone()));
		form.push(("sign", sign::signature(&self.client_id, &timestamp, &self.client_secret)));
		form.push(("id", sign::request_id()));
		form.push(("timestamp", timestamp));

		let url = self.base.join(path).map_err(|source| Error::InvalidEndpoint { source })?;

		tracing::debug!(endpoint = path, "dispatching signed form request");

		let bytes = self.http.post(url).form(&form).send().await?.bytes().await?;
		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
		let envelope: ApiResponse = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::Decode { source })?;

		if !envelope.is_success() {
			return Err(Error::Api {
				code: envelope.error,
				description: envelope.error_description,
			});
		}

		tracing::debug!(endpoint = path, "endpoint reported success");

		Ok(envelope)
	}
}
impl Debug for Client {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base", &self.base.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish_non_exhaustive()
	}
}
