//! Async client for the Yilianyun cloud print Open API—client-credentials authorization,
//! legacy MD5 request signing, and pluggable token stores in one small crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod envelope;
pub mod error;
pub mod sign;
pub mod store;

pub use client::Client;
pub use envelope::ApiResponse;
pub use error::{Error, Result};

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use httpmock as _;
