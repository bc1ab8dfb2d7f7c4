//! Uniform response envelope returned by every Open API endpoint.

// self
use crate::_prelude::*;

/// Remote error code that denotes success.
pub const SUCCESS_CODE: &str = "0";
/// Remote error description that denotes success.
pub const SUCCESS_DESCRIPTION: &str = "success";

/// JSON wrapper `{error, error_description, body}` shared by all endpoints.
///
/// Success is signaled jointly: `error == "0"` and `error_description == "success"`.
/// Any other combination is a protocol-level failure. The `body` payload is
/// endpoint-specific and kept opaque; callers pick out the fields they need.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiResponse {
	/// Remote error code as a decimal string.
	pub error: String,
	/// Remote human-readable description of the outcome.
	pub error_description: String,
	/// Endpoint-specific payload; `null` when the endpoint omits it.
	#[serde(default)]
	pub body: serde_json::Value,
}
impl ApiResponse {
	/// Returns `true` when both success sentinels match.
	pub fn is_success(&self) -> bool {
		self.error == SUCCESS_CODE && self.error_description == SUCCESS_DESCRIPTION
	}

	/// Extracts `body.access_token` as issued by the authorization endpoint.
	pub fn access_token(&self) -> Option<&str> {
		self.body.get("access_token").and_then(serde_json::Value::as_str)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_requires_both_sentinels() {
		let ok: ApiResponse =
			serde_json::from_str(r#"{"error":"0","error_description":"success","body":{}}"#)
				.expect("Success envelope should deserialize.");

		assert!(ok.is_success());

		let code_only: ApiResponse =
			serde_json::from_str(r#"{"error":"0","error_description":"partial","body":{}}"#)
				.expect("Mismatched envelope should deserialize.");

		assert!(!code_only.is_success());
	}

	#[test]
	fn missing_body_defaults_to_null() {
		let envelope: ApiResponse =
			serde_json::from_str(r#"{"error":"1001","error_description":"invalid signature"}"#)
				.expect("Envelope without body should deserialize.");

		assert!(envelope.body.is_null());
		assert_eq!(envelope.access_token(), None);
	}

	#[test]
	fn access_token_is_read_from_body() {
		let envelope: ApiResponse = serde_json::from_str(
			r#"{"error":"0","error_description":"success","body":{"access_token":"abc","expires_in":100}}"#,
		)
		.expect("Authorization envelope should deserialize.");

		assert_eq!(envelope.access_token(), Some("abc"));
	}
}
