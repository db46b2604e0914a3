// crates.io
use time::Duration;
// self
use crate::{
	_prelude::*,
	endpoint::{AccessToken, Endpoint},
	http::RawResponse,
	oauth::AccountMetadata,
};

/// Token object returned by the login host's token endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token for API calls.
	pub access_token: AccessToken,
	/// Lifetime in seconds; MailChimp sends `0` for tokens that never expire.
	#[serde(default)]
	pub expires_in: Option<i64>,
	/// Granted scope, if reported.
	#[serde(default)]
	pub scope: Option<String>,
	/// Token type, if reported.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Any additional fields in the token object.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
	/// Local time the response was parsed.
	#[serde(skip, default = "OffsetDateTime::now_utc")]
	pub issued_at: OffsetDateTime,
}
impl TokenResponse {
	pub(crate) fn parse(raw: &RawResponse) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_str(&raw.body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::TokenResponseParse { source, status: raw.status })
	}

	/// Expiry instant, or `None` for tokens without a positive lifetime or with one past
	/// the representable date range.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_in
			.filter(|secs| *secs > 0)
			.and_then(|secs| self.issued_at.checked_add(Duration::seconds(secs)))
	}
}

/// Outcome of a completed authorization-code exchange.
#[derive(Clone)]
pub struct AuthResult {
	/// Raw token object.
	pub token: TokenResponse,
	/// Bare access token string.
	pub token_string: String,
	/// Account the token was issued for.
	pub metadata: AccountMetadata,
}
impl AuthResult {
	/// Builds a V3 root endpoint for the authorized account.
	pub fn endpoint(&self) -> Result<Arc<Endpoint>> {
		Endpoint::builder()
			.oauth_access_token(self.token.access_token.clone())
			.data_center(self.metadata.dc.as_str())
			.build()
	}
}
impl Debug for AuthResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthResult")
			.field("token", &self.token)
			.field("token_string", &"<redacted>")
			.field("metadata", &self.metadata)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::header::HeaderMap;
	// self
	use super::*;

	fn raw(status: u16, body: &str) -> RawResponse {
		RawResponse { status, headers: HeaderMap::new(), body: body.into() }
	}

	#[test]
	fn parses_non_expiring_tokens() {
		let token = TokenResponse::parse(&raw(
			200,
			"{\"access_token\":\"925680f04933b28f128d721fdf8949fa\",\"expires_in\":0,\"scope\":null}",
		))
		.expect("MailChimp token object should parse.");

		assert_eq!(token.access_token.expose(), "925680f04933b28f128d721fdf8949fa");
		assert_eq!(token.expires_in, Some(0));
		assert!(token.scope.is_none());
		assert!(token.expires_at().is_none());
	}

	#[test]
	fn keeps_unknown_fields_and_computes_expiry() {
		let token = TokenResponse::parse(&raw(
			200,
			"{\"access_token\":\"abc\",\"expires_in\":3600,\"token_type\":\"bearer\",\"foo\":1}",
		))
		.expect("Token object should parse.");

		assert_eq!(token.extra.get("foo"), Some(&Value::from(1)));
		assert_eq!(token.expires_at(), Some(token.issued_at + Duration::hours(1)));
	}

	#[test]
	fn out_of_range_lifetimes_have_no_expiry() {
		let token = TokenResponse::parse(&raw(
			200,
			"{\"access_token\":\"abc\",\"expires_in\":9223372036854775807}",
		))
		.expect("Oversized lifetime should still parse.");

		assert_eq!(token.expires_in, Some(i64::MAX));
		assert!(token.expires_at().is_none());
	}

	#[test]
	fn malformed_tokens_keep_the_status() {
		let err = TokenResponse::parse(&raw(200, "{\"access_token\":42}"))
			.expect_err("Numeric token should fail.");

		assert!(matches!(err, Error::TokenResponseParse { status: 200, .. }));
		assert_eq!(err.status(), Some(200));
	}
}
