// self
use crate::{
	_prelude::*,
	endpoint::{AccessToken, ApiKey, ApiVersion, Credential, Endpoint},
	error::ConfigError,
	http::ReqwestHttpClient,
};

/// Builder for root [`Endpoint`] values.
///
/// Only one credential is kept: calling [`basic_auth_key`](Self::basic_auth_key) after
/// [`oauth_access_token`](Self::oauth_access_token) (or the reverse) replaces the earlier one.
#[derive(Clone, Debug, Default)]
pub struct EndpointBuilder {
	/// Credential applied to every request in the tree.
	pub credential: Option<Credential>,
	/// Explicit data center, e.g. `us2`.
	pub data_center: Option<String>,
	/// Explicit base URL, overriding the data-center URL.
	pub url: Option<String>,
	/// API generation; defaults to [`ApiVersion::V3`].
	pub version: ApiVersion,
	/// Transport shared by the whole tree.
	pub http_client: Option<ReqwestHttpClient>,
}
impl EndpointBuilder {
	/// Authenticates with an OAuth 2.0 bearer token.
	pub fn oauth_access_token(mut self, token: impl Into<AccessToken>) -> Self {
		self.credential = Some(Credential::Bearer(token.into()));

		self
	}

	/// Authenticates with an API key of the form `<secret>-<dc>`.
	pub fn basic_auth_key(mut self, key: impl Into<ApiKey>) -> Self {
		self.credential = Some(Credential::BasicAuth(key.into()));

		self
	}

	/// Sets the credential directly.
	pub fn credential(mut self, credential: Credential) -> Self {
		self.credential = Some(credential);

		self
	}

	/// Sets the data center, taking precedence over the API key suffix.
	pub fn data_center(mut self, data_center: impl Into<String>) -> Self {
		self.data_center = Some(data_center.into());

		self
	}

	/// Sets an explicit base URL.
	pub fn url(mut self, url: impl Into<String>) -> Self {
		self.url = Some(url.into());

		self
	}

	/// Selects the API generation.
	pub fn version(mut self, version: ApiVersion) -> Self {
		self.version = version;

		self
	}

	/// Uses a preconfigured reqwest client (timeouts, proxies, TLS roots).
	pub fn http_client(mut self, client: ReqwestClient) -> Self {
		self.http_client = Some(ReqwestHttpClient::with_client(client));

		self
	}

	/// Resolves the base URL and builds the root endpoint.
	///
	/// Fails with [`Error::DataCenterRequired`] when neither an explicit URL nor a data center
	/// (given directly or derived from the API key) is available.
	pub fn build(self) -> Result<Arc<Endpoint>> {
		let data_center = self.data_center.or_else(|| match &self.credential {
			Some(Credential::BasicAuth(key)) => key.data_center().map(str::to_owned),
			_ => None,
		});
		let url = match (self.url, data_center) {
			(Some(url), _) => {
				if let Err(source) = Url::parse(&url) {
					return Err(ConfigError::InvalidUrl { url, source }.into());
				}

				url
			},
			(None, Some(data_center)) => self.version.base_url(&data_center),
			(None, None) => return Err(Error::DataCenterRequired),
		};

		Ok(Arc::new(Endpoint::from_parts(
			url,
			self.credential,
			self.version,
			self.http_client.unwrap_or_default(),
		)))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn data_center_is_derived_from_api_key() {
		let root = Endpoint::builder()
			.basic_auth_key("key-us2")
			.build()
			.expect("API key suffix should provide the data center.");

		assert_eq!(root.url(), "https://us2.api.mailchimp.com/3.0/");
	}

	#[test]
	fn explicit_data_center_wins_over_key_suffix() {
		let root = Endpoint::builder()
			.basic_auth_key("key-us2")
			.data_center("us5")
			.build()
			.expect("Explicit data center should be accepted.");

		assert_eq!(root.url(), "https://us5.api.mailchimp.com/3.0/");
	}

	#[test]
	fn explicit_url_needs_no_data_center() {
		let root = Endpoint::builder()
			.oauth_access_token("token")
			.url("https://proxy.example.com/3.0")
			.build()
			.expect("Explicit URL should be accepted.");

		assert_eq!(root.url(), "https://proxy.example.com/3.0");
	}

	#[test]
	fn missing_data_center_fails_at_construction() {
		let err = Endpoint::builder()
			.oauth_access_token("token")
			.build()
			.expect_err("Token alone cannot resolve a base URL.");

		assert!(matches!(err, Error::DataCenterRequired));

		let err = Endpoint::new("nodash").expect_err("Key without suffix has no data center.");

		assert!(matches!(err, Error::DataCenterRequired));
	}

	#[test]
	fn invalid_explicit_url_is_rejected() {
		let err = Endpoint::builder()
			.url("not a url")
			.build()
			.expect_err("Unparsable URL should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidUrl { .. })));
	}

	#[test]
	fn later_credential_replaces_earlier_one() {
		let builder = Endpoint::builder().basic_auth_key("key-us2").oauth_access_token("token");

		assert_eq!(builder.credential, Some(Credential::Bearer(AccessToken::new("token"))));
	}
}
