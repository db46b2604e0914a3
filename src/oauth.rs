//! OAuth 2.0 authorization-code helper for MailChimp's login host.
//!
//! [`OAuth`] builds the authorize URL users are redirected to, exchanges the returned code
//! for an access token, and looks up the account metadata (most importantly its data
//! center) so the caller can build an [`Endpoint`] for the account.

mod config;
mod metadata;
mod token;

pub use config::*;
pub use metadata::*;
pub use token::*;

// crates.io
use rand::{Rng, distr::Alphanumeric};
use reqwest::header::ACCEPT;
// self
use crate::{
	_prelude::*,
	endpoint::{AccessToken, Endpoint},
	error::ConfigError,
	http::{RawResponse, ReqwestHttpClient},
	obs::{self, CallKind},
};

const AUTHORIZE_PATH: &str = "/oauth2/authorize";
const TOKEN_PATH: &str = "/oauth2/token";
const METADATA_PATH: &str = "/oauth2/metadata";
const STATE_LEN: usize = 32;

/// Drives the authorization-code flow for one registered application.
#[derive(Clone, Debug)]
pub struct OAuth {
	config: OAuthConfig,
	http_client: ReqwestHttpClient,
}
impl OAuth {
	/// Creates a helper with a default reqwest transport.
	pub fn new(config: OAuthConfig) -> Self {
		Self::with_http_client(config, ReqwestClient::default())
	}

	/// Creates a helper that reuses a preconfigured reqwest client.
	pub fn with_http_client(config: OAuthConfig, client: ReqwestClient) -> Self {
		Self { config, http_client: ReqwestHttpClient::with_client(client) }
	}

	/// Application credentials in use.
	pub fn config(&self) -> &OAuthConfig {
		&self.config
	}

	/// Random alphanumeric value suitable for the `state` parameter.
	pub fn generate_state() -> String {
		rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
	}

	/// Builds the URL users visit to grant access.
	///
	/// Parameters appear as `client_id`, `redirect_uri`, `response_type=code`, then `state`
	/// when supplied. No request is made.
	pub fn authorize_url(&self, redirect_uri: &str, state: Option<&str>) -> Result<Url> {
		Url::parse(redirect_uri).map_err(|source| ConfigError::InvalidRedirect { source })?;

		let mut url = self.config.login_endpoint(AUTHORIZE_PATH)?;
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", &self.config.client_id);
		pairs.append_pair("redirect_uri", redirect_uri);
		pairs.append_pair("response_type", "code");

		if let Some(state) = state {
			pairs.append_pair("state", state);
		}

		drop(pairs);

		Ok(url)
	}

	/// Exchanges `code` for an access token and fetches the account metadata.
	///
	/// `redirect_uri` must match the one used for [`authorize_url`](Self::authorize_url).
	pub async fn complete_auth(&self, code: &str, redirect_uri: &str) -> Result<AuthResult> {
		let token = self.exchange_code(code, redirect_uri).await?;
		let metadata = self.fetch_metadata(&token.access_token).await?;

		Ok(AuthResult { token_string: token.access_token.expose().to_owned(), token, metadata })
	}

	/// Posts the authorization code to the token endpoint.
	pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenResponse> {
		let url = self.config.login_endpoint(TOKEN_PATH)?;

		obs::observe(CallKind::TokenExchange, url.as_str(), async {
			let form = [
				("client_id", self.config.client_id.as_str()),
				("client_secret", self.config.client_secret.as_str()),
				("code", code),
				("grant_type", "authorization_code"),
				("redirect_uri", redirect_uri),
			];
			let request =
				self.http_client.post(url.clone()).header(ACCEPT, "application/json").form(&form);
			let raw = self.http_client.execute(request).await?;

			obs::log_response(CallKind::TokenExchange, raw.status);

			if !raw.is_success() {
				return Err(classify_token_error(&raw));
			}

			TokenResponse::parse(&raw)
		})
		.await
	}

	/// Looks up the account a token belongs to.
	pub async fn fetch_metadata(&self, token: &AccessToken) -> Result<AccountMetadata> {
		let endpoint = Endpoint::builder()
			.url(self.config.login_endpoint(METADATA_PATH)?.as_str())
			.oauth_access_token(token.clone())
			.http_client(self.http_client.0.clone())
			.build()?;
		let value = endpoint.read(CallKind::Metadata, &()).await?;

		AccountMetadata::from_value(value)
	}
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorBody {
	error: Option<String>,
	error_description: Option<String>,
}

fn classify_token_error(raw: &RawResponse) -> Error {
	let body = serde_json::from_str::<TokenErrorBody>(&raw.body).unwrap_or_default();
	let reason = body
		.error_description
		.clone()
		.or_else(|| body.error.clone())
		.unwrap_or_else(|| raw.body.trim().to_owned());

	match body.error.as_deref() {
		Some(code) if code.eq_ignore_ascii_case("invalid_grant") => Error::InvalidGrant { reason },
		Some(code) if code.eq_ignore_ascii_case("invalid_client") =>
			Error::InvalidClient { reason },
		None if raw.status == 401 => Error::InvalidClient { reason },
		_ => Error::TokenEndpoint { message: reason, status: raw.status },
	}
}
