// self
use crate::{_prelude::*, error::ConfigError};

/// Registered OAuth application credentials plus the login host they talk to.
///
/// Build it once at startup and hand it to [`OAuth::new`](crate::oauth::OAuth::new).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Login host serving `/oauth2/authorize`, `/oauth2/token` and `/oauth2/metadata`.
	#[serde(default = "default_login_url")]
	pub login_url: String,
}
impl OAuthConfig {
	/// Production login host.
	pub const DEFAULT_LOGIN_URL: &'static str = "https://login.mailchimp.com";

	const ENV_CLIENT_ID: &'static str = "MAILCHIMP_CLIENT_ID";
	const ENV_CLIENT_SECRET: &'static str = "MAILCHIMP_CLIENT_SECRET";
	const ENV_LOGIN_URL: &'static str = "MAILCHIMP_LOGIN_URL";

	/// Creates a config pointing at the production login host.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			login_url: default_login_url(),
		}
	}

	/// Overrides the login host (useful for proxies and tests).
	///
	/// The `/oauth2/*` routes resolve against the host root, so any path in `login_url` is
	/// ignored by every call.
	pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
		self.login_url = login_url.into();

		self
	}

	/// Reads `MAILCHIMP_CLIENT_ID`, `MAILCHIMP_CLIENT_SECRET` and, optionally,
	/// `MAILCHIMP_LOGIN_URL`.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let require = |name: &'static str| lookup(name).ok_or(ConfigError::MissingEnv { name });
		let mut config =
			Self::new(require(Self::ENV_CLIENT_ID)?, require(Self::ENV_CLIENT_SECRET)?);

		if let Some(login_url) = lookup(Self::ENV_LOGIN_URL) {
			config.login_url = login_url;
		}

		Ok(config)
	}

	/// Resolves an absolute path on the login host.
	pub(crate) fn login_endpoint(&self, path: &str) -> Result<Url> {
		let invalid = |source| ConfigError::InvalidUrl { url: self.login_url.clone(), source };

		Url::parse(&self.login_url).map_err(invalid)?.join(path).map_err(|e| invalid(e).into())
	}
}
impl Debug for OAuthConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("login_url", &self.login_url)
			.finish()
	}
}

fn default_login_url() -> String {
	OAuthConfig::DEFAULT_LOGIN_URL.into()
}
