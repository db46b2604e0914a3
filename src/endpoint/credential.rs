//! Credentials accepted by endpoints, with secrets kept out of logs.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner secret. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self::new(value)
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self::new(value)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret!(ApiKey, "MailChimp API key of the form `<secret>-<dc>`, sent via HTTP basic auth.");
def_secret!(AccessToken, "OAuth 2.0 access token, sent as `Authorization: Bearer <token>`.");

impl ApiKey {
	/// Data center suffix, i.e. everything after the last `-`.
	pub fn data_center(&self) -> Option<&str> {
		self.0.rsplit_once('-').map(|(_, dc)| dc).filter(|dc| !dc.is_empty())
	}
}

/// The single authentication mechanism an endpoint uses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
	/// HTTP basic auth with an empty user name and the API key as password.
	BasicAuth(ApiKey),
	/// OAuth 2.0 bearer token.
	Bearer(AccessToken),
}
impl Credential {
	/// Secret injected as `apikey` into legacy form-encoded bodies.
	pub fn secret(&self) -> &str {
		match self {
			Self::BasicAuth(key) => key.expose(),
			Self::Bearer(token) => token.expose(),
		}
	}

	/// Applies the credential to an outgoing request.
	pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		match self {
			Self::BasicAuth(key) => request.basic_auth("", Some(key.expose())),
			Self::Bearer(token) => request.bearer_auth(token.expose()),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let key = ApiKey::new("0123456789abcdef-us2");
		let token = AccessToken::new("925680f04933b28f128d721fdf8949fa");

		assert_eq!(format!("{key:?}"), "ApiKey(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
		assert_eq!(
			format!("{:?}", Credential::Bearer(token)),
			"Bearer(AccessToken(\"<redacted>\"))"
		);
	}

	#[test]
	fn data_center_is_the_last_dash_suffix() {
		assert_eq!(ApiKey::new("key-us2").data_center(), Some("us2"));
		assert_eq!(ApiKey::new("a-b-us19").data_center(), Some("us19"));
		assert_eq!(ApiKey::new("nodash").data_center(), None);
		assert_eq!(ApiKey::new("trailing-").data_center(), None);
	}
}
