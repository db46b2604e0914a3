//! API generations and the request-body encodings they imply.

// self
use crate::_prelude::*;

/// MailChimp API generation an endpoint tree talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
	/// Legacy `2.0` API: form-encoded writes carrying an `apikey` field.
	V2,
	/// Current `3.0` API: JSON writes.
	#[default]
	V3,
}
impl ApiVersion {
	/// Path component used in the default base URL, e.g. `3.0`.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::V2 => "2.0",
			Self::V3 => "3.0",
		}
	}

	/// Encoding applied to `post`/`patch`/`put` bodies.
	pub const fn body_encoding(self) -> BodyEncoding {
		match self {
			Self::V2 => BodyEncoding::Form,
			Self::V3 => BodyEncoding::Json,
		}
	}

	/// Default base URL for a data center.
	pub fn base_url(self, data_center: &str) -> String {
		format!("https://{data_center}.api.mailchimp.com/{}/", self.as_str())
	}
}
impl Display for ApiVersion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Wire encoding of write-request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
	/// `application/json`.
	Json,
	/// `application/x-www-form-urlencoded` with nested `a[b]` keys.
	Form,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn base_url_embeds_data_center_and_version() {
		assert_eq!(ApiVersion::V3.base_url("us2"), "https://us2.api.mailchimp.com/3.0/");
		assert_eq!(ApiVersion::V2.base_url("us9"), "https://us9.api.mailchimp.com/2.0/");
		assert_eq!(ApiVersion::default(), ApiVersion::V3);
		assert_eq!(ApiVersion::V2.body_encoding(), BodyEncoding::Form);
	}
}
