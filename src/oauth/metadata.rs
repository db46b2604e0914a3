// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::_prelude::*;

/// Account description served by `/oauth2/metadata`.
///
/// Known top-level keys are lifted into typed fields; everything else lands in
/// [`extra`](Self::extra) under its original name. Only `dc` is mandatory: a known key
/// whose value has an unexpected type leaves its field empty and is kept in `extra`
/// as sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountMetadata {
	/// Data center hosting the account, e.g. `us2`.
	pub dc: String,
	/// Role of the authorizing user.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub role: Option<String>,
	/// Account name.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub accountname: Option<String>,
	/// Numeric user identifier.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub user_id: Option<u64>,
	/// Login details of the authorizing user.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub login: Option<LoginInfo>,
	/// Login host for the account.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub login_url: Option<String>,
	/// API base URL for the account.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub api_endpoint: Option<String>,
	/// Remaining top-level keys.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl AccountMetadata {
	pub(crate) fn from_value(value: Value) -> Result<Self> {
		let mut metadata: Self = serde_path_to_error::deserialize(&value)
			.map_err(|source| Error::MetadataParse { source })?;

		if let Value::Object(raw) = &value {
			let parsed = [
				("role", metadata.role.is_some()),
				("accountname", metadata.accountname.is_some()),
				("user_id", metadata.user_id.is_some()),
				("login", metadata.login.is_some()),
				("login_url", metadata.login_url.is_some()),
				("api_endpoint", metadata.api_endpoint.is_some()),
			];

			keep_unparsed(raw, parsed, &mut metadata.extra);

			if let (Some(login), Some(Value::Object(raw_login))) =
				(metadata.login.as_mut(), raw.get("login"))
			{
				login.keep_unparsed(raw_login);
			}
		}

		Ok(metadata)
	}
}

/// Login block nested inside [`AccountMetadata`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginInfo {
	/// Contact email.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Avatar URL.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>,
	/// Numeric login identifier.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub login_id: Option<u64>,
	/// Login name.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub login_name: Option<String>,
	/// Login email.
	#[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
	pub login_email: Option<String>,
	/// Remaining keys.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl LoginInfo {
	fn keep_unparsed(&mut self, raw: &Map<String, Value>) {
		let parsed = [
			("email", self.email.is_some()),
			("avatar", self.avatar.is_some()),
			("login_id", self.login_id.is_some()),
			("login_name", self.login_name.is_some()),
			("login_email", self.login_email.is_some()),
		];

		keep_unparsed(raw, parsed, &mut self.extra);
	}
}

/// Deserializes `T`, yielding `None` when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let value = Value::deserialize(deserializer)?;

	Ok(T::deserialize(value).ok())
}

/// Copies non-null raw values of keys that did not parse into `extra`.
fn keep_unparsed<const N: usize>(
	raw: &Map<String, Value>,
	parsed: [(&str, bool); N],
	extra: &mut BTreeMap<String, Value>,
) {
	for (key, is_parsed) in parsed {
		match raw.get(key) {
			Some(value) if !is_parsed && !value.is_null() => {
				extra.insert(key.to_owned(), value.clone());
			},
			_ => (),
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn lifts_known_keys_and_keeps_the_rest() {
		let metadata = AccountMetadata::from_value(json!({
			"dc": "us2",
			"role": "owner",
			"accountname": "timmorgan",
			"user_id": 2472146,
			"login": { "email": "tim@timmorgan.org", "avatar": null, "login_id": 2472146 },
			"api_endpoint": "https://us2.api.mailchimp.com",
			"pricing_plan_type": "monthly",
		}))
		.expect("Metadata document should parse.");

		assert_eq!(metadata.dc, "us2");
		assert_eq!(metadata.user_id, Some(2472146));
		assert_eq!(metadata.login.as_ref().and_then(|l| l.login_id), Some(2472146));
		assert_eq!(metadata.extra.get("pricing_plan_type"), Some(&json!("monthly")));
		assert!(metadata.login.as_ref().is_some_and(|l| l.extra.is_empty()));
	}

	#[test]
	fn mistyped_optional_keys_stay_raw() {
		let metadata = AccountMetadata::from_value(json!({
			"dc": "us2",
			"user_id": "2472146",
			"login": { "avatar": { "url": "x" }, "login_name": "timmorgan" },
		}))
		.expect("Mistyped optional keys should not fail the lookup.");

		assert_eq!(metadata.user_id, None);
		assert_eq!(metadata.extra.get("user_id"), Some(&json!("2472146")));

		let login = metadata.login.expect("Login block should still parse.");

		assert_eq!(login.avatar, None);
		assert_eq!(login.login_name.as_deref(), Some("timmorgan"));
		assert_eq!(login.extra.get("avatar"), Some(&json!({ "url": "x" })));
	}

	#[test]
	fn mistyped_login_block_is_kept_whole() {
		let metadata = AccountMetadata::from_value(json!({ "dc": "us2", "login": "timmorgan" }))
			.expect("Mistyped login block should not fail the lookup.");

		assert!(metadata.login.is_none());
		assert_eq!(metadata.extra.get("login"), Some(&json!("timmorgan")));
	}

	#[test]
	fn missing_dc_is_rejected() {
		let err = AccountMetadata::from_value(json!({ "role": "owner" }))
			.expect_err("Metadata without dc should fail.");

		assert!(matches!(err, Error::MetadataParse { .. }));
	}
}
