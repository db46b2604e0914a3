//! Write-request body encoding.

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::{_prelude::*, endpoint::BodyEncoding, error::ConfigError};

/// Encoded request body together with its content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct EncodedBody {
	pub(crate) content_type: &'static str,
	pub(crate) payload: String,
}

/// Encodes `body` for the wire.
///
/// Form bodies receive an `apikey` field holding `secret`, replacing any caller value.
pub(crate) fn encode(encoding: BodyEncoding, body: Value, secret: &str) -> Result<EncodedBody> {
	match encoding {
		BodyEncoding::Json => Ok(EncodedBody {
			content_type: "application/json",
			payload: serde_json::to_string(&body).map_err(ConfigError::from)?,
		}),
		BodyEncoding::Form => {
			let mut fields = match body {
				Value::Object(fields) => fields,
				Value::Null => Map::new(),
				_ => return Err(ConfigError::FormBodyNotObject.into()),
			};

			fields.insert("apikey".into(), Value::String(secret.to_owned()));

			Ok(EncodedBody {
				content_type: "application/x-www-form-urlencoded",
				payload: nested_query(&fields),
			})
		},
	}
}

/// Rack-style nested query: `a[b]=1`, `list[]=1`, and bare keys for `null`.
pub(crate) fn nested_query(fields: &Map<String, Value>) -> String {
	let mut serializer = Serializer::new(String::new());

	for (key, value) in fields {
		append_value(&mut serializer, key, value);
	}

	serializer.finish()
}

fn append_value(serializer: &mut Serializer<String>, key: &str, value: &Value) {
	match value {
		Value::Null => {
			serializer.append_key_only(key);
		},
		Value::Bool(flag) => {
			serializer.append_pair(key, if *flag { "true" } else { "false" });
		},
		Value::Number(number) => {
			serializer.append_pair(key, &number.to_string());
		},
		Value::String(text) => {
			serializer.append_pair(key, text);
		},
		Value::Array(items) => {
			let nested = format!("{key}[]");

			for item in items {
				append_value(serializer, &nested, item);
			}
		},
		Value::Object(fields) =>
			for (child, item) in fields {
				append_value(serializer, &format!("{key}[{child}]"), item);
			},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn json_bodies_are_serialized_verbatim() {
		let encoded = encode(BodyEncoding::Json, json!({ "name": "Foo" }), "ignored")
			.expect("JSON body should encode.");

		assert_eq!(encoded.content_type, "application/json");
		assert_eq!(encoded.payload, "{\"name\":\"Foo\"}");
	}

	#[test]
	fn form_bodies_overwrite_apikey() {
		let encoded = encode(
			BodyEncoding::Form,
			json!({ "apikey": "caller", "id": "d3ed40bd7c" }),
			"key-us2",
		)
		.expect("Form body should encode.");

		assert_eq!(encoded.content_type, "application/x-www-form-urlencoded");
		assert_eq!(encoded.payload, "apikey=key-us2&id=d3ed40bd7c");
	}

	#[test]
	fn form_bodies_nest_objects_and_arrays() {
		let fields = json!({
			"merge_vars": { "FNAME": "Tim" },
			"tags": ["a", "b"],
			"double_optin": false,
			"note": null,
		});
		let Value::Object(fields) = fields else { unreachable!() };

		assert_eq!(
			nested_query(&fields),
			"double_optin=false&merge_vars%5BFNAME%5D=Tim&note&tags%5B%5D=a&tags%5B%5D=b"
		);
	}

	#[test]
	fn form_bodies_reject_non_objects() {
		let err = encode(BodyEncoding::Form, json!(["a"]), "key-us2")
			.expect_err("Arrays cannot be form-encoded.");

		assert!(matches!(err, Error::Config(ConfigError::FormBodyNotObject)));

		let encoded =
			encode(BodyEncoding::Form, Value::Null, "key-us2").expect("Null encodes as empty.");

		assert_eq!(encoded.payload, "apikey=key-us2");
	}
}
