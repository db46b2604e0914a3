//! Maps raw responses onto success values or typed errors.

// self
use crate::{
	_prelude::*,
	error::{ApiError, ApiErrorKind},
	http::RawResponse,
};

/// Translates a response into the parsed JSON body or an [`Error`].
///
/// - `204` yields `true` without looking at the body.
/// - Statuses outside `200..=599` are fatal.
/// - A body that is not valid JSON yields a `ServerError`, whatever the status.
/// - `2xx` yields the parsed body; `4xx`/`5xx` map through [`ApiErrorKind::from_status`].
pub(crate) fn map_response(response: &RawResponse) -> Result<Value> {
	let status = response.status;

	if status == 204 {
		return Ok(Value::Bool(true));
	}
	if !(200..=599).contains(&status) {
		return Err(Error::UnexpectedStatus { status });
	}

	let Ok(parsed) = serde_json::from_str::<Value>(&response.body) else {
		return Err(ApiError::unparsable(status, response.body.clone()).into());
	};

	match ApiErrorKind::from_status(status) {
		None => Ok(parsed),
		Some(kind) =>
			Err(ApiError::from_details(kind, status, parsed, response.body.clone()).into()),
	}
}
