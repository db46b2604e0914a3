//! Client-wide error types shared by endpoints, the OAuth helper, and the transport.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Neither a data center nor an explicit URL could be resolved at construction time.
	#[error("You must pass dc.")]
	DataCenterRequired,
	/// No credential was configured when the first request was attempted.
	#[error("You must specify either HTTP basic auth credentials or an OAuth2 access token.")]
	AuthRequired,
	/// The API answered with a 4xx/5xx status or an unparsable body.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// The API answered with a status outside every handled range.
	#[error("Unknown status {status}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
	},
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Login host rejected the authorization code or redirect URI.
	#[error("Login host rejected the grant: {reason}.")]
	InvalidGrant {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or credentials are malformed.
	#[error("Client authentication failed: {reason}.")]
	InvalidClient {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// Token endpoint failed in a way that is not a grant/client rejection.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Provider- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code.
		status: u16,
	},
	/// Token endpoint responded with JSON that does not describe an access token.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code.
		status: u16,
	},
	/// Metadata endpoint returned a document without the expected account fields.
	#[error("Account metadata is malformed.")]
	MetadataParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// HTTP status carried by the error, when a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			Self::UnexpectedStatus { status }
			| Self::TokenEndpoint { status, .. }
			| Self::TokenResponseParse { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Parsed problem-detail body of an API error, if the body was valid JSON.
	pub fn details(&self) -> Option<&Value> {
		match self {
			Self::Api(e) => e.details.as_ref(),
			_ => None,
		}
	}

	/// API error classification, if this is an [`ApiError`].
	pub fn api_kind(&self) -> Option<ApiErrorKind> {
		match self {
			Self::Api(e) => Some(e.kind),
			_ => None,
		}
	}
}

/// Classification of a failed API response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
	/// HTTP 400.
	BadRequest,
	/// HTTP 401.
	Unauthorized,
	/// HTTP 403.
	Forbidden,
	/// HTTP 404.
	NotFound,
	/// HTTP 405.
	MethodNotAllowed,
	/// HTTP 422.
	UnprocessableEntity,
	/// Any other 4xx.
	ClientError,
	/// HTTP 500.
	InternalServerError,
	/// Any other 5xx, and any response whose body is not valid JSON.
	ServerError,
}
impl ApiErrorKind {
	/// Maps an HTTP status in `400..=599` to its kind.
	pub fn from_status(status: u16) -> Option<Self> {
		let kind = match status {
			400 => Self::BadRequest,
			401 => Self::Unauthorized,
			403 => Self::Forbidden,
			404 => Self::NotFound,
			405 => Self::MethodNotAllowed,
			422 => Self::UnprocessableEntity,
			400..=499 => Self::ClientError,
			500 => Self::InternalServerError,
			501..=599 => Self::ServerError,
			_ => return None,
		};

		Some(kind)
	}

	/// Every 4xx kind, including the specific ones, is a client error.
	pub fn is_client_error(self) -> bool {
		!self.is_server_error()
	}

	/// `InternalServerError` and `ServerError`.
	pub fn is_server_error(self) -> bool {
		matches!(self, Self::InternalServerError | Self::ServerError)
	}

	/// Returns a stable label suitable for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BadRequest => "bad_request",
			Self::Unauthorized => "unauthorized",
			Self::Forbidden => "forbidden",
			Self::NotFound => "not_found",
			Self::MethodNotAllowed => "method_not_allowed",
			Self::UnprocessableEntity => "unprocessable_entity",
			Self::ClientError => "client_error",
			Self::InternalServerError => "internal_server_error",
			Self::ServerError => "server_error",
		}
	}
}
impl Display for ApiErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Failed API response with its status and problem-detail body.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("MailChimp API returned {status} ({kind}): {message}")]
pub struct ApiError {
	/// Classification derived from the status (or the unparsable body).
	pub kind: ApiErrorKind,
	/// HTTP status code.
	pub status: u16,
	/// `"{title}: {detail}"` from the problem-detail body, or the raw body text.
	pub message: String,
	/// Parsed JSON body; `None` when the body was not valid JSON.
	pub details: Option<Value>,
	/// Raw response body.
	pub body: String,
}
impl ApiError {
	/// Builds an error from a parsed problem-detail body.
	pub fn from_details(kind: ApiErrorKind, status: u16, details: Value, body: String) -> Self {
		let title = details.get("title").and_then(Value::as_str);
		let detail = details.get("detail").and_then(Value::as_str);
		let message = match (title, detail) {
			(Some(title), Some(detail)) => format!("{title}: {detail}"),
			(Some(text), None) | (None, Some(text)) => text.to_owned(),
			(None, None) => body.clone(),
		};

		Self { kind, status, message, details: Some(details), body }
	}

	/// Builds a [`ApiErrorKind::ServerError`] for a body that is not valid JSON.
	pub fn unparsable(status: u16, body: String) -> Self {
		Self { kind: ApiErrorKind::ServerError, status, message: body.clone(), details: None, body }
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Explicit endpoint URL cannot be parsed.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Legacy form-encoded writes need a JSON object body.
	#[error("Form-encoded request bodies must be JSON objects.")]
	FormBodyNotObject,
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodyEncode(#[from] serde_json::Error),
	/// Required environment variable is unset.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the MailChimp API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the timeout configured on the HTTP client.
	#[error("Request timed out while calling the MailChimp API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Routes a reqwest failure to the configuration or transport bucket.
pub(crate) fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransportError::Timeout { source: Box::new(err) }.into();
	}

	TransportError::network(err).into()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_kinds_follow_the_service_taxonomy() {
		assert_eq!(ApiErrorKind::from_status(400), Some(ApiErrorKind::BadRequest));
		assert_eq!(ApiErrorKind::from_status(422), Some(ApiErrorKind::UnprocessableEntity));
		assert_eq!(ApiErrorKind::from_status(429), Some(ApiErrorKind::ClientError));
		assert_eq!(ApiErrorKind::from_status(500), Some(ApiErrorKind::InternalServerError));
		assert_eq!(ApiErrorKind::from_status(503), Some(ApiErrorKind::ServerError));
		assert_eq!(ApiErrorKind::from_status(302), None);
		assert!(ApiErrorKind::NotFound.is_client_error());
		assert!(ApiErrorKind::InternalServerError.is_server_error());
		assert!(!ApiErrorKind::ClientError.is_server_error());
	}

	#[test]
	fn message_prefers_title_and_detail() {
		let details = serde_json::json!({ "status": 400, "title": "Bad request" });
		let err = ApiError::from_details(
			ApiErrorKind::BadRequest,
			400,
			details,
			"{\"status\":400,\"title\":\"Bad request\"}".into(),
		);

		assert_eq!(err.message, "Bad request");

		let details = serde_json::json!({ "type": "about:blank" });
		let err = ApiError::from_details(
			ApiErrorKind::ClientError,
			418,
			details,
			"{\"type\":\"about:blank\"}".into(),
		);

		assert_eq!(err.message, "{\"type\":\"about:blank\"}");
	}

	#[test]
	fn accessors_expose_status_and_details() {
		let err = Error::from(ApiError::unparsable(200, "bad".into()));

		assert_eq!(err.status(), Some(200));
		assert_eq!(err.details(), None);
		assert_eq!(err.api_kind(), Some(ApiErrorKind::ServerError));
		assert_eq!(Error::AuthRequired.status(), None);
		assert_eq!(Error::UnexpectedStatus { status: 302 }.status(), Some(302));
	}
}
