//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `mailchimp3.call` with the
//!   `call` (verb or OAuth step) and `url` fields, plus `debug`/`warn` events per response.
//! - Enable `metrics` to increment the `mailchimp3_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// What a span or counter sample is about: an endpoint verb or an OAuth step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PATCH`.
	Patch,
	/// `PUT`.
	Put,
	/// `DELETE`.
	Delete,
	/// `POST /oauth2/token` with an authorization code.
	TokenExchange,
	/// `GET /oauth2/metadata` with a fresh token.
	Metadata,
}
impl CallKind {
	/// Lowercase label used as the `call` field.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "get",
			Self::Post => "post",
			Self::Patch => "patch",
			Self::Put => "put",
			Self::Delete => "delete",
			Self::TokenExchange => "token_exchange",
			Self::Metadata => "metadata",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Stage of a call; every attempt is later matched by exactly one success or failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Call started.
	Attempt,
	/// Call returned `Ok`.
	Success,
	/// Call returned `Err`.
	Failure,
}
impl CallOutcome {
	/// Lowercase label used as the `outcome` field.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}
}

/// Wraps an async call with a span and attempt/success/failure accounting.
pub(crate) async fn observe<T, Fut>(kind: CallKind, url: &str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = CallSpan::new(kind, url);

	record_call_outcome(kind, CallOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_call_outcome(kind, CallOutcome::Success),
		Err(e) => {
			log_failure(kind, url, e);
			record_call_outcome(kind, CallOutcome::Failure);
		},
	}

	result
}
