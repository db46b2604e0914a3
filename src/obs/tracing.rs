// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by endpoint verbs and OAuth steps.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the call kind and target URL.
	pub fn new(kind: CallKind, url: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("mailchimp3.call", call = kind.as_str(), url);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, url);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event for a received response.
pub fn log_response(kind: CallKind, status: u16) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(call = kind.as_str(), status, "response received");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, status);
	}
}

/// Emits a `warn` event for a call that failed.
pub fn log_failure(kind: CallKind, url: &str, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(call = kind.as_str(), url, status = error.status(), %error, "call failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, url, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = CallSpan::new(CallKind::Get, "https://us2.api.mailchimp.com/3.0/lists");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn logging_helpers_accept_every_call_kind() {
		log_response(CallKind::Delete, 204);
		log_failure(CallKind::Metadata, "https://login.mailchimp.com", &Error::AuthRequired);
	}
}
