// self
use crate::obs::{CallKind, CallOutcome};

/// Bumps `mailchimp3_call_total{call, outcome}`.
///
/// Compiles to nothing unless the `metrics` feature is on; the counter goes to whatever
/// recorder the application installed.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"mailchimp3_call_total",
		"call" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_without_a_recorder_is_harmless() {
		for kind in [CallKind::Get, CallKind::Delete, CallKind::Metadata] {
			record_call_outcome(kind, CallOutcome::Attempt);
			record_call_outcome(kind, CallOutcome::Failure);
		}
	}
}
