// self
use crate::obs::{Outcome, Stage};

/// Records a pipeline outcome via the global metrics recorder (when enabled).
///
/// [`Stage::Refresh`] feeds `storefront_client_refresh_total`; the other stages feed
/// `storefront_client_request_total` with an extra `stage` label.
pub fn record_outcome(stage: Stage, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		match stage {
			Stage::Refresh => metrics::counter!(
				"storefront_client_refresh_total",
				"outcome" => outcome.as_str()
			)
			.increment(1),
			Stage::Request | Stage::Replay => metrics::counter!(
				"storefront_client_request_total",
				"stage" => stage.as_str(),
				"outcome" => outcome.as_str()
			)
			.increment(1),
		}
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}
