//! Credential renewal against `POST /auth/token/refresh/` with compare-and-swap persistence.
//!
//! The renewal call bypasses the request interceptor (it carries no bearer) and is exempt from
//! 401 recovery. A successful response is merged into the stored pair only if the stored refresh
//! credential still matches the one that was sent, so a logout or a new login that lands while
//! the call is outstanding is never overwritten.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::StorefrontClient,
	http::{ApiRequest, Method, Transport},
	obs::{self, CallSpan, Outcome, Stage},
	store::RotateOutcome,
};

/// Path of the credential renewal endpoint.
pub const REFRESH_PATH: &str = "/auth/token/refresh/";

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
	refresh: &'a str,
}

/// Body returned by the renewal endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
	/// Renewed access credential.
	pub access: TokenSecret,
	/// Rotated refresh credential, when the backend rotates on renewal.
	#[serde(default)]
	pub refresh: Option<TokenSecret>,
}

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Exchanges `refresh` for a new access credential and persists it.
	pub(crate) async fn renew(&self, refresh: &TokenSecret) -> Result<TokenSecret> {
		const STAGE: Stage = Stage::Refresh;

		let span = CallSpan::new(STAGE, Method::Post, REFRESH_PATH);

		obs::record_outcome(STAGE, Outcome::Attempt);
		self.refresh_metrics.record_attempt();

		let result = span
			.instrument(async move {
				let request = ApiRequest::post(REFRESH_PATH)
					.with_json(&RefreshRequest { refresh: refresh.expose() })?
					.without_interception();
				let response = self.dispatch(&request).await?;

				if !response.is_success() {
					return Err(Error::from_response(&response));
				}

				let renewed = response.json::<RefreshResponse>()?;

				match self
					.store
					.rotate_access(refresh.expose(), renewed.access.clone(), renewed.refresh)
					.await?
				{
					RotateOutcome::Updated => Ok(renewed.access),
					RotateOutcome::RefreshMismatch => {
						obs::log_event!(
							debug,
							"Session was replaced during renewal; adopting the stored credential."
						);

						self.store.load_credentials().await?.map(|pair| pair.access).ok_or_else(
							|| Error::Unauthorized {
								detail: "Session was cleared while credentials were being renewed."
									.into(),
							},
						)
					},
					RotateOutcome::Missing => Err(Error::Unauthorized {
						detail: "Session was cleared while credentials were being renewed.".into(),
					}),
				}
			})
			.await;

		match &result {
			Ok(_) => self.refresh_metrics.record_success(),
			Err(_) => self.refresh_metrics.record_failure(),
		}

		obs::record_outcome(STAGE, Outcome::of(&result));

		result
	}
}
