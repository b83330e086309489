//! Request and response interception: bearer attachment, 401 recovery, and replay.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{
		StorefrontClient,
		gate::{RefreshLease, Ticket},
	},
	http::{ApiRequest, ApiResponse, Transport},
	obs::{self, CallSpan, Outcome, Stage},
};

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Sends `request` through the authenticated pipeline.
	///
	/// The stored access credential is attached as a bearer. A first 401 on an intercepted
	/// request triggers at most one renewal for every concurrent caller, after which the
	/// request is replayed exactly once. Non-2xx responses become [`Error`] values.
	pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse> {
		const STAGE: Stage = Stage::Request;

		let span = CallSpan::new(STAGE, request.method, &request.path);

		obs::record_outcome(STAGE, Outcome::Attempt);

		let result = span
			.instrument(async move {
				self.authorize(&mut request).await;

				let response = self.dispatch(&request).await?;

				if !response.is_unauthorized() || request.retried || !request.intercept {
					return into_result(response);
				}

				self.recover(request, response).await
			})
			.await;

		obs::record_outcome(STAGE, Outcome::of(&result));

		result
	}

	/// Resolves the request URL and hands the request to the transport.
	pub(crate) async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse> {
		let url = self.config.endpoint_with_query(&request.path, &request.query)?;

		Ok(self.transport.send(url, request).await?)
	}

	#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
	async fn authorize(&self, request: &mut ApiRequest) {
		match self.store.load_credentials().await {
			Ok(Some(pair)) if !pair.access.is_empty() => request.bearer = Some(pair.access),
			Ok(_) => {},
			Err(e) => {
				obs::log_event!(
					warn,
					error = %e,
					"Session store read failed; sending the request without credentials."
				);
			},
		}
	}

	async fn recover(&self, mut request: ApiRequest, response: ApiResponse) -> Result<ApiResponse> {
		let original = Error::from_response(&response);

		if !self.store.load_credentials().await?.is_some_and(|pair| pair.can_renew()) {
			obs::log_event!(debug, "No refresh credential stored; clearing the session.");

			self.store.clear().await?;

			return Err(original);
		}

		request.retried = true;

		match self.gate.enter() {
			Ticket::Owner(lease) => self.lead(request, lease, original).await,
			Ticket::Waiter(settlement) => {
				self.refresh_metrics.record_queued();
				obs::log_event!(debug, "Renewal in flight; queueing the request.");

				match settlement.await {
					Ok(Some(access)) => self.replay(request, access).await,
					_ => Err(original),
				}
			},
		}
	}

	/// Performs the renewal as owner of the in-flight flag, then replays the owner's request.
	///
	/// The store is cleared before the flag is released on every failure path, so a queued
	/// request never observes stale credentials after the gate reopens.
	#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
	async fn lead(
		&self,
		request: ApiRequest,
		lease: RefreshLease<'_>,
		original: Error,
	) -> Result<ApiResponse> {
		let Some(pair) = self.store.load_credentials().await? else {
			lease.reject();

			return Err(original);
		};

		let renewed_elsewhere = !pair.access.is_empty()
			&& request.bearer.as_ref().is_some_and(|sent| *sent != pair.access);

		if renewed_elsewhere {
			obs::log_event!(
				debug,
				"Stored access credential was already renewed; replaying without a new renewal."
			);
			lease.resolve(&pair.access);

			return self.replay(request, pair.access).await;
		}

		let Some(refresh) = pair.renewable_refresh() else {
			self.store.clear().await?;
			lease.reject();

			return Err(original);
		};

		match self.renew(refresh).await {
			Ok(access) => {
				lease.resolve(&access);

				self.replay(request, access).await
			},
			Err(e) => {
				obs::log_event!(warn, error = %e, "Credential renewal failed; clearing the session.");

				if let Err(clear_err) = self.store.clear().await {
					obs::log_event!(
						warn,
						error = %clear_err,
						"Failed to clear the session after a renewal failure."
					);
				}

				lease.reject();

				Err(Error::RefreshFailed { source: Box::new(e) })
			},
		}
	}

	async fn replay(&self, mut request: ApiRequest, access: TokenSecret) -> Result<ApiResponse> {
		const STAGE: Stage = Stage::Replay;

		let span = CallSpan::new(STAGE, request.method, &request.path);

		request.bearer = Some(access);
		request.retried = true;

		self.refresh_metrics.record_replay();
		obs::record_outcome(STAGE, Outcome::Attempt);

		let result = span.instrument(async { into_result(self.dispatch(&request).await?) }).await;

		obs::record_outcome(STAGE, Outcome::of(&result));

		result
	}
}

fn into_result(response: ApiResponse) -> Result<ApiResponse> {
	if response.is_success() { Ok(response) } else { Err(Error::from_response(&response)) }
}
