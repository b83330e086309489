//! Account and session operations: login, registration, OTP, profile, logout, and restore.

// self
use crate::{
	_prelude::*,
	api::DetailBody,
	auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile},
	client::StorefrontClient,
	http::{ApiRequest, Transport},
};

#[derive(Serialize)]
struct OtpRequest<'a> {
	email: &'a str,
}

impl<T> StorefrontClient<T>
where
	T: ?Sized + Transport,
{
	/// Logs in with email + password and persists the issued credentials and profile.
	pub async fn login(
		&self,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Result<AuthResponse> {
		let body = LoginRequest { email: email.into(), password: password.into() };
		let request = ApiRequest::post("/auth/login/").with_json(&body)?.without_interception();
		let response = self.call_json::<AuthResponse>(request).await?;

		self.persist_session(&response).await?;

		Ok(response)
	}

	/// Creates an account (OTP-verified) and persists the issued credentials and profile.
	pub async fn register(&self, registration: &RegisterRequest) -> Result<AuthResponse> {
		let request =
			ApiRequest::post("/auth/register/").with_json(registration)?.without_interception();
		let response = self.call_json::<AuthResponse>(request).await?;

		self.persist_session(&response).await?;

		Ok(response)
	}

	/// Asks the backend to email a registration OTP; returns its acknowledgement, if any.
	pub async fn send_otp(&self, email: &str) -> Result<Option<String>> {
		let request =
			ApiRequest::post("/auth/send-otp/").with_json(&OtpRequest { email })?.without_interception();
		let body = self.call_optional::<DetailBody>(request).await?;

		Ok(body.and_then(|body| body.detail))
	}

	/// Fetches the signed-in profile and refreshes the cached snapshot.
	pub async fn profile(&self) -> Result<UserProfile> {
		let profile = self.call_json::<UserProfile>(ApiRequest::get("/auth/profile/")).await?;

		self.store().save_user(profile.clone()).await?;

		Ok(profile)
	}

	/// Forgets the session locally; the backend keeps no server-side session to end.
	pub async fn logout(&self) -> Result<()> {
		self.store().clear().await?;

		Ok(())
	}

	/// Re-validates a persisted session on startup.
	///
	/// Returns `None` when no access credential is stored, or when the backend rejects the
	/// session (the store is cleared in that case). Any other failure propagates and leaves the
	/// session untouched.
	pub async fn restore_session(&self) -> Result<Option<UserProfile>> {
		if !self.is_authenticated().await? {
			return Ok(None);
		}

		match self.profile().await {
			Ok(profile) => Ok(Some(profile)),
			Err(e) if e.is_auth_failure() => {
				self.store().clear().await?;

				Ok(None)
			},
			Err(e) => Err(e),
		}
	}

	/// Returns the cached profile snapshot without a network call.
	pub async fn cached_user(&self) -> Result<Option<UserProfile>> {
		Ok(self.store().load_user().await?)
	}

	/// Returns `true` when an access credential is stored.
	pub async fn is_authenticated(&self) -> Result<bool> {
		Ok(self.store().load_credentials().await?.is_some_and(|pair| !pair.access.is_empty()))
	}

	async fn persist_session(&self, response: &AuthResponse) -> Result<()> {
		self.store().save_credentials(response.credentials()).await?;
		self.store().save_user(response.user.clone()).await?;

		Ok(())
	}
}
