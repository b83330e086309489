//! Account profile and authentication payloads exchanged with the backend.

// self
use crate::{
	_prelude::*,
	auth::{credentials::CredentialPair, secret::TokenSecret},
};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Profile of the signed-in customer, also cached as the session's user snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Backend identifier.
	#[serde(default)]
	pub id: Option<u64>,
	/// Email address used to log in.
	#[serde(default)]
	pub email: String,
	/// Given name.
	#[serde(default)]
	pub first_name: String,
	/// Family name.
	#[serde(default)]
	pub last_name: String,
	/// Phone number (the backend's unique account key).
	#[serde(default)]
	pub phone: String,
	/// Date of birth.
	#[serde(default, with = "calendar_date::option")]
	pub dob: Option<Date>,
}
impl UserProfile {
	/// Joins first and last name, falling back to the email address.
	pub fn display_name(&self) -> String {
		let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
		let name = name.trim();

		if name.is_empty() { self.email.clone() } else { name.to_owned() }
	}
}

/// Body of `POST /auth/login/`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Body of `POST /auth/register/`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
	/// Given name.
	pub first_name: String,
	/// Phone number.
	pub phone: String,
	/// Account email; must match the address the OTP was sent to.
	pub email: String,
	/// Date of birth.
	#[serde(with = "calendar_date")]
	pub dob: Date,
	/// Chosen password.
	pub password: String,
	/// Password confirmation.
	pub password2: String,
	/// One-time code delivered by `POST /auth/send-otp/`.
	pub otp: String,
}
impl Debug for RegisterRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RegisterRequest")
			.field("first_name", &self.first_name)
			.field("phone", &self.phone)
			.field("email", &self.email)
			.field("dob", &self.dob)
			.field("password", &"<redacted>")
			.field("password2", &"<redacted>")
			.field("otp", &"<redacted>")
			.finish()
	}
}

/// Response of login and registration.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
	/// Freshly issued access credential.
	pub access: TokenSecret,
	/// Freshly issued refresh credential.
	pub refresh: TokenSecret,
	/// Profile of the authenticated account.
	pub user: UserProfile,
}
impl AuthResponse {
	/// Returns the credential pair to persist.
	pub fn credentials(&self) -> CredentialPair {
		CredentialPair { access: self.access.clone(), refresh: Some(self.refresh.clone()) }
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn profile_decodes_backend_shape() {
		let profile: UserProfile = serde_json::from_value(serde_json::json!({
			"id": 3,
			"email": "a@b.com",
			"first_name": "Asha",
			"last_name": "",
			"phone": "9876543210",
			"dob": "1999-04-12"
		}))
		.expect("Profile fixture should decode.");

		assert_eq!(profile.dob, Some(macros::date!(1999 - 04 - 12)));
		assert_eq!(profile.display_name(), "Asha");

		let anonymous: UserProfile =
			serde_json::from_value(serde_json::json!({ "email": "a@b.com", "dob": null }))
				.expect("Sparse profile should decode.");

		assert_eq!(anonymous.dob, None);
		assert_eq!(anonymous.display_name(), "a@b.com");
	}

	#[test]
	fn register_request_serializes_calendar_date() {
		let request = RegisterRequest {
			first_name: "Asha".into(),
			phone: "9876543210".into(),
			email: "a@b.com".into(),
			dob: macros::date!(2001 - 01 - 09),
			password: "Secret1!".into(),
			password2: "Secret1!".into(),
			otp: "123456".into(),
		};
		let json = serde_json::to_value(&request).expect("Register request should serialize.");

		assert_eq!(json["dob"], "2001-01-09");
		assert_eq!(json["password2"], "Secret1!");
	}

	#[test]
	fn credential_payloads_redact_secrets() {
		let login = LoginRequest { email: "a@b.com".into(), password: "Secret1!".into() };

		assert!(!format!("{login:?}").contains("Secret1!"));

		let response: AuthResponse = serde_json::from_value(serde_json::json!({
			"access": "tokA",
			"refresh": "tokR",
			"user": { "email": "a@b.com" }
		}))
		.expect("Auth response should decode.");

		assert_eq!(response.credentials(), CredentialPair::new("tokA", "tokR"));
		assert!(!format!("{response:?}").contains("tokA"));
	}
}
