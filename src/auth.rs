//! Credential and identity models for storefront sessions.

pub mod credentials;
pub mod secret;
pub mod user;

pub use credentials::*;
pub use secret::*;
pub use user::*;
