//! Account rules shared by signup, login, and the deep-link exchange.
//!
//! Emails are stored trimmed and lowercased. A new account must confirm its
//! email through a one-time code delivered as an `onlycard://auth?code=...`
//! deep link; only the SHA-256 hash of that code is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::CoreError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Scheme and path of the auth deep link handled by the mobile app.
pub const AUTH_DEEP_LINK: &str = "onlycard://auth";

/// Machine-readable authentication failure codes returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthErrorCode {
    /// Credentials are valid but the email has not been confirmed yet.
    EmailNotConfirmed,
    AlreadyRegistered,
    InvalidCredentials,
    /// Unknown, used, or expired deep-link code.
    InvalidConfirmationCode,
}

impl AuthErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidConfirmationCode => "INVALID_CONFIRMATION_CODE",
        }
    }

    /// Message shown to the user alongside the code.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmailNotConfirmed => "Please confirm your email before logging in",
            Self::AlreadyRegistered => "An account with this email already exists",
            Self::InvalidCredentials => "Invalid email or password",
            Self::InvalidConfirmationCode => "The confirmation link is invalid or has expired",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Trim and lowercase an email, rejecting obviously malformed input.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !validator::ValidateEmail::validate_email(&email) {
        return Err(CoreError::Validation("Please enter a valid email.".into()));
    }
    Ok(email)
}

/// Trim a password and enforce the minimum length.
pub fn normalize_password(raw: &str) -> Result<String, CoreError> {
    let password = raw.trim();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(password.to_string())
}

// ---------------------------------------------------------------------------
// Confirmation codes
// ---------------------------------------------------------------------------

/// Generate a one-time confirmation code.
///
/// Returns `(plaintext, sha256_hex)`; only the hash is stored.
pub fn generate_confirmation_code() -> (String, String) {
    let code = Uuid::new_v4().simple().to_string();
    let hash = hash_confirmation_code(&code);
    (code, hash)
}

pub fn hash_confirmation_code(code: &str) -> String {
    format!("{:x}", Sha256::digest(code.as_bytes()))
}

/// Build the deep link that carries `code` back into the app.
pub fn deep_link(code: &str) -> String {
    format!("{AUTH_DEEP_LINK}?code={code}")
}

/// Extract the `code` query parameter from an auth deep link.
///
/// Accepts either the full link or the bare code.
pub fn parse_deep_link_code(link: &str) -> Option<String> {
    let link = link.trim();
    let Some(rest) = link.strip_prefix(AUTH_DEEP_LINK) else {
        return (!link.is_empty() && !link.contains(['?', '&', '=', '/']))
            .then(|| link.to_string());
    };
    let query = rest.strip_prefix('?')?;
    query
        .split(['&', '#'])
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "code")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
