//! Password gate in front of the response dashboard.
//!
//! This is a convenience screen, not access control: the password is a
//! shared configured string and the "authenticated" flag lives on the
//! client with no expiry.

use serde::Serialize;

use crate::error::CoreError;

/// Inline message for a wrong password.
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Whether the dashboard screen is unlocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Compares entered passwords against the configured one.
#[derive(Debug, Clone)]
pub struct PasswordGate {
    password: String,
}

impl PasswordGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Exact string comparison. There is no lockout or backoff.
    pub fn check(&self, input: &str) -> Result<(), CoreError> {
        if input == self.password {
            Ok(())
        } else {
            Err(CoreError::Unauthorized(INCORRECT_PASSWORD.to_string()))
        }
    }

    /// Transition for a password attempt. Once authenticated, the state
    /// stays authenticated.
    pub fn attempt(&self, current: AuthState, input: &str) -> (AuthState, Option<&'static str>) {
        match (current, self.check(input)) {
            (AuthState::Authenticated, _) | (_, Ok(())) => (AuthState::Authenticated, None),
            (AuthState::Unauthenticated, Err(_)) => {
                (AuthState::Unauthenticated, Some(INCORRECT_PASSWORD))
            }
        }
    }
}
