//! Login session.
//!
//! Demo-grade: any well-formed email with a password of at least
//! [`MIN_PASSWORD_LEN`] characters is accepted. No credential is checked
//! against anything and the password is not retained.

use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroize;

use crate::PulmocheckError;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").ok())
        .as_ref()
}

/// An authenticated user context, passed explicitly to the views that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    email: String,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Open a session.
    ///
    /// The password buffer is wiped before returning, whatever the outcome.
    ///
    /// # Errors
    /// Returns `PulmocheckError::Validation` for a malformed email or a short
    /// password.
    pub fn login(email: &str, mut password: String) -> Result<Self, PulmocheckError> {
        let mut errors = Vec::new();
        let email = email.trim();

        if email.is_empty() {
            errors.push("Email is required".to_string());
        } else if !email_pattern().is_some_and(|re| re.is_match(email)) {
            errors.push("Invalid email address".to_string());
        }
        if password.is_empty() {
            errors.push("Password is required".to_string());
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        password.zeroize();

        if !errors.is_empty() {
            return Err(PulmocheckError::Validation(errors));
        }

        tracing::info!("Session opened");
        Ok(Self {
            email: email.to_string(),
            started_at: chrono::Utc::now(),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    /// Close the session. Consumes it so it cannot be used afterwards.
    pub fn logout(self) {
        tracing::info!("Session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_valid_credentials() {
        let session = Session::login("clinician@hospital.org", "secret1".to_string())
            .expect("Should log in");
        assert_eq!(session.email(), "clinician@hospital.org");
        session.logout();
    }

    #[test]
    fn test_login_rejects_short_password() {
        let err = Session::login("a@b.io", "12345".to_string()).unwrap_err();
        match err {
            PulmocheckError::Validation(errors) => {
                assert_eq!(errors, vec!["Password must be at least 6 characters".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_login_rejects_bad_email() {
        assert!(Session::login("not-an-email", "longenough".to_string()).is_err());
        assert!(Session::login("", "longenough".to_string()).is_err());
        assert!(Session::login("UPPER@CASE.COM", "longenough".to_string()).is_ok());
    }
}
