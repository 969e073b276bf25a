//! Credential policy applied before any identity provider call.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Whether `email` looks like an address the provider will accept.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// # Errors
///
/// Returns `AuthError::InvalidEmail` when the email does not match the pattern.
pub fn check_email(email: &str) -> Result<(), AuthError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

/// # Errors
///
/// Returns `AuthError::WeakPassword` when `password` has fewer than `min_len` characters.
pub fn check_password(password: &str, min_len: usize) -> Result<(), AuthError> {
    if password.chars().count() < min_len {
        return Err(AuthError::WeakPassword { min_len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana.lopez+it@corp.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn password_length_counts_chars() {
        assert!(check_password("12345", 6).is_err());
        assert!(check_password("123456", 6).is_ok());
        assert!(check_password("ñññññ", 6).is_err());
    }
}
