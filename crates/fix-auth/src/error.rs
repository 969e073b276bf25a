use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no account is registered with this email")]
    InvalidUser,

    #[error("wrong password or invalid email")]
    InvalidCredential,

    #[error("an account is already registered with this email")]
    EmailInUse,

    #[error("password must be at least {min_len} characters")]
    WeakPassword { min_len: usize },

    #[error("email format is invalid")]
    InvalidEmail,

    #[error("authentication failed: {0}")]
    Unknown(String),
}
