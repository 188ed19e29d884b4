//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("OTP service error: {0}")]
    Otp(#[from] otp_client::OtpError),

    #[error("Account service error: {0}")]
    Account(#[from] account_client::AccountError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
