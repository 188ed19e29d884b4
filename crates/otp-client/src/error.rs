//! OTP client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Code issuance rejected: {0}")]
    IssuanceRejected(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}
