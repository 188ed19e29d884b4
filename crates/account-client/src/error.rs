//! Account client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Account creation rejected: {0}")]
    CreationRejected(String),
}
