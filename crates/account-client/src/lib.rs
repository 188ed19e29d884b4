//! HTTP client for the account-creation service.

mod client;
mod error;
mod types;

pub use client::AccountClient;
pub use error::AccountError;
pub use types::*;
