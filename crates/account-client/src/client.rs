//! Account-creation service HTTP client.

use crate::error::AccountError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the account-creation service.
#[derive(Clone)]
pub struct AccountClient {
    client: Client,
    base_url: String,
}

impl AccountClient {
    /// Create a new account client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AccountError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if the account service is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Persist a new account.
    ///
    /// Callers must only reach this after a successful phone verification;
    /// the request always carries `phoneVerified: true`.
    #[instrument(skip(self, request), fields(phone = %request.phone))]
    pub async fn create_account(&self, request: &NewAccountRequest) -> Result<(), AccountError> {
        let response = self
            .client
            .post(format!("{}/v1/accounts", self.base_url))
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Account creation request failed: {}", msg);
            return Err(AccountError::Api(msg));
        }

        let body: CreateAccountResponse = response.json().await?;

        if !body.success {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_string());
            warn!("Account creation rejected: {}", reason);
            return Err(AccountError::CreationRejected(reason));
        }

        debug!("Account created");
        Ok(())
    }
}
