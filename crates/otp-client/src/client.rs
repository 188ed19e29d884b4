//! OTP service HTTP client.

use crate::error::OtpError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the one-time-code issuance and verification service.
#[derive(Clone)]
pub struct OtpClient {
    client: Client,
    base_url: String,
}

impl OtpClient {
    /// Create a new OTP client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, OtpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if the OTP service is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Issue a one-time code to the given phone number.
    ///
    /// A success may still carry a delivery warning: the code exists but
    /// SMS dispatch was not confirmed.
    #[instrument(skip(self))]
    pub async fn send_code(&self, phone: &str) -> Result<CodeIssued, OtpError> {
        let request = SendCodeRequest {
            phone: phone.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/otp", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Code issuance request failed: {}", msg);
            return Err(OtpError::Api(msg));
        }

        let body: OtpResponse = response.json().await?;

        if !body.success {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_string());
            warn!(phone = %phone, "Code issuance rejected: {}", reason);
            return Err(OtpError::IssuanceRejected(reason));
        }

        if let Some(warning) = &body.warning {
            warn!(phone = %phone, "Code issued with delivery warning: {}", warning);
        } else {
            debug!(phone = %phone, "Code issued");
        }

        Ok(CodeIssued {
            warning: body.warning,
            dev_code: body.dev_code,
        })
    }

    /// Check a user-entered code against the previously issued one.
    ///
    /// Matching, expiry, and attempt limits are enforced by the service;
    /// the code itself is never logged here.
    #[instrument(skip(self, code))]
    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<(), OtpError> {
        let request = VerifyCodeRequest {
            phone: phone.to_string(),
            code: code.to_string(),
            verify_only: true,
        };

        let response = self
            .client
            .post(format!("{}/v1/otp", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Verification request failed: {}", msg);
            return Err(OtpError::Api(msg));
        }

        let body: OtpResponse = response.json().await?;

        if !body.success {
            let reason = body.error.unwrap_or_else(|| "invalid code".to_string());
            warn!(phone = %phone, "Verification failed: {}", reason);
            return Err(OtpError::VerificationFailed(reason));
        }

        debug!(phone = %phone, "Phone verified");
        Ok(())
    }
}
