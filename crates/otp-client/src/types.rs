//! Wire types for the OTP service.

use serde::{Deserialize, Serialize};

/// Request to issue a one-time code for a phone number.
#[derive(Debug, Serialize)]
pub struct SendCodeRequest {
    pub phone: String,
}

/// Request to check a previously issued code.
///
/// Hits the same endpoint as issuance with `verifyOnly: true`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub phone: String,
    pub code: String,
    pub verify_only: bool,
}

/// Response from the OTP service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,

    /// Non-fatal delivery warning (code was generated but SMS dispatch
    /// may have failed).
    #[serde(default)]
    pub warning: Option<String>,

    /// Echo of the generated code, present only in non-production
    /// configurations of the service.
    #[serde(default)]
    pub dev_code: Option<String>,
}

/// Outcome of a successful code issuance.
#[derive(Debug, Clone, Default)]
pub struct CodeIssued {
    /// Delivery warning to surface alongside the "code sent" message.
    pub warning: Option<String>,

    /// Development-mode code echo, surfaced directly to the user.
    pub dev_code: Option<String>,
}
