//! Wire types for the account-creation service.

use serde::{Deserialize, Serialize};

/// Request to create a new account from fully validated registration
/// fields plus the verified-phone assertion.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub phone_verified: bool,
}

// Passwords must never reach logs.
impl std::fmt::Debug for NewAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccountRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("phone", &self.phone)
            .field("phone_verified", &self.phone_verified)
            .finish()
    }
}

/// Response from the account-creation service.
#[derive(Debug, Deserialize)]
pub struct CreateAccountResponse {
    pub success: bool,

    #[serde(default)]
    pub error: Option<String>,
}
