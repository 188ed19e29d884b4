//! Registration form validation.
//!
//! All rules must pass before any network call is made. The validated
//! fields become a `PendingRegistration`, which lives only in the flow's
//! memory until the phone-ownership proof succeeds.

use crate::messages::MessageKey;
use account_client::NewAccountRequest;

/// Raw user input for the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// Form field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
    Phone,
}

/// A single validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub key: MessageKey,
}

/// Validated registration fields held in memory until the phone is
/// verified. Never persisted and never logged with its passwords.
#[derive(Clone)]
pub struct PendingRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl std::fmt::Debug for PendingRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("phone", &self.phone)
            .finish()
    }
}

impl PendingRegistration {
    /// Build the account-creation request. Only called after the phone
    /// has been verified, so `phone_verified` is always true.
    pub fn to_account_request(&self) -> NewAccountRequest {
        NewAccountRequest {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            phone: self.phone.clone(),
            phone_verified: true,
        }
    }
}

impl RegistrationForm {
    /// Validate and trim the form, producing the in-memory pending
    /// registration. Passwords are compared as entered, never trimmed.
    pub fn validate(self) -> Result<PendingRegistration, Vec<FieldError>> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = self.email.trim().to_string();
        let phone = self.phone.trim().to_string();

        let mut errors = Vec::new();

        if first_name.chars().count() < 2 {
            errors.push(FieldError {
                field: Field::FirstName,
                key: MessageKey::FirstNameTooShort,
            });
        }

        if last_name.chars().count() < 2 {
            errors.push(FieldError {
                field: Field::LastName,
                key: MessageKey::LastNameTooShort,
            });
        }

        if !is_valid_email(&email) {
            errors.push(FieldError {
                field: Field::Email,
                key: MessageKey::EmailInvalid,
            });
        }

        if self.password.chars().count() < 8 {
            errors.push(FieldError {
                field: Field::Password,
                key: MessageKey::PasswordTooShort,
            });
        }

        if self.confirm_password != self.password {
            errors.push(FieldError {
                field: Field::ConfirmPassword,
                key: MessageKey::PasswordMismatch,
            });
        }

        if !is_valid_phone(&phone) {
            errors.push(FieldError {
                field: Field::Phone,
                key: MessageKey::PhoneInvalid,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PendingRegistration {
            first_name,
            last_name,
            email,
            password: self.password,
            confirm_password: self.confirm_password,
            phone,
        })
    }
}

/// Local 11-digit mobile format: `09` followed by 9 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with("09") && phone.chars().all(|c| c.is_ascii_digit())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // split_once consumed the first '@'; a second one in the domain is
    // rejected below.
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}
