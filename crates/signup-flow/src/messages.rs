//! User-facing status messages.
//!
//! Every string the flow can show is an enumerated key resolved through a
//! locale fallback chain (requested locale, then the default locale, then
//! the built-in text). The controller holds at most one `StatusMessage`,
//! so error and success text can never be visible at the same time.

use std::collections::HashMap;

/// Message severity. Exactly one of these accompanies any visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Info,
    Success,
}

/// A single user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }
}

/// Keys for every message the flow can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    CodeSent,
    /// Non-production aid; `{code}` is replaced with the echoed code.
    DevCodeNotice,
    CodeInvalidInput,
    IssuanceFailed,
    VerificationFailed,
    CreationFailed,
    AccountCreated,
    NetworkError,
    RetryUnavailable,
    EmailInvalid,
    PasswordTooShort,
    PasswordMismatch,
    FirstNameTooShort,
    LastNameTooShort,
    PhoneInvalid,
}

fn builtin_text(key: MessageKey) -> &'static str {
    match key {
        MessageKey::CodeSent => "Verification code sent. Enter the 6-digit code to continue.",
        MessageKey::DevCodeNotice => "(dev code: {code})",
        MessageKey::CodeInvalidInput => "Enter the 6-digit code exactly.",
        MessageKey::IssuanceFailed => "Could not send the verification code.",
        MessageKey::VerificationFailed => "The code is incorrect or has expired.",
        MessageKey::CreationFailed => {
            "Your phone is verified but the account could not be created."
        }
        MessageKey::AccountCreated => "Registration complete. Redirecting to sign in...",
        MessageKey::NetworkError => "Something went wrong. Please try again.",
        MessageKey::RetryUnavailable => "Verification has expired. Request a new code.",
        MessageKey::EmailInvalid => "Enter a valid email address.",
        MessageKey::PasswordTooShort => "Password must be at least 8 characters.",
        MessageKey::PasswordMismatch => "Passwords do not match.",
        MessageKey::FirstNameTooShort => "First name must be at least 2 characters.",
        MessageKey::LastNameTooShort => "Last name must be at least 2 characters.",
        MessageKey::PhoneInvalid => "Enter a valid mobile number (09 followed by 9 digits).",
    }
}

/// Locale-keyed message tables with explicit fallback.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    default_locale: String,
    tables: HashMap<String, HashMap<MessageKey, String>>,
}

impl MessageCatalog {
    /// Catalog with the built-in English texts plus the Persian table
    /// for the locales this flow ships with.
    pub fn builtin() -> Self {
        let mut catalog = Self {
            default_locale: "en".to_string(),
            tables: HashMap::new(),
        };

        catalog.insert(
            "fa",
            MessageKey::CodeSent,
            "کد تایید ارسال شد. کد ۶ رقمی را وارد کنید.",
        );
        catalog.insert(
            "fa",
            MessageKey::VerificationFailed,
            "کد وارد شده صحیح نیست یا منقضی شده است.",
        );
        catalog.insert(
            "fa",
            MessageKey::AccountCreated,
            "ثبت‌نام با موفقیت انجام شد. در حال انتقال به صفحه ورود...",
        );
        catalog.insert(
            "fa",
            MessageKey::NetworkError,
            "خطایی رخ داد. لطفا دوباره تلاش کنید.",
        );
        catalog.insert("fa", MessageKey::PhoneInvalid, "شماره موبایل معتبر نیست.");

        catalog
    }

    /// Override or add a message for a locale.
    pub fn insert(&mut self, locale: &str, key: MessageKey, text: impl Into<String>) {
        self.tables
            .entry(locale.to_string())
            .or_default()
            .insert(key, text.into());
    }

    /// Resolve a key: requested locale, then the default locale, then the
    /// built-in text.
    pub fn resolve(&self, locale: &str, key: MessageKey) -> String {
        self.tables
            .get(locale)
            .and_then(|t| t.get(&key))
            .or_else(|| {
                self.tables
                    .get(&self.default_locale)
                    .and_then(|t| t.get(&key))
            })
            .cloned()
            .unwrap_or_else(|| builtin_text(key).to_string())
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let catalog = MessageCatalog::builtin();
        assert_eq!(
            catalog.resolve("en", MessageKey::PasswordTooShort),
            "Password must be at least 8 characters."
        );
    }

    #[test]
    fn test_resolve_uses_locale_table() {
        let catalog = MessageCatalog::builtin();
        let text = catalog.resolve("fa", MessageKey::PhoneInvalid);
        assert_eq!(text, "شماره موبایل معتبر نیست.");
    }

    #[test]
    fn test_unknown_locale_key_falls_through_chain() {
        let mut catalog = MessageCatalog::builtin();
        catalog.insert("en", MessageKey::NetworkError, "custom default");

        // "fa" has its own NetworkError; "de" has nothing and should hit
        // the default locale's override before the builtin.
        assert_eq!(catalog.resolve("de", MessageKey::NetworkError), "custom default");
        assert_ne!(catalog.resolve("fa", MessageKey::NetworkError), "custom default");
    }

    #[test]
    fn test_status_message_constructors() {
        assert_eq!(StatusMessage::error("x").severity, Severity::Error);
        assert_eq!(StatusMessage::info("x").severity, Severity::Info);
        assert_eq!(StatusMessage::success("x").severity, Severity::Success);
    }
}
