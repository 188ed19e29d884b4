//! The registration flow controller.
//!
//! Sequences the three remote calls (issue code, verify code, create
//! account) so that account creation can never happen without a prior
//! successful phone verification in the same flow. Registration fields
//! are held in memory only; nothing is persisted before the
//! phone-ownership proof succeeds.

use crate::callback::sanitize_callback_url;
use crate::cooldown::ResendCooldown;
use crate::form::{FieldError, PendingRegistration, RegistrationForm};
use crate::messages::{MessageCatalog, MessageKey, StatusMessage};
use account_client::{AccountClient, AccountError, NewAccountRequest};
use async_trait::async_trait;
use otp_client::{CodeIssued, OtpClient, OtpError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use urlencoding::encode;

/// Code issuance and verification collaborator.
#[async_trait]
pub trait CodeService: Send + Sync {
    async fn send_code(&self, phone: &str) -> Result<CodeIssued, OtpError>;
    async fn verify_code(&self, phone: &str, code: &str) -> Result<(), OtpError>;
}

/// Account creation collaborator.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn create_account(&self, request: &NewAccountRequest) -> Result<(), AccountError>;
}

#[async_trait]
impl CodeService for OtpClient {
    async fn send_code(&self, phone: &str) -> Result<CodeIssued, OtpError> {
        OtpClient::send_code(self, phone).await
    }

    async fn verify_code(&self, phone: &str, code: &str) -> Result<(), OtpError> {
        OtpClient::verify_code(self, phone, code).await
    }
}

#[async_trait]
impl AccountService for AccountClient {
    async fn create_account(&self, request: &NewAccountRequest) -> Result<(), AccountError> {
        AccountClient::create_account(self, request).await
    }
}

/// Flow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting and validating form fields.
    Form,
    /// Code issued; waiting for the user to enter it.
    AwaitingCode,
    /// Account created; redirect pending.
    Complete,
}

/// Proof that the held phone number passed verification, with the
/// instant it was obtained. Lets a failed creation be retried without
/// re-verifying while the proof is fresh.
#[derive(Debug, Clone)]
struct VerifiedPhone {
    phone: String,
    at: Instant,
}

/// Tunables captured at flow entry.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// How long the resend action stays disabled after an issuance.
    pub resend_cooldown: Duration,
    /// How long a verified-phone proof stays usable for a creation retry.
    pub verified_ttl: Duration,
    /// Locale for status messages and the redirect target.
    pub locale: String,
    /// Raw callback URL from the entry query string, sanitized on entry.
    pub callback_url: Option<String>,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            resend_cooldown: Duration::from_secs(300),
            verified_ttl: Duration::from_secs(300),
            locale: "en".to_string(),
            callback_url: None,
        }
    }
}

/// The registration flow controller.
///
/// One instance per signup attempt. The exclusive `&mut self` borrow on
/// every operation is the single-in-flight guard: no second remote call
/// can start while one is pending.
pub struct SignupFlow<C, A> {
    code_service: C,
    account_service: A,
    catalog: MessageCatalog,
    options: FlowOptions,
    callback: Option<String>,

    phase: Phase,
    pending: Option<PendingRegistration>,
    field_errors: Vec<FieldError>,
    code_input: String,
    status: Option<StatusMessage>,
    cooldown: ResendCooldown,
    verified: Option<VerifiedPhone>,
}

impl<C: CodeService, A: AccountService> SignupFlow<C, A> {
    /// Create a flow at the form step.
    pub fn new(code_service: C, account_service: A, options: FlowOptions) -> Self {
        let callback = options
            .callback_url
            .as_deref()
            .and_then(|raw| sanitize_callback_url(raw, &options.locale));

        Self {
            code_service,
            account_service,
            catalog: MessageCatalog::builtin(),
            options,
            callback,
            phase: Phase::Form,
            pending: None,
            field_errors: Vec::new(),
            code_input: String::new(),
            status: None,
            cooldown: ResendCooldown::new(),
            verified: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current status line, if any. At most one is ever visible.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Validation failures from the last submit.
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// The held registration fields, for repopulating the form after an
    /// issuance failure.
    pub fn pending(&self) -> Option<&PendingRegistration> {
        self.pending.as_ref()
    }

    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    /// The sanitized callback path, if one survived sanitization.
    pub fn callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// Replace the code input with its sanitized form: digits only,
    /// truncated to 6.
    pub fn set_code_input(&mut self, raw: &str) {
        self.code_input = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .take(6)
            .collect();
    }

    /// Verify is available only for exactly 6 held digits.
    pub fn can_verify(&self) -> bool {
        self.phase == Phase::AwaitingCode && self.code_input.len() == 6
    }

    /// Resend is available once the cooldown has elapsed.
    pub fn can_resend(&self) -> bool {
        self.phase == Phase::AwaitingCode && self.cooldown.is_ready()
    }

    /// Time left until resend re-enables.
    pub fn resend_remaining(&self) -> Option<Duration> {
        self.cooldown.remaining()
    }

    /// A failed creation can be retried without re-verifying while the
    /// verified-phone proof is fresh and still matches the held phone.
    pub fn can_retry_create(&self) -> bool {
        if self.phase != Phase::AwaitingCode {
            return false;
        }
        match (&self.verified, &self.pending) {
            (Some(proof), Some(pending)) => {
                proof.phone == pending.phone && proof.at.elapsed() <= self.options.verified_ttl
            }
            _ => false,
        }
    }

    /// Where to navigate after completion: the locale login page,
    /// carrying the sanitized callback forward when present.
    pub fn redirect_target(&self) -> Option<String> {
        if self.phase != Phase::Complete {
            return None;
        }
        let login = format!("/{}/login", self.options.locale);
        Some(match &self.callback {
            // The callback may itself carry a query string; encode it so
            // its separators stay inside the callbackUrl value.
            Some(cb) => format!("{}?callbackUrl={}", login, encode(cb)),
            None => login,
        })
    }

    /// Validate the form and, if it passes, hold the fields and trigger
    /// code issuance. A new submission overwrites any previous pending
    /// registration and voids its verification proof.
    pub async fn submit_form(&mut self, form: RegistrationForm) {
        if self.phase == Phase::Complete {
            return;
        }

        match form.validate() {
            Ok(pending) => {
                self.field_errors.clear();
                self.verified = None;
                self.pending = Some(pending);
                // A fresh submission starts over: if issuance fails, the
                // flow must land back at the form even when the previous
                // registration had already reached the code step.
                self.phase = Phase::Form;
                self.issue().await;
            }
            Err(errors) => {
                let text = errors
                    .iter()
                    .map(|e| self.catalog.resolve(&self.options.locale, e.key))
                    .collect::<Vec<_>>()
                    .join("\n");
                self.status = Some(StatusMessage::error(text));
                self.field_errors = errors;
                debug!(count = self.field_errors.len(), "Form validation failed");
            }
        }
    }

    /// Re-issue for the already-held fields after an issuance failure,
    /// so the user need not re-type anything.
    pub async fn resubmit(&mut self) {
        if self.phase == Phase::Form && self.pending.is_some() {
            self.issue().await;
        }
    }

    /// Re-issue the code for the held phone and restart the cooldown.
    pub async fn resend(&mut self) {
        if !self.can_resend() {
            debug!("Resend requested while unavailable, ignoring");
            return;
        }
        self.issue().await;
    }

    /// Check the entered code and, on success, immediately create the
    /// account with the held fields. Creation is reachable only through
    /// this success path (or a fresh-proof retry of it).
    pub async fn verify(&mut self) {
        if self.phase != Phase::AwaitingCode {
            return;
        }
        if !self.can_verify() {
            self.status = Some(StatusMessage::error(
                self.catalog
                    .resolve(&self.options.locale, MessageKey::CodeInvalidInput),
            ));
            return;
        }
        let Some(pending) = &self.pending else {
            return;
        };
        let phone = pending.phone.clone();

        match self.code_service.verify_code(&phone, &self.code_input).await {
            Ok(()) => {
                info!(phone = %phone, "Phone verified");
                self.verified = Some(VerifiedPhone {
                    phone,
                    at: Instant::now(),
                });
                self.create().await;
            }
            Err(OtpError::VerificationFailed(reason)) => {
                warn!(phone = %phone, "Verification failed: {}", reason);
                let base = self
                    .catalog
                    .resolve(&self.options.locale, MessageKey::VerificationFailed);
                self.status = Some(StatusMessage::error(format!("{} ({})", base, reason)));
            }
            Err(e) => {
                warn!(phone = %phone, "Verification call failed: {}", e);
                self.status = Some(StatusMessage::error(
                    self.catalog
                        .resolve(&self.options.locale, MessageKey::NetworkError),
                ));
            }
        }
    }

    /// Retry account creation under a fresh verification proof. Once the
    /// proof is stale the user must re-verify.
    pub async fn retry_create(&mut self) {
        if !self.can_retry_create() {
            if self.verified.is_some() {
                self.status = Some(StatusMessage::error(
                    self.catalog
                        .resolve(&self.options.locale, MessageKey::RetryUnavailable),
                ));
            }
            return;
        }
        self.create().await;
    }

    async fn issue(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let phone = pending.phone.clone();

        match self.code_service.send_code(&phone).await {
            Ok(issued) => {
                info!(phone = %phone, "Verification code issued");
                self.phase = Phase::AwaitingCode;
                self.cooldown.start(self.options.resend_cooldown);
                self.status = Some(self.issued_status(&issued));
            }
            Err(OtpError::IssuanceRejected(reason)) => {
                warn!(phone = %phone, "Issuance rejected: {}", reason);
                let base = self
                    .catalog
                    .resolve(&self.options.locale, MessageKey::IssuanceFailed);
                self.status = Some(StatusMessage::error(format!("{} ({})", base, reason)));
            }
            Err(e) => {
                warn!(phone = %phone, "Issuance call failed: {}", e);
                self.status = Some(StatusMessage::error(
                    self.catalog
                        .resolve(&self.options.locale, MessageKey::NetworkError),
                ));
            }
        }
    }

    async fn create(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let request = pending.to_account_request();

        match self.account_service.create_account(&request).await {
            Ok(()) => {
                info!(phone = %request.phone, "Account created");
                self.pending = None;
                self.verified = None;
                self.code_input.clear();
                self.cooldown.cancel();
                self.phase = Phase::Complete;
                self.status = Some(StatusMessage::success(
                    self.catalog
                        .resolve(&self.options.locale, MessageKey::AccountCreated),
                ));
            }
            Err(AccountError::CreationRejected(reason)) => {
                warn!("Account creation rejected: {}", reason);
                let base = self
                    .catalog
                    .resolve(&self.options.locale, MessageKey::CreationFailed);
                self.status = Some(StatusMessage::error(format!("{} ({})", base, reason)));
            }
            Err(e) => {
                warn!("Account creation call failed: {}", e);
                self.status = Some(StatusMessage::error(
                    self.catalog
                        .resolve(&self.options.locale, MessageKey::NetworkError),
                ));
            }
        }
    }

    /// Informational (never "success") message after an issuance, with
    /// the delivery warning and dev-mode code echo appended when present.
    fn issued_status(&self, issued: &CodeIssued) -> StatusMessage {
        let mut text = self
            .catalog
            .resolve(&self.options.locale, MessageKey::CodeSent);

        if let Some(warning) = &issued.warning {
            text.push(' ');
            text.push_str(warning);
        }

        if let Some(code) = &issued.dev_code {
            let notice = self
                .catalog
                .resolve(&self.options.locale, MessageKey::DevCodeNotice)
                .replace("{code}", code);
            text.push(' ');
            text.push_str(&notice);
        }

        StatusMessage::info(text)
    }
}
