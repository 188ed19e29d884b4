//! Phone-verified registration flow with deferred account persistence.
//!
//! The flow sequences three remote collaborators so that:
//! - no account or personal data is persisted until phone ownership is
//!   proven (fields are held in memory as a `PendingRegistration`),
//! - account creation is only reachable as the direct continuation of a
//!   successful verification,
//! - status messaging never claims success before the creation call has
//!   actually succeeded.

pub mod callback;
pub mod config;
pub mod cooldown;
pub mod error;
pub mod flow;
pub mod form;
pub mod messages;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use flow::{AccountService, CodeService, FlowOptions, Phase, SignupFlow};
pub use form::{Field, FieldError, PendingRegistration, RegistrationForm};
pub use messages::{MessageCatalog, MessageKey, Severity, StatusMessage};
