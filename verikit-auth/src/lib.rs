//! Verification session core: launch configuration, the session state
//! machine driven by SDK delegate events, and normalization of SDK results
//! into plain records.

pub mod config;
mod error;
pub mod models;
pub mod normalize;
pub mod session;

pub use crate::config::{LoginOptions, LoginRequest, SessionConfiguration, Settings};
pub use error::{AuthError, ConfigurationError, NormalizationError};
pub use models::{
    AccessTokenRecord, AccountDataRecord, LoginResponse, LoginSuccess, PhoneNumberRecord,
};
pub use session::{
    start_email_login, start_phone_login, CompletionHandle, PendingLogin, SessionId, SessionState,
    VerificationSession,
};
