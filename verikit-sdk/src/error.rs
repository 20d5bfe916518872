use serde::{Deserialize, Serialize};

/// Broad category of an SDK failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SdkErrorKind {
    Network,
    Server,
    Configuration,
    InvalidInput,
    Internal,
}

/// A failure reported by the SDK through [`crate::LoginDelegate::on_error`]
/// or [`crate::AccountKit::current_account`].
///
/// The message is whatever the SDK said and is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkError {
    pub kind: SdkErrorKind,
    pub message: String,
}

impl SdkError {
    pub fn new(kind: SdkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::Network, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(SdkErrorKind::Internal, message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SdkError {}
