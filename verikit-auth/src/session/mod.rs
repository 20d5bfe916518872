mod completion;
mod controller;
mod state;

pub use completion::{CompletionHandle, PendingLogin, ResultCallback};
pub use controller::{start_email_login, start_phone_login, VerificationSession};
pub use state::SessionState;

use uuid::Uuid;

/// Identifies one session in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
