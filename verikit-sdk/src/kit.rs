use crate::configuration::LoginConfiguration;
use crate::delegate::LoginDelegate;
use crate::error::SdkError;
use crate::objects::{AccessToken, Account};

/// Runtime permissions some SDK options depend on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    ReadPhoneState,
    ReceiveSms,
}

/// Handle on the verification SDK.
///
/// Calls are made from the host's UI thread. `present` never fails
/// synchronously: whatever happens to the flow is reported to the delegate,
/// and a delegate dropped without any event means the flow went away.
pub trait AccountKit {
    fn is_initialized(&self) -> bool;

    fn has_permission(&self, permission: Permission) -> bool;

    /// Show the modal flow described by `configuration`.
    fn present(&mut self, configuration: LoginConfiguration, delegate: Box<dyn LoginDelegate>);

    fn log_out(&mut self);

    fn current_access_token(&self) -> Option<Box<dyn AccessToken>>;

    fn current_account(&self) -> Result<Box<dyn Account>, SdkError>;
}
