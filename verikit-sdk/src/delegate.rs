use crate::error::SdkError;
use crate::objects::{AccessToken, Account};

/// Receiver of the SDK's asynchronous login events.
///
/// The SDK promises at most one event per presentation. Implementations
/// should not rely on that.
pub trait LoginDelegate: Send {
    /// Verification finished and the SDK issued an access token.
    fn on_success(&mut self, token: &dyn AccessToken, account: &dyn Account, state: Option<&str>);

    /// Verification finished with [`crate::ResponseType::AuthorizationCode`].
    fn on_authorization_code(&mut self, code: &str, state: Option<&str>);

    fn on_error(&mut self, error: &SdkError);

    /// The user dismissed the flow.
    fn on_cancel(&mut self);
}
