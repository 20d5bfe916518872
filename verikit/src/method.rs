use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use verikit_auth::{AuthError, ConfigurationError, PendingLogin};

pub const METHOD_CONFIGURE: &str = "configure";
pub const METHOD_LOG_IN: &str = "login";
pub const METHOD_LOG_OUT: &str = "logOut";
pub const METHOD_GET_CURRENT_ACCESS_TOKEN: &str = "getCurrentAccessToken";
pub const METHOD_GET_CURRENT_ACCOUNT: &str = "getCurrentAccount";

pub const ARG_CONFIG_OPTIONS: &str = "configOptions";

/// A request from the host: method name plus its JSON arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// What a method hands back: a value right away, or a login still running.
#[derive(Debug)]
pub enum MethodReply {
    Value(Value),
    Pending(PendingLogin),
}

impl MethodReply {
    /// Wait for the final JSON reply.
    pub async fn resolve(self) -> Result<Value, MethodError> {
        match self {
            MethodReply::Value(value) => Ok(value),
            MethodReply::Pending(pending) => {
                let response = pending.await;
                serde_json::to_value(response).map_err(|e| AuthError::from(e).into())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum MethodError {
    #[error("Verification SDK is not initialized, `{0}` call discarded")]
    NotInitialized(&'static str),

    #[error("`{0}` called while another login was in progress")]
    LoginInProgress(&'static str),

    #[error("Method `{0}` is not implemented")]
    NotImplemented(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl MethodError {
    /// Stable error code for the host.
    pub fn code(&self) -> &'static str {
        match self {
            MethodError::NotInitialized(_) => "not_initialized",
            MethodError::LoginInProgress(_) => "login_in_progress",
            MethodError::NotImplemented(_) => "not_implemented",
            MethodError::Auth(AuthError::Configuration(_)) => "configuration_error",
            MethodError::Auth(AuthError::Normalization(_)) => "normalization_error",
            MethodError::Auth(AuthError::Json(_)) => "invalid_arguments",
        }
    }
}

impl From<ConfigurationError> for MethodError {
    fn from(err: ConfigurationError) -> Self {
        MethodError::Auth(err.into())
    }
}

impl From<serde_json::Error> for MethodError {
    fn from(err: serde_json::Error) -> Self {
        MethodError::Auth(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_call_defaults_arguments_to_null() {
        let call: MethodCall = serde_json::from_value(json!({ "method": "logOut" })).unwrap();
        assert_eq!(call, MethodCall::new(METHOD_LOG_OUT, Value::Null));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(MethodError::NotInitialized("login").code(), "not_initialized");
        assert_eq!(MethodError::LoginInProgress("login").code(), "login_in_progress");
        assert_eq!(
            MethodError::from(ConfigurationError::ConflictingCountryLists).code(),
            "configuration_error"
        );
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        assert_eq!(MethodError::from(json_err).code(), "invalid_arguments");
    }

    #[test]
    fn messages_name_the_method() {
        let err = MethodError::NotInitialized("getCurrentAccount");
        assert!(err.to_string().contains("getCurrentAccount"));
    }

    #[tokio::test]
    async fn immediate_reply_resolves_to_its_value() {
        let reply = MethodReply::Value(json!({ "ok": true }));
        assert_eq!(reply.resolve().await.unwrap(), json!({ "ok": true }));
    }
}
