use chrono::{
    serde::{ts_milliseconds, ts_milliseconds_option},
    DateTime, Utc,
};
use serde::Serialize;

/// Access token flattened for the host. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenRecord {
    pub account_id: String,
    pub token_string: String,
    #[serde(with = "ts_milliseconds")]
    pub refresh_date: DateTime<Utc>,
    #[serde(with = "ts_milliseconds")]
    pub expiration_date: DateTime<Utc>,
    #[serde(with = "ts_milliseconds_option")]
    pub last_refresh: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberRecord {
    pub country_code: String,
    pub number: String,
}

/// Account flattened for the host. A login session fills in exactly the
/// contact field that matches its mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDataRecord {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumberRecord>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoginSuccess {
    #[serde(rename_all = "camelCase")]
    AccessToken {
        access_token: AccessTokenRecord,
        account: AccountDataRecord,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<String>,
    },
    AuthorizationCode {
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<String>,
    },
}

/// The one terminal outcome a session reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoginResponse {
    Success(LoginSuccess),
    Error { message: String },
    Cancelled,
}

impl LoginResponse {
    pub fn error(message: impl Into<String>) -> Self {
        LoginResponse::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginResponse::Success(_))
    }
}
