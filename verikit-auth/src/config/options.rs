use serde::Deserialize;
use verikit_sdk::{LoginType, ResponseType, Theme};

use crate::error::ConfigurationError;

/// Launch options as the host sends them. Every field is optional; what is
/// left out falls back to the options stored by `configure`, then to
/// [`super::Settings`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOptions {
    pub theme: Option<Theme>,
    pub country_whitelist: Option<Vec<String>>,
    pub country_blacklist: Option<Vec<String>>,
    pub default_country: Option<String>,
    pub initial_email: Option<String>,
    pub initial_phone_number: Option<String>,
    pub initial_phone_country_prefix: Option<String>,
    pub response_type: Option<ResponseType>,
    pub initial_auth_state: Option<String>,
    #[serde(rename = "receiveSMS")]
    pub receive_sms: Option<bool>,
    pub read_phone_state_enabled: Option<bool>,
    pub facebook_notifications_enabled: Option<bool>,
}

impl LoginOptions {
    /// Fill every field missing from `self` with the one from `base`.
    pub fn merged_over(self, base: &LoginOptions) -> LoginOptions {
        LoginOptions {
            theme: self.theme.or_else(|| base.theme.clone()),
            country_whitelist: self
                .country_whitelist
                .or_else(|| base.country_whitelist.clone()),
            country_blacklist: self
                .country_blacklist
                .or_else(|| base.country_blacklist.clone()),
            default_country: self
                .default_country
                .or_else(|| base.default_country.clone()),
            initial_email: self.initial_email.or_else(|| base.initial_email.clone()),
            initial_phone_number: self
                .initial_phone_number
                .or_else(|| base.initial_phone_number.clone()),
            initial_phone_country_prefix: self
                .initial_phone_country_prefix
                .or_else(|| base.initial_phone_country_prefix.clone()),
            response_type: self.response_type.or(base.response_type),
            initial_auth_state: self
                .initial_auth_state
                .or_else(|| base.initial_auth_state.clone()),
            receive_sms: self.receive_sms.or(base.receive_sms),
            read_phone_state_enabled: self
                .read_phone_state_enabled
                .or(base.read_phone_state_enabled),
            facebook_notifications_enabled: self
                .facebook_notifications_enabled
                .or(base.facebook_notifications_enabled),
        }
    }
}

/// The `login` request body: a mode plus per-call options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "loginType")]
    pub mode: Option<String>,
    #[serde(flatten)]
    pub options: LoginOptions,
}

impl LoginRequest {
    pub fn login_type(&self) -> Result<LoginType, ConfigurationError> {
        let raw = self.mode.as_deref().ok_or(ConfigurationError::MissingMode)?;
        parse_login_type(raw)
    }
}

/// Case-insensitive mode parsing. The Turkish dotted and dotless I are
/// folded first, otherwise `"EMAİL"` from a Turkish locale upper-casing
/// would not match.
pub fn parse_login_type(raw: &str) -> Result<LoginType, ConfigurationError> {
    let folded: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            'İ' => 'I',
            'ı' => 'i',
            other => other,
        })
        .collect::<String>()
        .to_ascii_lowercase();

    match folded.as_str() {
        "phone" => Ok(LoginType::Phone),
        "email" => Ok(LoginType::Email),
        _ => Err(ConfigurationError::InvalidMode(raw.to_string())),
    }
}
