use serde::{Deserialize, Serialize};

/// Which entry flow the SDK presents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    Phone,
    Email,
}

impl LoginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginType::Phone => "phone",
            LoginType::Email => "email",
        }
    }
}

impl std::fmt::Display for LoginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the SDK hands back on success: a live access token, or an
/// authorization code meant for a server-side exchange.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    #[default]
    #[serde(rename = "token", alias = "TOKEN")]
    AccessToken,
    #[serde(rename = "code", alias = "CODE")]
    AuthorizationCode,
}

/// Phone number as the SDK models it: dialing prefix plus national number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub country_code: String,
    pub number: String,
}

impl PhoneNumber {
    pub fn new(country_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            number: number.into(),
        }
    }
}

/// Visual theme for the SDK's screens. Never inspected on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(serde_json::Value);

impl Theme {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}
