use thiserror::Error;

/// Rejected launch parameters. Raised before anything is presented.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("countryWhitelist and countryBlacklist cannot both be non-empty")]
    ConflictingCountryLists,

    #[error("Invalid country code {code:?} in {field}")]
    InvalidCountryCode { field: &'static str, code: String },

    #[error("Unknown login mode {0:?}, expected \"phone\" or \"email\"")]
    InvalidMode(String),

    #[error("Missing login mode")]
    MissingMode,

    #[error("Settings error: {0}")]
    Settings(String),
}

/// An SDK object lacked a field the normalized record requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("{object} is missing required field {field}")]
    MissingField {
        object: &'static str,
        field: &'static str,
    },
}

impl NormalizationError {
    pub(crate) fn missing(object: &'static str, field: &'static str) -> Self {
        NormalizationError::MissingField { object, field }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<::config::ConfigError> for ConfigurationError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigurationError::Settings(err.to_string())
    }
}

impl From<::config::ConfigError> for AuthError {
    fn from(err: ::config::ConfigError) -> Self {
        AuthError::Configuration(err.into())
    }
}
