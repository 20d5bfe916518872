use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use verikit_sdk::ResponseType;

use super::CountryCode;
use crate::error::{AuthError, ConfigurationError};

/// Bridge-wide defaults for options a login request leaves out.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub response_type: ResponseType,

    #[serde(default)]
    pub default_country: Option<String>,

    #[serde(default = "default_true")]
    pub receive_sms: bool,

    #[serde(default = "default_true")]
    pub read_phone_state_enabled: bool,

    #[serde(default = "default_true")]
    pub facebook_notifications_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            response_type: ResponseType::default(),
            default_country: None,
            receive_sms: true,
            read_phone_state_enabled: true,
            facebook_notifications_enabled: true,
        }
    }
}

impl Settings {
    /// Load from the optional file named by `VERIKIT_CONFIG` (default
    /// `verikit.toml`), overridden by `VERIKIT__*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("VERIKIT_CONFIG").unwrap_or_else(|_| "verikit.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(Environment::with_prefix("VERIKIT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// [`Settings::new`] followed by [`Settings::validate`].
    pub fn load() -> Result<Self, AuthError> {
        let settings = Self::new()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(code) = &self.default_country {
            CountryCode::parse(code, "default_country")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn toml_overrides_defaults() {
        let settings = Settings::from_toml(
            r#"
            response_type = "code"
            default_country = "ng"
            receive_sms = false
            "#,
        )
        .unwrap();

        assert_eq!(settings.response_type, ResponseType::AuthorizationCode);
        assert_eq!(settings.default_country.as_deref(), Some("ng"));
        assert!(!settings.receive_sms);
        assert!(settings.read_phone_state_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn environment_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("verikit-{}.toml", std::process::id()));
        std::fs::write(&path, "response_type = \"token\"\ndefault_country = \"gb\"\n").unwrap();
        std::env::set_var("VERIKIT_CONFIG", &path);
        std::env::set_var("VERIKIT__RESPONSE_TYPE", "code");

        let loaded = Settings::load();

        std::env::remove_var("VERIKIT_CONFIG");
        std::env::remove_var("VERIKIT__RESPONSE_TYPE");
        std::fs::remove_file(&path).unwrap();

        let settings = loaded.unwrap();
        assert_eq!(settings.response_type, ResponseType::AuthorizationCode);
        assert_eq!(settings.default_country.as_deref(), Some("gb"));
        assert!(settings.receive_sms);
    }

    #[test]
    fn validate_rejects_bad_default_country() {
        let settings = Settings {
            default_country: Some("Nigeria".to_string()),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidCountryCode { field: "default_country", .. })
        ));
    }
}
