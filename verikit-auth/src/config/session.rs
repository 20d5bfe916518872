use std::collections::BTreeSet;

use verikit_sdk::{PhoneNumber, ResponseType, Theme};

use super::{CountryCode, LoginOptions, Settings};
use crate::error::ConfigurationError;

/// Validated, read-only launch parameters for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfiguration {
    theme: Option<Theme>,
    country_whitelist: BTreeSet<CountryCode>,
    country_blacklist: BTreeSet<CountryCode>,
    default_country: Option<CountryCode>,
    initial_email: Option<String>,
    initial_phone: Option<PhoneNumber>,
    initial_auth_state: Option<String>,
    response_type: ResponseType,
    receive_sms: bool,
    read_phone_state_enabled: bool,
    facebook_notifications_enabled: bool,
}

impl SessionConfiguration {
    /// Validate `options`, taking anything they leave out from `settings`.
    ///
    /// Fails if a country code is malformed or if both country lists are
    /// non-empty.
    pub fn from_options(
        options: &LoginOptions,
        settings: &Settings,
    ) -> Result<Self, ConfigurationError> {
        let country_whitelist =
            parse_country_list(options.country_whitelist.as_deref(), "countryWhitelist")?;
        let country_blacklist =
            parse_country_list(options.country_blacklist.as_deref(), "countryBlacklist")?;

        if !country_whitelist.is_empty() && !country_blacklist.is_empty() {
            return Err(ConfigurationError::ConflictingCountryLists);
        }

        let default_country = match &options.default_country {
            Some(code) => Some(CountryCode::parse(code, "defaultCountry")?),
            None => settings
                .default_country
                .as_deref()
                .map(|code| CountryCode::parse(code, "default_country"))
                .transpose()?,
        };

        let initial_phone = match (
            non_empty(&options.initial_phone_country_prefix),
            non_empty(&options.initial_phone_number),
        ) {
            (Some(prefix), Some(number)) => Some(PhoneNumber::new(prefix, number)),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "initialPhoneNumber and initialPhoneCountryPrefix must be given together, \
                     ignoring both"
                );
                None
            }
        };

        Ok(Self {
            theme: options.theme.clone(),
            country_whitelist,
            country_blacklist,
            default_country,
            initial_email: non_empty(&options.initial_email).map(str::to_string),
            initial_phone,
            initial_auth_state: non_empty(&options.initial_auth_state).map(str::to_string),
            response_type: options.response_type.unwrap_or(settings.response_type),
            receive_sms: options.receive_sms.unwrap_or(settings.receive_sms),
            read_phone_state_enabled: options
                .read_phone_state_enabled
                .unwrap_or(settings.read_phone_state_enabled),
            facebook_notifications_enabled: options
                .facebook_notifications_enabled
                .unwrap_or(settings.facebook_notifications_enabled),
        })
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn country_whitelist(&self) -> &BTreeSet<CountryCode> {
        &self.country_whitelist
    }

    pub fn country_blacklist(&self) -> &BTreeSet<CountryCode> {
        &self.country_blacklist
    }

    pub fn default_country(&self) -> Option<&CountryCode> {
        self.default_country.as_ref()
    }

    pub fn initial_email(&self) -> Option<&str> {
        self.initial_email.as_deref()
    }

    pub fn initial_phone(&self) -> Option<&PhoneNumber> {
        self.initial_phone.as_ref()
    }

    pub fn initial_auth_state(&self) -> Option<&str> {
        self.initial_auth_state.as_deref()
    }

    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    pub fn receive_sms(&self) -> bool {
        self.receive_sms
    }

    pub fn read_phone_state_enabled(&self) -> bool {
        self.read_phone_state_enabled
    }

    pub fn facebook_notifications_enabled(&self) -> bool {
        self.facebook_notifications_enabled
    }
}

impl TryFrom<LoginOptions> for SessionConfiguration {
    type Error = ConfigurationError;

    fn try_from(options: LoginOptions) -> Result<Self, Self::Error> {
        Self::from_options(&options, &Settings::default())
    }
}

fn parse_country_list(
    codes: Option<&[String]>,
    field: &'static str,
) -> Result<BTreeSet<CountryCode>, ConfigurationError> {
    codes
        .unwrap_or_default()
        .iter()
        .map(|code| CountryCode::parse(code, field))
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
