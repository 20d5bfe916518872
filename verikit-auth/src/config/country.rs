use serde::Serialize;

use crate::error::ConfigurationError;

/// ISO 3166-1 alpha-2 country code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse `raw` as a two-letter code. `field` names the option it came
    /// from so the error can point at it.
    pub fn parse(raw: &str, field: &'static str) -> Result<Self, ConfigurationError> {
        let trimmed = raw.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigurationError::InvalidCountryCode {
                field,
                code: raw.to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_upper_cases_and_trims() {
        let code = CountryCode::parse(" us ", "defaultCountry").unwrap();
        assert_eq!(code.as_str(), "US");
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        for raw in ["", "U", "USA", "1A", "U-", "ÜS"] {
            let err = CountryCode::parse(raw, "countryWhitelist").unwrap_err();
            assert_eq!(
                err,
                ConfigurationError::InvalidCountryCode {
                    field: "countryWhitelist",
                    code: raw.to_string(),
                }
            );
        }
    }
}
