use serde::Serialize;

use crate::macros::setter;
use crate::types::{LoginType, PhoneNumber, ResponseType, Theme};

/// Everything the SDK needs to present one login flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfiguration {
    pub login_type: LoginType,
    pub response_type: ResponseType,
    pub theme: Option<Theme>,
    pub sms_whitelist: Vec<String>,
    pub sms_blacklist: Vec<String>,
    pub default_country_code: Option<String>,
    pub initial_email: Option<String>,
    pub initial_phone_number: Option<PhoneNumber>,
    pub initial_auth_state: Option<String>,
    pub receive_sms: bool,
    pub read_phone_state_enabled: bool,
    pub facebook_notifications_enabled: bool,
}

impl LoginConfiguration {
    pub fn new(login_type: LoginType, response_type: ResponseType) -> Self {
        Self {
            login_type,
            response_type,
            theme: None,
            sms_whitelist: Vec::new(),
            sms_blacklist: Vec::new(),
            default_country_code: None,
            initial_email: None,
            initial_phone_number: None,
            initial_auth_state: None,
            receive_sms: false,
            read_phone_state_enabled: false,
            facebook_notifications_enabled: false,
        }
    }

    setter!(opt theme: Theme);
    setter!(sms_whitelist: Vec<String>);
    setter!(sms_blacklist: Vec<String>);
    setter!(opt default_country_code: String);
    setter!(opt initial_email: String);
    setter!(opt initial_phone_number: PhoneNumber);
    setter!(opt initial_auth_state: String);
    setter!(receive_sms: bool);
    setter!(read_phone_state_enabled: bool);
    setter!(facebook_notifications_enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_what_it_is_given() {
        let configuration = LoginConfiguration::new(LoginType::Phone, ResponseType::AccessToken)
            .sms_whitelist(vec!["US".to_string()])
            .initial_phone_number(PhoneNumber::new("1", "5551234"))
            .receive_sms(true);

        assert_eq!(configuration.sms_whitelist, vec!["US".to_string()]);
        assert!(configuration.sms_blacklist.is_empty());
        assert_eq!(
            configuration.initial_phone_number,
            Some(PhoneNumber::new("1", "5551234"))
        );
        assert!(configuration.receive_sms);
        assert!(!configuration.read_phone_state_enabled);
        assert_eq!(configuration.initial_email, None);
    }

    #[test]
    fn response_type_accepts_upper_case_names() {
        let parsed: ResponseType = serde_json::from_str("\"CODE\"").unwrap();
        assert_eq!(parsed, ResponseType::AuthorizationCode);

        let parsed: ResponseType = serde_json::from_str("\"token\"").unwrap();
        assert_eq!(parsed, ResponseType::AccessToken);
    }
}
