//! One login attempt, from presentation to its single terminal response.
//!
//! The session is handed to the SDK as its [`LoginDelegate`]. Whatever the
//! SDK does afterwards, the session's [`CompletionHandle`] fires exactly
//! once: the first terminal event wins, later events are logged and dropped,
//! and a session released without any event reports a cancellation.

use tracing::{debug, info, warn};
use verikit_sdk::{
    AccessToken, Account, AccountKit, LoginConfiguration, LoginDelegate, LoginType, Permission,
    SdkError,
};

use super::{CompletionHandle, SessionId, SessionState};
use crate::config::{CountryCode, SessionConfiguration};
use crate::error::NormalizationError;
use crate::models::{LoginResponse, LoginSuccess};
use crate::normalize::{normalize_account, normalize_token};

const NOT_PRESENTED_MESSAGE: &str = "login session ended before it was presented";

pub struct VerificationSession {
    id: SessionId,
    mode: LoginType,
    configuration: SessionConfiguration,
    state: SessionState,
    completion: CompletionHandle,
    span: tracing::Span,
}

impl VerificationSession {
    pub fn new(
        mode: LoginType,
        configuration: SessionConfiguration,
        completion: CompletionHandle,
    ) -> Self {
        let id = SessionId::new();
        let span = tracing::info_span!("verification_session", session_id = %id, mode = %mode);
        span.in_scope(|| debug!("session created"));

        Self {
            id,
            mode,
            configuration,
            state: SessionState::Created,
            completion,
            span,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> LoginType {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn configuration(&self) -> &SessionConfiguration {
        &self.configuration
    }

    /// Show the flow and hand the session over to the SDK.
    pub fn present<K>(mut self, kit: &mut K) -> SessionId
    where
        K: AccountKit + ?Sized,
    {
        let id = self.id;
        let login_configuration = self.login_configuration(kit);
        self.transition(SessionState::Presented);
        self.span.in_scope(|| info!("presenting login flow"));
        kit.present(login_configuration, Box::new(self));
        id
    }

    fn login_configuration<K>(&self, kit: &K) -> LoginConfiguration
    where
        K: AccountKit + ?Sized,
    {
        let _enter = self.span.enter();
        let configuration = &self.configuration;

        let mut receive_sms = configuration.receive_sms();
        if receive_sms && !kit.has_permission(Permission::ReceiveSms) {
            warn!("receiveSMS requested without the SMS permission, disabling it");
            receive_sms = false;
        }

        let mut read_phone_state = configuration.read_phone_state_enabled();
        if read_phone_state && !kit.has_permission(Permission::ReadPhoneState) {
            warn!(
                "readPhoneStateEnabled requested without the phone state permission, disabling it"
            );
            read_phone_state = false;
        }

        let mut login_configuration =
            LoginConfiguration::new(self.mode, configuration.response_type())
                .receive_sms(receive_sms)
                .read_phone_state_enabled(read_phone_state)
                .facebook_notifications_enabled(configuration.facebook_notifications_enabled());

        if let Some(theme) = configuration.theme() {
            login_configuration = login_configuration.theme(theme.clone());
        }
        if let Some(state) = configuration.initial_auth_state() {
            login_configuration = login_configuration.initial_auth_state(state);
        }

        match self.mode {
            LoginType::Phone => {
                login_configuration = login_configuration
                    .sms_whitelist(country_strings(configuration.country_whitelist()))
                    .sms_blacklist(country_strings(configuration.country_blacklist()));
                if let Some(country) = configuration.default_country() {
                    login_configuration =
                        login_configuration.default_country_code(country.as_str());
                }
                if let Some(phone) = configuration.initial_phone() {
                    login_configuration = login_configuration.initial_phone_number(phone.clone());
                }
            }
            LoginType::Email => {
                if let Some(email) = configuration.initial_email() {
                    login_configuration = login_configuration.initial_email(email);
                }
            }
        }

        login_configuration
    }

    fn transition(&mut self, next: SessionState) -> bool {
        if !self.state.can_transition_to(next) {
            self.span.in_scope(|| {
                warn!(from = %self.state, to = %next, "illegal session transition refused")
            });
            return false;
        }
        self.span
            .in_scope(|| debug!(from = %self.state, to = %next, "session transition"));
        self.state = next;
        true
    }

    /// Whether an incoming delegate event may still act. Logs the ones that
    /// arrive too late.
    fn accepts(&self, event: &'static str) -> bool {
        if self.state.is_terminal() {
            self.span.in_scope(|| {
                warn!(event, state = %self.state, "ignoring delegate event after terminal state")
            });
            return false;
        }
        true
    }

    fn finish(&mut self, next: SessionState, response: LoginResponse) {
        if !self.transition(next) {
            return;
        }
        self.span
            .in_scope(|| info!(state = %next, "session finished"));
        self.completion.complete(response);
    }

    fn success_with_token(
        &self,
        token: &dyn AccessToken,
        account: &dyn Account,
        state: Option<&str>,
    ) -> Result<LoginSuccess, NormalizationError> {
        Ok(LoginSuccess::AccessToken {
            access_token: normalize_token(token)?,
            account: normalize_account(account, self.mode)?,
            state: state.map(str::to_string),
        })
    }
}

impl LoginDelegate for VerificationSession {
    fn on_success(&mut self, token: &dyn AccessToken, account: &dyn Account, state: Option<&str>) {
        if !self.accepts("on_success") {
            return;
        }
        match self.success_with_token(token, account, state) {
            Ok(success) => self.finish(SessionState::Completed, LoginResponse::Success(success)),
            Err(err) => {
                self.span
                    .in_scope(|| warn!(error = %err, "could not normalize login result"));
                self.finish(SessionState::Failed, LoginResponse::error(err.to_string()));
            }
        }
    }

    fn on_authorization_code(&mut self, code: &str, state: Option<&str>) {
        if !self.accepts("on_authorization_code") {
            return;
        }
        if code.is_empty() {
            let err = NormalizationError::MissingField {
                object: "login result",
                field: "code",
            };
            self.finish(SessionState::Failed, LoginResponse::error(err.to_string()));
            return;
        }
        let success = LoginSuccess::AuthorizationCode {
            code: code.to_string(),
            state: state.map(str::to_string),
        };
        self.finish(SessionState::Completed, LoginResponse::Success(success));
    }

    fn on_error(&mut self, error: &SdkError) {
        if !self.accepts("on_error") {
            return;
        }
        self.span
            .in_scope(|| warn!(kind = ?error.kind, error = %error, "SDK reported an error"));
        self.finish(SessionState::Failed, LoginResponse::error(error.message()));
    }

    fn on_cancel(&mut self) {
        if !self.accepts("on_cancel") {
            return;
        }
        self.finish(SessionState::Cancelled, LoginResponse::Cancelled);
    }
}

impl Drop for VerificationSession {
    fn drop(&mut self) {
        if self.completion.is_spent() {
            return;
        }
        if self.state == SessionState::Presented {
            self.span.in_scope(|| {
                warn!("session released by the SDK without a result, reporting cancellation")
            });
            self.state = SessionState::Cancelled;
            self.completion.complete(LoginResponse::Cancelled);
        } else {
            // Never shown, so the user cannot have cancelled it.
            self.span
                .in_scope(|| warn!(state = %self.state, "session dropped before it was presented"));
            self.completion
                .complete(LoginResponse::error(NOT_PRESENTED_MESSAGE));
        }
    }
}

/// Present the phone-number entry flow.
pub fn start_phone_login<K>(
    kit: &mut K,
    configuration: SessionConfiguration,
    completion: CompletionHandle,
) -> SessionId
where
    K: AccountKit + ?Sized,
{
    VerificationSession::new(LoginType::Phone, configuration, completion).present(kit)
}

/// Present the email entry flow.
pub fn start_email_login<K>(
    kit: &mut K,
    configuration: SessionConfiguration,
    completion: CompletionHandle,
) -> SessionId
where
    K: AccountKit + ?Sized,
{
    VerificationSession::new(LoginType::Email, configuration, completion).present(kit)
}

fn country_strings<'a>(codes: impl IntoIterator<Item = &'a CountryCode>) -> Vec<String> {
    codes.into_iter().map(|c| c.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginOptions;
    use crate::models::LoginSuccess;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use verikit_sdk::PhoneNumber;

    #[derive(Default)]
    struct RecordingKit {
        denied: HashSet<Permission>,
        presented: Vec<(LoginConfiguration, Box<dyn LoginDelegate>)>,
    }

    impl AccountKit for RecordingKit {
        fn is_initialized(&self) -> bool {
            true
        }

        fn has_permission(&self, permission: Permission) -> bool {
            !self.denied.contains(&permission)
        }

        fn present(&mut self, configuration: LoginConfiguration, delegate: Box<dyn LoginDelegate>) {
            self.presented.push((configuration, delegate));
        }

        fn log_out(&mut self) {}

        fn current_access_token(&self) -> Option<Box<dyn AccessToken>> {
            None
        }

        fn current_account(&self) -> Result<Box<dyn Account>, SdkError> {
            Err(SdkError::internal("not logged in"))
        }
    }

    struct Token;

    impl AccessToken for Token {
        fn account_id(&self) -> Option<&str> {
            Some("u1")
        }

        fn token_string(&self) -> Option<&str> {
            Some("tok")
        }

        fn refresh_date(&self) -> Option<DateTime<Utc>> {
            Utc.timestamp_opt(100, 0).single()
        }

        fn expiration_date(&self) -> Option<DateTime<Utc>> {
            Utc.timestamp_opt(200, 0).single()
        }
    }

    struct PhoneAccount;

    impl Account for PhoneAccount {
        fn id(&self) -> Option<&str> {
            Some("u1")
        }

        fn email(&self) -> Option<&str> {
            None
        }

        fn phone_number(&self) -> Option<PhoneNumber> {
            Some(PhoneNumber::new("1", "5551234"))
        }
    }

    fn recorder() -> (CompletionHandle, Arc<Mutex<Vec<LoginResponse>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = CompletionHandle::new(move |response| sink.lock().unwrap().push(response));
        (handle, seen)
    }

    fn configuration(options: LoginOptions) -> SessionConfiguration {
        SessionConfiguration::try_from(options).unwrap()
    }

    #[test]
    fn new_session_starts_created() {
        let (handle, _) = recorder();
        let session = VerificationSession::new(
            LoginType::Email,
            configuration(LoginOptions::default()),
            handle,
        );
        assert_eq!(session.state(), SessionState::Created);
        assert_eq!(session.mode(), LoginType::Email);
    }

    #[test]
    fn phone_login_presents_filters_and_prefill() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        let options = LoginOptions {
            country_whitelist: Some(vec!["us".to_string(), "ca".to_string()]),
            default_country: Some("US".to_string()),
            initial_phone_country_prefix: Some("1".to_string()),
            initial_phone_number: Some("5551234".to_string()),
            initial_email: Some("ignored@example.com".to_string()),
            ..LoginOptions::default()
        };

        start_phone_login(&mut kit, configuration(options), handle);

        let (presented, _delegate) = &kit.presented[0];
        assert_eq!(presented.login_type, LoginType::Phone);
        assert_eq!(presented.sms_whitelist, vec!["CA".to_string(), "US".to_string()]);
        assert_eq!(presented.default_country_code.as_deref(), Some("US"));
        assert_eq!(
            presented.initial_phone_number,
            Some(PhoneNumber::new("1", "5551234"))
        );
        assert_eq!(presented.initial_email, None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn email_login_prefills_email() {
        let mut kit = RecordingKit::default();
        let (handle, _) = recorder();
        let options = LoginOptions {
            initial_email: Some("a@b.com".to_string()),
            ..LoginOptions::default()
        };

        start_email_login(&mut kit, configuration(options), handle);

        let (presented, _) = &kit.presented[0];
        assert_eq!(presented.login_type, LoginType::Email);
        assert_eq!(presented.initial_email.as_deref(), Some("a@b.com"));
        assert_eq!(presented.initial_phone_number, None);
    }

    #[test]
    fn missing_permissions_disable_dependent_options() {
        let mut kit = RecordingKit {
            denied: [Permission::ReceiveSms].into_iter().collect(),
            ..RecordingKit::default()
        };
        let (handle, _) = recorder();

        start_phone_login(&mut kit, configuration(LoginOptions::default()), handle);

        let (presented, _) = &kit.presented[0];
        assert!(!presented.receive_sms);
        assert!(presented.read_phone_state_enabled);
    }

    #[test]
    fn only_first_terminal_event_is_reported() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        start_phone_login(&mut kit, configuration(LoginOptions::default()), handle);

        let (_, mut delegate) = kit.presented.pop().unwrap();
        delegate.on_success(&Token, &PhoneAccount, None);
        delegate.on_cancel();
        delegate.on_error(&SdkError::network("late"));
        drop(delegate);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(
            &seen[0],
            LoginResponse::Success(LoginSuccess::AccessToken { account, .. })
                if account.phone_number.is_some() && account.email_address.is_none()
        ));
    }

    #[test]
    fn sdk_error_message_is_kept_verbatim() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        start_email_login(&mut kit, configuration(LoginOptions::default()), handle);

        let (_, mut delegate) = kit.presented.pop().unwrap();
        delegate.on_error(&SdkError::network("network down"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![LoginResponse::error("network down")]
        );
    }

    #[test]
    fn normalization_failure_is_reported_as_error() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        // Email mode, but the account only has a phone number.
        start_email_login(&mut kit, configuration(LoginOptions::default()), handle);

        let (_, mut delegate) = kit.presented.pop().unwrap();
        delegate.on_success(&Token, &PhoneAccount, None);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![LoginResponse::error(
                "account is missing required field emailAddress"
            )]
        );
    }

    #[test]
    fn authorization_code_completes_with_state() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        start_phone_login(&mut kit, configuration(LoginOptions::default()), handle);

        let (_, mut delegate) = kit.presented.pop().unwrap();
        delegate.on_authorization_code("abc", Some("csrf"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![LoginResponse::Success(LoginSuccess::AuthorizationCode {
                code: "abc".to_string(),
                state: Some("csrf".to_string()),
            })]
        );
    }

    #[test]
    fn dropping_an_unpresented_session_reports_an_error() {
        let (handle, seen) = recorder();
        let session = VerificationSession::new(
            LoginType::Phone,
            configuration(LoginOptions::default()),
            handle,
        );
        assert_eq!(session.state(), SessionState::Created);

        drop(session);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![LoginResponse::error(NOT_PRESENTED_MESSAGE)]);
        assert!(!seen[0].is_success());
        assert_ne!(seen[0], LoginResponse::Cancelled);
    }

    #[test]
    fn released_delegate_reports_cancellation() {
        let mut kit = RecordingKit::default();
        let (handle, seen) = recorder();
        start_phone_login(&mut kit, configuration(LoginOptions::default()), handle);

        kit.presented.clear();

        assert_eq!(*seen.lock().unwrap(), vec![LoginResponse::Cancelled]);
    }
}
