//! Method dispatch between the host and the verification core.
//!
//! The bridge owns the SDK handle and the defaults stored by `configure`.
//! It never holds a session: each `login` builds its own configuration and
//! session, and the session is owned by the SDK until it reports back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use verikit_auth::normalize::{normalize_current_account, normalize_token};
use verikit_auth::{
    start_email_login, start_phone_login, AccessTokenRecord, AccountDataRecord, AuthError,
    CompletionHandle, ConfigurationError, LoginOptions, LoginRequest, PendingLogin,
    SessionConfiguration, Settings,
};
use verikit_sdk::{AccountKit, LoginType};

use crate::method::{
    MethodCall, MethodError, MethodReply, ARG_CONFIG_OPTIONS, METHOD_CONFIGURE,
    METHOD_GET_CURRENT_ACCESS_TOKEN, METHOD_GET_CURRENT_ACCOUNT, METHOD_LOG_IN, METHOD_LOG_OUT,
};

pub struct Bridge<K: AccountKit> {
    kit: K,
    settings: Settings,
    options: LoginOptions,
    login_in_flight: Arc<AtomicBool>,
}

impl<K: AccountKit> Bridge<K> {
    /// Rejects settings whose `default_country` is not a valid country code.
    pub fn new(kit: K, settings: Settings) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        Ok(Self {
            kit,
            settings,
            options: LoginOptions::default(),
            login_in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn kit(&self) -> &K {
        &self.kit
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Options stored by the last `configure`.
    pub fn configured_options(&self) -> &LoginOptions {
        &self.options
    }

    pub fn login_in_flight(&self) -> bool {
        self.login_in_flight.load(Ordering::Acquire)
    }

    /// Route one host call to its handler.
    pub fn dispatch(&mut self, call: MethodCall) -> Result<MethodReply, MethodError> {
        let span = tracing::info_span!("bridge_call", method = %call.method);
        let _enter = span.enter();
        debug!("dispatching");

        let result: Result<MethodReply, MethodError> = match call.method.as_str() {
            METHOD_CONFIGURE => self
                .configure(call.arguments)
                .map(|()| MethodReply::Value(Value::Null)),
            METHOD_LOG_IN => self.log_in(call.arguments).map(MethodReply::Pending),
            METHOD_LOG_OUT => self.log_out().map(|()| MethodReply::Value(Value::Null)),
            METHOD_GET_CURRENT_ACCESS_TOKEN => self
                .current_access_token()
                .and_then(|token| Ok(MethodReply::Value(serde_json::to_value(token)?))),
            METHOD_GET_CURRENT_ACCOUNT => self
                .current_account()
                .and_then(|account| Ok(MethodReply::Value(serde_json::to_value(account)?))),
            other => Err(MethodError::NotImplemented(other.to_string())),
        };

        if let Err(err) = &result {
            warn!(code = err.code(), error = %err, "method failed");
        }
        result
    }

    /// Store default launch options. Accepts `{"configOptions": {..}}` or
    /// the options object itself.
    pub fn configure(&mut self, arguments: Value) -> Result<(), MethodError> {
        let raw = match arguments {
            Value::Object(mut map) if map.contains_key(ARG_CONFIG_OPTIONS) => map
                .remove(ARG_CONFIG_OPTIONS)
                .unwrap_or(Value::Null),
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        let options: LoginOptions = serde_json::from_value(raw)?;

        // Reject now what every later login would reject.
        SessionConfiguration::from_options(&options, &self.settings)?;

        self.options = options;
        info!("login options configured");
        Ok(())
    }

    /// Start a login. The reply resolves once the session reports.
    pub fn log_in(&mut self, arguments: Value) -> Result<PendingLogin, MethodError> {
        self.ensure_initialized(METHOD_LOG_IN)?;

        let request: LoginRequest = serde_json::from_value(arguments)?;
        let mode = request.login_type()?;
        let options = request.options.merged_over(&self.options);
        let configuration = SessionConfiguration::from_options(&options, &self.settings)?;

        if self.login_in_flight.swap(true, Ordering::AcqRel) {
            return Err(MethodError::LoginInProgress(METHOD_LOG_IN));
        }

        let in_flight = self.login_in_flight.clone();
        let (handle, pending) = CompletionHandle::channel();
        let handle = handle.on_complete(move || in_flight.store(false, Ordering::Release));

        let session_id = match mode {
            LoginType::Phone => start_phone_login(&mut self.kit, configuration, handle),
            LoginType::Email => start_email_login(&mut self.kit, configuration, handle),
        };
        info!(session_id = %session_id, mode = %mode, "login started");

        Ok(pending)
    }

    pub fn log_out(&mut self) -> Result<(), MethodError> {
        self.ensure_initialized(METHOD_LOG_OUT)?;
        self.kit.log_out();
        info!("logged out");
        Ok(())
    }

    pub fn current_access_token(&self) -> Result<Option<AccessTokenRecord>, MethodError> {
        self.ensure_initialized(METHOD_GET_CURRENT_ACCESS_TOKEN)?;
        let Some(token) = self.kit.current_access_token() else {
            return Ok(None);
        };
        let record = normalize_token(token.as_ref()).map_err(AuthError::from)?;
        Ok(Some(record))
    }

    /// The SDK's current account, or `None` if it cannot produce one.
    pub fn current_account(&self) -> Result<Option<AccountDataRecord>, MethodError> {
        self.ensure_initialized(METHOD_GET_CURRENT_ACCOUNT)?;
        match self.kit.current_account() {
            Ok(account) => {
                let record = normalize_current_account(account.as_ref()).map_err(AuthError::from)?;
                Ok(Some(record))
            }
            Err(err) => {
                debug!(error = %err, "no current account");
                Ok(None)
            }
        }
    }

    fn ensure_initialized(&self, method: &'static str) -> Result<(), MethodError> {
        if self.kit.is_initialized() {
            Ok(())
        } else {
            Err(MethodError::NotInitialized(method))
        }
    }
}
