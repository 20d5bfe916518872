//! Scriptable stand-in for the verification SDK.
//!
//! [`StubAccountKit`] is a cheap handle on shared state: hand one clone to a
//! [`crate::Bridge`] and keep another to inspect presentations and fire
//! delegate events the way the real SDK would.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use verikit_sdk::{
    AccessToken, Account, AccountKit, LoginConfiguration, LoginDelegate, Permission, PhoneNumber,
    SdkError,
};

/// Access token with every accessor backed by a plain field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeAccessToken {
    pub account_id: Option<String>,
    pub token_string: Option<String>,
    pub refresh_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub application_id: Option<String>,
    pub refresh_interval_seconds: Option<u64>,
}

impl FakeAccessToken {
    pub fn new(
        account_id: &str,
        token_string: &str,
        refresh_date: DateTime<Utc>,
        expiration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: Some(account_id.to_string()),
            token_string: Some(token_string.to_string()),
            refresh_date: Some(refresh_date),
            expiration_date: Some(expiration_date),
            ..Self::default()
        }
    }
}

impl AccessToken for FakeAccessToken {
    fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    fn token_string(&self) -> Option<&str> {
        self.token_string.as_deref()
    }

    fn refresh_date(&self) -> Option<DateTime<Utc>> {
        self.refresh_date
    }

    fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.expiration_date
    }

    fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }

    fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    fn refresh_interval_seconds(&self) -> Option<u64> {
        self.refresh_interval_seconds
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeAccount {
    pub id: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<PhoneNumber>,
}

impl FakeAccount {
    pub fn with_email(id: &str, email: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            email: Some(email.to_string()),
            phone_number: None,
        }
    }

    pub fn with_phone(id: &str, country_code: &str, number: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            email: None,
            phone_number: Some(PhoneNumber::new(country_code, number)),
        }
    }
}

impl Account for FakeAccount {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone_number(&self) -> Option<PhoneNumber> {
        self.phone_number.clone()
    }
}

struct StubState {
    initialized: bool,
    denied: HashSet<Permission>,
    presentations: Vec<LoginConfiguration>,
    delegate: Option<Box<dyn LoginDelegate>>,
    log_out_count: usize,
    current_token: Option<FakeAccessToken>,
    current_account: Result<FakeAccount, SdkError>,
}

impl Default for StubState {
    fn default() -> Self {
        Self {
            initialized: true,
            denied: HashSet::new(),
            presentations: Vec::new(),
            delegate: None,
            log_out_count: 0,
            current_token: None,
            current_account: Err(SdkError::internal("no account")),
        }
    }
}

#[derive(Clone, Default)]
pub struct StubAccountKit {
    state: Arc<Mutex<StubState>>,
}

impl StubAccountKit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uninitialized() -> Self {
        let stub = Self::default();
        stub.state.lock().unwrap().initialized = false;
        stub
    }

    pub fn deny_permission(&self, permission: Permission) {
        self.state.lock().unwrap().denied.insert(permission);
    }

    pub fn set_current_token(&self, token: Option<FakeAccessToken>) {
        self.state.lock().unwrap().current_token = token;
    }

    pub fn set_current_account(&self, account: Result<FakeAccount, SdkError>) {
        self.state.lock().unwrap().current_account = account;
    }

    pub fn presentations(&self) -> Vec<LoginConfiguration> {
        self.state.lock().unwrap().presentations.clone()
    }

    pub fn last_presentation(&self) -> Option<LoginConfiguration> {
        self.state.lock().unwrap().presentations.last().cloned()
    }

    pub fn has_delegate(&self) -> bool {
        self.state.lock().unwrap().delegate.is_some()
    }

    pub fn log_out_count(&self) -> usize {
        self.state.lock().unwrap().log_out_count
    }

    pub fn succeed(&self, token: &FakeAccessToken, account: &FakeAccount, state: Option<&str>) {
        self.with_delegate(|delegate| delegate.on_success(token, account, state));
    }

    pub fn succeed_with_code(&self, code: &str, state: Option<&str>) {
        self.with_delegate(|delegate| delegate.on_authorization_code(code, state));
    }

    pub fn fail(&self, error: SdkError) {
        self.with_delegate(|delegate| delegate.on_error(&error));
    }

    pub fn cancel(&self) {
        self.with_delegate(|delegate| delegate.on_cancel());
    }

    /// Drop the delegate without telling it anything.
    pub fn release(&self) {
        let delegate = self.state.lock().unwrap().delegate.take();
        drop(delegate);
    }

    /// Run `f` on the current delegate, outside the lock, and keep the
    /// delegate so later events reach it too.
    fn with_delegate<F>(&self, f: F)
    where
        F: FnOnce(&mut dyn LoginDelegate),
    {
        let taken = self.state.lock().unwrap().delegate.take();
        let Some(mut delegate) = taken else {
            panic!("no login flow is being presented");
        };
        f(delegate.as_mut());

        let mut state = self.state.lock().unwrap();
        if state.delegate.is_none() {
            state.delegate = Some(delegate);
        }
    }
}

impl AccountKit for StubAccountKit {
    fn is_initialized(&self) -> bool {
        self.state.lock().unwrap().initialized
    }

    fn has_permission(&self, permission: Permission) -> bool {
        !self.state.lock().unwrap().denied.contains(&permission)
    }

    fn present(&mut self, configuration: LoginConfiguration, delegate: Box<dyn LoginDelegate>) {
        let replaced = {
            let mut state = self.state.lock().unwrap();
            state.presentations.push(configuration);
            state.delegate.replace(delegate)
        };
        drop(replaced);
    }

    fn log_out(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.log_out_count += 1;
        state.current_token = None;
    }

    fn current_access_token(&self) -> Option<Box<dyn AccessToken>> {
        self.state
            .lock()
            .unwrap()
            .current_token
            .clone()
            .map(|token| Box::new(token) as Box<dyn AccessToken>)
    }

    fn current_account(&self) -> Result<Box<dyn Account>, SdkError> {
        self.state
            .lock()
            .unwrap()
            .current_account
            .clone()
            .map(|account| Box::new(account) as Box<dyn Account>)
    }
}
