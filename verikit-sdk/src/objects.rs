//! Accessor contracts for the objects the SDK owns.
//!
//! Every accessor returns `Option`: the SDK documents these fields but does
//! not promise them, and a caller that needs one has to say so.

use chrono::{DateTime, Utc};

use crate::types::PhoneNumber;

pub trait AccessToken {
    fn account_id(&self) -> Option<&str>;

    fn token_string(&self) -> Option<&str>;

    fn refresh_date(&self) -> Option<DateTime<Utc>>;

    fn expiration_date(&self) -> Option<DateTime<Utc>>;

    fn last_refresh(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn application_id(&self) -> Option<&str> {
        None
    }

    fn refresh_interval_seconds(&self) -> Option<u64> {
        None
    }
}

pub trait Account {
    fn id(&self) -> Option<&str>;

    fn email(&self) -> Option<&str>;

    fn phone_number(&self) -> Option<PhoneNumber>;
}
