//! Contract of the external phone/email verification SDK.
//!
//! Nothing in here verifies anybody. The SDK is reached only through the
//! [`AccountKit`] trait, it reports back through a [`LoginDelegate`], and
//! the objects it hands over are read through the [`AccessToken`] and
//! [`Account`] accessor traits.

pub mod configuration;
pub mod delegate;
mod error;
pub mod kit;
mod macros;
pub mod objects;
pub mod types;

pub use configuration::LoginConfiguration;
pub use delegate::LoginDelegate;
pub use error::{SdkError, SdkErrorKind};
pub use kit::{AccountKit, Permission};
pub use objects::{AccessToken, Account};
pub use types::{LoginType, PhoneNumber, ResponseType, Theme};
