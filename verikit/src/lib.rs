//! Host-facing bridge for the phone/email verification flow.
//!
//! [`Bridge`] answers the host's method calls (`configure`, `login`,
//! `logOut`, `getCurrentAccessToken`, `getCurrentAccount`) on top of an
//! [`verikit_sdk::AccountKit`] implementation.

mod bridge;
pub mod logging;
pub mod method;

pub use bridge::Bridge;
pub use method::{MethodCall, MethodError, MethodReply};
pub use verikit_auth::{LoginResponse, Settings};

// Always expose testing module (integration tests need it)
pub mod testing;
