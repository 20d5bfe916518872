mod country;
mod options;
mod session;
mod settings;

pub use country::CountryCode;
pub use options::{parse_login_type, LoginOptions, LoginRequest};
pub use session::SessionConfiguration;
pub use settings::Settings;
