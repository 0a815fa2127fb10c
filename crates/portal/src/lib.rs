//! `intranet-portal` — session layer of the intranet dashboard.
//!
//! Turns credentials into an explicit [`Session`] that views receive instead
//! of reading the current user from ambient storage.

pub mod authenticator;
pub mod config;
pub mod directory;
pub mod session;

pub use authenticator::{AuthError, Authenticator, DirectoryAuthenticator, FixedLatency};
pub use config::{ConfigError, PortalConfig};
pub use directory::UserDirectory;
pub use session::Session;
