//! Credential checking behind a trait, so the session layer can be driven by
//! the demo directory, a fixed-latency stub, or a real identity provider.

use std::time::Duration;

use thiserror::Error;

use intranet_auth::User;

use crate::directory::UserDirectory;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("login and password are required")]
    MissingCredentials,

    /// Unknown login and wrong password are deliberately indistinguishable.
    #[error("invalid login or password")]
    InvalidCredentials,
}

pub trait Authenticator: Send + Sync {
    fn authenticate(&self, login: &str, password: &str) -> Result<User, AuthError>;
}

/// Checks credentials against a [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct DirectoryAuthenticator {
    directory: UserDirectory,
}

impl DirectoryAuthenticator {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory }
    }
}

impl Authenticator for DirectoryAuthenticator {
    fn authenticate(&self, login: &str, password: &str) -> Result<User, AuthError> {
        let login = login.trim();
        if login.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        self.directory
            .verify(login, password)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)
    }
}

/// Wraps an authenticator with a constant delay before every attempt.
///
/// Stands in for network round-trip time. `Duration::ZERO` disables the wait.
#[derive(Debug, Clone)]
pub struct FixedLatency<A> {
    inner: A,
    latency: Duration,
}

impl<A> FixedLatency<A> {
    pub fn new(inner: A, latency: Duration) -> Self {
        Self { inner, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl<A: Authenticator> Authenticator for FixedLatency<A> {
    fn authenticate(&self, login: &str, password: &str) -> Result<User, AuthError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        self.inner.authenticate(login, password)
    }
}
