use chrono::{DateTime, Utc};
use serde::Serialize;

use intranet_auth::{AccessPolicy, Action, AnalyticsScope, HomeLayout, Role, User, ViewDescriptor};

use crate::authenticator::{AuthError, Authenticator};

/// Authenticated session context.
///
/// The only place views read the current user and role from. It is handed to
/// each view explicitly and dropped (via [`Session::end`]) on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    user: User,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User, started_at: DateTime<Utc>) -> Self {
        Self { user, started_at }
    }

    /// Authenticate and open a session.
    pub fn login<A>(authenticator: &A, login: &str, password: &str) -> Result<Self, AuthError>
    where
        A: Authenticator + ?Sized,
    {
        match authenticator.authenticate(login, password) {
            Ok(user) => {
                tracing::info!(login = %user.login(), role = %user.role(), "session started");
                Ok(Self::new(user, Utc::now()))
            }
            Err(err) => {
                tracing::info!(login = login.trim(), error = %err, "login rejected");
                Err(err)
            }
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    pub fn display_name(&self) -> &str {
        self.user.display_name()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn menu<'p>(&self, policy: &'p AccessPolicy) -> Vec<&'p ViewDescriptor> {
        policy.visible_menu(self.role())
    }

    pub fn can_view(&self, policy: &AccessPolicy, view_id: &str) -> bool {
        policy.can_view_menu_item(self.role(), view_id)
    }

    pub fn can_perform(&self, policy: &AccessPolicy, action: Action) -> bool {
        policy.can_perform(self.role(), action)
    }

    pub fn analytics_scope(&self, policy: &AccessPolicy) -> AnalyticsScope {
        policy.analytics_scope(self.role())
    }

    pub fn home_layout(&self, policy: &AccessPolicy) -> HomeLayout {
        policy.home_layout(self.role())
    }

    /// Log out. The session is consumed; nothing of it outlives this call.
    pub fn end(self) {
        tracing::info!(login = %self.user.login(), "session ended");
    }
}
