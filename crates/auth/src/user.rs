//! Authenticated dashboard user.

use serde::Serialize;

use intranet_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// Profile of an authenticated user, held for the lifetime of a session.
///
/// # Invariants
/// - `login` and `display_name` are non-blank and trimmed.
/// - `role` is always a known role; unrecognized input never produces a `User`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    login: String,
    display_name: String,
    role: Role,
    department: String,
    /// Single glyph shown in place of a photo.
    avatar: String,
}

impl User {
    pub fn new(
        id: UserId,
        login: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        department: impl Into<String>,
        avatar: impl Into<String>,
    ) -> DomainResult<Self> {
        let login = login.into().trim().to_string();
        let display_name = display_name.into().trim().to_string();

        if login.is_empty() {
            return Err(DomainError::validation("login cannot be empty"));
        }
        if display_name.is_empty() {
            return Err(DomainError::validation("display name cannot be empty"));
        }

        Ok(Self {
            id,
            login,
            display_name,
            role,
            department: department.into(),
            avatar: avatar.into(),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }
}
