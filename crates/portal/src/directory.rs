//! Account directory backing the login screen.

use std::collections::HashMap;

use intranet_auth::{Role, User};
use intranet_core::{DomainResult, UserId};

#[derive(Debug, Clone)]
struct Account {
    password: String,
    profile: User,
}

/// Login → account table.
///
/// Passwords are compared as given; this directory stands in for an identity
/// provider and is not a credential store.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    accounts: HashMap<String, Account>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo company's accounts.
    pub fn demo() -> DomainResult<Self> {
        let mut directory = Self::new();
        for (login, password, name, role, department, avatar) in [
            ("admin", "admin123", "Administrator", Role::Admin, "IT", "👨‍💼"),
            ("anna", "anna123", "Anna Petrova", Role::Employee, "Design", "👩‍🎨"),
            ("mikhail", "mikhail123", "Mikhail Sidorov", Role::Employee, "Development", "👨‍💻"),
            ("elena", "elena123", "Elena Kozlova", Role::Manager, "Management", "👩‍💼"),
            ("dmitry", "dmitry123", "Dmitry Volkov", Role::Employee, "QA", "👨‍🔬"),
            ("maria", "maria123", "Maria Ivanova", Role::Employee, "Marketing", "👩‍💼"),
            ("alex", "alex123", "Alexander Petrov", Role::Employee, "Sales", "👨‍💼"),
        ] {
            let profile = User::new(UserId::new(), login, name, role, department, avatar)?;
            directory.insert(password, profile);
        }
        Ok(directory)
    }

    /// Add or replace the account for the profile's login.
    pub fn insert(&mut self, password: impl Into<String>, profile: User) {
        self.accounts.insert(
            profile.login().to_string(),
            Account {
                password: password.into(),
                profile,
            },
        );
    }

    /// Profile for `login` if `password` matches.
    pub fn verify(&self, login: &str, password: &str) -> Option<&User> {
        self.accounts
            .get(login)
            .filter(|account| account.password == password)
            .map(|account| &account.profile)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
