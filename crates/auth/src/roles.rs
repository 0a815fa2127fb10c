use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse-grained permission class of a dashboard user.
///
/// The set is closed. There is deliberately no `Ord`: admin and manager both
/// outrank employee, but they are not comparable to each other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }

    /// Human-readable title shown next to the user's name.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Manager",
            Role::Employee => "Employee",
        }
    }

    /// Whether the role sees and acts on every resource, not only its own.
    pub fn sees_all_resources(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    fn bit(self) -> u8 {
        match self {
            Role::Admin => 0b001,
            Role::Manager => 0b010,
            Role::Employee => 0b100,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized role '{0}'")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    /// Exact, case-sensitive match on the lowercase wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "employee" => Ok(Role::Employee),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

/// A role as received from outside the typed world (session storage, config,
/// a token).
///
/// Unrecognized values are kept instead of being coerced, so the policy can
/// deny them explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleClaim {
    Known(Role),
    Unrecognized(String),
}

impl RoleClaim {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<Role>() {
            Ok(role) => RoleClaim::Known(role),
            Err(RoleParseError(raw)) => RoleClaim::Unrecognized(raw),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RoleClaim::Known(role) => Some(*role),
            RoleClaim::Unrecognized(_) => None,
        }
    }
}

impl From<Role> for RoleClaim {
    fn from(value: Role) -> Self {
        RoleClaim::Known(value)
    }
}

impl From<&str> for RoleClaim {
    fn from(value: &str) -> Self {
        RoleClaim::parse(value)
    }
}

impl From<&RoleClaim> for Option<Role> {
    fn from(value: &RoleClaim) -> Self {
        value.role()
    }
}

impl core::fmt::Display for RoleClaim {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RoleClaim::Known(role) => core::fmt::Display::fmt(role, f),
            RoleClaim::Unrecognized(raw) => write!(f, "unrecognized({raw})"),
        }
    }
}

/// Set of roles allowed to see a view or perform an action.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EMPTY: RoleSet = RoleSet(0);
    pub const PRIVILEGED: RoleSet = RoleSet(0b011);

    pub fn only(role: Role) -> Self {
        RoleSet(role.bit())
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Roles in the set, in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(value: Vec<Role>) -> Self {
        value.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.iter().collect()
    }
}
