//! `intranet-auth` — role-scoped view and data visibility.
//!
//! Every dashboard screen asks this crate what the current user may see and
//! do. The policy is a pure function of the role, the menu table and the data
//! handed in; it holds no session state and performs no IO.

pub mod actions;
pub mod menu;
pub mod policy;
pub mod roles;
pub mod user;

pub use actions::{Action, AnalyticsScope, HomeLayout};
pub use menu::{MenuConfigError, MenuTable, ViewDescriptor};
pub use policy::{AccessExplanation, AccessPolicy, Assigned, DenialKind};
pub use roles::{Role, RoleClaim, RoleParseError, RoleSet};
pub use user::User;
