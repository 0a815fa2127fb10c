use serde::{Deserialize, Serialize};

use crate::roles::{Role, RoleSet};

/// Role-gated operation that is not tied to a single view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Put a new task on the board and assign it to someone.
    CreateTask,
    /// See the team roster and department statistics.
    ViewTeam,
    /// Add employees to the team.
    ManageTeam,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::CreateTask, Action::ViewTeam, Action::ManageTeam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CreateTask => "create_task",
            Action::ViewTeam => "view_team",
            Action::ManageTeam => "manage_team",
        }
    }

    /// Static action table.
    pub fn allowed_roles(&self) -> RoleSet {
        match self {
            Action::CreateTask | Action::ViewTeam => RoleSet::PRIVILEGED,
            Action::ManageTeam => RoleSet::only(Role::Admin),
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the analytics view a role gets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsScope {
    Company,
    Department,
    Unavailable,
}

impl AnalyticsScope {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => AnalyticsScope::Company,
            Some(Role::Manager) => AnalyticsScope::Department,
            Some(Role::Employee) | None => AnalyticsScope::Unavailable,
        }
    }
}

/// Which home dashboard a role lands on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeLayout {
    /// Company overview with team-wide figures.
    Overview,
    /// The user's own tasks and schedule.
    Personal,
}

impl HomeLayout {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(role) if role.sees_all_resources() => HomeLayout::Overview,
            _ => HomeLayout::Personal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_manages_team() {
        let roles: Vec<Role> = Action::ManageTeam.allowed_roles().iter().collect();
        assert_eq!(roles, vec![Role::Admin]);
    }

    #[test]
    fn analytics_scope_narrows_by_role() {
        assert_eq!(AnalyticsScope::for_role(Some(Role::Admin)), AnalyticsScope::Company);
        assert_eq!(AnalyticsScope::for_role(Some(Role::Manager)), AnalyticsScope::Department);
        assert_eq!(AnalyticsScope::for_role(Some(Role::Employee)), AnalyticsScope::Unavailable);
        assert_eq!(AnalyticsScope::for_role(None), AnalyticsScope::Unavailable);
    }

    #[test]
    fn unknown_role_gets_personal_home() {
        assert_eq!(HomeLayout::for_role(None), HomeLayout::Personal);
        assert_eq!(HomeLayout::for_role(Some(Role::Manager)), HomeLayout::Overview);
    }
}
