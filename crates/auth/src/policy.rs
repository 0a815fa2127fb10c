use serde::Serialize;

use crate::actions::{Action, AnalyticsScope, HomeLayout};
use crate::menu::{MenuTable, ViewDescriptor};
use crate::roles::Role;

/// A resource that may be scoped to the user it is assigned to.
pub trait Assigned {
    /// Display name of the assignee. `None` (or an empty string) means the
    /// resource is unassigned.
    fn assignee(&self) -> Option<&str>;
}

impl<T: Assigned + ?Sized> Assigned for &T {
    fn assignee(&self) -> Option<&str> {
        (**self).assignee()
    }
}

/// Central view/data visibility policy.
///
/// - No IO
/// - No panics
/// - Unknown roles and unknown views are denied, never allowed
///
/// Every check takes the role as `impl Into<Option<Role>>`: a [`Role`], an
/// `Option<Role>`, or a `&RoleClaim`. `None` stands for an unrecognized role.
/// For resource scoping it gets the employee policy; for menu items and
/// actions it gets nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    menu: MenuTable,
}

impl AccessPolicy {
    pub fn new(menu: MenuTable) -> Self {
        Self { menu }
    }

    pub fn standard() -> Self {
        Self::new(MenuTable::standard())
    }

    pub fn menu(&self) -> &MenuTable {
        &self.menu
    }

    pub fn can_view_menu_item(&self, role: impl Into<Option<Role>>, view_id: &str) -> bool {
        let role = role.into();
        match self.view_decision(role, view_id) {
            Ok(()) => true,
            Err(kind) => {
                tracing::debug!(view = view_id, role = ?role, denial = ?kind, "menu item denied");
                false
            }
        }
    }

    /// Navigation entries the role may render, in table order.
    pub fn visible_menu(&self, role: impl Into<Option<Role>>) -> Vec<&ViewDescriptor> {
        let Some(role) = role.into() else {
            return Vec::new();
        };
        self.menu.iter().filter(|v| v.allows(role)).collect()
    }

    /// Narrow `items` to what the role may see.
    ///
    /// Identity for admin and manager. Everyone else keeps only items assigned
    /// to `user`, in their original order.
    pub fn visible_resources<I>(&self, role: impl Into<Option<Role>>, user: &str, items: I) -> Vec<I::Item>
    where
        I: IntoIterator,
        I::Item: Assigned,
    {
        let role = role.into();
        let visible: Vec<I::Item> = items
            .into_iter()
            .filter(|item| resource_decision(role, user, item).is_ok())
            .collect();
        tracing::trace!(role = ?role, visible = visible.len(), "resources scoped");
        visible
    }

    /// Guard checked before a state change on a single item.
    pub fn can_mutate<T: Assigned + ?Sized>(&self, role: impl Into<Option<Role>>, user: &str, item: &T) -> bool {
        let role = role.into();
        match resource_decision(role, user, item) {
            Ok(()) => true,
            Err(kind) => {
                tracing::debug!(role = ?role, user, denial = ?kind, "mutation denied");
                false
            }
        }
    }

    pub fn can_perform(&self, role: impl Into<Option<Role>>, action: Action) -> bool {
        let role = role.into();
        let allowed = role.is_some_and(|r| action.allowed_roles().contains(r));
        if !allowed {
            tracing::debug!(role = ?role, action = %action, "action denied");
        }
        allowed
    }

    pub fn analytics_scope(&self, role: impl Into<Option<Role>>) -> AnalyticsScope {
        AnalyticsScope::for_role(role.into())
    }

    pub fn home_layout(&self, role: impl Into<Option<Role>>) -> HomeLayout {
        HomeLayout::for_role(role.into())
    }

    fn view_decision(&self, role: Option<Role>, view_id: &str) -> Result<(), DenialKind> {
        let role = role.ok_or(DenialKind::UnrecognizedRole)?;
        let view = self.menu.get(view_id).ok_or(DenialKind::UnknownView)?;
        if view.allows(role) {
            Ok(())
        } else {
            Err(DenialKind::RoleNotPermitted)
        }
    }
}

fn resource_decision<T: Assigned + ?Sized>(role: Option<Role>, user: &str, item: &T) -> Result<(), DenialKind> {
    if role.is_some_and(|r| r.sees_all_resources()) {
        return Ok(());
    }
    match item.assignee() {
        None | Some("") => Err(DenialKind::UnassignedResource),
        Some(assignee) if assignee == user => Ok(()),
        Some(_) => Err(DenialKind::NotAssignee),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a view or resource was (or would be) granted or denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    /// What was checked, e.g. `view:analytics`.
    pub subject: String,

    /// `None` when the role was not recognized.
    pub role: Option<Role>,

    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    UnrecognizedRole,
    UnknownView,
    RoleNotPermitted,
    UnassignedResource,
    NotAssignee,
}

impl DenialKind {
    pub fn describe(&self) -> &'static str {
        match self {
            DenialKind::UnrecognizedRole => "role is not recognized",
            DenialKind::UnknownView => "view is not in the menu table",
            DenialKind::RoleNotPermitted => "role is not allowed to open this view",
            DenialKind::UnassignedResource => "resource has no assignee",
            DenialKind::NotAssignee => "resource is assigned to someone else",
        }
    }
}

impl AccessPolicy {
    pub fn explain_view_access(&self, role: impl Into<Option<Role>>, view_id: &str) -> AccessExplanation {
        let role = role.into();
        let decision = self.view_decision(role, view_id);
        let reason = match decision {
            Ok(()) => format!("view '{view_id}' lists role '{}'", role.map_or("", |r| r.as_str())),
            Err(kind) => kind.describe().to_string(),
        };
        explanation(format!("view:{view_id}"), role, decision, reason)
    }

    pub fn explain_resource_access<T: Assigned + ?Sized>(
        &self,
        role: impl Into<Option<Role>>,
        user: &str,
        item: &T,
    ) -> AccessExplanation {
        let role = role.into();
        let decision = resource_decision(role, user, item);
        let reason = match (&decision, role) {
            (Ok(()), Some(r)) if r.sees_all_resources() => format!("role '{r}' sees every resource"),
            (Ok(()), _) => format!("resource is assigned to '{user}'"),
            (Err(kind), _) => kind.describe().to_string(),
        };
        let subject = match item.assignee() {
            Some(a) if !a.is_empty() => format!("resource assigned to '{a}'"),
            _ => "unassigned resource".to_string(),
        };
        explanation(subject, role, decision, reason)
    }
}

fn explanation(
    subject: String,
    role: Option<Role>,
    decision: Result<(), DenialKind>,
    reason: String,
) -> AccessExplanation {
    AccessExplanation {
        subject,
        role,
        granted: decision.is_ok(),
        reason,
        denial: decision.err(),
    }
}
