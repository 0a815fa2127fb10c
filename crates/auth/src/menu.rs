//! Navigation menu table: which roles may open which view.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::{Role, RoleSet};

/// One navigable section of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    id: Cow<'static, str>,
    label: Cow<'static, str>,
    roles: RoleSet,
}

impl ViewDescriptor {
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn allows(&self, role: Role) -> bool {
        self.roles.contains(role)
    }
}

#[derive(Debug, Error)]
pub enum MenuConfigError {
    #[error("invalid menu json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("menu entry #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate menu entry '{0}'")]
    DuplicateId(String),

    #[error("menu entry '{view}' names unknown role '{role}'")]
    UnknownRole { view: String, role: String },
}

/// Raw menu entry as written in configuration.
///
/// Roles stay strings here so a typo is reported with the view it occurred in.
#[derive(Debug, Deserialize)]
struct MenuEntryConfig {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

/// Ordered, validated menu table.
///
/// Order is the navigation order. Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MenuTable {
    views: Vec<ViewDescriptor>,
}

impl MenuTable {
    /// The dashboard's built-in navigation.
    pub fn standard() -> Self {
        use Role::*;

        Self {
            views: vec![
                ViewDescriptor::new("home", "Home", [Admin, Manager, Employee]),
                ViewDescriptor::new("tasks", "Tasks", [Admin, Manager, Employee]),
                ViewDescriptor::new("calendar", "Calendar", [Admin, Manager, Employee]),
                ViewDescriptor::new("chat", "Chat", [Admin, Manager, Employee]),
                ViewDescriptor::new("documents", "Documents", [Admin, Manager, Employee]),
                ViewDescriptor::new("analytics", "Analytics", [Admin, Manager]),
                ViewDescriptor::new("management", "Team", [Admin, Manager]),
            ],
        }
    }

    pub fn new(views: Vec<ViewDescriptor>) -> Result<Self, MenuConfigError> {
        {
            let mut seen = HashSet::new();
            for (index, view) in views.iter().enumerate() {
                if view.id().trim().is_empty() {
                    return Err(MenuConfigError::EmptyId { index });
                }
                if !seen.insert(view.id()) {
                    return Err(MenuConfigError::DuplicateId(view.id().to_string()));
                }
            }
        }
        Ok(Self { views })
    }

    /// Load a table from `[{ "id": ..., "label": ..., "roles": [...] }]`.
    ///
    /// A missing label falls back to the id. An empty role list is valid and
    /// hides the view from everyone.
    pub fn from_json(json: &str) -> Result<Self, MenuConfigError> {
        let entries: Vec<MenuEntryConfig> = serde_json::from_str(json)?;

        let mut views = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut roles = RoleSet::EMPTY;
            for raw in &entry.roles {
                let role = raw.parse::<Role>().map_err(|_| MenuConfigError::UnknownRole {
                    view: entry.id.clone(),
                    role: raw.clone(),
                })?;
                roles.insert(role);
            }

            let label = entry.label.unwrap_or_else(|| entry.id.clone());
            views.push(ViewDescriptor {
                id: Cow::Owned(entry.id),
                label: Cow::Owned(label),
                roles,
            });
        }

        Self::new(views)
    }

    pub fn get(&self, id: &str) -> Option<&ViewDescriptor> {
        self.views.iter().find(|v| v.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewDescriptor> {
        self.views.iter()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl Default for MenuTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_order_and_restricted_views() {
        let table = MenuTable::standard();
        let ids: Vec<&str> = table.iter().map(|v| v.id()).collect();
        assert_eq!(
            ids,
            vec!["home", "tasks", "calendar", "chat", "documents", "analytics", "management"]
        );

        for id in ["analytics", "management"] {
            let view = table.get(id).unwrap();
            assert!(view.allows(Role::Admin));
            assert!(view.allows(Role::Manager));
            assert!(!view.allows(Role::Employee));
        }
    }

    #[test]
    fn from_json_loads_entries_in_order() {
        let table = MenuTable::from_json(
            r#"[
                {"id": "home", "label": "Start", "roles": ["admin", "employee"]},
                {"id": "reports", "roles": ["manager"]},
                {"id": "archive"}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("home").unwrap().label(), "Start");
        assert_eq!(table.get("reports").unwrap().label(), "reports");
        assert!(table.get("archive").unwrap().roles().is_empty());
    }

    #[test]
    fn from_json_rejects_unknown_role() {
        let err = MenuTable::from_json(r#"[{"id": "home", "roles": ["Admin"]}]"#).unwrap_err();
        match err {
            MenuConfigError::UnknownRole { view, role } => {
                assert_eq!(view, "home");
                assert_eq!(role, "Admin");
            }
            other => panic!("expected UnknownRole, got {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_duplicates_and_blank_ids() {
        let dup = MenuTable::from_json(r#"[{"id": "chat"}, {"id": "chat"}]"#).unwrap_err();
        assert!(matches!(dup, MenuConfigError::DuplicateId(id) if id == "chat"));

        let blank = MenuTable::from_json(r#"[{"id": "home"}, {"id": "  "}]"#).unwrap_err();
        assert!(matches!(blank, MenuConfigError::EmptyId { index: 1 }));
    }

    #[test]
    fn from_json_rejects_malformed_document() {
        let err = MenuTable::from_json(r#"{"id": "home"}"#).unwrap_err();
        assert!(matches!(err, MenuConfigError::Json(_)));
    }
}
