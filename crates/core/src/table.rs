//! Role to permission mapping.
//!
//! A [`PermissionTable`] is built once at start-up, from the compiled-in
//! catalog or from a permissions file, and is read-only afterwards. A role
//! with no entry is a valid state and means "no permissions".

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Permission, Role};

/// The set of permissions held by one role.
pub type PermissionSet = BTreeSet<Permission>;

/// Static mapping from role to the permissions it holds.
///
/// Deserializes from a map of role to permission list; duplicates collapse
/// and every entry must be a valid [`Permission`]. Keys naming the same role
/// (`7` and `"7"`) are merged as if granted one after the other.
///
/// ```
/// use tenant_console_core::{Permission, PermissionTable, Role};
///
/// let table = PermissionTable::new().with_role(
///     Role::new("editor"),
///     [Permission::from_static("plans:edit")],
/// );
///
/// assert!(table.contains_role("editor"));
/// assert!(table.permissions_for("viewer").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionTable {
    roles: BTreeMap<Role, PermissionSet>,
}

impl PermissionTable {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    /// Add permissions to `role`, returning the table.
    #[must_use]
    pub fn with_role<I>(mut self, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        self.grant(role, permissions);
        self
    }

    /// Add permissions to `role`. A role granted an empty list is still
    /// present in the table.
    pub fn grant<I>(&mut self, role: Role, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        self.roles.entry(role).or_default().extend(permissions);
    }

    /// Returns the permissions held by `role`, or `None` if the role has no
    /// entry.
    #[must_use]
    pub fn permissions_for(&self, role: &str) -> Option<&PermissionSet> {
        self.roles.get(role)
    }

    /// Returns `true` if `role` has an entry.
    #[must_use]
    pub fn contains_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// Iterate over the roles, in order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.keys()
    }

    /// Iterate over `(role, permissions)` entries, in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&Role, &PermissionSet)> {
        self.roles.iter()
    }

    /// Number of roles in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if the table has no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<'de> Deserialize<'de> for PermissionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = PermissionTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of role to permission list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut table = PermissionTable::new();
                while let Some((role, permissions)) = map.next_entry::<Role, PermissionSet>()? {
                    table.grant(role, permissions);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(s: &'static str) -> Permission {
        Permission::from_static(s)
    }

    #[test]
    fn test_grant_merges_and_deduplicates() {
        let mut table = PermissionTable::new();
        table.grant(Role::new("editor"), [p("plans:view"), p("plans:edit")]);
        table.grant(Role::new("editor"), [p("plans:edit")]);

        let set = table.permissions_for("editor").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_role_with_no_permissions_is_present() {
        let table = PermissionTable::new().with_role(Role::new("guest"), []);
        assert!(table.contains_role("guest"));
        assert!(table.permissions_for("guest").unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_yaml_with_numeric_roles() {
        let yaml = "editor: [plans:view, plans:edit, plans:edit]\n7: [plans:view]\n";
        let table: PermissionTable = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.permissions_for("editor").unwrap().len(), 2);
        assert!(table.permissions_for("7").unwrap().contains("plans:view"));
    }

    #[test]
    fn test_deserialize_merges_numeric_and_text_keys() {
        let yaml = "7: [plans:view]\n\"7\": [plans:edit]\n";
        let table: PermissionTable = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(table.len(), 1);
        let set = table.permissions_for("7").unwrap();
        assert!(set.contains("plans:view"));
        assert!(set.contains("plans:edit"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_permission() {
        let yaml = "editor: [plans:view, PLANS]\n";
        assert!(serde_yaml::from_str::<PermissionTable>(yaml).is_err());
    }

    #[test]
    fn test_serialize_is_ordered() {
        let table = PermissionTable::new()
            .with_role(Role::new("viewer"), [p("plans:view")])
            .with_role(Role::new("editor"), [p("plans:view"), p("plans:edit")]);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"editor":["plans:edit","plans:view"],"viewer":["plans:view"]}"#
        );
    }
}
