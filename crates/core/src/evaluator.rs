//! Permission evaluation against a session role.
//!
//! The evaluator answers `can` / `can_any` / `can_all` for one role against
//! one [`PermissionTable`]. It never errors and never allows by default: an
//! unset role, a role missing from the table, and an unrecognised permission
//! string all evaluate to "not granted".

use crate::table::{PermissionSet, PermissionTable};
use crate::types::{Permission, Role};

/// Authorization queries for the current session role.
///
/// Construct one per render or request from the session role and the table;
/// it holds no state beyond those two borrows, so repeated queries return
/// identical answers.
///
/// ```
/// use tenant_console_core::{Evaluator, Permission, PermissionTable, Role};
///
/// let table = PermissionTable::new().with_role(
///     Role::new("editor"),
///     [
///         Permission::from_static("plans:edit"),
///         Permission::from_static("plans:view"),
///     ],
/// );
/// let role = Role::new("editor");
/// let can = Evaluator::new(Some(&role), &table);
///
/// assert!(can.can("plans:edit"));
/// assert!(!can.can("plans:delete"));
/// assert!(can.can_any(["plans:delete", "plans:edit"]));
/// assert!(!can.can_all(["plans:edit", "plans:delete"]));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    role: Option<&'a Role>,
    granted: Option<&'a PermissionSet>,
}

impl<'a> Evaluator<'a> {
    /// Resolve `role` against `table`.
    ///
    /// A role with no entry in the table is logged at `warn` and treated as
    /// holding no permissions.
    #[must_use]
    pub fn new(role: Option<&'a Role>, table: &'a PermissionTable) -> Self {
        let granted = role.and_then(|role| {
            let set = table.permissions_for(role.as_str());
            if set.is_none() {
                tracing::warn!(role = %role, "role has no entry in permission table, denying");
            }
            set
        });

        Self { role, granted }
    }

    /// An evaluator for a session with no role.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            role: None,
            granted: None,
        }
    }

    /// The role being evaluated, if any.
    #[must_use]
    pub const fn role(&self) -> Option<&'a Role> {
        self.role
    }

    /// Returns `true` if the role has an entry in the table.
    #[must_use]
    pub const fn is_known_role(&self) -> bool {
        self.granted.is_some()
    }

    /// Returns `true` iff the role holds `permission`.
    #[must_use]
    pub fn can<P>(&self, permission: &P) -> bool
    where
        P: AsRef<str> + ?Sized,
    {
        self.granted
            .is_some_and(|set| set.contains(permission.as_ref()))
    }

    /// Returns `true` iff the role holds at least one of `permissions`.
    ///
    /// An empty list is never satisfied.
    #[must_use]
    pub fn can_any<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.granted.is_some_and(|set| {
            permissions
                .into_iter()
                .any(|permission| set.contains(permission.as_ref()))
        })
    }

    /// Returns `true` iff the role holds every one of `permissions`.
    ///
    /// An empty list is always satisfied, even for a role with no entry.
    #[must_use]
    pub fn can_all<I>(&self, permissions: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut permissions = permissions.into_iter();
        match self.granted {
            Some(set) => permissions.all(|permission| set.contains(permission.as_ref())),
            None => permissions.next().is_none(),
        }
    }

    /// Iterate over the permissions the role holds, in order. Empty for an
    /// unset or unknown role.
    pub fn granted(&self) -> impl Iterator<Item = &'a Permission> + use<'a> {
        self.granted.into_iter().flatten()
    }
}
