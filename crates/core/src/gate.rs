//! Capability gates for UI affordances.
//!
//! A gate decides whether a piece of UI renders for the current role. It is
//! presentation only: every endpoint behind a gated control enforces the
//! same permission on the server.

use serde::Serialize;

use crate::evaluator::Evaluator;
use crate::table::PermissionTable;
use crate::types::Role;

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderDecision {
    /// Render the protected content.
    Show,
    /// Render the fallback (or nothing).
    Hide,
}

impl RenderDecision {
    /// `Show` when `allowed`, else `Hide`.
    #[must_use]
    pub const fn from_allowed(allowed: bool) -> Self {
        if allowed { Self::Show } else { Self::Hide }
    }

    /// Returns `true` for [`RenderDecision::Show`].
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Show)
    }

    /// Run `children` on `Show`, `fallback` on `Hide`.
    pub fn render<T>(self, children: impl FnOnce() -> T, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Show => children(),
            Self::Hide => fallback(),
        }
    }

    /// Run `children` on `Show`; render nothing on `Hide`.
    pub fn show<T>(self, children: impl FnOnce() -> T) -> Option<T> {
        self.render(|| Some(children()), || None)
    }
}

/// Decide whether content gated on `permission` renders for `role`.
///
/// ```
/// use tenant_console_core::{evaluate_gate, PermissionTable, RenderDecision, Role};
///
/// let table = PermissionTable::new();
/// let role = Role::new("viewer");
/// assert_eq!(
///     evaluate_gate(Some(&role), &table, "plans:delete"),
///     RenderDecision::Hide,
/// );
/// ```
#[must_use]
pub fn evaluate_gate<P>(role: Option<&Role>, table: &PermissionTable, permission: &P) -> RenderDecision
where
    P: AsRef<str> + ?Sized,
{
    Evaluator::new(role, table).decide(permission)
}

impl Evaluator<'_> {
    /// Gate decision for `permission`.
    #[must_use]
    pub fn decide<P>(&self, permission: &P) -> RenderDecision
    where
        P: AsRef<str> + ?Sized,
    {
        RenderDecision::from_allowed(self.can(permission))
    }
}

/// Conditional-render wrapper: `children` when the permission is held,
/// otherwise the fallback, which defaults to nothing.
///
/// ```
/// use tenant_console_core::{Evaluator, Gate, PermissionTable};
///
/// let table = PermissionTable::new();
/// let evaluator = Evaluator::new(None, &table);
///
/// let rendered = Gate::new("plans:delete", "Delete plan")
///     .otherwise("No Access")
///     .render(&evaluator);
/// assert_eq!(rendered, Some("No Access"));
/// ```
#[derive(Debug, Clone)]
pub struct Gate<P, T> {
    permission: P,
    children: T,
    fallback: Option<T>,
}

impl<P, T> Gate<P, T>
where
    P: AsRef<str>,
{
    /// Gate `children` on `permission`.
    #[must_use]
    pub const fn new(permission: P, children: T) -> Self {
        Self {
            permission,
            children,
            fallback: None,
        }
    }

    /// Render `fallback` when the permission is not held.
    #[must_use]
    pub fn otherwise(mut self, fallback: T) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// The decision this gate takes for `evaluator`.
    #[must_use]
    pub fn decide(&self, evaluator: &Evaluator<'_>) -> RenderDecision {
        evaluator.decide(&self.permission)
    }

    /// Render the gate: `Some(children)` on `Show`, the fallback on `Hide`.
    pub fn render(self, evaluator: &Evaluator<'_>) -> Option<T> {
        match self.decide(evaluator) {
            RenderDecision::Show => Some(self.children),
            RenderDecision::Hide => self.fallback,
        }
    }
}
