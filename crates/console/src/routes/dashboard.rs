//! Dashboard route handler.
//!
//! The dashboard lists each console section with its action buttons. Every
//! section and button is gated on a permission; the page is rebuilt on
//! each request, so a role change shows up on the next load.

use askama::Template;
use axum::{Router, response::Html, routing::get};
use tracing::instrument;

use tenant_console_core::{Evaluator, Gate, Permission, catalog::permissions as p};

use crate::middleware::Capabilities;
use crate::models::CurrentOperator;
use crate::state::AppState;

/// Label rendered in place of a destructive action the role cannot take.
pub const NO_ACCESS_LABEL: &str = "No Access";

struct Section {
    title: &'static str,
    view: Permission,
    actions: &'static [Action],
}

struct Action {
    label: &'static str,
    permission: Permission,
    destructive: bool,
}

impl Action {
    const fn new(label: &'static str, permission: Permission) -> Self {
        Self {
            label,
            permission,
            destructive: false,
        }
    }

    const fn destructive(label: &'static str, permission: Permission) -> Self {
        Self {
            label,
            permission,
            destructive: true,
        }
    }
}

static SECTIONS: &[Section] = &[
    Section {
        title: "Plans",
        view: p::PLANS_VIEW,
        actions: &[
            Action::new("New plan", p::PLANS_CREATE),
            Action::new("Edit", p::PLANS_EDIT),
            Action::new("Change status", p::PLANS_STATUS),
            Action::destructive("Delete", p::PLANS_DELETE),
        ],
    },
    Section {
        title: "Vendors",
        view: p::VENDORS_VIEW,
        actions: &[
            Action::new("New vendor", p::VENDORS_CREATE),
            Action::new("Edit", p::VENDORS_EDIT),
            Action::new("Change status", p::VENDORS_STATUS),
            Action::destructive("Delete", p::VENDORS_DELETE),
        ],
    },
    Section {
        title: "Subscriptions",
        view: p::SUBSCRIPTIONS_VIEW,
        actions: &[Action::new("Export", p::SUBSCRIPTIONS_EXPORT)],
    },
    Section {
        title: "Digital cards",
        view: p::CARDS_VIEW,
        actions: &[
            Action::new("New card", p::CARDS_CREATE),
            Action::new("Edit", p::CARDS_EDIT),
            Action::new("Export", p::CARDS_EXPORT),
            Action::destructive("Delete", p::CARDS_DELETE),
        ],
    },
    Section {
        title: "Enquiries",
        view: p::ENQUIRIES_VIEW,
        actions: &[Action::destructive("Delete", p::ENQUIRIES_DELETE)],
    },
    Section {
        title: "Users",
        view: p::USERS_VIEW,
        actions: &[
            Action::new("Invite user", p::USERS_CREATE),
            Action::new("Edit", p::USERS_EDIT),
            Action::destructive("Remove", p::USERS_DELETE),
        ],
    },
    Section {
        title: "Roles",
        view: p::ROLES_VIEW,
        actions: &[],
    },
    Section {
        title: "Reports",
        view: p::REPORTS_VIEW,
        actions: &[Action::new("Export", p::REPORTS_EXPORT)],
    },
    Section {
        title: "Settings",
        view: p::SETTINGS_VIEW,
        actions: &[Action::new("Edit settings", p::SETTINGS_EDIT)],
    },
];

/// Operator view for templates.
#[derive(Debug, Clone)]
pub struct OperatorView {
    pub name: String,
    pub email: String,
    pub panel_title: &'static str,
    pub role: String,
}

impl From<&CurrentOperator> for OperatorView {
    fn from(operator: &CurrentOperator) -> Self {
        Self {
            name: operator.name.clone(),
            email: operator.email.clone(),
            panel_title: operator.panel.title(),
            role: operator.role.to_string(),
        }
    }
}

/// A rendered action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub label: &'static str,
    pub permission: &'static str,
    pub enabled: bool,
}

/// A rendered dashboard section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: &'static str,
    pub actions: Vec<ActionView>,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub operator: OperatorView,
    pub known_role: bool,
    pub sections: Vec<SectionView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Gate every section and action for `evaluator`.
///
/// Hidden sections are dropped. Within a visible section, ordinary actions
/// the role lacks are dropped and destructive ones render disabled as
/// [`NO_ACCESS_LABEL`].
#[must_use]
pub fn sections_for(evaluator: &Evaluator<'_>) -> Vec<SectionView> {
    SECTIONS
        .iter()
        .filter(|section| evaluator.decide(&section.view).is_shown())
        .map(|section| SectionView {
            title: section.title,
            actions: section
                .actions
                .iter()
                .filter_map(|action| action_view(evaluator, action))
                .collect(),
        })
        .collect()
}

fn action_view(evaluator: &Evaluator<'_>, action: &'static Action) -> Option<ActionView> {
    let permission = action.permission.as_str();
    let gate = Gate::new(
        permission,
        ActionView {
            label: action.label,
            permission,
            enabled: true,
        },
    );

    if action.destructive {
        gate.otherwise(ActionView {
            label: NO_ACCESS_LABEL,
            permission,
            enabled: false,
        })
        .render(evaluator)
    } else {
        gate.render(evaluator)
    }
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn dashboard(capabilities: Capabilities) -> Html<String> {
    let evaluator = capabilities.evaluator();

    let template = DashboardTemplate {
        operator: OperatorView::from(capabilities.operator()),
        known_role: evaluator.is_known_role(),
        sections: sections_for(&evaluator),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tenant_console_core::{PermissionTable, Role, catalog};

    use super::*;

    fn titles(sections: &[SectionView]) -> Vec<&'static str> {
        sections.iter().map(|section| section.title).collect()
    }

    #[test]
    fn test_anonymous_sees_nothing() {
        assert!(sections_for(&Evaluator::anonymous()).is_empty());
    }

    #[test]
    fn test_viewer_gets_no_access_on_delete() {
        let table = catalog::admin_panel();
        let role = Role::new("viewer");
        let sections = sections_for(&Evaluator::new(Some(&role), &table));

        let plans = sections.iter().find(|s| s.title == "Plans").unwrap();
        assert_eq!(
            plans.actions,
            vec![ActionView {
                label: NO_ACCESS_LABEL,
                permission: "plans:delete",
                enabled: false,
            }]
        );
    }

    #[test]
    fn test_editor_sections() {
        let table =
            PermissionTable::new().with_role(Role::new("editor"), [p::PLANS_EDIT, p::PLANS_VIEW]);
        let role = Role::new("editor");
        let sections = sections_for(&Evaluator::new(Some(&role), &table));

        assert_eq!(titles(&sections), vec!["Plans"]);
        let labels: Vec<_> = sections[0].actions.iter().map(|a| a.label).collect();
        assert_eq!(labels, vec!["Edit", NO_ACCESS_LABEL]);
    }

    #[test]
    fn test_vendor_owner_sections() {
        let table = catalog::vendor_panel();
        let role = Role::new("vendor_owner");
        let sections = sections_for(&Evaluator::new(Some(&role), &table));

        assert!(titles(&sections).contains(&"Digital cards"));
        assert!(!titles(&sections).contains(&"Vendors"));
    }

    #[test]
    fn test_template_renders_gated_buttons() {
        let table = catalog::admin_panel();
        let role = Role::new("viewer");
        let evaluator = Evaluator::new(Some(&role), &table);
        let template = DashboardTemplate {
            operator: OperatorView {
                name: "Vee".to_string(),
                email: "vee@example.com".to_string(),
                panel_title: "Admin Panel",
                role: "viewer".to_string(),
            },
            known_role: true,
            sections: sections_for(&evaluator),
        };

        let html = template.render().unwrap();
        assert!(html.contains("No Access"));
        assert!(!html.contains("New plan"));
    }
}
