//! Console permission catalog and default role tables.
//!
//! Use the `define_permissions!` macro to declare permission constants; it
//! checks every literal at compile time and collects them into an `ALL`
//! slice for validation and listing.

use crate::table::PermissionTable;
use crate::types::Role;

/// Macro to declare a set of permission constants.
///
/// Creates one `pub const` per entry plus `pub const ALL: &[Permission]`
/// listing every entry in declaration order.
///
/// # Example
///
/// ```rust
/// # use tenant_console_core::define_permissions;
/// define_permissions! {
///     /// View invoices.
///     INVOICES_VIEW => "invoices:view",
///     /// Void an invoice.
///     INVOICES_VOID => "invoices:void",
/// }
///
/// assert_eq!(ALL.len(), 2);
/// assert_eq!(INVOICES_VOID.as_str(), "invoices:void");
/// ```
#[macro_export]
macro_rules! define_permissions {
    ($($(#[$meta:meta])* $name:ident => $value:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            pub const $name: $crate::Permission = $crate::Permission::from_static($value);
        )+

        /// Every permission declared in this module.
        pub const ALL: &[$crate::Permission] = &[$($name),+];
    };
}

/// Permission constants shared by both panels.
pub mod permissions {
    define_permissions! {
        /// List subscription plans.
        PLANS_VIEW => "plans:view",
        /// Create a subscription plan.
        PLANS_CREATE => "plans:create",
        /// Edit a subscription plan.
        PLANS_EDIT => "plans:edit",
        /// Delete a subscription plan.
        PLANS_DELETE => "plans:delete",
        /// Toggle a plan active/inactive.
        PLANS_STATUS => "plans:status",

        /// List vendors.
        VENDORS_VIEW => "vendors:view",
        /// Onboard a vendor.
        VENDORS_CREATE => "vendors:create",
        /// Edit vendor details.
        VENDORS_EDIT => "vendors:edit",
        /// Remove a vendor.
        VENDORS_DELETE => "vendors:delete",
        /// Suspend or reinstate a vendor.
        VENDORS_STATUS => "vendors:status",

        /// View subscriptions and payments.
        SUBSCRIPTIONS_VIEW => "subscriptions:view",
        /// Export subscriptions.
        SUBSCRIPTIONS_EXPORT => "subscriptions:export",

        /// View digital business cards.
        CARDS_VIEW => "cards:view",
        /// Create a digital business card.
        CARDS_CREATE => "cards:create",
        /// Edit a digital business card.
        CARDS_EDIT => "cards:edit",
        /// Delete a digital business card.
        CARDS_DELETE => "cards:delete",
        /// Export a card as image or PDF.
        CARDS_EXPORT => "cards:export",

        /// View customer enquiries.
        ENQUIRIES_VIEW => "enquiries:view",
        /// Delete customer enquiries.
        ENQUIRIES_DELETE => "enquiries:delete",

        /// List console users.
        USERS_VIEW => "users:view",
        /// Invite a console user.
        USERS_CREATE => "users:create",
        /// Edit a console user.
        USERS_EDIT => "users:edit",
        /// Remove a console user.
        USERS_DELETE => "users:delete",

        /// View the role table.
        ROLES_VIEW => "roles:view",

        /// View dashboard charts and reports.
        REPORTS_VIEW => "reports:view",
        /// Export reports.
        REPORTS_EXPORT => "reports:export",

        /// View console settings.
        SETTINGS_VIEW => "settings:view",
        /// Change console settings.
        SETTINGS_EDIT => "settings:edit",
    }
}

use permissions as p;

/// Returns `true` if `permission` is declared in the catalog.
#[must_use]
pub fn is_catalogued(permission: &str) -> bool {
    p::ALL.iter().any(|known| known.as_str() == permission)
}

/// Default permission table for the Admin Panel.
///
/// - `super_admin`: every permission
/// - `admin`: everything except user management writes
/// - `editor`: view/edit plans and cards, view vendors
/// - `viewer`: every `:view` permission except `roles:view`
#[must_use]
pub fn admin_panel() -> PermissionTable {
    let user_writes = [p::USERS_CREATE, p::USERS_EDIT, p::USERS_DELETE];

    PermissionTable::new()
        .with_role(Role::new("super_admin"), p::ALL.iter().cloned())
        .with_role(
            Role::new("admin"),
            p::ALL
                .iter()
                .filter(|permission| !user_writes.contains(*permission))
                .cloned(),
        )
        .with_role(
            Role::new("editor"),
            [
                p::PLANS_VIEW,
                p::PLANS_EDIT,
                p::VENDORS_VIEW,
                p::CARDS_VIEW,
                p::CARDS_EDIT,
            ],
        )
        .with_role(
            Role::new("viewer"),
            p::ALL
                .iter()
                .filter(|permission| {
                    permission.action() == "view" && **permission != p::ROLES_VIEW
                })
                .cloned(),
        )
}

/// Default permission table for the Vendor Panel.
#[must_use]
pub fn vendor_panel() -> PermissionTable {
    PermissionTable::new()
        .with_role(
            Role::new("vendor_owner"),
            [
                p::CARDS_VIEW,
                p::CARDS_CREATE,
                p::CARDS_EDIT,
                p::CARDS_DELETE,
                p::CARDS_EXPORT,
                p::ENQUIRIES_VIEW,
                p::ENQUIRIES_DELETE,
                p::SUBSCRIPTIONS_VIEW,
                p::REPORTS_VIEW,
                p::USERS_VIEW,
                p::USERS_CREATE,
                p::ROLES_VIEW,
                p::SETTINGS_VIEW,
                p::SETTINGS_EDIT,
            ],
        )
        .with_role(
            Role::new("vendor_staff"),
            [
                p::CARDS_VIEW,
                p::CARDS_CREATE,
                p::CARDS_EDIT,
                p::CARDS_EXPORT,
                p::ENQUIRIES_VIEW,
            ],
        )
        .with_role(Role::new("agent"), [p::CARDS_VIEW, p::ENQUIRIES_VIEW])
}
