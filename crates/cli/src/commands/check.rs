//! Permission check command.

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use tenant_console::PanelPolicies;
use tenant_console_core::{Evaluator, Panel, Permission, Role};

use super::CliError;

/// Exit status for a denied check.
pub const DENIED_EXIT_CODE: u8 = 2;

/// Which evaluator query to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Exactly one permission
    Can,
    /// At least one of the permissions
    Any,
    /// Every one of the permissions
    All,
}

/// Evaluate `permissions` for `role` and print `allowed` or `denied`.
///
/// # Errors
///
/// Returns an error if the permissions file cannot be loaded, if `can` mode
/// is not given exactly one permission, or if writing fails.
pub fn run(
    out: &mut impl Write,
    panel: Panel,
    role: &str,
    mode: Mode,
    file: Option<&Path>,
    permissions: &[String],
) -> Result<bool, CliError> {
    if mode == Mode::Can && permissions.len() != 1 {
        return Err(CliError::Usage(format!(
            "--mode can takes exactly one permission, got {}",
            permissions.len()
        )));
    }

    for permission in permissions {
        if let Err(e) = Permission::parse(permission) {
            tracing::warn!(%permission, "Malformed permission will never be granted: {e}");
        }
    }

    let policies = PanelPolicies::load_or_default(file)?;
    let role = Role::new(role);
    let evaluator = Evaluator::new(Some(&role), policies.table(panel));

    let allowed = match mode {
        Mode::Can => permissions
            .first()
            .is_some_and(|permission| evaluator.can(permission)),
        Mode::Any => evaluator.can_any(permissions),
        Mode::All => evaluator.can_all(permissions),
    };

    writeln!(out, "{}", if allowed { "allowed" } else { "denied" })?;
    Ok(allowed)
}
