//! Permissions file validation command.

use std::io::Write;
use std::path::Path;

use tenant_console::PanelPolicies;

use super::CliError;

/// Parse a permissions file and report permissions missing from the catalog.
///
/// Uncatalogued permissions are warnings, not errors: they are valid but no
/// code path checks them.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or writing fails.
pub fn run(out: &mut impl Write, file: &Path) -> Result<usize, CliError> {
    let policies = PanelPolicies::load(file)?;
    let uncatalogued = policies.uncatalogued();

    for (panel, role, permission) in &uncatalogued {
        tracing::warn!(%panel, %role, %permission, "Permission is not in the catalog");
        writeln!(out, "warning: {panel}/{role}: {permission} is not in the catalog")?;
    }
    writeln!(
        out,
        "{}: ok ({} uncatalogued)",
        file.display(),
        uncatalogued.len()
    )?;
    Ok(uncatalogued.len())
}
