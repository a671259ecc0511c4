//! Role listing command.

use std::io::Write;
use std::path::Path;

use tenant_console::PanelPolicies;
use tenant_console_core::Panel;

use super::CliError;

/// Print every role of `panel` (or of every panel) with its permissions.
///
/// # Errors
///
/// Returns an error if the permissions file cannot be loaded or writing
/// fails.
pub fn run(out: &mut impl Write, panel: Option<Panel>, file: Option<&Path>) -> Result<(), CliError> {
    let policies = PanelPolicies::load_or_default(file)?;
    let panels = panel.map_or_else(|| Panel::ALL.to_vec(), |panel| vec![panel]);

    for panel in panels {
        writeln!(out, "{}", panel.title())?;
        for (role, permissions) in policies.table(panel).iter() {
            let permissions: Vec<&str> = permissions.iter().map(|p| p.as_str()).collect();
            writeln!(out, "  {role}: {}", permissions.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_lists_single_panel() {
        let mut out = Vec::new();
        run(&mut out, Some(Panel::Vendor), None).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("Vendor Panel\n"));
        assert!(output.contains("  agent: cards:view, enquiries:view\n"));
        assert!(!output.contains("Admin Panel"));
    }

    #[test]
    fn test_lists_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "admin:\n  7: [plans:view]").unwrap();

        let mut out = Vec::new();
        run(&mut out, Some(Panel::Admin), Some(file.path())).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Admin Panel\n  7: plans:view\n");
    }
}
