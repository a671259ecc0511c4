//! Per-panel permission tables.
//!
//! Each panel has one [`PermissionTable`], loaded at start-up from the
//! permissions file or taken from the compiled-in catalog, and shared
//! read-only for the life of the process.
//!
//! # File format
//!
//! ```yaml
//! admin:
//!   editor: [plans:view, plans:edit]
//!   7: [plans:view]
//! vendor:
//!   vendor_owner: [cards:view, cards:create]
//! ```
//!
//! A panel missing from the file keeps its default table.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use tenant_console_core::{Panel, Permission, PermissionTable, Role, catalog};

/// Errors that can occur while loading permission tables.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read permissions file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse permissions file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PermissionsFile {
    admin: Option<PermissionTable>,
    vendor: Option<PermissionTable>,
}

/// Permission tables for every panel.
#[derive(Debug, Clone)]
pub struct PanelPolicies {
    admin: Arc<PermissionTable>,
    vendor: Arc<PermissionTable>,
}

impl Default for PanelPolicies {
    fn default() -> Self {
        Self::new(catalog::admin_panel(), catalog::vendor_panel())
    }
}

impl PanelPolicies {
    /// Create policies from explicit tables.
    #[must_use]
    pub fn new(admin: PermissionTable, vendor: PermissionTable) -> Self {
        Self {
            admin: Arc::new(admin),
            vendor: Arc::new(vendor),
        }
    }

    /// Parse policies from YAML, filling missing panels with defaults.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Parse` for malformed YAML, unknown panels, or
    /// invalid permission strings.
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self, PolicyError> {
        let file: PermissionsFile =
            serde_yaml::from_str(yaml).map_err(|source| PolicyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(
            file.admin.unwrap_or_else(catalog::admin_panel),
            file.vendor.unwrap_or_else(catalog::vendor_panel),
        ))
    }

    /// Load policies from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &yaml)
    }

    /// Load from `path` when given, else use the compiled-in tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a given file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PolicyError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// The table for `panel`.
    #[must_use]
    pub fn table(&self, panel: Panel) -> &Arc<PermissionTable> {
        match panel {
            Panel::Admin => &self.admin,
            Panel::Vendor => &self.vendor,
        }
    }

    /// Permissions granted in any table that the catalog does not declare.
    ///
    /// These are valid strings that no call site checks, usually typos.
    #[must_use]
    pub fn uncatalogued(&self) -> Vec<(Panel, &Role, &Permission)> {
        Panel::ALL
            .into_iter()
            .flat_map(|panel| {
                self.table(panel).iter().flat_map(move |(role, permissions)| {
                    permissions
                        .iter()
                        .filter(|permission| !catalog::is_catalogued(permission.as_str()))
                        .map(move |permission| (panel, role, permission))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn path() -> &'static Path {
        Path::new("permissions.yaml")
    }

    #[test]
    fn test_defaults() {
        let policies = PanelPolicies::default();
        assert!(policies.table(Panel::Admin).contains_role("super_admin"));
        assert!(policies.table(Panel::Vendor).contains_role("vendor_owner"));
        assert!(policies.uncatalogued().is_empty());
    }

    #[test]
    fn test_from_yaml_overrides_one_panel() {
        let yaml = "admin:\n  editor: [plans:edit, plans:view]\n  7: [plans:view]\n";
        let policies = PanelPolicies::from_yaml(path(), yaml).unwrap();

        let admin = policies.table(Panel::Admin);
        assert_eq!(admin.len(), 2);
        assert!(!admin.contains_role("super_admin"));
        assert!(admin.permissions_for("7").unwrap().contains("plans:view"));

        // Vendor panel falls back to the catalog default.
        assert!(policies.table(Panel::Vendor).contains_role("agent"));
    }

    #[test]
    fn test_unknown_panel_rejected() {
        let yaml = "storefront:\n  guest: [plans:view]\n";
        assert!(matches!(
            PanelPolicies::from_yaml(path(), yaml),
            Err(PolicyError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_permission_rejected() {
        let yaml = "vendor:\n  agent: [Cards]\n";
        assert!(matches!(
            PanelPolicies::from_yaml(path(), yaml),
            Err(PolicyError::Parse { .. })
        ));
    }

    #[test]
    fn test_uncatalogued_reports_typos() {
        let yaml = "admin:\n  editor: [plans:edit, plans:edti]\n";
        let policies = PanelPolicies::from_yaml(path(), yaml).unwrap();
        let uncatalogued = policies.uncatalogued();

        assert_eq!(uncatalogued.len(), 1);
        let (panel, role, permission) = uncatalogued[0];
        assert_eq!(panel, Panel::Admin);
        assert_eq!(role.as_str(), "editor");
        assert_eq!(permission.as_str(), "plans:edti");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "vendor:\n  agent: [cards:view]").unwrap();

        let policies = PanelPolicies::load(file.path()).unwrap();
        assert_eq!(policies.table(Panel::Vendor).len(), 1);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let policies = PanelPolicies::load_or_default(None).unwrap();
        assert!(policies.table(Panel::Admin).contains_role("viewer"));
    }
}
