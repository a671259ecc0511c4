//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ConsoleConfig;
use crate::models::OperatorDirectory;
use crate::policy::PanelPolicies;

/// Application state shared across all handlers.
///
/// Everything inside is read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    policies: PanelPolicies,
    directory: OperatorDirectory,
}

impl AppState {
    /// Create application state.
    #[must_use]
    pub fn new(
        config: ConsoleConfig,
        policies: PanelPolicies,
        directory: OperatorDirectory,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                policies,
                directory,
            }),
        }
    }

    /// Console configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Permission tables for every panel.
    #[must_use]
    pub fn policies(&self) -> &PanelPolicies {
        &self.inner.policies
    }

    /// Operator directory.
    #[must_use]
    pub fn directory(&self) -> &OperatorDirectory {
        &self.inner.directory
    }
}
