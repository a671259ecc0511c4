//! Console panels.

use serde::{Deserialize, Serialize};

/// The console surface an operator signs in to.
///
/// Each panel carries its own permission table; role names are only
/// meaningful within their panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    /// Platform administration (plans, vendors, users).
    Admin,
    /// Vendor self-service (cards, enquiries, subscription).
    Vendor,
}

impl Panel {
    /// Every panel, in display order.
    pub const ALL: [Self; 2] = [Self::Admin, Self::Vendor];

    /// Returns the panel's identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Admin => "Admin Panel",
            Self::Vendor => "Vendor Panel",
        }
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Panel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "vendor" => Ok(Self::Vendor),
            _ => Err(format!("invalid panel: {s}")),
        }
    }
}
