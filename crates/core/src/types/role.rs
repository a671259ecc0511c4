//! Session role identifier.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize, Serializer};

/// An opaque role identifier issued by the authentication backend.
///
/// Backends hand out either numeric or textual role ids. Both are kept in
/// their canonical string form, so a numeric role `7` and the string `"7"`
/// name the same role.
///
/// ```
/// use tenant_console_core::Role;
///
/// assert_eq!(Role::from(7), Role::new("7"));
/// assert_eq!(Role::new("editor").as_str(), "editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "RoleRepr")]
pub struct Role(String);

/// Wire forms accepted for a role: YAML and JSON may carry either.
#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRepr {
    Numeric(i64),
    Unsigned(u64),
    Text(String),
}

impl From<RoleRepr> for Role {
    fn from(repr: RoleRepr) -> Self {
        match repr {
            RoleRepr::Numeric(id) => Self::from(id),
            RoleRepr::Unsigned(id) => Self::from(id),
            RoleRepr::Text(name) => Self(name),
        }
    }
}

impl Role {
    /// Create a role from its textual identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Role {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for Role {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for Role {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i32> for Role {
    fn from(id: i32) -> Self {
        Self::from(i64::from(id))
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_roles_are_equal() {
        assert_eq!(Role::from(3), Role::new("3"));
        assert_eq!(Role::from(-1_i64).as_str(), "-1");
    }

    #[test]
    fn test_deserialize_from_string_or_number() {
        let text: Role = serde_json::from_str("\"vendor_owner\"").unwrap();
        assert_eq!(text, Role::new("vendor_owner"));

        let numeric: Role = serde_json::from_str("42").unwrap();
        assert_eq!(numeric, Role::new("42"));
    }

    #[test]
    fn test_deserialize_unsigned_beyond_i64() {
        let role: Role = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(role, Role::new("18446744073709551615"));
        assert_eq!(role, Role::from(u64::MAX));

        let yaml: Role = serde_yaml::from_str("18446744073709551615").unwrap();
        assert_eq!(yaml, role);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Role::from(42)).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::new("editor").to_string(), "editor");
    }
}
