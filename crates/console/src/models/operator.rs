//! Operator directory.
//!
//! Operators are the people who sign in to a console panel. The directory
//! is loaded once from YAML at start-up and holds, per operator, the panel
//! and role the authentication backend assigned and a SHA-256 digest of
//! their access key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use tenant_console_core::{Panel, Role};

/// Errors that can occur while loading the operator directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read operators file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse operators file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Duplicate operator email: {0}")]
    DuplicateEmail(String),
}

/// SHA-256 digest of an operator access key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AccessKeyDigest([u8; 32]);

impl AccessKeyDigest {
    /// Digest an access key.
    #[must_use]
    pub fn of(access_key: &str) -> Self {
        Self(Sha256::digest(access_key.as_bytes()).into())
    }

    /// Lowercase hex form, as stored in the operators file.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<String> for AccessKeyDigest {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut bytes = [0_u8; 32];
        hex::decode_to_slice(value.trim(), &mut bytes)
            .map_err(|e| format!("key_sha256 must be 64 hex characters: {e}"))?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Debug for AccessKeyDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessKeyDigest([REDACTED])")
    }
}

/// A console operator.
#[derive(Debug, Clone, Deserialize)]
pub struct Operator {
    /// Login email (matched case-insensitively).
    pub email: String,
    /// Display name.
    pub name: String,
    /// Panel the operator signs in to.
    pub panel: Panel,
    /// Role issued by the authentication backend.
    pub role: Role,
    /// Digest of the operator's access key.
    pub key_sha256: AccessKeyDigest,
}

/// Operators indexed by normalized email.
#[derive(Debug, Clone, Default)]
pub struct OperatorDirectory {
    by_email: HashMap<String, Operator>,
}

impl OperatorDirectory {
    /// Build a directory, rejecting duplicate emails.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateEmail` if two operators share an
    /// email (case-insensitively).
    pub fn from_operators(
        operators: impl IntoIterator<Item = Operator>,
    ) -> Result<Self, DirectoryError> {
        let mut by_email = HashMap::new();
        for operator in operators {
            let key = normalize_email(&operator.email);
            if by_email.contains_key(&key) {
                return Err(DirectoryError::DuplicateEmail(key));
            }
            by_email.insert(key, operator);
        }
        Ok(Self { by_email })
    }

    /// Parse a directory from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or has duplicate emails.
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self, DirectoryError> {
        let operators: Vec<Operator> =
            serde_yaml::from_str(yaml).map_err(|source| DirectoryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_operators(operators)
    }

    /// Load the directory from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(path, &yaml)
    }

    /// Look up an operator and verify their access key.
    ///
    /// Returns `None` for an unknown email or a wrong key. The key is always
    /// digested, so both failures take the same time.
    #[must_use]
    pub fn authenticate(&self, email: &str, access_key: &SecretString) -> Option<&Operator> {
        let candidate = AccessKeyDigest::of(access_key.expose_secret());
        let operator = self.by_email.get(&normalize_email(email));
        let expected = operator.map_or(&UNMATCHABLE, |operator| &operator.key_sha256.0);

        let matches: bool = expected.as_slice().ct_eq(candidate.0.as_slice()).into();
        operator.filter(|_| matches)
    }

    /// Number of operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Returns `true` if the directory has no operators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

/// Compared against when the email is unknown.
static UNMATCHABLE: [u8; 32] = [0; 32];

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn operators_yaml() -> String {
        format!(
            "- email: Ops@Example.com\n  name: Ops\n  panel: admin\n  role: editor\n  key_sha256: {}\n\
             - email: owner@vendor.test\n  name: Owner\n  panel: vendor\n  role: 3\n  key_sha256: {}\n",
            AccessKeyDigest::of("ops-key").to_hex(),
            AccessKeyDigest::of("owner-key").to_hex(),
        )
    }

    fn directory() -> OperatorDirectory {
        OperatorDirectory::from_yaml(Path::new("operators.yaml"), &operators_yaml()).unwrap()
    }

    #[test]
    fn test_authenticate_success_is_case_insensitive() {
        let directory = directory();
        let operator = directory
            .authenticate(" ops@example.COM ", &SecretString::from("ops-key"))
            .unwrap();

        assert_eq!(operator.panel, Panel::Admin);
        assert_eq!(operator.role, Role::new("editor"));
    }

    #[test]
    fn test_numeric_role() {
        let directory = directory();
        let operator = directory
            .authenticate("owner@vendor.test", &SecretString::from("owner-key"))
            .unwrap();
        assert_eq!(operator.role, Role::from(3));
    }

    #[test]
    fn test_authenticate_wrong_key() {
        let directory = directory();
        assert!(
            directory
                .authenticate("ops@example.com", &SecretString::from("owner-key"))
                .is_none()
        );
    }

    #[test]
    fn test_authenticate_unknown_email() {
        let directory = directory();
        assert!(
            directory
                .authenticate("nobody@example.com", &SecretString::from("ops-key"))
                .is_none()
        );
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let digest = AccessKeyDigest::of("k").to_hex();
        let yaml = format!(
            "- {{email: a@x.test, name: A, panel: admin, role: admin, key_sha256: {digest}}}\n\
             - {{email: A@X.test, name: B, panel: vendor, role: agent, key_sha256: {digest}}}\n"
        );
        let result = OperatorDirectory::from_yaml(Path::new("operators.yaml"), &yaml);
        assert!(matches!(result, Err(DirectoryError::DuplicateEmail(_))));
    }

    #[test]
    fn test_invalid_digest_rejected() {
        let yaml = "- {email: a@x.test, name: A, panel: admin, role: admin, key_sha256: abc}\n";
        let result = OperatorDirectory::from_yaml(Path::new("operators.yaml"), yaml);
        assert!(matches!(result, Err(DirectoryError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = OperatorDirectory::load(Path::new("/nonexistent/operators.yaml"));
        assert!(matches!(result, Err(DirectoryError::Io { .. })));
    }

    #[test]
    fn test_digest_debug_is_redacted() {
        let digest = AccessKeyDigest::of("ops-key");
        assert!(!format!("{digest:?}").contains(&digest.to_hex()));
    }
}
