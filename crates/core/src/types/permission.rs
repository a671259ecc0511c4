//! Permission identifiers.

use core::fmt;
use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize, Serializer};

/// Errors that can occur when parsing a [`Permission`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The input string is empty.
    #[error("permission cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("permission must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input has no `:` separating resource and action.
    #[error("permission must have the form resource:action")]
    MissingAction,
    /// One of the `:`-separated segments is empty.
    #[error("permission contains an empty segment")]
    EmptySegment,
    /// The input contains a character outside `[a-z0-9_.-]`.
    #[error("invalid character {0:?} in permission")]
    InvalidCharacter(char),
}

/// A capability string such as `plans:edit`.
///
/// ## Constraints
///
/// - Length: 1-128 characters
/// - Two or more segments separated by `:` (`resource:action`)
/// - Segments are non-empty and use only `a-z`, `0-9`, `_`, `.`, `-`
///
/// Catalog constants are built with [`Permission::from_static`], which checks
/// the same rules at compile time when used in a `const`.
///
/// ```
/// use tenant_console_core::Permission;
///
/// const PLANS_EDIT: Permission = Permission::from_static("plans:edit");
///
/// assert_eq!(Permission::parse("plans:edit"), Ok(PLANS_EDIT));
/// assert!(Permission::parse("plans").is_err());
/// assert!(Permission::parse("Plans:Edit").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Maximum length of a permission identifier.
    pub const MAX_LENGTH: usize = 128;

    /// Build a permission from a string literal.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid permission. In a `const` item this is a
    /// compile error.
    #[must_use]
    pub const fn from_static(s: &'static str) -> Self {
        assert!(is_valid(s.as_bytes()), "invalid permission literal");
        Self(Cow::Borrowed(s))
    }

    /// Parse a `Permission` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 128 characters
    /// - Has no `:` separator, or an empty segment
    /// - Contains a character outside `[a-z0-9_.-]`
    pub fn parse(s: &str) -> Result<Self, PermissionError> {
        validate(s)?;
        Ok(Self(Cow::Owned(s.to_owned())))
    }

    /// Returns the permission as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the resource segment (before the first `:`).
    #[must_use]
    pub fn resource(&self) -> &str {
        self.0.split(':').next().unwrap_or("")
    }

    /// Returns everything after the resource segment.
    #[must_use]
    pub fn action(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, action)| action)
    }
}

fn validate(s: &str) -> Result<(), PermissionError> {
    if s.is_empty() {
        return Err(PermissionError::Empty);
    }
    if s.len() > Permission::MAX_LENGTH {
        return Err(PermissionError::TooLong {
            max: Permission::MAX_LENGTH,
        });
    }
    if let Some(c) = s.chars().find(|&c| c != ':' && !is_segment_char(c)) {
        return Err(PermissionError::InvalidCharacter(c));
    }
    if !s.contains(':') {
        return Err(PermissionError::MissingAction);
    }
    if s.split(':').any(str::is_empty) {
        return Err(PermissionError::EmptySegment);
    }
    Ok(())
}

const fn is_segment_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

/// Byte-level twin of [`validate`] usable in const context.
#[allow(clippy::indexing_slicing)]
const fn is_valid(bytes: &[u8]) -> bool {
    if bytes.is_empty() || bytes.len() > Permission::MAX_LENGTH {
        return false;
    }
    let mut segments = 1;
    let mut segment_len = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b':' {
            if segment_len == 0 {
                return false;
            }
            segments += 1;
            segment_len = 0;
        } else if is_segment_char(b as char) {
            segment_len += 1;
        } else {
            return false;
        }
        i += 1;
    }
    segments >= 2 && segment_len > 0
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate(&s)?;
        Ok(Self(Cow::Owned(s)))
    }
}

impl std::str::FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.0
    }
}
