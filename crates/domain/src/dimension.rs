//! Dimension identifier value object
//!
//! Dimensions are addressed by `namespace:path` identifiers (e.g. `overworld`,
//! `riftgate:hollow`). The text form follows the host game's resource-location
//! convention: lowercase namespaces and paths, with a default namespace applied
//! when the colon is omitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Namespace applied when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "riftgate";

/// Identifier of a simulated world/space that contains positions and portal
/// endpoints.
///
/// Immutable once constructed; equality, ordering and hashing are by the full
/// `namespace:path` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DimensionId {
    namespace: String,
    path: String,
}

impl DimensionId {
    /// Parse a `namespace:path` identifier, applying [`DEFAULT_NAMESPACE`]
    /// when no colon is present.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let (namespace, path) = match text.split_once(':') {
            Some((ns, path)) => (ns, path),
            None => (DEFAULT_NAMESPACE, text),
        };

        if namespace.is_empty() || !namespace.bytes().all(is_valid_namespace_byte) {
            return Err(DomainError::parse(format!(
                "invalid dimension namespace in {text:?}"
            )));
        }
        if path.is_empty() || !path.bytes().all(is_valid_path_byte) {
            return Err(DomainError::parse(format!(
                "invalid dimension path in {text:?}"
            )));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_valid_namespace_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-')
}

fn is_valid_path_byte(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'/')
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for DimensionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DimensionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DimensionId> for String {
    fn from(value: DimensionId) -> Self {
        value.to_string()
    }
}
