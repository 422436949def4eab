use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| DomainError::invalid_id(s))
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Portal endpoint IDs
define_id!(PortalId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_id_round_trips_through_text() {
        let id = PortalId::new();
        let parsed: PortalId = match id.to_string().parse() {
            Ok(parsed) => parsed,
            Err(e) => panic!("canonical text should parse: {e}"),
        };
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_text_is_an_invalid_id() {
        let result: Result<PortalId, _> = "not-a-uuid".parse();
        assert!(matches!(result, Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn empty_text_is_an_invalid_id() {
        let result: Result<PortalId, _> = "".parse();
        assert!(matches!(result, Err(DomainError::InvalidId(_))));
    }
}
