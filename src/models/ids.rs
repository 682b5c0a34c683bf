//! Strongly-typed ID wrappers for all entity types
//!
//! The API hands out integer primary keys. Wrapping them in newtypes keeps a
//! category id from being passed where a transaction id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw API id
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw API id
            pub const fn get(&self) -> i64 {
                self.0
            }

            /// The id following this one, used when assigning ids locally
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            /// Accepts both the bare number and the display form ("txn-42")
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(TransactionId::new(42).to_string(), "txn-42");
        assert_eq!(CategoryId::new(7).to_string(), "cat-7");
        assert_eq!(BudgetId::new(1).to_string(), "bud-1");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("42".parse::<TransactionId>().unwrap(), TransactionId::new(42));
        assert_eq!("cat-7".parse::<CategoryId>().unwrap(), CategoryId::new(7));
        assert!("cat-x".parse::<CategoryId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_next() {
        assert_eq!(BudgetId::new(9).next(), BudgetId::new(10));
    }
}
