//! Typed identifier newtypes backed by storage-assigned integers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a textual identifier is not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer, got {0:?}")]
pub struct ParseIdError(String);

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Access the raw row id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.parse::<i64>() {
                    Ok(value) if value >= 1 => Ok(Self(value)),
                    _ => Err(ParseIdError(s.to_string())),
                }
            }
        }
    };
}

define_id!(
    /// Unique identifier for a [`Hive`](crate::hive::Hive).
    HiveId
);

define_id!(
    /// Unique identifier for a [`HiveSection`](crate::hive_section::HiveSection).
    HiveSectionId
);

define_id!(
    /// Unique identifier for a [`ProductCategory`](crate::product_category::ProductCategory).
    ProductCategoryId
);

define_id!(
    /// Unique identifier for a [`CatalogueProduct`](crate::product::CatalogueProduct).
    ProductId
);

define_id!(
    /// Identifier of the user recorded in audit fields.
    UserId
);
