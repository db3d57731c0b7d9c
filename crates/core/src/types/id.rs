//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create prefixed, numbered ID wrappers such
//! as `shoe-12`. Generated designs use [`DesignId`], a UUID wrapper.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error parsing a prefixed ID from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id: {value:?}")]
pub struct ParseIdError {
    /// Prefix the ID was expected to carry.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Macro to define a prefixed, type-safe ID wrapper.
///
/// Creates a newtype wrapper around `u32` with:
/// - `Display` / `FromStr` using the `{prefix}-{number}` form
/// - `Serialize`/`Deserialize` as that same string
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_u32()`
///
/// # Example
///
/// ```rust
/// # use ragvynn_core::define_id;
/// define_id!(LaceId, "lace");
///
/// let id = LaceId::new(7);
/// assert_eq!(id.to_string(), "lace-7");
/// assert_eq!("lace-7".parse::<LaceId>(), Ok(id));
/// assert!("shoe-7".parse::<LaceId>().is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Prefix used in the string form of this ID.
            pub const PREFIX: &'static str = $prefix;

            /// Create a new ID from its number.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the underlying number.
            #[must_use]
            pub const fn as_u32(&self) -> u32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::ParseIdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .and_then(|number| number.parse::<u32>().ok())
                    .map(Self)
                    .ok_or_else(|| $crate::types::id::ParseIdError {
                        kind: Self::PREFIX,
                        value: s.to_string(),
                    })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

define_id!(ProductId, "shoe");

/// Identifier of a generated design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignId(Uuid);

impl DesignId {
    /// Create a fresh random design ID.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DesignId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DesignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
