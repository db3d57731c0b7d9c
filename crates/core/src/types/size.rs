//! Shoe sizes in half-size steps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a shoe size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid shoe size: {0:?}")]
pub struct ParseSizeError(pub String);

/// A shoe size such as `9` or `8.5`.
///
/// Stored as a count of half sizes so that equality and hashing are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShoeSize {
    halves: u16,
}

impl ShoeSize {
    /// A whole size.
    #[must_use]
    pub const fn whole(size: u16) -> Self {
        Self { halves: size * 2 }
    }

    /// A whole size plus one half (e.g. `half_above(8)` is 8.5).
    #[must_use]
    pub const fn half_above(size: u16) -> Self {
        Self {
            halves: size * 2 + 1,
        }
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.halves / 2;
        if self.halves % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl FromStr for ShoeSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSizeError(s.to_string());
        let trimmed = s.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let whole: u16 = whole.parse().map_err(|_| err())?;
        let half = match fraction {
            "" | "0" => 0,
            "5" => 1,
            _ => return Err(err()),
        };
        whole
            .checked_mul(2)
            .and_then(|h| h.checked_add(half))
            .map(|halves| Self { halves })
            .ok_or_else(err)
    }
}

impl TryFrom<String> for ShoeSize {
    type Error = ParseSizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShoeSize> for String {
    fn from(size: ShoeSize) -> Self {
        size.to_string()
    }
}
