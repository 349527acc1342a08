//! Core types used throughout the system
//!
//! Fundamental aliases and the closed currency set. Everything above the
//! wallet layer speaks in these types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User ID - globally unique, immutable after assignment.
///
/// # Usage:
/// - Primary key for the user directory
/// - Owner / guardian identity on locks and records
pub type UserId = u64;

/// The closed set of supported currencies.
///
/// Numeric IDs are stable so records can be stored compactly; never reuse
/// an ID for a different currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum Currency {
    #[serde(rename = "NGN")]
    Ngn = 1,
    #[serde(rename = "USD")]
    Usd = 2,
}

impl Currency {
    /// Get numeric ID for compact storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from numeric ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Currency::Ngn),
            2 => Some(Currency::Usd),
            _ => None,
        }
    }

    /// Get the ISO 4217 code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NGN" => Ok(Currency::Ngn),
            "USD" => Ok(Currency::Usd),
            _ => Err(()),
        }
    }
}
