//! Parameter domains and a small `Params` struct with safe defaults.
//!
//! Notes:
//! - `seats <= 0` is **not** a domain error: the engine treats it as
//!   "nothing to allocate" and returns empty results.
//! - `display_rounding` only affects rendered grids; ranking never sees it.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Default seat count of an interactive session.
pub const DEFAULT_SEATS: i64 = 30;
/// Upper bound accepted by `validate_domains` (pool size stays `candidates × 200`).
pub const MAX_SEATS: i64 = 200;

/// Define an enum with explicit wire tokens (serde + FromStr + Display).
macro_rules! token_enum {
    ($name:ident => { $($variant:ident = $token:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub fn as_token(self) -> &'static str {
                match self { $( $name::$variant => $token, )+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_token())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $token => Ok($name::$variant), )+
                    _ => Err(CoreError::UnknownToken(stringify!($name))),
                }
            }
        }
    };
}

token_enum!(DisplayRounding => {
    NearestInteger = "nearest_integer",
    None = "none"
});

impl Default for DisplayRounding {
    fn default() -> Self {
        DisplayRounding::NearestInteger
    }
}

/// Run parameters. Every field has a default so partial parameter files are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default, deny_unknown_fields))]
pub struct Params {
    /// Seats to allocate (S).
    pub seats: i64,
    /// Rounding applied to the rendered quotient grid.
    pub display_rounding: DisplayRounding,
    /// Order the rendered vote table by votes (desc) instead of input order.
    pub sort_by_votes: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEATS,
            display_rounding: DisplayRounding::default(),
            sort_by_votes: true,
        }
    }
}

impl Params {
    /// Seat count as the engine consumes it (`<= 0` means nothing to allocate).
    #[inline]
    pub fn seats(&self) -> i64 {
        self.seats
    }
}

/// Validate parameter domains.
pub fn validate_domains(p: &Params) -> Result<(), CoreError> {
    if p.seats > MAX_SEATS {
        return Err(CoreError::DomainOutOfRange("seats"));
    }
    Ok(())
}
