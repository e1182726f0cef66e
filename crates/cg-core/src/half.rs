//! Half-integer quantum numbers stored as doubled integers.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CgError, ErrorInfo};

/// A half-integer quantum number (j, m, m1, m2) stored as twice its physical
/// value, so every value in the engine is an exact integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfInt(i32);

impl HalfInt {
    /// Creates a half-integer from its doubled representation.
    pub fn from_doubled(doubled: i32) -> Self {
        Self(doubled)
    }

    /// Returns the doubled integer representation.
    pub fn doubled(self) -> i32 {
        self.0
    }

    /// Whether the physical value is a whole integer.
    pub fn is_whole(self) -> bool {
        self.0 % 2 == 0
    }
}

fn format_error(input: &str) -> CgError {
    CgError::Input(
        ErrorInfo::new("half-integer-format", "invalid half integer")
            .with_context("input", input)
            .with_hint("expected '<int>' or '<int>/2'"),
    )
}

impl FromStr for HalfInt {
    type Err = CgError;

    /// Parses the text grammar `<int>` or `<int>/2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            None => {
                let v: i32 = s.trim().parse().map_err(|_| format_error(s))?;
                Ok(Self(2 * v))
            }
            Some((num, "2")) => {
                let v: i32 = num.trim().parse().map_err(|_| format_error(s))?;
                Ok(Self(v))
            }
            Some(_) => Err(format_error(s)),
        }
    }
}

impl Display for HalfInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}
