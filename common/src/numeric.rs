//! [`Numeric`]-related definitions.

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Numeric value in the shape it arrives from a feed: either a native number
/// or its textual representation (possibly with a comma decimal separator
/// and digit-group spaces, like `"12 500,5"`).
#[derive(Clone, Debug, Deserialize, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Native number.
    Number(f64),

    /// Textual representation of a number.
    Text(String),
}

impl Numeric {
    /// Coerces this [`Numeric`] into a finite [`f64`].
    ///
    /// [`None`] is returned if the value cannot be interpreted as a finite
    /// number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.is_finite().then_some(*n),
            Self::Text(s) => coerce(s),
        }
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<u32> for Numeric {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

/// Coerces the provided textual number into a finite [`f64`].
///
/// Whitespace (including interior digit-group separators) is removed and a
/// comma decimal separator is converted to a dot before parsing.
#[must_use]
pub fn coerce(input: &str) -> Option<f64> {
    let normalized = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect::<String>();
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerces the optional [`Numeric`] into a finite [`f64`].
#[must_use]
pub fn value_of(num: Option<&Numeric>) -> Option<f64> {
    num.and_then(Numeric::value)
}
