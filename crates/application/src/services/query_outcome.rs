//! Uniform outcome of a facade query

use serde::{Deserialize, Serialize};

/// Either the provider's answer or a single "no result" marker
///
/// Serialises as `{"status":"found","result":...}` or `{"status":"no_result"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum QueryOutcome<T> {
    /// The provider answered
    Found(T),
    /// The provider failed; details were logged, not returned
    NoResult,
}

impl<T> QueryOutcome<T> {
    /// Whether a result is present
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Whether this is the "no result" marker
    #[must_use]
    pub const fn is_no_result(&self) -> bool {
        matches!(self, Self::NoResult)
    }

    /// Convert into an `Option`
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NoResult => None,
        }
    }

    /// Map the found value
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            Self::Found(value) => QueryOutcome::Found(f(value)),
            Self::NoResult => QueryOutcome::NoResult,
        }
    }
}

impl<T> From<Option<T>> for QueryOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NoResult, Self::Found)
    }
}
