//! Season ID - competitive period identifier from the remote statistics API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote-API-defined competitive season
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonId(i32);

impl SeasonId {
    #[inline]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SeasonId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
