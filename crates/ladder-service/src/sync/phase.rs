//! Sync phases, in the order a cycle runs them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// Recently registered accounts never cached
    NewAccounts,
    /// Group members never cached
    GroupMembers,
    /// Cached rows that are stale or incomplete
    StaleRows,
}

impl SyncPhase {
    /// Every phase in cycle order
    pub const ALL: [SyncPhase; 3] = [Self::NewAccounts, Self::GroupMembers, Self::StaleRows];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewAccounts => "new-accounts",
            Self::GroupMembers => "group-members",
            Self::StaleRows => "stale",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a phase name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPhaseParseError(pub String);

impl fmt::Display for SyncPhaseParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sync phase '{}' (expected new-accounts, group-members or stale)",
            self.0
        )
    }
}

impl std::error::Error for SyncPhaseParseError {}

impl FromStr for SyncPhase {
    type Err = SyncPhaseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "new-accounts" => Ok(Self::NewAccounts),
            "group-members" => Ok(Self::GroupMembers),
            "stale" | "stale-rows" => Ok(Self::StaleRows),
            _ => Err(SyncPhaseParseError(s.to_string())),
        }
    }
}
