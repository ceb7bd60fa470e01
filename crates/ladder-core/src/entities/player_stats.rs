//! Normalized player statistics as produced by the remote stats client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-mode figures; an absent mode is all zeroes with no last match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStats {
    pub rating: i32,
    pub wins: i32,
    pub matches: i32,
    pub last_match_at: Option<DateTime<Utc>>,
}

impl ModeStats {
    /// Whether the player has any recorded games in this mode
    #[inline]
    pub fn has_games(&self) -> bool {
        self.matches > 0
    }

    /// Losses derived from matches and wins (never negative)
    #[inline]
    pub fn losses(&self) -> i32 {
        (self.matches - self.wins).max(0)
    }
}

/// One player's statistics, independent of the remote wire format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub solo: ModeStats,
    /// Hidden 1v1 ELO, when the remote API reports one
    pub solo_elo: Option<i32>,
    pub team: ModeStats,
    pub avatar_url: Option<String>,
    pub group_tag: Option<String>,
    pub region: Option<String>,
    pub faction: Option<String>,
}

impl PlayerStats {
    /// Create stats with just a display name and empty modes
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_are_zeroed() {
        let stats = PlayerStats::named("Foo");
        assert_eq!(stats.solo, ModeStats::default());
        assert_eq!(stats.solo.rating, 0);
        assert!(stats.solo.last_match_at.is_none());
        assert!(!stats.team.has_games());
    }

    #[test]
    fn test_losses() {
        let mode = ModeStats {
            rating: 1000,
            wins: 12,
            matches: 20,
            last_match_at: None,
        };
        assert_eq!(mode.losses(), 8);

        let broken = ModeStats {
            wins: 5,
            matches: 3,
            ..Default::default()
        };
        assert_eq!(broken.losses(), 0);
    }
}
