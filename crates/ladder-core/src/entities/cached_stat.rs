//! Cached player stat entity - the one table the sync pipeline owns

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::entities::PlayerStats;
use crate::value_objects::{PlayerId, RankTier, SeasonId};

/// Rows older than this are due for a resync
pub const STALENESS_WINDOW: Duration = Duration::from_secs(2 * 60 * 60);

/// Rows younger than this count as fresh in health reports
pub const FRESH_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Subtract a std duration from `now`, saturating at the earliest representable time
pub fn window_cutoff(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(window)
        .ok()
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// One player's cached statistics for one season
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedPlayerStat {
    pub player_id: PlayerId,
    pub season: SeasonId,
    pub display_name: String,
    pub solo_rating: Option<i32>,
    pub solo_elo: Option<i32>,
    pub solo_wins: i32,
    pub solo_matches: i32,
    pub team_rating: Option<i32>,
    pub team_wins: i32,
    pub team_matches: i32,
    pub tier: RankTier,
    pub avatar_url: Option<String>,
    pub group_tag: Option<String>,
    pub region: Option<String>,
    pub faction: Option<String>,
    pub last_solo_match_at: Option<DateTime<Utc>>,
    pub last_team_match_at: Option<DateTime<Utc>>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl CachedPlayerStat {
    /// Build the row a successful sync writes. The tier is always derived from
    /// the solo rating here, never taken from elsewhere.
    pub fn from_stats(
        player_id: PlayerId,
        season: SeasonId,
        stats: &PlayerStats,
        refreshed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player_id,
            season,
            display_name: stats.name.clone(),
            solo_rating: Some(stats.solo.rating),
            solo_elo: stats.solo_elo,
            solo_wins: stats.solo.wins,
            solo_matches: stats.solo.matches,
            team_rating: Some(stats.team.rating),
            team_wins: stats.team.wins,
            team_matches: stats.team.matches,
            tier: RankTier::from_rating(stats.solo.rating),
            avatar_url: stats.avatar_url.clone(),
            group_tag: stats.group_tag.clone(),
            region: stats.region.clone(),
            faction: stats.faction.clone(),
            last_solo_match_at: stats.solo.last_match_at,
            last_team_match_at: stats.team.last_match_at,
            refreshed_at: Some(refreshed_at),
        }
    }

    /// Apply this incoming row over a previously stored one.
    ///
    /// Last write wins for every field except the avatar, which keeps the
    /// stored value when the incoming one is missing.
    pub fn merged_over(mut self, previous: &CachedPlayerStat) -> Self {
        if self.avatar_url.is_none() {
            self.avatar_url.clone_from(&previous.avatar_url);
        }
        self
    }

    /// ELO present but identical to the solo rating
    #[inline]
    pub fn has_elo_anomaly(&self) -> bool {
        matches!((self.solo_elo, self.solo_rating), (Some(elo), Some(rating)) if elo == rating)
    }

    #[inline]
    pub fn is_missing_elo(&self) -> bool {
        matches!(self.solo_elo, None | Some(0))
    }

    /// Seconds since the last refresh, if it was ever refreshed
    pub fn age_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.refreshed_at.map(|at| (now - at).num_seconds())
    }

    /// Why this row should be resynced, or `None` if it is fresh and complete.
    ///
    /// Mirrors the stale-row query: the first matching class in priority
    /// order is reported.
    pub fn stale_reason(&self, now: DateTime<Utc>, window: Duration) -> Option<StaleReason> {
        let Some(refreshed_at) = self.refreshed_at else {
            return Some(StaleReason::NeverRefreshed);
        };
        if self.is_missing_elo() {
            return Some(StaleReason::MissingElo);
        }
        if self.has_elo_anomaly() {
            return Some(StaleReason::EloMatchesRating);
        }
        if self.avatar_url.is_none() {
            return Some(StaleReason::MissingAvatar);
        }
        if self.group_tag.is_none() {
            return Some(StaleReason::MissingGroupTag);
        }

        let expired = refreshed_at < window_cutoff(now, window);
        let incomplete = matches!(self.solo_rating, None | Some(0))
            || self.team_rating.is_none()
            || self.region.is_none()
            || self.faction.is_none()
            || self.last_solo_match_at.is_none()
            || self.last_team_match_at.is_none();

        (expired || incomplete).then_some(StaleReason::Incomplete)
    }
}

/// Priority class of a stale row, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleReason {
    NeverRefreshed,
    MissingElo,
    EloMatchesRating,
    MissingAvatar,
    MissingGroupTag,
    /// Expired or missing some other field
    Incomplete,
}

impl StaleReason {
    /// Sort key used by the stale-row query (1 = most urgent)
    pub fn priority(self) -> i32 {
        match self {
            Self::NeverRefreshed => 1,
            Self::MissingElo => 2,
            Self::EloMatchesRating => 3,
            Self::MissingAvatar => 4,
            Self::MissingGroupTag => 5,
            Self::Incomplete => 6,
        }
    }

    /// Inverse of [`StaleReason::priority`]; unknown values fold into `Incomplete`
    pub fn from_priority(priority: i32) -> Self {
        match priority {
            1 => Self::NeverRefreshed,
            2 => Self::MissingElo,
            3 => Self::EloMatchesRating,
            4 => Self::MissingAvatar,
            5 => Self::MissingGroupTag,
            _ => Self::Incomplete,
        }
    }
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NeverRefreshed => "never_refreshed",
            Self::MissingElo => "missing_elo",
            Self::EloMatchesRating => "elo_matches_rating",
            Self::MissingAvatar => "missing_avatar",
            Self::MissingGroupTag => "missing_group_tag",
            Self::Incomplete => "incomplete",
        };
        f.write_str(s)
    }
}

/// Which rating a leaderboard ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMode {
    #[default]
    Solo,
    Team,
}

impl FromStr for LeaderboardMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" | "1v1" => Ok(Self::Solo),
            "team" => Ok(Self::Team),
            other => Err(format!("unknown leaderboard mode: {other}")),
        }
    }
}

impl fmt::Display for LeaderboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solo => f.write_str("solo"),
            Self::Team => f.write_str("team"),
        }
    }
}

/// Freshness and completeness figures over one season of the cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheHealth {
    pub total: i64,
    pub fresh: i64,
    pub needs_refresh: i64,
    pub missing_elo: i64,
    pub anomalous_elo: i64,
    pub missing_avatar: i64,
    pub missing_group_tag: i64,
    pub avg_age_seconds: f64,
    pub health_percent: f64,
}

impl CacheHealth {
    /// Share of rows that do not need a refresh, rounded to one decimal.
    /// An empty cache reports 100.
    pub fn health_percent(total: i64, needs_refresh: i64) -> f64 {
        if total <= 0 {
            return 100.0;
        }
        let healthy = (total - needs_refresh).max(0) as f64;
        (healthy / total as f64 * 1000.0).round() / 10.0
    }

    /// Aggregate in memory; matches the health query row for row
    pub fn from_rows<'a, I>(rows: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a CachedPlayerStat>,
    {
        let fresh_cutoff = window_cutoff(now, FRESH_WINDOW);
        let stale_cutoff = window_cutoff(now, STALENESS_WINDOW);

        let mut health = Self::default();
        let mut age_sum = 0.0;
        let mut aged = 0_i64;

        for row in rows {
            health.total += 1;
            match row.refreshed_at {
                Some(at) => {
                    if at >= fresh_cutoff {
                        health.fresh += 1;
                    }
                    if at < stale_cutoff {
                        health.needs_refresh += 1;
                    }
                    age_sum += (now - at).num_milliseconds() as f64 / 1000.0;
                    aged += 1;
                }
                None => health.needs_refresh += 1,
            }
            if row.is_missing_elo() {
                health.missing_elo += 1;
            }
            if row.has_elo_anomaly() {
                health.anomalous_elo += 1;
            }
            if row.avatar_url.is_none() {
                health.missing_avatar += 1;
            }
            if row.group_tag.is_none() {
                health.missing_group_tag += 1;
            }
        }

        if aged > 0 {
            health.avg_age_seconds = age_sum / aged as f64;
        }
        health.health_percent = Self::health_percent(health.total, health.needs_refresh);
        health
    }
}
