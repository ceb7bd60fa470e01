//! Cached player stat entity <-> model mapper

use chrono::{DateTime, Utc};

use ladder_core::entities::{CacheHealth, CachedPlayerStat, Candidate, StaleReason};
use ladder_core::error::DomainError;
use ladder_core::value_objects::{PlayerId, RankTier, SeasonId};

use crate::models::{CacheHealthModel, PlayerCacheModel, StaleRowModel};

/// Convert PlayerCacheModel to CachedPlayerStat entity
impl TryFrom<PlayerCacheModel> for CachedPlayerStat {
    type Error = DomainError;

    fn try_from(model: PlayerCacheModel) -> Result<Self, Self::Error> {
        let player_id = PlayerId::parse(&model.player_id)?;
        // A label written by an older classifier is re-derived rather than trusted
        let tier = model
            .tier
            .parse::<RankTier>()
            .unwrap_or_else(|_| RankTier::from_rating(model.solo_rating.unwrap_or(0)));

        Ok(CachedPlayerStat {
            player_id,
            season: SeasonId::new(model.season_id),
            display_name: model.display_name,
            solo_rating: model.solo_rating,
            solo_elo: model.solo_elo,
            solo_wins: model.solo_wins,
            solo_matches: model.solo_matches,
            team_rating: model.team_rating,
            team_wins: model.team_wins,
            team_matches: model.team_matches,
            tier,
            avatar_url: model.avatar_url,
            group_tag: model.group_tag,
            region: model.region,
            faction: model.faction,
            last_solo_match_at: model.last_solo_match_at,
            last_team_match_at: model.last_team_match_at,
            refreshed_at: model.refreshed_at,
        })
    }
}

/// Convert a stale-row result to a candidate, skipping unusable ids
pub fn stale_candidate(model: StaleRowModel) -> Option<Candidate> {
    let player_id = PlayerId::parse(&model.player_id).ok()?;
    Some(Candidate::stale(
        player_id,
        StaleReason::from_priority(model.priority),
    ))
}

/// Convert the health aggregate row, deriving the health percentage
pub fn health_from_model(model: CacheHealthModel) -> CacheHealth {
    CacheHealth {
        total: model.total,
        fresh: model.fresh,
        needs_refresh: model.needs_refresh,
        missing_elo: model.missing_elo,
        anomalous_elo: model.anomalous_elo,
        missing_avatar: model.missing_avatar,
        missing_group_tag: model.missing_group_tag,
        avg_age_seconds: model.avg_age_seconds.unwrap_or(0.0),
        health_percent: CacheHealth::health_percent(model.total, model.needs_refresh),
    }
}

/// Values bound by the upsert statement
pub struct PlayerCacheUpsert<'a> {
    pub player_id: &'a str,
    pub season_id: i32,
    pub display_name: &'a str,
    pub solo_rating: Option<i32>,
    pub solo_elo: Option<i32>,
    pub solo_wins: i32,
    pub solo_matches: i32,
    pub team_rating: Option<i32>,
    pub team_wins: i32,
    pub team_matches: i32,
    pub tier: &'static str,
    pub avatar_url: Option<&'a str>,
    pub group_tag: Option<&'a str>,
    pub region: Option<&'a str>,
    pub faction: Option<&'a str>,
    pub last_solo_match_at: Option<DateTime<Utc>>,
    pub last_team_match_at: Option<DateTime<Utc>>,
}

impl<'a> PlayerCacheUpsert<'a> {
    /// The tier label is recomputed from the solo rating, never copied
    pub fn new(stat: &'a CachedPlayerStat) -> Self {
        Self {
            player_id: stat.player_id.as_str(),
            season_id: stat.season.into_inner(),
            display_name: &stat.display_name,
            solo_rating: stat.solo_rating,
            solo_elo: stat.solo_elo,
            solo_wins: stat.solo_wins,
            solo_matches: stat.solo_matches,
            team_rating: stat.team_rating,
            team_wins: stat.team_wins,
            team_matches: stat.team_matches,
            tier: RankTier::from_rating(stat.solo_rating.unwrap_or(0)).label(),
            avatar_url: stat.avatar_url.as_deref(),
            group_tag: stat.group_tag.as_deref(),
            region: stat.region.as_deref(),
            faction: stat.faction.as_deref(),
            last_solo_match_at: stat.last_solo_match_at,
            last_team_match_at: stat.last_team_match_at,
        }
    }
}
