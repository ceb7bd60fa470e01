//! In-memory implementations of the ports for tests that run without
//! PostgreSQL or the remote API. Enabled by the `test-utils` feature.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::entities::{
    CacheHealth, CachedPlayerStat, Candidate, LeaderboardMode, ModeStats, PlayerStats,
};
use crate::error::DomainError;
use crate::traits::{
    AccountRepository, LeaderboardPage, PlayerCacheRepository, RepoResult, StatsSource,
};
use crate::value_objects::{PlayerId, SeasonId};

/// Remote stats with every field the stale selector checks filled in
pub fn complete_stats(name: &str, rating: i32) -> PlayerStats {
    PlayerStats {
        name: name.to_string(),
        solo: ModeStats {
            rating,
            wins: 12,
            matches: 20,
            last_match_at: Some(Utc::now()),
        },
        solo_elo: Some(rating + 75),
        team: ModeStats {
            rating: 1050,
            wins: 4,
            matches: 9,
            last_match_at: Some(Utc::now()),
        },
        avatar_url: Some(format!("https://cdn.example/{name}.png")),
        group_tag: Some("ABC".to_string()),
        region: Some("eu".to_string()),
        faction: Some("french".to_string()),
    }
}

// ============================================================================
// Player cache
// ============================================================================

/// Player cache keyed by (player, season), upserts merge like the SQL does
#[derive(Default)]
pub struct InMemoryCache {
    rows: Mutex<HashMap<(PlayerId, SeasonId), CachedPlayerStat>>,
    fail_upsert_for: Mutex<HashSet<String>>,
    fail_stale_selector: AtomicBool,
}

impl InMemoryCache {
    pub fn insert(&self, row: CachedPlayerStat) {
        self.rows
            .lock()
            .insert((row.player_id.clone(), row.season), row);
    }

    pub fn get(&self, player_id: &str, season: SeasonId) -> Option<CachedPlayerStat> {
        let player_id = PlayerId::parse(player_id).ok()?;
        self.rows.lock().get(&(player_id, season)).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    pub fn contains(&self, player_id: &PlayerId, season: SeasonId) -> bool {
        self.rows
            .lock()
            .contains_key(&(player_id.clone(), season))
    }

    pub fn fail_upsert_for(&self, player_id: &str) {
        self.fail_upsert_for.lock().insert(player_id.to_string());
    }

    pub fn fail_stale_selector(&self) {
        self.fail_stale_selector.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlayerCacheRepository for InMemoryCache {
    async fn upsert(&self, stat: &CachedPlayerStat) -> RepoResult<CachedPlayerStat> {
        if self.fail_upsert_for.lock().contains(stat.player_id.as_str()) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }

        let mut rows = self.rows.lock();
        let key = (stat.player_id.clone(), stat.season);
        let mut incoming = stat.clone();
        incoming.refreshed_at = Some(Utc::now());
        let stored = match rows.get(&key) {
            Some(previous) => incoming.merged_over(previous),
            None => incoming,
        };
        rows.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        player_id: &PlayerId,
        season: SeasonId,
    ) -> RepoResult<Option<CachedPlayerStat>> {
        Ok(self.rows.lock().get(&(player_id.clone(), season)).cloned())
    }

    async fn find_stale(
        &self,
        season: SeasonId,
        stale_before: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        if self.fail_stale_selector.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("stale query failed".to_string()));
        }

        let rows = self.rows.lock();
        let mut stale: Vec<_> = rows
            .values()
            .filter(|row| row.season == season)
            .filter_map(|row| {
                row.stale_reason(stale_before, Duration::ZERO)
                    .map(|reason| (reason, row.refreshed_at, row.player_id.clone()))
            })
            .collect();
        stale.sort_by(|a, b| (a.0.priority(), a.1, &a.2).cmp(&(b.0.priority(), b.1, &b.2)));

        Ok(stale
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|(reason, _, player_id)| Candidate::stale(player_id, reason))
            .collect())
    }

    async fn health_snapshot(&self, season: SeasonId) -> RepoResult<CacheHealth> {
        let rows = self.rows.lock();
        Ok(CacheHealth::from_rows(
            rows.values().filter(|row| row.season == season),
            Utc::now(),
        ))
    }

    async fn leaderboard(
        &self,
        season: SeasonId,
        mode: LeaderboardMode,
        limit: i64,
        offset: i64,
    ) -> RepoResult<LeaderboardPage> {
        let key = |row: &CachedPlayerStat| match mode {
            LeaderboardMode::Solo => (row.solo_rating, row.solo_matches, row.solo_wins),
            LeaderboardMode::Team => (row.team_rating, row.team_matches, row.team_wins),
        };

        let rows = self.rows.lock();
        let mut ranked: Vec<CachedPlayerStat> = rows
            .values()
            .filter(|row| row.season == season)
            .filter(|row| {
                let (rating, matches, _) = key(row);
                rating.is_some() && matches > 0
            })
            .cloned()
            .collect();
        ranked.sort_by(|a, b| {
            let (ra, _, wa) = key(a);
            let (rb, _, wb) = key(b);
            (rb, wb).cmp(&(ra, wa)).then_with(|| a.player_id.cmp(&b.player_id))
        });

        let total = ranked.len() as i64;
        let rows = ranked
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect();
        Ok(LeaderboardPage { rows, total })
    }
}

// ============================================================================
// Accounts and groups
// ============================================================================

struct LinkedAccount {
    id: i64,
    remote_id: String,
    created_at: DateTime<Utc>,
}

struct Membership {
    group_id: i64,
    remote_id: String,
    tag: Option<String>,
}

/// Linked accounts and group memberships; "uncached" is answered by the
/// cache this was built over
pub struct InMemoryAccounts {
    cache: Arc<InMemoryCache>,
    accounts: Mutex<Vec<LinkedAccount>>,
    memberships: Mutex<Vec<Membership>>,
    fail_group_selector: AtomicBool,
    fail_group_tag_lookup: AtomicBool,
    group_selector_calls: AtomicUsize,
}

impl InMemoryAccounts {
    pub fn new(cache: Arc<InMemoryCache>) -> Self {
        Self {
            cache,
            accounts: Mutex::new(Vec::new()),
            memberships: Mutex::new(Vec::new()),
            fail_group_selector: AtomicBool::new(false),
            fail_group_tag_lookup: AtomicBool::new(false),
            group_selector_calls: AtomicUsize::new(0),
        }
    }

    /// Accounts added earlier are reported as newer
    pub fn add_account(&self, remote_id: &str) {
        let mut accounts = self.accounts.lock();
        let id = accounts.len() as i64 + 1;
        accounts.push(LinkedAccount {
            id,
            remote_id: remote_id.to_string(),
            created_at: Utc::now() - chrono::Duration::minutes(id),
        });
    }

    pub fn add_member(&self, group_id: i64, remote_id: &str, tag: Option<&str>) {
        self.memberships.lock().push(Membership {
            group_id,
            remote_id: remote_id.to_string(),
            tag: tag.map(str::to_string),
        });
    }

    pub fn fail_group_selector(&self) {
        self.fail_group_selector.store(true, Ordering::SeqCst);
    }

    pub fn fail_group_tag_lookup(&self) {
        self.fail_group_tag_lookup.store(true, Ordering::SeqCst);
    }

    pub fn group_selector_calls(&self) -> usize {
        self.group_selector_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_uncached_recent(
        &self,
        season: SeasonId,
        since: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Candidate>> {
        let accounts = self.accounts.lock();
        let mut recent: Vec<&LinkedAccount> = accounts
            .iter()
            .filter(|a| a.created_at >= since)
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(recent
            .into_iter()
            .filter_map(|a| {
                let player_id = PlayerId::parse(&a.remote_id).ok()?;
                (!self.cache.contains(&player_id, season))
                    .then(|| Candidate::new_account(player_id, a.id, format!("ext-{}", a.id)))
            })
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn find_uncached_group_members(&self, season: SeasonId) -> RepoResult<Vec<Candidate>> {
        self.group_selector_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_group_selector.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("group query failed".to_string()));
        }

        let memberships = self.memberships.lock();
        let mut seen = HashSet::new();
        Ok(memberships
            .iter()
            .filter_map(|m| {
                let player_id = PlayerId::parse(&m.remote_id).ok()?;
                if self.cache.contains(&player_id, season) || !seen.insert(player_id.clone()) {
                    return None;
                }
                Some(Candidate::group_member(player_id, m.group_id, m.tag.clone()))
            })
            .collect())
    }

    async fn group_tag_for(&self, player_id: &PlayerId) -> RepoResult<Option<String>> {
        if self.fail_group_tag_lookup.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("tag lookup failed".to_string()));
        }

        Ok(self
            .memberships
            .lock()
            .iter()
            .filter(|m| m.remote_id == player_id.as_str())
            .find_map(|m| m.tag.clone()))
    }
}

// ============================================================================
// Remote stats
// ============================================================================

/// Scripted remote: known players answer, unknown ones 404
#[derive(Default)]
pub struct FakeStatsSource {
    players: Mutex<HashMap<String, PlayerStats>>,
    unavailable: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, Instant)>>,
    latency: Mutex<Duration>,
}

impl FakeStatsSource {
    pub fn add(&self, player_id: &str, stats: PlayerStats) {
        self.players.lock().insert(player_id.to_string(), stats);
    }

    pub fn make_unavailable(&self, player_id: &str) {
        self.unavailable.lock().insert(player_id.to_string());
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    /// Player ids in the order they were fetched
    pub fn fetched(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl StatsSource for FakeStatsSource {
    async fn fetch_player_stats(&self, player_id: &PlayerId) -> RepoResult<PlayerStats> {
        self.calls
            .lock()
            .push((player_id.to_string(), Instant::now()));

        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.unavailable.lock().contains(player_id.as_str()) {
            return Err(DomainError::RemoteUnavailable("connection refused".to_string()));
        }
        self.players
            .lock()
            .get(player_id.as_str())
            .cloned()
            .ok_or(DomainError::RemoteStatus { status: 404 })
    }
}
