//! Account and group membership read models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Linked account with no cache row for the active season
#[derive(Debug, Clone, FromRow)]
pub struct UncachedAccountModel {
    pub id: i64,
    pub external_account_ref: String,
    pub remote_stats_id: String,
    pub created_at: DateTime<Utc>,
}

/// Group member with no cache row, one row per remote id
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberCandidateModel {
    pub remote_stats_id: String,
    pub group_id: i64,
    pub group_tag: Option<String>,
}
