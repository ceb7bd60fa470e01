//! Sync candidates - a player id plus why it was selected

use serde::Serialize;

use crate::entities::StaleReason;
use crate::value_objects::PlayerId;

/// Where a candidate came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSource {
    /// Recently registered account with no cache row yet
    NewAccount { account_id: i64, external_ref: String },
    /// Group member with no cache row yet
    GroupMember {
        group_id: i64,
        group_tag: Option<String>,
    },
    /// Existing cache row that needs a refresh
    Stale { reason: StaleReason },
}

/// A player the batch runner should sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub player_id: PlayerId,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new_account(player_id: PlayerId, account_id: i64, external_ref: impl Into<String>) -> Self {
        Self {
            player_id,
            source: CandidateSource::NewAccount {
                account_id,
                external_ref: external_ref.into(),
            },
        }
    }

    pub fn group_member(player_id: PlayerId, group_id: i64, group_tag: Option<String>) -> Self {
        Self {
            player_id,
            source: CandidateSource::GroupMember {
                group_id,
                group_tag,
            },
        }
    }

    pub fn stale(player_id: PlayerId, reason: StaleReason) -> Self {
        Self {
            player_id,
            source: CandidateSource::Stale { reason },
        }
    }

    /// Group tag known at selection time, used when the remote record has none
    pub fn known_group_tag(&self) -> Option<&str> {
        match &self.source {
            CandidateSource::GroupMember { group_tag, .. } => group_tag.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_group_tag_only_for_members() {
        let id = PlayerId::parse("7").unwrap();
        let member = Candidate::group_member(id.clone(), 3, Some("ABC".to_string()));
        assert_eq!(member.known_group_tag(), Some("ABC"));

        let stale = Candidate::stale(id, StaleReason::MissingAvatar);
        assert_eq!(stale.known_group_tag(), None);
    }

    #[test]
    fn test_source_serializes_with_kind() {
        let c = Candidate::stale(PlayerId::parse("7").unwrap(), StaleReason::MissingElo);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["player_id"], "7");
        assert_eq!(json["source"]["kind"], "stale");
        assert_eq!(json["source"]["reason"], "missing_elo");
    }
}
