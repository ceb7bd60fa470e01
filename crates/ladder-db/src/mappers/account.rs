//! Account read models -> sync candidates

use ladder_core::entities::Candidate;
use ladder_core::value_objects::PlayerId;

use crate::models::{GroupMemberCandidateModel, UncachedAccountModel};

/// Convert an uncached account row, dropping ids that fail validation
pub fn account_candidate(model: UncachedAccountModel) -> Option<Candidate> {
    let player_id = PlayerId::parse(&model.remote_stats_id).ok()?;
    Some(Candidate::new_account(
        player_id,
        model.id,
        model.external_account_ref,
    ))
}

/// Convert an uncached group member row, dropping ids that fail validation
pub fn group_member_candidate(model: GroupMemberCandidateModel) -> Option<Candidate> {
    let player_id = PlayerId::parse(&model.remote_stats_id).ok()?;
    Some(Candidate::group_member(
        player_id,
        model.group_id,
        model.group_tag.filter(|tag| !tag.trim().is_empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_placeholder_account_is_dropped() {
        let model = UncachedAccountModel {
            id: 1,
            external_account_ref: "discord:1".to_string(),
            remote_stats_id: "temp_99".to_string(),
            created_at: Utc::now(),
        };
        assert!(account_candidate(model).is_none());
    }

    #[test]
    fn test_blank_group_tag_is_none() {
        let candidate = group_member_candidate(GroupMemberCandidateModel {
            remote_stats_id: "55".to_string(),
            group_id: 2,
            group_tag: Some("  ".to_string()),
        })
        .unwrap();
        assert_eq!(candidate.known_group_tag(), None);
    }
}
