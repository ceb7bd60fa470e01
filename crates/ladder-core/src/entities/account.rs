//! Account and group entities - read-only inputs to the sync pipeline

use chrono::{DateTime, Utc};

use crate::value_objects::PlayerId;

/// A registered site account, optionally linked to a remote statistics player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAccount {
    pub id: i64,
    /// Opaque reference from the identity provider
    pub external_account_ref: String,
    /// Raw remote-stats id as stored; may be missing or a placeholder
    pub remote_stats_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PlayerAccount {
    /// The linked player id, if present and usable
    pub fn player_id(&self) -> Option<PlayerId> {
        self.remote_stats_id
            .as_deref()
            .and_then(|raw| PlayerId::parse(raw).ok())
    }

    /// Whether the account can be synced at all
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.player_id().is_some()
    }
}

/// A named group of players (a clan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub tag: Option<String>,
}

/// Membership of an account in a group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupMembership {
    pub group_id: i64,
    pub external_account_ref: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(remote: Option<&str>) -> PlayerAccount {
        PlayerAccount {
            id: 1,
            external_account_ref: "discord:1".to_string(),
            remote_stats_id: remote.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_linked_account() {
        let acc = account(Some("123"));
        assert!(acc.is_linked());
        assert_eq!(acc.player_id().unwrap().as_str(), "123");
    }

    #[test]
    fn test_unlinked_accounts() {
        assert!(!account(None).is_linked());
        assert!(!account(Some("")).is_linked());
        assert!(!account(Some("temp_99")).is_linked());
    }
}
