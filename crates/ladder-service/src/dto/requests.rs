//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use ladder_common::SyncSettingsPatch;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Sync Requests
// ============================================================================

/// Partial update of the runtime sync settings
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateSyncSettingsRequest {
    pub enabled: Option<bool>,

    #[validate(range(min = 1, max = 604_800, message = "interval_secs must be 1-604800"))]
    pub interval_secs: Option<u64>,

    #[validate(range(min = 1, max = 1000, message = "max_items must be 1-1000"))]
    pub max_items: Option<usize>,

    #[validate(range(max = 60_000, message = "item_delay_ms must be at most 60000"))]
    pub item_delay_ms: Option<u64>,

    #[validate(range(min = 1, max = 1000, message = "stale_batch_size must be 1-1000"))]
    pub stale_batch_size: Option<usize>,
}

impl From<UpdateSyncSettingsRequest> for SyncSettingsPatch {
    fn from(req: UpdateSyncSettingsRequest) -> Self {
        Self {
            enabled: req.enabled,
            interval_secs: req.interval_secs,
            max_items: req.max_items,
            item_delay_ms: req.item_delay_ms,
            stale_batch_size: req.stale_batch_size,
        }
    }
}
