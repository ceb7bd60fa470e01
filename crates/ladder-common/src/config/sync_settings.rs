//! Runtime-mutable sync settings
//!
//! The scheduler takes a [`SyncSettings`] snapshot at the start of every
//! cycle; the control surface mutates the shared copy through
//! [`SharedSyncSettings::update`]. A cycle in flight never observes a change.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Scheduler knobs that can change while the service runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    pub enabled: bool,
    /// Sleep between the end of one cycle and the start of the next
    pub interval_secs: u64,
    /// Batch truncation per phase
    pub max_items: usize,
    /// Pause between two consecutive remote fetches
    pub item_delay_ms: u64,
    /// Page size of the stale-row selector
    pub stale_batch_size: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 1800,
            max_items: 50,
            item_delay_ms: 1500,
            stale_batch_size: 10,
        }
    }
}

impl SyncSettings {
    pub const MAX_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;
    pub const MAX_ITEMS: usize = 1000;
    pub const MAX_ITEM_DELAY_MS: u64 = 60_000;

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[inline]
    pub fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay_ms)
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.interval_secs == 0 || self.interval_secs > Self::MAX_INTERVAL_SECS {
            return Err(SettingsError::OutOfRange {
                field: "interval_secs",
                min: 1,
                max: Self::MAX_INTERVAL_SECS,
            });
        }
        if self.max_items == 0 || self.max_items > Self::MAX_ITEMS {
            return Err(SettingsError::OutOfRange {
                field: "max_items",
                min: 1,
                max: Self::MAX_ITEMS as u64,
            });
        }
        if self.item_delay_ms > Self::MAX_ITEM_DELAY_MS {
            return Err(SettingsError::OutOfRange {
                field: "item_delay_ms",
                min: 0,
                max: Self::MAX_ITEM_DELAY_MS,
            });
        }
        if self.stale_batch_size == 0 || self.stale_batch_size > Self::MAX_ITEMS {
            return Err(SettingsError::OutOfRange {
                field: "stale_batch_size",
                min: 1,
                max: Self::MAX_ITEMS as u64,
            });
        }
        Ok(())
    }

    /// Return a copy with every present patch field applied
    pub fn patched(&self, patch: &SyncSettingsPatch) -> Self {
        Self {
            enabled: patch.enabled.unwrap_or(self.enabled),
            interval_secs: patch.interval_secs.unwrap_or(self.interval_secs),
            max_items: patch.max_items.unwrap_or(self.max_items),
            item_delay_ms: patch.item_delay_ms.unwrap_or(self.item_delay_ms),
            stale_batch_size: patch.stale_batch_size.unwrap_or(self.stale_batch_size),
        }
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettingsPatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub interval_secs: Option<u64>,
    #[serde(default)]
    pub max_items: Option<usize>,
    #[serde(default)]
    pub item_delay_ms: Option<u64>,
    #[serde(default)]
    pub stale_batch_size: Option<usize>,
}

impl SyncSettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.interval_secs.is_none()
            && self.max_items.is_none()
            && self.item_delay_ms.is_none()
            && self.stale_batch_size.is_none()
    }
}

/// Settings errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
}

/// Thread-safe handle to the live settings
#[derive(Debug, Clone, Default)]
pub struct SharedSyncSettings {
    inner: Arc<RwLock<SyncSettings>>,
}

impl SharedSyncSettings {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Clone of the current settings
    pub fn snapshot(&self) -> SyncSettings {
        self.inner.read().clone()
    }

    /// Validate and apply a patch atomically. On error nothing changes.
    pub fn update(&self, patch: &SyncSettingsPatch) -> Result<SyncSettings, SettingsError> {
        let mut guard = self.inner.write();
        let next = guard.patched(patch);
        next.validate()?;
        *guard = next.clone();
        Ok(next)
    }

    /// Flip the enabled flag without touching anything else
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.write().enabled = enabled;
    }
}
