//! Typed partial schema of a player record
//!
//! Only the fields the cache needs are declared; everything is optional so a
//! sparse record decodes and normalization decides the defaults.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// `GET /players/{id}` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerResponse {
    #[serde(default)]
    pub name: Option<String>,
    /// Unranked modes come back as `null` entries
    #[serde(default)]
    pub modes: Option<HashMap<String, Option<ModeResponse>>>,
    #[serde(default)]
    pub avatars: Option<AvatarsResponse>,
    #[serde(default)]
    pub clan: Option<ClanResponse>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub main_civilization: Option<String>,
}

/// One entry of the `modes` map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModeResponse {
    /// Some modes report fractional ratings
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub wins_count: Option<i32>,
    #[serde(default)]
    pub games_count: Option<i32>,
    #[serde(default)]
    pub last_game_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvatarsResponse {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClanResponse {
    #[serde(default)]
    pub tag: Option<String>,
}
