//! Leaderboard query extractor
//!
//! Offset pagination plus the ranking mode, parsed from the query string.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use ladder_core::entities::LeaderboardMode;
use ladder_service::services::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw query parameters
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Validated leaderboard parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardParams {
    pub mode: LeaderboardMode,
    /// 1-based page number
    pub page: i64,
    /// Page size, clamped to 1-100
    pub limit: i64,
}

impl Default for LeaderboardParams {
    fn default() -> Self {
        Self {
            mode: LeaderboardMode::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TryFrom<LeaderboardQuery> for LeaderboardParams {
    type Error = ApiError;

    fn try_from(query: LeaderboardQuery) -> Result<Self, Self::Error> {
        let mode = query
            .mode
            .as_deref()
            .map(str::parse::<LeaderboardMode>)
            .transpose()
            .map_err(ApiError::invalid_query)?
            .unwrap_or_default();

        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::invalid_query("'page' must be at least 1"));
        }

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        Ok(Self { mode, page, limit })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for LeaderboardParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<LeaderboardQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        LeaderboardParams::try_from(query)
    }
}
