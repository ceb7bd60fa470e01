//! AOE4 World REST client

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use ladder_common::RemoteConfig;
use ladder_core::entities::PlayerStats;
use ladder_core::traits::{RepoResult, StatsSource};
use ladder_core::value_objects::PlayerId;

use crate::error::RemoteError;
use crate::normalize::normalize;
use crate::schema::PlayerResponse;

/// Remote statistics API client
#[derive(Debug, Clone)]
pub struct RemoteStatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteStatsClient {
    /// Create a client with the configured user agent and timeout
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        if config.base_url.trim().is_empty() {
            return Err(RemoteError::Config("base_url is empty".into()));
        }
        if config.user_agent.trim().is_empty() {
            return Err(RemoteError::Config("user_agent is empty".into()));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// URL of one player's record
    pub(crate) fn player_url(&self, player_id: &PlayerId) -> String {
        format!("{}/players/{}", self.base_url, player_id)
    }

    /// Check HTTP response status, returning error for non-success codes
    fn check_status(resp: &reqwest::Response) -> Result<(), RemoteError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Reject anything that does not claim to be JSON
    fn check_content_type(resp: &reqwest::Response) -> Result<(), RemoteError> {
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let essence = content_type.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json") {
            Ok(())
        } else {
            Err(RemoteError::ContentType(content_type.to_string()))
        }
    }

    /// Fetch and normalize one player's record
    #[instrument(skip(self), fields(player_id = %player_id))]
    pub async fn fetch(&self, player_id: &PlayerId) -> Result<PlayerStats, RemoteError> {
        let resp = self.http.get(self.player_url(player_id)).send().await?;
        Self::check_status(&resp)?;
        Self::check_content_type(&resp)?;

        let body = resp.bytes().await?;
        let decoded: PlayerResponse = serde_json::from_slice(&body)?;
        let stats = normalize(decoded)?;

        debug!(name = %stats.name, solo_rating = stats.solo.rating, "Fetched player stats");
        Ok(stats)
    }
}

#[async_trait]
impl StatsSource for RemoteStatsClient {
    async fn fetch_player_stats(&self, player_id: &PlayerId) -> RepoResult<PlayerStats> {
        self.fetch(player_id).await.map_err(Into::into)
    }
}
