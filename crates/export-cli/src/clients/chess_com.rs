use reqwest::Client;
use serde_json::Value;

use crate::archives::ArchiveBucket;
use crate::config::Config;
use crate::error::ExportError;

pub struct ChessComClient {
    client: Client,
    base_url: String,
}

impl ChessComClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            client,
            base_url: config.chesscom_api_base.clone(),
        }
    }

    /// Fetch the player's monthly archive index as (year, month) buckets.
    /// Any failure here is fatal — without the index there is nothing to fetch.
    pub async fn fetch_archives(&self, username: &str) -> Result<Vec<ArchiveBucket>, ExportError> {
        let url = format!("{}/pub/player/{}/games/archives", self.base_url, username);

        // Rate limit
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExportError::ArchiveIndex(format!("request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(ExportError::ArchiveIndex(format!("HTTP {}", resp.status())));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| ExportError::ArchiveIndex(format!("JSON parse error: {e}")))?;

        let buckets = data["archives"]
            .as_array()
            .cloned()
            .unwrap_or_default()
            .iter()
            .filter_map(|v| {
                // URLs look like "https://api.chess.com/pub/player/username/games/2024/03"
                let s = v.as_str()?;
                let parts: Vec<&str> = s.trim_end_matches('/').rsplit('/').collect();
                let month: u32 = parts.first()?.parse().ok()?;
                let year: i32 = parts.get(1)?.parse().ok()?;
                Some(ArchiveBucket::new(year, month))
            })
            .collect();

        Ok(buckets)
    }

    /// Fetch one month's games as raw PGN text. Failures are per-archive
    /// and reported as plain strings so the caller can log and skip.
    pub async fn fetch_archive_pgn(
        &self,
        username: &str,
        bucket: &ArchiveBucket,
    ) -> Result<String, String> {
        let url = format!(
            "{}/pub/player/{}/games/{}/{:02}/pgn",
            self.base_url, username, bucket.year, bucket.month
        );

        // Rate limit
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("request error: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("HTTP {}", resp.status()));
        }

        resp.text().await.map_err(|e| format!("body read error: {e}"))
    }
}
