use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::config::Config;
use crate::error::ExportError;
use crate::period::TimeInterval;

pub struct LichessClient {
    client: Client,
    base_url: String,
    max_games: u32,
}

impl LichessClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap();
        Self {
            client,
            base_url: config.lichess_api_base.clone(),
            max_games: config.max_games,
        }
    }

    /// Export a user's games as one PGN byte stream, written chunk by chunk
    /// to `dest`. Exports can run to thousands of games, so the body is
    /// never buffered whole. Any non-success status is fatal for the fetch.
    pub async fn export_games(
        &self,
        username: &str,
        interval: &TimeInterval,
        with_evals: bool,
        dest: &Path,
    ) -> Result<(), ExportError> {
        let url = format!("{}/api/games/user/{}", self.base_url, username);

        let mut params = vec![
            ("max", self.max_games.to_string()),
            ("opening", "true".to_string()),
            ("evals", with_evals.to_string()),
        ];
        if let Some(since) = interval.since {
            params.push(("since", since.to_string()));
        }
        if let Some(until) = interval.until {
            params.push(("until", until.to_string()));
        }

        // Rate limit
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/x-chess-pgn")
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ExportError::QueryFetch(format!("user {username:?} not found")));
        }
        if !resp.status().is_success() {
            return Err(ExportError::QueryFetch(format!("HTTP {}", resp.status())));
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
