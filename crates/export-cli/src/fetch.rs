//! Fetch pipelines: one per platform, each ending in a persisted PGN
//! artifact and a game count.

use std::io::{BufReader, Cursor};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::archives::select_archives;
use crate::clients::chess_com::ChessComClient;
use crate::clients::lichess::LichessClient;
use crate::config::Config;
use crate::error::ExportError;
use crate::period::TimeInterval;

pub struct FetchOutcome {
    /// Interim artifact holding the fetched games.
    pub path: PathBuf,
    /// Running total across all fetched chunks.
    pub total_games: u64,
}

/// Chess.com path: archive index → overlap selection → per-month fetch,
/// merged into one raw PGN artifact. A failed archive is logged and
/// skipped; the run proceeds with whatever months succeeded.
pub async fn fetch_chesscom(
    config: &Config,
    username: &str,
    interval: &TimeInterval,
) -> Result<FetchOutcome, ExportError> {
    let client = ChessComClient::new(config);
    let buckets = client.fetch_archives(username).await?;
    let selected = select_archives(buckets, interval);
    info!(archives = selected.len(), "Selected monthly archives");

    let mut raw_pgn = String::new();
    let mut total_games = 0u64;

    for bucket in &selected {
        info!(year = bucket.year, month = bucket.month, "Fetching archive");
        match client.fetch_archive_pgn(username, bucket).await {
            Ok(text) => {
                // Count on a fresh cursor over just this chunk so earlier
                // archives are never re-counted
                let games = pgn_core::count_games(Cursor::new(text.as_bytes()))?;
                info!(games, "Archive fetched");
                raw_pgn.push_str(&text);
                raw_pgn.push_str("\n\n");
                total_games += games;
            }
            Err(e) => {
                warn!(
                    year = bucket.year,
                    month = bucket.month,
                    error = %e,
                    "Skipping archive"
                );
            }
        }
    }

    let path = config.output_dir.join("raw.pgn");
    tokio::fs::write(&path, &raw_pgn).await?;

    Ok(FetchOutcome { path, total_games })
}

/// Lichess path: one export query streamed to disk, then a second pass
/// over the persisted file to count what actually arrived.
pub async fn fetch_lichess(
    config: &Config,
    username: &str,
    interval: &TimeInterval,
    with_evals: bool,
) -> Result<FetchOutcome, ExportError> {
    let client = LichessClient::new(config);
    let path = config
        .output_dir
        .join(if with_evals { "eval.pgn" } else { "raw.pgn" });

    info!(username, "Exporting games from Lichess");
    client
        .export_games(username, interval, with_evals, &path)
        .await?;

    let file = std::fs::File::open(&path)?;
    let total_games = pgn_core::count_games(BufReader::new(file))?;
    info!(total_games, "Lichess export complete");

    Ok(FetchOutcome { path, total_games })
}
