//! Exporter configuration from environment variables

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Chess.com public API base URL
    pub chesscom_api_base: String,

    /// Lichess API base URL
    pub lichess_api_base: String,

    /// Path to the Stockfish binary
    pub stockfish_path: String,

    /// Fixed search depth per position for engine annotation
    pub search_depth: u32,

    /// Result cap for the Lichess export query
    pub max_games: u32,

    /// Directory for interim and final PGN artifacts
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            chesscom_api_base: env::var("CHESSCOM_API_BASE")
                .unwrap_or_else(|_| "https://api.chess.com".to_string()),
            lichess_api_base: env::var("LICHESS_API_BASE")
                .unwrap_or_else(|_| "https://lichess.org".to_string()),
            stockfish_path: env::var("STOCKFISH_PATH")
                .unwrap_or_else(|_| "stockfish".to_string()),
            search_depth: env::var("SEARCH_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            max_games: env::var("MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}
