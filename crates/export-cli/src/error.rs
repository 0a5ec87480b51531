//! Exporter error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid period format {0:?} (expected \"all\", \"last_<N>\" or \"YYYY-MM-DD..YYYY-MM-DD\")")]
    InvalidPeriod(String),

    #[error("archive index unavailable: {0}")]
    ArchiveIndex(String),

    #[error("game export failed: {0}")]
    QueryFetch(String),

    #[error("engine error: {0}")]
    Engine(String),

    #[error("annotation error: {0}")]
    Annotation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PGN error: {0}")]
    Pgn(#[from] pgn_core::PgnError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
