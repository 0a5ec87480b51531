//! chess-export
//!
//! Pulls a player's game history from Chess.com or Lichess into a single
//! PGN file for a requested time period, optionally annotating every
//! position with a Stockfish evaluation, and reports what the file covers.

mod annotate;
mod archives;
mod cli;
mod clients;
mod config;
mod engine;
mod error;
mod fetch;
mod period;

use std::io::BufReader;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Platform};
use crate::config::Config;
use crate::fetch::FetchOutcome;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    run(&args, &config).await
}

async fn run(args: &Args, config: &Config) -> anyhow::Result<()> {
    // Fatal before any network call
    let interval = period::resolve_period(&args.period, Local::now())?;

    let outcome = match args.platform {
        Platform::ChessCom => {
            let fetched = fetch::fetch_chesscom(config, &args.username, &interval).await?;
            if args.need_analysis {
                // Chess.com PGNs carry no evals; annotate them ourselves
                let path = annotate::annotate_file(config, &fetched.path).await;
                FetchOutcome {
                    path,
                    total_games: fetched.total_games,
                }
            } else {
                fetched
            }
        }
        Platform::Lichess => {
            // Lichess embeds evals server-side when asked
            fetch::fetch_lichess(config, &args.username, &interval, args.need_analysis).await?
        }
    };

    let final_path = config
        .output_dir
        .join(final_filename(&args.username, &args.period, args.need_analysis));
    std::fs::rename(&outcome.path, &final_path)?;

    let file = std::fs::File::open(&final_path)?;
    let (earliest, latest) = pgn_core::date_coverage(pgn_core::GameReader::new(BufReader::new(file)))
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to scan date coverage");
            (None, None)
        });

    println!("\nSummary:");
    println!("Total games pulled: {}", outcome.total_games);
    println!(
        "Date range covered: {} .. {}",
        format_date(earliest),
        format_date(latest)
    );
    println!("Saved to {}", std::fs::canonicalize(&final_path)?.display());

    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Final artifact name: identity, filesystem-safe period tag, analysis mode.
fn final_filename(username: &str, period: &str, need_analysis: bool) -> String {
    let period_tag = period.replace("..", "_to_");
    let mode = if need_analysis { "eval" } else { "raw" };
    format!("{username}_{period_tag}_{mode}.pgn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_filename_last_n_raw() {
        assert_eq!(
            final_filename("magnus", "last_30", false),
            "magnus_last_30_raw.pgn"
        );
    }

    #[test]
    fn test_final_filename_range_eval() {
        assert_eq!(
            final_filename("magnus", "2024-01-01..2024-01-31", true),
            "magnus_2024-01-01_to_2024-01-31_eval.pgn"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2024, 1, 5)), "2024-01-05");
        assert_eq!(format_date(None), "unknown");
    }
}
