//! Command-line surface

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Chess.com monthly archives
    #[value(name = "chess.com")]
    ChessCom,
    /// Lichess export API
    Lichess,
}

/// Fetch a player's game history into a single PGN file.
#[derive(Debug, Parser)]
#[command(name = "chess-export", version, about)]
pub struct Args {
    /// Platform to fetch games from
    #[arg(long, value_enum)]
    pub platform: Platform,

    /// Player username on that platform
    #[arg(long)]
    pub username: String,

    /// Time period: "all", "last_<N>" (days, e.g. last_30), or
    /// "YYYY-MM-DD..YYYY-MM-DD"
    #[arg(long)]
    pub period: String,

    /// Annotate every position with an engine evaluation
    #[arg(long)]
    pub need_analysis: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::parse_from([
            "chess-export",
            "--platform",
            "chess.com",
            "--username",
            "magnus",
            "--period",
            "last_30",
        ]);
        assert_eq!(args.platform, Platform::ChessCom);
        assert_eq!(args.username, "magnus");
        assert_eq!(args.period, "last_30");
        assert!(!args.need_analysis);
    }

    #[test]
    fn test_parse_lichess_with_analysis() {
        let args = Args::parse_from([
            "chess-export",
            "--platform",
            "lichess",
            "--username",
            "drnykterstein",
            "--period",
            "all",
            "--need-analysis",
        ]);
        assert_eq!(args.platform, Platform::Lichess);
        assert!(args.need_analysis);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let result = Args::try_parse_from([
            "chess-export",
            "--platform",
            "fics",
            "--username",
            "x",
            "--period",
            "all",
        ]);
        assert!(result.is_err());
    }
}
