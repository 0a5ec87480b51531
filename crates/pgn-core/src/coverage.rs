//! Date coverage scan over a PGN stream.

use std::io::BufRead;

use chrono::NaiveDate;

use crate::reader::{GameReader, PgnError};

/// PGN `Date` headers use dot-separated calendar dates.
const DATE_FORMAT: &str = "%Y.%m.%d";

/// Scan every game and return the earliest and latest `Date` header found.
///
/// Records whose date contains the unknown-field marker (`?`) or fails to
/// parse are skipped. Returns `(None, None)` when no game carries a
/// parseable date.
pub fn date_coverage<R: BufRead>(
    mut games: GameReader<R>,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), PgnError> {
    let mut earliest: Option<NaiveDate> = None;
    let mut latest: Option<NaiveDate> = None;

    while let Some(game) = games.next_game()? {
        let Some(date_str) = game.header("Date") else {
            continue;
        };
        if date_str.contains('?') {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(date_str, DATE_FORMAT) else {
            continue;
        };
        if earliest.map_or(true, |d| date < d) {
            earliest = Some(date);
        }
        if latest.map_or(true, |d| date > d) {
            latest = Some(date);
        }
    }

    Ok((earliest, latest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan(pgn: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
        date_coverage(GameReader::new(Cursor::new(pgn))).unwrap()
    }

    #[test]
    fn test_min_max_across_games() {
        let pgn = "[Date \"2024.03.10\"]\n\n1. e4 *\n\n\
                   [Date \"2024.01.05\"]\n\n1. d4 *\n\n\
                   [Date \"2024.02.20\"]\n\n1. c4 *\n";
        let (earliest, latest) = scan(pgn);
        assert_eq!(earliest, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(latest, NaiveDate::from_ymd_opt(2024, 3, 10));
    }

    #[test]
    fn test_unknown_marker_skipped() {
        let pgn = "[Date \"????.??.??\"]\n\n1. e4 *\n\n\
                   [Date \"2024.??.??\"]\n\n1. d4 *\n\n\
                   [Date \"2024.06.01\"]\n\n1. c4 *\n";
        let (earliest, latest) = scan(pgn);
        assert_eq!(earliest, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(latest, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_unparseable_date_skipped() {
        let pgn = "[Date \"not-a-date\"]\n\n1. e4 *\n";
        assert_eq!(scan(pgn), (None, None));
    }

    #[test]
    fn test_no_dated_games_returns_none() {
        let pgn = "[White \"A\"]\n\n1. e4 *\n";
        assert_eq!(scan(pgn), (None, None));
    }
}
