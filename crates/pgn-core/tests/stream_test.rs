use std::io::Cursor;

use pgn_core::{count_games, date_coverage, GameReader};

const BLOB: &str = r#"[Event "Live Chess"]
[Site "Chess.com"]
[Date "2024.01.03"]
[White "alice"]
[Black "bob"]
[Result "1-0"]

1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 1-0

[Event "Rated blitz game"]
[Site "lichess.org"]
[Date "2024.01.18"]
[White "bob"]
[Black "alice"]
[Result "1/2-1/2"]

1. d4 { [%eval 0.21] } d5 2. c4 e6 3. Nc3 Nf6 1/2-1/2

[Event "Casual game"]
[Date "????.??.??"]
[White "carol"]
[Black "dave"]
[Result "*"]

1. g3 *
"#;

#[test]
fn streams_all_games_with_moves_and_results() {
    let games: Vec<_> = GameReader::new(Cursor::new(BLOB))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].moves.len(), 10);
    assert_eq!(games[0].result, "1-0");
    assert_eq!(games[1].moves[0].san, "d4");
    assert_eq!(games[1].result, "1/2-1/2");
    assert_eq!(games[2].header("White"), Some("carol"));
}

#[test]
fn counting_matches_streaming_and_repeats() {
    assert_eq!(count_games(Cursor::new(BLOB)).unwrap(), 3);
    assert_eq!(count_games(Cursor::new(BLOB)).unwrap(), 3);
}

#[test]
fn coverage_ignores_unknown_dates() {
    let (earliest, latest) = date_coverage(GameReader::new(Cursor::new(BLOB))).unwrap();
    assert_eq!(earliest.unwrap().to_string(), "2024-01-03");
    assert_eq!(latest.unwrap().to_string(), "2024-01-18");
}

#[test]
fn reserialized_game_parses_again() {
    let mut reader = GameReader::new(Cursor::new(BLOB));
    let game = reader.next_game().unwrap().unwrap();
    let pgn = game.to_pgn();

    let mut round = GameReader::new(Cursor::new(pgn.as_bytes()));
    let reparsed = round.next_game().unwrap().unwrap();
    assert_eq!(reparsed.header("White"), Some("alice"));
    assert_eq!(reparsed.moves.len(), game.moves.len());
    assert_eq!(reparsed.result, game.result);
}
