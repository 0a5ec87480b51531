//! Streaming PGN reader — lightweight regex-based parser.
//!
//! Models a PGN source as a lazy sequence of games: call [`GameReader::next_game`]
//! (or iterate) until it yields `None` at end-of-stream.

use std::io::BufRead;

use regex::Regex;
use thiserror::Error;

use crate::record::{GameRecord, MoveText};

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("I/O error reading PGN stream: {0}")]
    Io(#[from] std::io::Error),
}

pub struct GameReader<R: BufRead> {
    input: R,
    /// Lookahead line pushed back when the next game's tag section starts.
    pending: Option<String>,
    header_re: Regex,
    comment_re: Regex,
    variation_re: Regex,
    move_re: Regex,
    result_re: Regex,
}

impl<R: BufRead> GameReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: None,
            header_re: Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).unwrap(),
            comment_re: Regex::new(r"\{[^}]*\}").unwrap(),
            variation_re: Regex::new(r"\([^)]*\)").unwrap(),
            move_re: Regex::new(
                r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O[+#]?|O-O[+#]?",
            )
            .unwrap(),
            result_re: Regex::new(r"1-0|0-1|1/2-1/2|\*").unwrap(),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, PgnError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end().to_string()))
    }

    /// Read the next game, or `None` at end-of-stream.
    pub fn next_game(&mut self) -> Result<Option<GameRecord>, PgnError> {
        // Skip separator blank lines between games
        let mut line = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(l) if l.trim().is_empty() => continue,
                Some(l) => break l,
            }
        };

        // Tag section
        let mut headers = Vec::new();
        while line.trim_start().starts_with('[') {
            if let Some(cap) = self.header_re.captures(&line) {
                headers.push((cap[1].to_string(), cap[2].to_string()));
            }
            match self.read_line()? {
                None => {
                    return Ok(Some(GameRecord {
                        headers,
                        moves: Vec::new(),
                        result: "*".to_string(),
                    }))
                }
                Some(l) => line = l,
            }
        }

        // Movetext section: runs until a blank line, the next tag section,
        // or end-of-stream
        let mut movetext = String::new();
        loop {
            if line.trim().is_empty() {
                break;
            }
            if line.trim_start().starts_with('[') && !headers.is_empty() {
                self.pending = Some(line);
                break;
            }
            movetext.push_str(&line);
            movetext.push(' ');
            match self.read_line()? {
                None => break,
                Some(l) => line = l,
            }
        }

        if headers.is_empty() && movetext.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(self.parse_movetext(headers, &movetext)))
    }

    fn parse_movetext(&self, headers: Vec<(String, String)>, movetext: &str) -> GameRecord {
        // Strip comments, then variations, before extracting SAN tokens
        let no_comments = self.comment_re.replace_all(movetext, " ");
        let cleaned = self.variation_re.replace_all(&no_comments, " ");

        let moves = self
            .move_re
            .find_iter(&cleaned)
            .map(|m| MoveText::new(m.as_str()))
            .collect();

        let result = self
            .result_re
            .find_iter(&cleaned)
            .last()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "*".to_string());

        GameRecord {
            headers,
            moves,
            result,
        }
    }
}

impl<R: BufRead> Iterator for GameReader<R> {
    type Item = Result<GameRecord, PgnError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_game() {
            Ok(Some(game)) => Some(Ok(game)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Count the games in a PGN source by draining it with a fresh reader.
pub fn count_games<R: BufRead>(input: R) -> Result<u64, PgnError> {
    let mut reader = GameReader::new(input);
    let mut count = 0u64;
    while reader.next_game()?.is_some() {
        count += 1;
    }
    Ok(count)
}
