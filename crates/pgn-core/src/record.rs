//! Owned game records that can be re-serialized to PGN text.

/// A single move in a game's mainline, with an optional inline comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveText {
    /// Move in SAN notation (e.g. "Nf3", "exd5", "O-O").
    pub san: String,
    /// Comment attached to this move, emitted as `{ ... }` after it.
    pub comment: Option<String>,
}

impl MoveText {
    pub fn new(san: impl Into<String>) -> Self {
        Self {
            san: san.into(),
            comment: None,
        }
    }
}

/// One parsed game: header tag pairs in file order, the mainline moves,
/// and the result token from the movetext section.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub headers: Vec<(String, String)>,
    pub moves: Vec<MoveText>,
    pub result: String,
}

impl GameRecord {
    /// Look up a header value by tag name (e.g. "Date", "White").
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize back to PGN: tag section, blank line, movetext with move
    /// numbers and comments, wrapped near 80 columns.
    pub fn to_pgn(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.headers {
            out.push_str(&format!("[{key} \"{value}\"]\n"));
        }
        out.push('\n');

        let mut tokens: Vec<String> = Vec::new();
        for (i, mv) in self.moves.iter().enumerate() {
            if i % 2 == 0 {
                tokens.push(format!("{}.", i / 2 + 1));
            }
            tokens.push(mv.san.clone());
            if let Some(comment) = &mv.comment {
                tokens.push(format!("{{ {comment} }}"));
            }
        }
        tokens.push(self.result.clone());

        let mut line_len = 0usize;
        for token in tokens {
            if line_len == 0 {
                line_len = token.len();
                out.push_str(&token);
            } else if line_len + 1 + token.len() > 80 {
                out.push('\n');
                line_len = token.len();
                out.push_str(&token);
            } else {
                out.push(' ');
                line_len += 1 + token.len();
                out.push_str(&token);
            }
        }
        out.push('\n');
        out
    }
}
