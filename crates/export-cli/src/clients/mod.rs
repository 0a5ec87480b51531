pub mod chess_com;
pub mod lichess;

/// User-agent sent on every platform request.
pub const USER_AGENT: &str = "chess-export/0.1";
