pub mod coverage;
pub mod reader;
pub mod record;

pub use coverage::date_coverage;
pub use reader::{count_games, GameReader, PgnError};
pub use record::{GameRecord, MoveText};
