//! Per-move evaluation annotation over a raw PGN artifact.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use shakmaty::{fen::Fen, san::San, Chess, EnPassantMode, Position};
use tracing::{info, warn};

use pgn_core::GameReader;

use crate::config::Config;
use crate::engine::{EvalResult, StockfishEngine};
use crate::error::ExportError;

/// Annotate every move of every game in `raw_path` with an engine eval,
/// producing `eval.pgn`.
///
/// Degrades rather than fails: any engine or replay problem abandons the
/// whole pass and hands back the original raw artifact untouched, so the
/// output is either fully annotated or not annotated at all.
pub async fn annotate_file(config: &Config, raw_path: &Path) -> PathBuf {
    info!("Running engine analysis (this may take a while)...");
    match run_annotation(config, raw_path).await {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "Engine analysis failed, keeping unannotated games");
            raw_path.to_path_buf()
        }
    }
}

async fn run_annotation(config: &Config, raw_path: &Path) -> Result<PathBuf, ExportError> {
    let mut engine = StockfishEngine::new(&config.stockfish_path).await?;
    let outcome = annotate_games(&mut engine, config, raw_path).await;
    engine.quit().await;
    let annotated = outcome?;

    let path = config.output_dir.join("eval.pgn");
    tokio::fs::write(&path, annotated).await?;
    Ok(path)
}

async fn annotate_games(
    engine: &mut StockfishEngine,
    config: &Config,
    raw_path: &Path,
) -> Result<String, ExportError> {
    let file = std::fs::File::open(raw_path)?;
    let mut reader = GameReader::new(BufReader::new(file));

    let mut out = String::new();
    let mut games = 0u64;

    while let Some(mut game) = reader.next_game()? {
        let mut pos = Chess::default();
        for mv in &mut game.moves {
            let san: San = mv
                .san
                .parse()
                .map_err(|e| ExportError::Annotation(format!("bad SAN {:?}: {e}", mv.san)))?;
            let m = san
                .to_move(&pos)
                .map_err(|e| ExportError::Annotation(format!("illegal move {:?}: {e}", mv.san)))?;
            pos.play_unchecked(m);

            let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
            let eval = engine.evaluate(&fen, config.search_depth).await?;
            mv.comment = Some(format!("%eval {}", format_eval(&eval)));
        }
        out.push_str(&game.to_pgn());
        out.push('\n');
        games += 1;
    }

    info!(games, "Engine analysis complete");
    Ok(out)
}

/// Encode a score for a `%eval` comment: pawns with two decimals for
/// centipawn scores, `#N` for mate, `0.00` when the engine reported neither.
fn format_eval(eval: &EvalResult) -> String {
    if let Some(cp) = eval.cp {
        format!("{:.2}", cp as f64 / 100.0)
    } else if let Some(mate) = eval.mate {
        format!("#{mate}")
    } else {
        "0.00".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cp(value: i32) -> EvalResult {
        EvalResult {
            cp: Some(value),
            mate: None,
        }
    }

    fn mate(value: i32) -> EvalResult {
        EvalResult {
            cp: None,
            mate: Some(value),
        }
    }

    #[test]
    fn test_format_centipawns() {
        assert_eq!(format_eval(&cp(35)), "0.35");
        assert_eq!(format_eval(&cp(-250)), "-2.50");
        assert_eq!(format_eval(&cp(0)), "0.00");
        assert_eq!(format_eval(&cp(1234)), "12.34");
    }

    #[test]
    fn test_format_mate() {
        assert_eq!(format_eval(&mate(3)), "#3");
        assert_eq!(format_eval(&mate(-2)), "#-2");
    }

    #[test]
    fn test_format_fallback() {
        assert_eq!(format_eval(&EvalResult::default()), "0.00");
    }

    #[tokio::test]
    async fn test_engine_failure_keeps_raw_artifact_untouched() {
        let dir = std::env::temp_dir().join(format!("annotate-fallback-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let raw_path = dir.join("raw.pgn");
        let raw = "[White \"A\"]\n[Black \"B\"]\n\n1. e4 e5 2. Nf3 1-0\n";
        std::fs::write(&raw_path, raw).unwrap();

        let config = Config {
            chesscom_api_base: "https://api.chess.com".to_string(),
            lichess_api_base: "https://lichess.org".to_string(),
            stockfish_path: dir.join("no-such-engine").display().to_string(),
            search_depth: 15,
            max_games: 3000,
            output_dir: dir.clone(),
        };

        // Engine spawn fails, so the whole pass degrades: the raw artifact
        // comes back byte-for-byte and no annotated file appears
        let out = annotate_file(&config, &raw_path).await;
        assert_eq!(out, raw_path);
        assert_eq!(std::fs::read_to_string(&raw_path).unwrap(), raw);
        assert!(!dir.join("eval.pgn").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mainline_replays_on_board() {
        // The annotator leans on SAN replay; make sure a normal opening
        // line walks cleanly through shakmaty
        let mut pos = Chess::default();
        for san_str in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "O-O"] {
            let san: San = san_str.parse().unwrap();
            let m = san.to_move(&pos).unwrap();
            pos.play_unchecked(m);
        }
        assert_eq!(Fen::from_position(&pos, EnPassantMode::Legal).to_string().split(' ').count(), 6);
    }
}
