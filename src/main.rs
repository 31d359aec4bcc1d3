//! Terminal Tetris runner.
//!
//! Polls the keyboard for at most one command per frame, advances the
//! gravity clock, and redraws through the framebuffer renderer. Finished
//! sessions are recorded in the high-score list.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};

use term_tetris::core::{GameConfig, GameSnapshot, GameState, Phase};
use term_tetris::input::poll_command;
use term_tetris::session::{Session, TICK_MS};
use term_tetris::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use term_tetris::types::Command;
use term_tetris::{HighScores, ScoreEntry};

/// Environment variable naming a log file when `--log-file` is absent
const LOG_ENV: &str = "TERM_TETRIS_LOG";

#[derive(Debug, Parser)]
#[command(name = "term-tetris", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// TOML file with game settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for the piece sequence (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the landing projection switched off
    #[arg(long)]
    no_ghost: bool,

    /// High-score file (defaults to the user data directory)
    #[arg(long, value_name = "FILE")]
    scores: Option<PathBuf>,

    /// Write logs to this file; filter with RUST_LOG
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Board height in cells
    #[arg(long)]
    height: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .or_else(|| std::env::var_os(LOG_ENV).map(PathBuf::from));
    init_logging(log_path.as_deref())?;

    let config = build_config(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "starting {}x{} board with seed {seed}",
        config.width, config.height
    );

    let scores_path = args.scores.clone().unwrap_or_else(HighScores::default_path);
    let mut scores = HighScores::load(&scores_path).unwrap_or_else(|e| {
        warn!("{e:#}; starting with an empty high-score list");
        HighScores::default()
    });

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, GameState::new(config, seed), &mut scores, &scores_path);
    // Restore the terminal before any error gets printed.
    let restored = term.leave();
    result?;
    restored
}

/// Logging goes to a file or nowhere; the terminal is in raw mode.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.no_ghost {
        config.ghost_enabled = false;
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn run(
    term: &mut TerminalRenderer,
    game: GameState,
    scores: &mut HighScores,
    scores_path: &Path,
) -> Result<()> {
    let view = GameView::default();
    let mut session = Session::new(game);
    let mut snap = GameSnapshot::new(
        session.game().board().width(),
        session.game().board().height(),
    );
    let mut fb = FrameBuffer::new(0, 0);
    let mut hud = Hud {
        best: scores.best(),
        rank: None,
    };
    let mut recorded = false;

    let frame = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = term.size().unwrap_or((80, 24));
        session.game().snapshot_into(&mut snap);
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        let command = poll_command(timeout).context("reading keyboard")?;

        if !session.game().started() {
            match command {
                Some(Command::Quit) => return Ok(()),
                Some(_) => session.game_mut().start(),
                None => {}
            }
        } else if let Some(command) = command {
            let applied = session.handle(command);
            if applied && command == Command::Restart {
                recorded = false;
                hud.rank = None;
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            session.advance(ms);
        }

        if let Some(event) = session.take_last_event() {
            if event.level_up {
                debug!("level {} reached", session.game().level());
            }
        }

        match session.game().phase() {
            Phase::Falling => {}
            Phase::GameOver => {
                if !recorded {
                    recorded = true;
                    let rank = record(scores, session.game());
                    hud.rank = Some(rank);
                    hud.best = scores.best();
                    if let Err(e) = scores.save(scores_path) {
                        warn!("{e:#}");
                    }
                }
            }
            Phase::Quit => {
                if !recorded {
                    record(scores, session.game());
                    scores.save(scores_path)?;
                }
                return Ok(());
            }
        }
    }
}

fn record(scores: &mut HighScores, game: &GameState) -> usize {
    scores.record(ScoreEntry {
        score: game.score(),
        level: game.level(),
        lines: game.lines(),
    })
}
