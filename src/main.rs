use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::config::{settings_path, Settings};
use grid_snake::game::{Game, RunState};
use grid_snake::input::poll_inputs;
use grid_snake::pacer::Pacer;
use grid_snake::terminal_runtime::{install_panic_hook, Display};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width in pixels.
    #[arg(long)]
    width: Option<u16>,
    /// Board height in pixels.
    #[arg(long)]
    height: Option<u16>,
    /// Cell edge length in pixels; must divide width and height.
    #[arg(long)]
    cell_size: Option<u16>,
    /// Simulation speed in ticks per second.
    #[arg(long)]
    tick_rate: Option<u32>,
    /// Fixed RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let path = self.config.clone().unwrap_or_else(settings_path);
        let mut settings = Settings::load(&path)?;

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(cell_size) = self.cell_size {
            settings.cell_size = cell_size;
        }
        if let Some(tick_rate) = self.tick_rate {
            settings.tick_rate = tick_rate;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let settings = cli.settings()?;
    let board = settings.board()?;
    let tick_rate = settings.tick_rate()?;
    let game = match settings.seed {
        Some(seed) => Game::new_with_seed(board, seed),
        None => Game::new(board),
    };

    install_panic_hook();
    let mut display = Display::open(board).context("failed to set up terminal")?;

    info!(?board, tick_rate, "starting");
    run(&mut display, game, tick_rate)?;
    info!("quit");

    Ok(())
}

fn run(display: &mut Display, mut game: Game, tick_rate: u32) -> Result<()> {
    let mut pacer = Pacer::new(tick_rate);
    let mut state = RunState::Running;

    while state == RunState::Running {
        pacer.tick();

        state = game.apply_inputs(poll_inputs()?);
        if state == RunState::Running {
            // Hold the game while part of the board would be off-screen.
            if display.fits()? {
                game.tick();
            }
            display.show(&game)?;
        }
    }

    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
