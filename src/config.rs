use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: u16 = 640;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u16 = 480;

/// Default edge length of one grid cell in pixels.
pub const DEFAULT_CELL_SIZE: u16 = 20;

/// Default simulation speed in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 11;

/// Title shown on the play-area border.
pub const WINDOW_TITLE: &str = " Snake ";

/// Errors raised while assembling the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive (got {width}x{height}, cell {cell_size})")]
    ZeroDimension {
        width: u16,
        height: u16,
        cell_size: u16,
    },
    #[error("board {width}x{height} is not a multiple of cell size {cell_size}")]
    MisalignedBoard {
        width: u16,
        height: u16,
        cell_size: u16,
    },
    #[error("tick rate must be at least one tick per second")]
    ZeroTickRate,
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pixel geometry of the toroidal board.
///
/// Width and height are exact multiples of `cell_size`, so stepping by one
/// cell and wrapping always lands back on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
    cell_size: u16,
}

impl Board {
    /// Validates and builds a board from pixel dimensions.
    pub fn new(width: u16, height: u16, cell_size: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 || cell_size == 0 {
            return Err(ConfigError::ZeroDimension {
                width,
                height,
                cell_size,
            });
        }

        if width % cell_size != 0 || height % cell_size != 0 {
            return Err(ConfigError::MisalignedBoard {
                width,
                height,
                cell_size,
            });
        }

        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn cell_size(self) -> u16 {
        self.cell_size
    }

    /// Number of grid columns.
    #[must_use]
    pub fn columns(self) -> u16 {
        self.width / self.cell_size
    }

    /// Number of grid rows.
    #[must_use]
    pub fn rows(self) -> u16 {
        self.height / self.cell_size
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.columns()) * usize::from(self.rows())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Colours applied to every drawn cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub food: Color,
    pub snake: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::Rgb(0, 0, 0),
    border: Color::Rgb(93, 216, 228),
    food: Color::Rgb(255, 0, 0),
    snake: Color::Rgb(0, 255, 0),
};

/// Tunable startup options, read from an optional JSON file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: u16,
    pub height: u16,
    pub cell_size: u16,
    pub tick_rate: u32,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`.
    ///
    /// Returns defaults when the file does not exist. Returns `Err` when it
    /// exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the validated board geometry.
    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::new(self.width, self.height, self.cell_size)
    }

    /// Returns the tick rate, rejecting zero.
    pub fn tick_rate(&self) -> Result<u32, ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(self.tick_rate)
    }
}

/// Returns the platform-correct default settings path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}
