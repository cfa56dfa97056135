//! Startup and front-end errors

use thiserror::Error;

/// Rejected settings, reported before the game starts.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Tile size must be even and at least {min}, got {got}")]
    TileSize { got: u32, min: u32 },

    #[error("A {columns}x{rows} grid cannot hold a snake of length {length}")]
    GridTooSmall {
        columns: u32,
        rows: u32,
        length: usize,
    },

    #[error("A {width}x{height} px board exceeds {max} px per side")]
    BoardTooLarge { width: u64, height: u64, max: u64 },

    #[error("Start length must be at least 2, got {0}")]
    StartLength(usize),

    #[error("Invalid colour '{0}', expected #RRGGBB")]
    Color(String),

    #[error("Invalid size '{0}', expected WIDTHxHEIGHT")]
    Size(String),

    #[error("{name} must be {rule}, got {value}")]
    OutOfRange {
        name: &'static str,
        rule: &'static str,
        value: f32,
    },
}

/// Failures of the window or terminal front end.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("Surface error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
