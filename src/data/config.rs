use super::error::ConfigError;
use crate::game::geometry::{Direction, Grid};
use crate::graphics::{gradient::parse_hex, Argb};

pub const MIN_TILE_SIZE: u32 = 8;

/// Largest board side in pixels.
pub const MAX_BOARD_SIDE: u64 = 8192;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Head end of the body gradient.
    pub snake_head: Argb,
    /// Tail end of the body gradient.
    pub snake_tail: Argb,
    pub board_even: Argb,
    pub board_odd: Argb,
    pub fruit: Argb,
    pub star: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake_head: 0xFF_78_E1_FF,
            snake_tail: 0xFF_B4_6E_E8,
            board_even: 0xFF_2A_37_63,
            board_odd: 0xFF_2E_3C_6B,
            fruit: 0xFF_FD_20_20,
            star: 0xFF_FF_FF_FF,
        }
    }
}

impl Palette {
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let c = parse_hex(value)?;
        match name {
            "snake-head" => self.snake_head = c,
            "snake-tail" => self.snake_tail = c,
            "board-even" => self.board_even = c,
            "board-odd" => self.board_odd = c,
            "fruit" => self.fruit = c,
            "star" => self.star = c,
            _ => return Err(ConfigError::Color(format!("{name}={value}"))),
        }
        Ok(())
    }
}

/// Gameplay settings. Distances are in tiles, times in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: u32,

    /// Tiles per second.
    pub velocity: f32,
    /// Tiles per second per second.
    pub acceleration: f32,

    pub fruit_count: usize,

    /// Tile (column, row) the tail starts on.
    pub start_tile: (u32, u32),
    pub start_direction: Direction,
    pub start_length: usize,

    pub death_duration: f32,
    pub knockback: f32,
    pub reset_delay: f32,

    /// Alpha of the intro and win overlays.
    pub darken: f32,
    /// Overlay alpha change per second.
    pub darken_speed: f32,

    pub palette: Palette,

    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 10,
            tile_size: 64,

            velocity: 6.0,
            acceleration: 0.0,

            fruit_count: 3,

            start_tile: (0, 0),
            start_direction: Direction::Right,
            start_length: 3,

            death_duration: 0.8,
            knockback: 1.5,
            reset_delay: 1.2,

            darken: 0.6,
            darken_speed: 1.0,

            palette: Palette::default(),

            seed: None,
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.columns, self.rows, self.tile_size)
    }

    fn check(name: &'static str, rule: &'static str, value: f32, ok: bool) -> Result<(), ConfigError> {
        if ok && value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange { name, rule, value })
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size < MIN_TILE_SIZE || self.tile_size % 2 != 0 {
            return Err(ConfigError::TileSize {
                got: self.tile_size,
                min: MIN_TILE_SIZE,
            });
        }

        let width = u64::from(self.columns) * u64::from(self.tile_size);
        let height = u64::from(self.rows) * u64::from(self.tile_size);
        if width > MAX_BOARD_SIDE || height > MAX_BOARD_SIDE {
            return Err(ConfigError::BoardTooLarge {
                width,
                height,
                max: MAX_BOARD_SIDE,
            });
        }

        if self.start_length < 2 {
            return Err(ConfigError::StartLength(self.start_length));
        }

        let grid = self.grid();
        let (c, r) = self.start_tile;
        let start = grid.tile_center(c, r);
        let end = grid.tile_step(start, self.start_direction, self.start_length as i32 - 1);

        // A snake that fills the board at spawn could never step.
        if !grid.contains(start)
            || !grid.contains(end)
            || self.start_length >= grid.tile_count()
        {
            return Err(ConfigError::GridTooSmall {
                columns: self.columns,
                rows: self.rows,
                length: self.start_length,
            });
        }

        Self::check("velocity", "non-negative", self.velocity, self.velocity >= 0.0)?;
        Self::check("acceleration", "finite", self.acceleration, true)?;
        Self::check("knockback", "non-negative", self.knockback, self.knockback >= 0.0)?;
        Self::check(
            "death duration",
            "positive",
            self.death_duration,
            self.death_duration > 0.0,
        )?;
        Self::check("reset delay", "non-negative", self.reset_delay, self.reset_delay >= 0.0)?;
        Self::check("darken", "within 0..=1", self.darken, (0.0..=1.0).contains(&self.darken))?;
        Self::check(
            "darken speed",
            "positive",
            self.darken_speed,
            self.darken_speed > 0.0,
        )?;

        Ok(())
    }
}
