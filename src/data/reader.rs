use clap::Parser;

use super::{
    config::{GameConfig, Palette},
    error::ConfigError,
    Program, CONSOLE_TILE_SIZE, DEFAULT_FPS, DEFAULT_WIN_SCALE,
};
use crate::modes::Mode;

/// Smoothly animated snake, drawn in software.
#[derive(Parser, Debug)]
#[command(name = "csnake", version, about)]
pub struct Args {
    /// Board size in tiles.
    #[arg(long, value_name = "WxH", default_value = "10x10")]
    pub tiles: String,

    /// Tile size in pixels. Must be even.
    #[arg(long, value_name = "PX")]
    pub tile_size: Option<u32>,

    /// Starting speed in tiles per second.
    #[arg(long)]
    pub velocity: Option<f32>,

    /// Speed gained per second.
    #[arg(long, allow_negative_numbers = true)]
    pub accel: Option<f32>,

    /// Number of fruits on the board.
    #[arg(long)]
    pub fruits: Option<usize>,

    /// Starting length in tiles.
    #[arg(long)]
    pub length: Option<usize>,

    /// Window pixels per buffer pixel.
    #[arg(long, default_value_t = DEFAULT_WIN_SCALE)]
    pub scale: u8,

    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for fruit and star placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Colour override, e.g. `--color fruit=#ff0000`.
    /// Names: snake-head, snake-tail, board-even, board-odd, fruit, star.
    #[arg(long = "color", value_name = "NAME=#RRGGBB")]
    pub colors: Vec<String>,

    /// Draw in the terminal instead of a window.
    #[cfg(feature = "terminal")]
    #[arg(long)]
    pub terminal: bool,
}

impl Args {
    pub fn mode(&self) -> Mode {
        #[cfg(feature = "terminal")]
        if self.terminal {
            return Mode::Con;
        }

        Mode::Win
    }

    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let defaults = GameConfig::default();
        let (columns, rows) = parse_size(&self.tiles)?;

        let tile_size = match (self.tile_size, self.mode()) {
            (Some(size), _) => size,
            (None, Mode::Con) => CONSOLE_TILE_SIZE,
            (None, Mode::Win) => defaults.tile_size,
        };

        let mut palette = Palette::default();
        for spec in &self.colors {
            let (name, value) = spec
                .split_once('=')
                .ok_or_else(|| ConfigError::Color(spec.clone()))?;
            palette.set(name.trim(), value.trim())?;
        }

        let config = GameConfig {
            columns,
            rows,
            tile_size,

            velocity: self.velocity.unwrap_or(defaults.velocity),
            acceleration: self.accel.unwrap_or(defaults.acceleration),

            fruit_count: self.fruits.unwrap_or(defaults.fruit_count),
            start_length: self.length.unwrap_or(defaults.start_length),

            palette,
            seed: self.seed,

            ..defaults
        };

        config.validate()?;
        Ok(config)
    }
}

/// Parses `WxH`.
pub fn parse_size(s: &str) -> Result<(u32, u32), ConfigError> {
    let err = || ConfigError::Size(s.to_string());

    let (w, h) = s.split_once(['x', 'X']).ok_or_else(err)?;
    let w = w.trim().parse::<u32>().map_err(|_| err())?;
    let h = h.trim().parse::<u32>().map_err(|_| err())?;

    if w == 0 || h == 0 {
        return Err(err());
    }

    Ok((w, h))
}

impl Program {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.scale == 0 {
            return Err(ConfigError::OutOfRange {
                name: "scale",
                rule: "positive",
                value: 0.0,
            });
        }

        if args.fps == 0 {
            return Err(ConfigError::OutOfRange {
                name: "fps",
                rule: "positive",
                value: 0.0,
            });
        }

        let mut prog = Program::new(args.game_config()?)
            .with_mode(args.mode())
            .with_scale(args.scale);

        prog.change_fps(args.fps);

        Ok(prog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("csnake").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_game_config() {
        let config = args(&[]).game_config().unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = args(&[
            "--tiles", "12x8", "--tile-size", "32", "--velocity", "4", "--accel", "-0.5",
            "--fruits", "1", "--seed", "99",
        ])
        .game_config()
        .unwrap();

        assert_eq!((config.columns, config.rows, config.tile_size), (12, 8, 32));
        assert_eq!(config.velocity, 4.0);
        assert_eq!(config.acceleration, -0.5);
        assert_eq!(config.fruit_count, 1);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn colors_are_applied() {
        let config = args(&["--color", "fruit=#00ff00", "--color", "star = 101010"])
            .game_config()
            .unwrap();
        assert_eq!(config.palette.fruit, 0xFF_00_FF_00);
        assert_eq!(config.palette.star, 0xFF_10_10_10);

        assert!(matches!(
            args(&["--color", "fruit"]).game_config(),
            Err(ConfigError::Color(_))
        ));
    }

    #[test]
    fn bad_values_are_errors() {
        assert_eq!(parse_size("8X6"), Ok((8, 6)));
        assert!(matches!(parse_size("8"), Err(ConfigError::Size(_))));
        assert!(matches!(parse_size("0x6"), Err(ConfigError::Size(_))));
        assert!(matches!(parse_size("axb"), Err(ConfigError::Size(_))));

        assert!(matches!(
            args(&["--tiles", "2x2"]).game_config(),
            Err(ConfigError::GridTooSmall { .. })
        ));
        assert!(matches!(
            args(&["--tile-size", "7"]).game_config(),
            Err(ConfigError::TileSize { .. })
        ));
        assert!(Program::from_args(&args(&["--scale", "0"])).is_err());
        assert!(Program::from_args(&args(&["--fps", "0"])).is_err());
    }

    #[test]
    fn program_takes_front_end_settings() {
        let prog = Program::from_args(&args(&["--scale", "2", "--fps", "30", "--seed", "1"])).unwrap();
        assert_eq!(prog.scale(), 2);
        assert_eq!(prog.fps(), 30);
        assert_eq!(prog.mode(), Mode::Win);
    }
}
