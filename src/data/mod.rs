pub mod config;
pub mod delta;
pub mod error;
pub mod reader;

use std::time::Duration;

use tracing::info;

use crate::game::{geometry::Direction, Session};
use crate::graphics::PixelBuffer;
use crate::modes::Mode;

use config::GameConfig;
use delta::Delta;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 480;
pub const DEFAULT_WIN_SCALE: u8 = 1;

/// Tile size used in the terminal unless one is given,
/// so the board fits a normal sized console.
pub const CONSOLE_TILE_SIZE: u32 = 8;

/// Main program struct
///
/// Owns the game session and the pixel buffer it is drawn into.
/// The front ends only feed it commands and present `pix`.
pub(crate) struct Program {
    pub session: Session,
    pub pix: PixelBuffer,

    mode: Mode,
    scale: u8,

    fps: u32,
    refresh_rate: Duration,

    delta: Delta,
    title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Restart,
    Close,
}

impl Command {
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }

    /// Letter keys shared by both front ends.
    pub fn from_char(c: char) -> Option<Command> {
        match c.to_ascii_lowercase() {
            'w' => Some(Command::Steer(Direction::Up)),
            'a' => Some(Command::Steer(Direction::Left)),
            's' => Some(Command::Steer(Direction::Down)),
            'd' => Some(Command::Steer(Direction::Right)),
            'r' => Some(Command::Restart),
            'q' => Some(Command::Close),
            _ => None,
        }
    }
}

impl Program {
    pub fn new(config: GameConfig) -> Self {
        let session = Session::new(config);
        let size = session.pixel_size();

        let mut prog = Self {
            pix: PixelBuffer::new(size.x as usize, size.y as usize),
            title: session.title(),
            session,

            mode: Mode::default(),
            scale: DEFAULT_WIN_SCALE,

            fps: DEFAULT_FPS,
            refresh_rate: Duration::ZERO,

            delta: Delta::new(),
        };

        prog.change_fps(DEFAULT_FPS);
        prog
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn change_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(1, MAX_FPS);
        self.refresh_rate = Duration::from_micros(1_000_000 / self.fps as u64);
    }

    /// Returns true when the program should exit.
    pub fn eval_command(&mut self, cmd: Command) -> bool {
        if cmd.is_close_requested() {
            return true;
        }

        self.session.handle_command(cmd);
        false
    }

    /// Advances the game by the time since the last frame and redraws.
    pub fn render(&mut self) {
        let dt = self.delta.tick();
        self.session.update(dt);

        self.pix.clear();
        self.session.render(&mut self.pix);
    }

    /// Starts frame timing afresh, so the first frame after a pause
    /// does not see the whole pause as elapsed time.
    pub fn restart_clock(&mut self) {
        self.delta.reset();
    }

    /// The new title, if the score changed since the last call.
    pub fn title_changed(&mut self) -> Option<&str> {
        let title = self.session.title();
        if title == self.title {
            return None;
        }

        self.title = title;
        Some(&self.title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn print_startup_info(&self) {
        let config = self.session.config();

        info!(
            mode = ?self.mode,
            columns = config.columns,
            rows = config.rows,
            tile = config.tile_size,
            scale = self.scale,
            fps = self.fps,
            "starting"
        );
        info!("arrows or WASD to steer, R to restart, Esc or Q to quit");
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn refresh_rate(&self) -> Duration {
        self.refresh_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn program() -> Program {
        Program::new(GameConfig {
            seed: Some(5),
            ..Default::default()
        })
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_char('W'), Some(Command::Steer(Direction::Up)));
        assert_eq!(Command::from_char('d'), Some(Command::Steer(Direction::Right)));
        assert_eq!(Command::from_char('r'), Some(Command::Restart));
        assert!(Command::from_char('q').is_some_and(|c| c.is_close_requested()));
        assert_eq!(Command::from_char('x'), None);
    }

    #[test]
    fn buffer_matches_board() {
        let prog = program();
        assert_eq!(prog.pix.width(), 640);
        assert_eq!(prog.pix.height(), 640);
        assert_eq!(prog.refresh_rate(), Duration::from_micros(16_666));
    }

    #[test]
    fn commands_reach_the_session() {
        let mut prog = program();
        assert!(!prog.eval_command(Command::Steer(Direction::Down)));
        assert_eq!(prog.session.state(), GameState::Alive);
        assert!(prog.eval_command(Command::Close));
    }

    #[test]
    fn title_reports_changes_once() {
        let mut prog = program();
        assert_eq!(prog.title_changed(), None);

        prog.change_fps(0);
        assert_eq!(prog.fps(), 1);

        prog.render();
        assert_ne!(prog.pix.pixel(0), 0);
        assert_eq!(prog.title_changed(), None);
        assert!(prog.title().contains("score 0"));
    }
}
