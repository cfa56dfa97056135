pub mod fruit;
pub mod geometry;
pub mod render;
pub mod snake;
pub mod stars;

use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::data::{config::GameConfig, Command};
use crate::graphics::{Surface, P2};
use crate::math::ease::{cap_max, cap_min, ease_out3};

use fruit::{FruitId, FruitRegistry};
use geometry::{Direction, Grid};
use render::Style;
use snake::Snake;
use stars::Stars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    Alive,
    Dead,
    Win,
    #[default]
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    None,
    #[default]
    Normal,
    Happy,
    Dead,
}

/// What the snake needs from the world around it.
pub trait Arena {
    fn state(&self) -> GameState;

    /// Seconds spent in the current state.
    fn state_elapsed(&self) -> f32;

    fn fruit_at(&self, pos: P2) -> Option<FruitId>;

    fn respawn_fruit(&mut self, id: FruitId, body: &VecDeque<P2>);

    fn increment_score(&mut self);

    fn set_state(&mut self, state: GameState);

    /// Star burst at a draw point, flying toward `outward`.
    fn explode(&mut self, at: P2, outward: Direction);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub best: u32,
}

impl Scoreboard {
    pub fn increment(&mut self) {
        self.score += 1;
        self.best = self.best.max(self.score);
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// Everything around the snake: state clock, fruit, stars and score.
pub struct Playfield {
    state: GameState,
    elapsed: f32,

    grid: Grid,
    fruits: FruitRegistry,
    stars: Stars,
    score: Scoreboard,

    rng: StdRng,
}

impl Playfield {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            state: GameState::Paused,
            elapsed: 0.0,

            grid: config.grid(),
            fruits: FruitRegistry::new(config.fruit_count),
            stars: Stars::default(),
            score: Scoreboard::default(),

            rng,
        }
    }

    pub fn fruits(&self) -> &FruitRegistry {
        &self.fruits
    }

    pub fn stars(&self) -> &Stars {
        &self.stars
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }
}

impl Arena for Playfield {
    fn state(&self) -> GameState {
        self.state
    }

    fn state_elapsed(&self) -> f32 {
        self.elapsed
    }

    fn fruit_at(&self, pos: P2) -> Option<FruitId> {
        self.fruits.at(pos)
    }

    fn respawn_fruit(&mut self, id: FruitId, body: &VecDeque<P2>) {
        if self
            .fruits
            .respawn(id, &self.grid, body, &mut self.rng)
            .is_none()
        {
            debug!(id, "no free tile left for fruit");
        }
    }

    fn increment_score(&mut self) {
        self.score.increment();
        info!(score = self.score.score, best = self.score.best, "fruit eaten");
    }

    fn set_state(&mut self, state: GameState) {
        match state {
            GameState::Win => info!(
                score = self.score.score,
                seconds = self.elapsed,
                "board filled"
            ),
            GameState::Dead => info!(score = self.score.score, "snake crashed"),
            _ => debug!(from = ?self.state, to = ?state, "state change"),
        }

        self.state = state;
        self.elapsed = 0.0;
    }

    fn explode(&mut self, at: P2, outward: Direction) {
        let tile = self.grid.tile_size as f32;
        self.stars.burst(at.to_f32(), outward, tile, &mut self.rng);
    }
}

/// One running game.
pub struct Session {
    config: GameConfig,
    style: Style,
    snake: Snake,
    field: Playfield,

    /// Darkening shown before the first game, until its first move has faded out.
    intro: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let mut session = Self {
            style: Style::new(&config),
            snake: Snake::new(&config),
            field: Playfield::new(&config),
            intro: false,
            config,
        };

        session.reset();
        session.intro = true;
        session
    }

    pub fn reset(&mut self) {
        self.field.score.reset();
        self.field.stars.clear();

        self.snake.spawn();
        self.field
            .fruits
            .respawn_all(&self.field.grid, self.snake.body(), &mut self.field.rng);

        self.intro = false;
        self.field.set_state(GameState::Paused);
    }

    pub fn update(&mut self, dt: f32) {
        self.field.elapsed += dt;
        self.field.stars.update(dt);

        match self.field.state {
            GameState::Alive => {
                if self.intro && self.field.elapsed * self.config.darken_speed >= self.config.darken
                {
                    self.intro = false;
                }

                self.field.fruits.update(dt);
                self.snake.update(dt, &mut self.field);
            }

            GameState::Dead => {
                if self.field.elapsed > self.config.reset_delay {
                    self.reset();
                    return;
                }

                self.field.fruits.update(dt);
                self.snake.update(dt, &mut self.field);
            }

            GameState::Win => {}

            GameState::Paused => self.field.fruits.update(dt),
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Restart => self.reset(),

            Command::Steer(direction) => match self.field.state {
                GameState::Paused => {
                    self.field.set_state(GameState::Alive);
                    self.snake.handle_input(direction);
                }

                GameState::Alive => {
                    self.snake.handle_input(direction);
                }

                _ => {}
            },

            Command::Close => {}
        }
    }

    /// Alpha of the darkening drawn over the board.
    pub fn overlay_alpha(&self) -> f32 {
        let d = self.config.darken;
        let t = self.field.elapsed * self.config.darken_speed;

        match self.field.state {
            GameState::Paused if self.intro => d,
            GameState::Alive if self.intro && d > 0.0 => ease_out3(cap_min((d - t) / d, 0.0)) * d,
            GameState::Win if d > 0.0 => ease_out3(cap_max(t / d, 1.0)) * d,
            _ => 0.0,
        }
    }

    pub fn render<S: Surface>(&self, s: &mut S) {
        let palette = &self.style.palette;
        let grid = self.field.grid;
        let tile = grid.tile_size as f32;

        render::render_board(s, &grid, palette);

        let mut fruit_points = Vec::new();
        for fruit in self.field.fruits.active() {
            render::render_fruit(s, fruit, tile, palette.fruit);
            fruit_points.push(fruit.pos.to_f32());
        }

        render::render_snake(s, &self.snake.view(), &self.style, &fruit_points);

        for star in self.field.stars.iter() {
            render::render_star(s, star, palette.star);
        }

        render::render_overlay(s, grid.pixel_size_f(), self.overlay_alpha());
    }

    pub fn title(&self) -> String {
        let Scoreboard { score, best } = self.field.score;
        format!("coffeesnake | score {score} | best {best}")
    }

    pub fn pixel_size(&self) -> P2 {
        self.field.grid.pixel_size()
    }

    pub fn state(&self) -> GameState {
        self.field.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::render::tests::{Call, Recorder};

    fn session() -> Session {
        Session::new(GameConfig {
            seed: Some(11),
            ..Default::default()
        })
    }

    #[test]
    fn starts_paused_with_intro() {
        let s = session();
        assert_eq!(s.state(), GameState::Paused);
        assert_eq!(s.overlay_alpha(), 0.6);
        assert_eq!(s.field().fruits().active().count(), 3);

        for f in s.field().fruits().active() {
            assert!(!s.snake().body().contains(&f.pos));
        }
        assert_eq!(s.field().score(), Scoreboard::default());
    }

    #[test]
    fn paused_snake_stays_put() {
        let mut s = session();
        let version = s.snake().version();
        s.update(1.0);
        assert_eq!(s.snake().version(), version);
        assert_eq!(s.state(), GameState::Paused);
    }

    #[test]
    fn steering_starts_the_game() {
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Down));
        assert_eq!(s.state(), GameState::Alive);
        assert_eq!(s.snake().directions().len(), 2);

        // Parallel keys still start it.
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Right));
        assert_eq!(s.state(), GameState::Alive);
        assert_eq!(s.snake().directions().len(), 1);
    }

    #[test]
    fn intro_fades_after_first_move() {
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Down));
        assert!((s.overlay_alpha() - 0.6).abs() < 1e-6);

        s.update(0.3);
        let mid = s.overlay_alpha();
        assert!(mid > 0.0 && mid < 0.6);

        s.update(0.4);
        assert_eq!(s.overlay_alpha(), 0.0);
    }

    #[test]
    fn crash_resets_after_delay() {
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Up));

        for _ in 0..600 {
            s.update(1.0 / 60.0);
            if s.state() == GameState::Dead {
                break;
            }
        }
        assert_eq!(s.state(), GameState::Dead);
        assert_eq!(s.field().stars().len(), stars::STAR_COUNT);

        for _ in 0..13 {
            s.update(0.1);
        }
        assert_eq!(s.state(), GameState::Paused);
        assert_eq!(s.snake().body().len(), 3);
        assert_eq!(s.snake().body().front(), Some(&P2::new(32, 32)));
        assert!(s.field().stars().is_empty());
    }

    #[test]
    fn best_survives_restart() {
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Down));
        s.field.increment_score();
        s.field.increment_score();
        assert!(s.title().contains("score 2"));

        s.handle_command(Command::Restart);
        assert_eq!(s.state(), GameState::Paused);
        assert_eq!(s.field().score(), Scoreboard { score: 0, best: 2 });
        assert!(s.title().contains("best 2"));
    }

    #[test]
    fn intro_only_before_first_game() {
        let mut s = session();
        assert_eq!(s.overlay_alpha(), 0.6);

        s.handle_command(Command::Restart);
        assert_eq!(s.state(), GameState::Paused);
        assert_eq!(s.overlay_alpha(), 0.0);

        s.handle_command(Command::Steer(Direction::Down));
        assert_eq!(s.overlay_alpha(), 0.0);
    }

    #[test]
    fn win_freezes_and_darkens() {
        let mut s = session();
        s.handle_command(Command::Steer(Direction::Down));
        s.field.set_state(GameState::Win);

        let version = s.snake().version();
        assert_eq!(s.overlay_alpha(), 0.0);
        s.update(5.0);
        assert_eq!(s.snake().version(), version);
        assert!((s.overlay_alpha() - 0.6).abs() < 1e-6);

        // Steering is ignored until restart.
        s.handle_command(Command::Steer(Direction::Left));
        assert_eq!(s.state(), GameState::Win);
    }

    #[test]
    fn render_draws_board_first_and_overlay_last() {
        let s = session();
        let mut rec = Recorder::default();
        s.render(&mut rec);

        assert_eq!(rec.calls[0], Call::Rect(s.config().palette.board_even));
        assert_eq!(rec.calls.last(), Some(&Call::Rect(0x99_00_00_00)));
        assert_eq!(rec.lines(), 3 + 3);
        assert_eq!(rec.curves(), 0);
    }

    #[test]
    fn renders_into_pixels() {
        let s = session();
        let size = s.pixel_size();
        let mut pix = crate::graphics::PixelBuffer::new(size.x as usize, size.y as usize);
        s.render(&mut pix);

        let c = s.field().grid.pixel_size_f().scale(0.5).to_p2();
        let i = c.y as usize * pix.width() + c.x as usize;
        assert_ne!(pix.pixel(i), 0);
    }
}
