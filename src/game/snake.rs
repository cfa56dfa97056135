//! Snake motion.
//!
//! The body is a list of tile centres (tail first) with a matching list of
//! draw points, the edge of each tile the segment entered through. `phase`
//! is the progress of the head through its current tile step: it grows with
//! velocity, and every time it crosses 1 the snake steps forward one tile.
//! During the death animation it is pulled below 0 and the snake steps
//! backward, replaying tail entries saved by earlier forward steps.

use std::collections::VecDeque;

use tracing::debug;

use super::{
    geometry::{Direction, Grid},
    Arena, Expression, GameState,
};
use crate::data::config::GameConfig;
use crate::graphics::P2;
use crate::math::ease::{clamp_unit, ease_out5};

/// Turns requested past this phase wait for the next tile.
pub const LATE_TURN_PHASE: f32 = 0.7;

pub const MAX_QUEUED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPoint {
    pub pos: P2,
    /// Direction the segment was entered by.
    pub dir: Direction,
}

#[derive(Debug, Clone, Copy)]
struct Motion {
    start: P2,
    start_direction: Direction,
    start_length: usize,
    velocity: f32,
    acceleration: f32,
    death_duration: f32,
    knockback: f32,
}

/// Read-only snapshot for the renderer.
#[derive(Debug, Clone, Copy)]
pub struct SnakeView<'a> {
    pub grid: Grid,
    pub body: &'a VecDeque<P2>,
    pub draw: &'a VecDeque<DrawPoint>,
    pub phase: f32,
    pub growing: bool,
    pub velocity: f32,
    pub expression: Expression,
    pub next_direction: Direction,
    pub version: u64,
}

pub struct Snake {
    grid: Grid,
    motion: Motion,

    body: VecDeque<P2>,
    draw: VecDeque<DrawPoint>,

    body_backup: VecDeque<P2>,
    draw_backup: VecDeque<DrawPoint>,

    directions: VecDeque<Direction>,
    grow: bool,
    wait: bool,

    expression: Expression,

    phase: f32,
    velocity: f32,
    acceleration: f32,

    version: u64,
}

impl Snake {
    pub fn new(config: &GameConfig) -> Self {
        let grid = config.grid();
        let (column, row) = config.start_tile;

        let motion = Motion {
            start: grid.tile_center(column, row),
            start_direction: config.start_direction,
            start_length: config.start_length,
            velocity: config.velocity,
            acceleration: config.acceleration,
            death_duration: config.death_duration,
            knockback: config.knockback,
        };

        let mut snake = Self {
            grid,
            motion,

            body: VecDeque::new(),
            draw: VecDeque::new(),
            body_backup: VecDeque::new(),
            draw_backup: VecDeque::new(),

            directions: VecDeque::new(),
            grow: false,
            wait: false,

            expression: Expression::Normal,

            phase: 0.5,
            velocity: 0.0,
            acceleration: 0.0,

            version: 0,
        };

        snake.spawn();
        snake
    }

    pub fn spawn(&mut self) {
        let Motion {
            start,
            start_direction: dir,
            start_length,
            ..
        } = self.motion;

        self.body.clear();
        self.draw.clear();

        for i in 0..start_length {
            let pos = self.grid.tile_step(start, dir, i as i32);
            self.body.push_back(pos);
            self.draw.push_back(DrawPoint {
                pos: self.grid.draw_offset(pos, dir),
                dir,
            });
        }

        self.body_backup.clear();
        self.draw_backup.clear();

        self.directions.clear();
        self.directions.push_back(dir);
        self.grow = false;
        self.wait = false;

        self.expression = Expression::Normal;

        self.phase = 0.5;
        self.velocity = self.motion.velocity;
        self.acceleration = self.motion.acceleration;

        self.version += 1;
    }

    pub fn update(&mut self, dt: f32, arena: &mut impl Arena) {
        if self.body.is_empty() {
            return;
        }

        // A decelerating snake stops; it never drives backward.
        self.velocity = (self.velocity + dt * self.acceleration).max(0.0);
        self.phase += dt * self.velocity;

        if arena.state() == GameState::Dead {
            self.phase -= self.knockback_delta(arena.state_elapsed(), dt);
        }

        while self.phase > 1.0 {
            if arena.state() == GameState::Win {
                self.phase = 1.0;
                break;
            }
            self.move_forward(arena);
        }

        while self.phase < 0.0 {
            self.move_backward();
        }
    }

    /// Tiles the death animation pulls back between `t - dt` and `t`.
    fn knockback_delta(&self, t: f32, dt: f32) -> f32 {
        let len = self.motion.death_duration;
        let now = ease_out5(clamp_unit(t / len));
        let before = ease_out5(clamp_unit((t - dt) / len));

        self.motion.knockback * (now - before)
    }

    pub fn next_direction(&self) -> Direction {
        match (self.directions.len(), self.wait) {
            (1, _) | (_, true) => self.directions[0],
            _ => self.directions[1],
        }
    }

    fn collides(&self, head: P2) -> bool {
        // The tail leaves its tile on this step unless the snake grows.
        let skip = usize::from(!self.grow);
        self.body.iter().skip(skip).any(|&p| p == head)
    }

    fn move_forward(&mut self, arena: &mut impl Arena) {
        let direction = self.next_direction();
        let Some(&current) = self.body.back() else {
            return;
        };
        let head = self.grid.tile_step(current, direction, 1);

        if !self.grid.contains(head) || self.collides(head) {
            self.die(head, direction, arena);
            return;
        }

        self.body.push_back(head);
        self.draw.push_back(DrawPoint {
            pos: self.grid.draw_offset(head, direction),
            dir: direction,
        });

        if !self.grow {
            if let (Some(b), Some(d)) = (self.body.pop_front(), self.draw.pop_front()) {
                self.body_backup.push_back(b);
                self.draw_backup.push_back(d);
            }

            let cap = self.backup_capacity();
            while self.body_backup.len() > cap {
                self.body_backup.pop_front();
                self.draw_backup.pop_front();
            }
        }
        self.grow = false;

        if self.directions.len() > 1 && !self.wait {
            self.directions.pop_front();
        }
        self.wait = false;

        if let Some(id) = arena.fruit_at(head) {
            self.grow = true;
            arena.respawn_fruit(id, &self.body);
            arena.increment_score();
        }

        self.version += 1;

        if self.body.len() >= self.grid.tile_count() {
            arena.set_state(GameState::Win);
            self.expression = Expression::Happy;
        }

        self.phase -= 1.0;
    }

    fn move_backward(&mut self) {
        let Some(&head) = self.draw.back() else {
            return;
        };

        debug_assert_eq!(
            self.body.back().and_then(|&b| self.grid.direction_between(b, head.pos)),
            Some(head.dir)
        );

        self.directions.clear();
        self.directions.push_back(head.dir);

        match (self.body_backup.pop_back(), self.draw_backup.pop_back()) {
            (Some(b), Some(d)) => {
                self.body.push_front(b);
                self.draw.push_front(d);
            }

            _ => {
                let (Some(&tail), Some(&tail_draw)) = (self.body.front(), self.draw.front()) else {
                    return;
                };
                let dir = tail_draw.dir;
                let new_tail = self.grid.tile_step(tail, dir.opposite(), 1);

                self.body.push_front(new_tail);
                self.draw.push_front(DrawPoint {
                    pos: self.grid.draw_offset(new_tail, dir),
                    dir,
                });
            }
        }

        self.body.pop_back();
        self.draw.pop_back();

        self.version += 1;
        self.phase += 1.0;
    }

    fn die(&mut self, head: P2, direction: Direction, arena: &mut impl Arena) {
        if self.wait {
            // Take the queued turn instead of crashing straight ahead.
            self.wait = false;
            self.move_forward(arena);
            return;
        }

        arena.explode(self.grid.draw_offset(head, direction), direction.opposite());
        arena.set_state(GameState::Dead);

        debug!(length = self.body.len(), ?direction, "snake died");

        self.expression = Expression::Dead;
        self.acceleration = 0.0;
        self.velocity = 0.0;
        self.phase = 1.0;
    }

    fn backup_capacity(&self) -> usize {
        self.motion.knockback.max(0.0).ceil() as usize
    }

    /// Queues a turn. Returns whether it was accepted.
    pub fn handle_input(&mut self, direction: Direction) -> bool {
        if self.directions.len() >= MAX_QUEUED {
            return false;
        }

        let Some(&last) = self.directions.back() else {
            return false;
        };

        if last.is_parallel(direction) {
            return false;
        }

        if self.phase > LATE_TURN_PHASE && self.directions.len() == 1 {
            self.wait = true;
        }

        self.directions.push_back(direction);
        true
    }

    pub fn view(&self) -> SnakeView<'_> {
        SnakeView {
            grid: self.grid,
            body: &self.body,
            draw: &self.draw,
            phase: self.phase,
            growing: self.grow,
            velocity: self.velocity,
            expression: self.expression,
            next_direction: self.next_direction(),
            version: self.version,
        }
    }

    pub fn body(&self) -> &VecDeque<P2> {
        &self.body
    }

    pub fn directions(&self) -> &VecDeque<Direction> {
        &self.directions
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn is_waiting(&self) -> bool {
        self.wait
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
