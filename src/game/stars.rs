//! Star burst played where the snake crashed.

use rand::Rng;

use super::geometry::Direction;
use crate::math::{
    ease::{cap_max, ease_out5, linear_v},
    Vec2, PI, TAU,
};

pub const STAR_SPIKES: usize = 5;
pub const STAR_COUNT: usize = 8;

// In tiles.
const RADIUS: (f32, f32) = (0.15, 0.3);
const RANGE: (f32, f32) = (0.5, 1.5);

// In seconds.
const DURATION: (f32, f32) = (0.7, 1.0);

/// Half-width of the cone stars fly out in.
const SPREAD: f32 = PI * 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub from: Vec2<f32>,
    pub to: Vec2<f32>,
    pub duration: f32,
    pub radius: f32,
    pub rotation: f32,
    pub age: f32,
}

impl Star {
    pub fn position(&self) -> Vec2<f32> {
        let t = ease_out5(cap_max(self.age / self.duration, 1.0));
        linear_v(self.from, self.to, t)
    }

    /// Outline alternating between outer tips and inner corners.
    pub fn outline(&self) -> Vec<Vec2<f32>> {
        let center = self.position();
        let step = PI / STAR_SPIKES as f32;

        (0..STAR_SPIKES * 2)
            .map(|i| {
                let r = if i % 2 == 0 {
                    self.radius
                } else {
                    self.radius * 0.5
                };
                center + Vec2::new(r, 0.0).rotate(self.rotation + step * i as f32)
            })
            .collect()
    }
}

#[derive(Default)]
pub struct Stars {
    stars: Vec<Star>,
}

/// Screen angle of `d`, in [0, 2π).
fn heading(d: Direction) -> f32 {
    d.unit().to_f32().angle().rem_euclid(TAU)
}

impl Stars {
    pub fn burst<R: Rng>(&mut self, at: Vec2<f32>, outward: Direction, tile: f32, rng: &mut R) {
        let center = heading(outward);

        for _ in 0..STAR_COUNT {
            let angle = rng.gen_range(center - SPREAD..center + SPREAD);
            let distance = rng.gen_range(RANGE.0..RANGE.1) * tile;

            self.stars.push(Star {
                from: at,
                to: at + Vec2::new(distance, 0.0).rotate(angle),
                duration: rng.gen_range(DURATION.0..DURATION.1),
                radius: rng.gen_range(RADIUS.0..RADIUS.1) * tile,
                rotation: rng.gen_range(0.0..TAU),
                age: 0.0,
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.stars.iter_mut().for_each(|s| s.age += dt);
    }

    pub fn clear(&mut self) {
        self.stars.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Star> {
        self.stars.iter()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
