//! Fruit placement.

use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};

use super::geometry::Grid;
use crate::graphics::P2;

pub type FruitId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fruit {
    pub pos: P2,
    /// Seconds since the fruit was placed. Drives the pulse.
    pub age: f32,
    pub active: bool,
}

pub struct FruitRegistry {
    fruits: Vec<Fruit>,
}

impl FruitRegistry {
    /// `count` fruits, all inactive until respawned.
    pub fn new(count: usize) -> Self {
        Self {
            fruits: vec![
                Fruit {
                    pos: P2::zero(),
                    age: 0.0,
                    active: false,
                };
                count
            ],
        }
    }

    /// Moves fruit `id` to a random free tile, or deactivates it when every
    /// tile is taken by the body or another active fruit.
    pub fn respawn<R: Rng>(
        &mut self,
        id: FruitId,
        grid: &Grid,
        body: &VecDeque<P2>,
        rng: &mut R,
    ) -> Option<P2> {
        let free: Vec<P2> = grid
            .tiles()
            .filter(|t| !body.contains(t))
            .filter(|t| !self.fruits.iter().any(|f| f.active && f.pos == *t))
            .collect();

        let fruit = self.fruits.get_mut(id)?;
        fruit.age = 0.0;

        match free.choose(rng) {
            Some(&pos) => {
                fruit.pos = pos;
                fruit.active = true;
                Some(pos)
            }
            None => {
                fruit.active = false;
                None
            }
        }
    }

    pub fn respawn_all<R: Rng>(&mut self, grid: &Grid, body: &VecDeque<P2>, rng: &mut R) {
        for f in self.fruits.iter_mut() {
            f.active = false;
        }

        for id in 0..self.fruits.len() {
            self.respawn(id, grid, body, rng);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.fruits
            .iter_mut()
            .filter(|f| f.active)
            .for_each(|f| f.age += dt);
    }

    pub fn at(&self, pos: P2) -> Option<FruitId> {
        self.fruits.iter().position(|f| f.active && f.pos == pos)
    }

    pub fn active(&self) -> impl Iterator<Item = &Fruit> {
        self.fruits.iter().filter(|f| f.active)
    }

    pub fn get(&self, id: FruitId) -> Option<&Fruit> {
        self.fruits.get(id)
    }
}
