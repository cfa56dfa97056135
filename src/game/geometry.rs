use crate::graphics::P2;
use crate::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in screen space (y grows downward).
    pub fn unit(self) -> P2 {
        match self {
            Direction::Up => P2::new(0, -1),
            Direction::Down => P2::new(0, 1),
            Direction::Left => P2::new(-1, 0),
            Direction::Right => P2::new(1, 0),
        }
    }

    /// True for the direction itself and its reverse.
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.opposite()
    }
}

/// Tile grid measured in pixels. Tile positions are tile centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: u32,
}

impl Grid {
    pub fn new(columns: u32, rows: u32, tile_size: u32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    fn half(&self) -> i32 {
        self.tile_size as i32 / 2
    }

    pub fn tile_step(&self, pos: P2, direction: Direction, count: i32) -> P2 {
        pos + direction.unit().scale(self.tile_size as i32 * count)
    }

    /// Entry-side point of `pos` when it was entered moving along `direction`.
    pub fn draw_offset(&self, pos: P2, direction: Direction) -> P2 {
        pos - direction.unit().scale(self.half())
    }

    /// Exit-side point of `pos` when leaving along `direction`.
    pub fn next_draw_offset(&self, pos: P2, direction: Direction) -> P2 {
        pos + direction.unit().scale(self.half())
    }

    /// Recovers the direction `draw_offset` was called with.
    pub fn direction_between(&self, tile: P2, draw: P2) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.draw_offset(tile, d) == draw)
    }

    pub fn contains(&self, pos: P2) -> bool {
        let half = self.half();
        let size = self.pixel_size();

        pos.x >= half
            && pos.y >= half
            && pos.x < size.x
            && pos.y < size.y
            && (pos.x - half) % self.tile_size as i32 == 0
            && (pos.y - half) % self.tile_size as i32 == 0
    }

    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn tile_center(&self, column: u32, row: u32) -> P2 {
        P2::new(
            (column * self.tile_size) as i32 + self.half(),
            (row * self.tile_size) as i32 + self.half(),
        )
    }

    /// Every tile centre, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = P2> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.columns).map(move |c| self.tile_center(c, r)))
    }

    pub fn pixel_size(&self) -> P2 {
        P2::new(
            (self.columns * self.tile_size) as i32,
            (self.rows * self.tile_size) as i32,
        )
    }

    pub fn pixel_size_f(&self) -> Vec2<f32> {
        self.pixel_size().to_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10, 10, 64)
    }

    #[test]
    fn offsets_are_half_a_tile() {
        let g = grid();
        let p = g.tile_center(2, 3);
        assert_eq!(p, P2::new(160, 224));

        assert_eq!(g.draw_offset(p, Direction::Right), P2::new(128, 224));
        assert_eq!(g.draw_offset(p, Direction::Up), P2::new(160, 256));
        assert_eq!(g.next_draw_offset(p, Direction::Right), P2::new(192, 224));
        assert_eq!(g.next_draw_offset(p, Direction::Up), P2::new(160, 192));

        // The next tile's entry point is this tile's exit point.
        for d in Direction::ALL {
            assert_eq!(
                g.draw_offset(g.tile_step(p, d, 1), d),
                g.next_draw_offset(p, d)
            );
        }
    }

    #[test]
    fn direction_recovery_inverts_offset() {
        let g = grid();
        let p = g.tile_center(5, 5);
        for d in Direction::ALL {
            assert_eq!(g.direction_between(p, g.draw_offset(p, d)), Some(d));
        }
        assert_eq!(g.direction_between(p, p), None);
    }

    #[test]
    fn opposite_is_involution() {
        for d in Direction::ALL {
            assert_ne!(d.opposite(), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.unit() + d.opposite().unit(), P2::zero());
            assert!(d.is_parallel(d.opposite()));
        }
        assert!(!Direction::Up.is_parallel(Direction::Left));
    }

    #[test]
    fn bounds_and_enumeration() {
        let g = grid();
        assert!(g.contains(P2::new(32, 32)));
        assert!(g.contains(P2::new(608, 608)));
        assert!(!g.contains(P2::new(672, 32)));
        assert!(!g.contains(P2::new(-32, 32)));
        assert!(!g.contains(P2::new(40, 32)));

        assert_eq!(g.tile_count(), 100);
        let tiles: Vec<_> = g.tiles().collect();
        assert_eq!(tiles.len(), 100);
        assert_eq!(tiles[0], P2::new(32, 32));
        assert_eq!(tiles[1], P2::new(96, 32));
        assert!(tiles.iter().all(|&t| g.contains(t)));
        assert_eq!(g.pixel_size(), P2::new(640, 640));
    }
}
