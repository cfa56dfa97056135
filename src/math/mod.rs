pub mod ease;
mod vec2;

/// 2D point/vector.
///
/// Multiplying two vectors treats them as complex numbers,
/// so `v * Vec2::new(cos, sin)` rotates `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

pub const TAU: f32 = std::f32::consts::TAU;
pub const PI: f32 = std::f32::consts::PI;

/// Returns the point of `points` closest to `from`.
pub fn nearest<I>(from: Vec2<f32>, points: I) -> Option<Vec2<f32>>
where
    I: IntoIterator<Item = Vec2<f32>>,
{
    points
        .into_iter()
        .map(|p| (p, from.distance(p)))
        .fold(None, |best: Option<(Vec2<f32>, f32)>, (p, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((p, d)),
        })
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_product_rotates() {
        let v = Vec2::new(1.0f32, 0.0);
        let quarter = Vec2::new(0.0f32, 1.0);
        let r = v * quarter;
        assert!((r.x - 0.0).abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);

        let r = Vec2::new(2.0f32, 1.0).rotate(PI);
        assert!((r.x + 2.0).abs() < 1e-5);
        assert!((r.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn nearest_point() {
        let points = [
            Vec2::new(10.0f32, 10.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(-5.0, 0.0),
        ];
        assert_eq!(
            nearest(Vec2::<f32>::zero(), points.iter().copied()),
            Some(Vec2::new(1.0, 2.0))
        );
        assert_eq!(nearest(Vec2::<f32>::zero(), std::iter::empty()), None);
    }

    #[test]
    fn integer_membership() {
        let body = [Vec2::new(32, 32), Vec2::new(96, 32)];
        assert!(body.contains(&Vec2::new(96, 32)));
        assert!(!body.contains(&Vec2::new(96, 96)));
    }
}
