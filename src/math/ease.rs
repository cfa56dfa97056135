//! Interpolation and easing curves.
//!
//! `linear*` are degree-1 Bezier curves, `quadratic*` degree-2.
//! All easing curves map 0 to 0 and 1 to 1.

use super::Vec2;

pub fn cap_max(t: f32, val: f32) -> f32 {
    if t > val {
        val
    } else {
        t
    }
}

pub fn cap_min(t: f32, val: f32) -> f32 {
    if t < val {
        val
    } else {
        t
    }
}

pub fn clamp_unit(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

pub fn pow2(t: f32) -> f32 {
    t * t
}

pub fn pow3(t: f32) -> f32 {
    t * t * t
}

pub fn pow4(t: f32) -> f32 {
    pow2(pow2(t))
}

pub fn pow5(t: f32) -> f32 {
    pow4(t) * t
}

pub fn ease_out3(t: f32) -> f32 {
    1.0 - pow3(1.0 - t)
}

pub fn ease_out5(t: f32) -> f32 {
    1.0 - pow5(1.0 - t)
}

pub fn linear(z1: f32, z2: f32, p: f32) -> f32 {
    (z2 - z1) * p + z1
}

pub fn d_linear(z1: f32, z2: f32) -> f32 {
    z2 - z1
}

// Same as linear(linear(z1, z2, p), linear(z2, z3, p), p), expanded.
pub fn quadratic(z1: f32, z2: f32, z3: f32, p: f32) -> f32 {
    ((z3 - z2 - z2 + z1) * p + z2 + z2 - z1 - z1) * p + z1
}

pub fn d_quadratic(z1: f32, z2: f32, z3: f32, p: f32) -> f32 {
    2.0 * ((z3 - z2 - z2 + z1) * p + z2 - z1)
}

pub fn linear_v(a: Vec2<f32>, b: Vec2<f32>, p: f32) -> Vec2<f32> {
    Vec2::new(linear(a.x, b.x, p), linear(a.y, b.y, p))
}

pub fn d_linear_v(a: Vec2<f32>, b: Vec2<f32>) -> Vec2<f32> {
    Vec2::new(d_linear(a.x, b.x), d_linear(a.y, b.y))
}

pub fn quadratic_v(a: Vec2<f32>, c: Vec2<f32>, b: Vec2<f32>, p: f32) -> Vec2<f32> {
    Vec2::new(quadratic(a.x, c.x, b.x, p), quadratic(a.y, c.y, b.y, p))
}

pub fn d_quadratic_v(a: Vec2<f32>, c: Vec2<f32>, b: Vec2<f32>, p: f32) -> Vec2<f32> {
    Vec2::new(d_quadratic(a.x, c.x, b.x, p), d_quadratic(a.y, c.y, b.y, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn easing_endpoints() {
        for f in [ease_out3, ease_out5] {
            assert!(close(f(0.0), 0.0));
            assert!(close(f(1.0), 1.0));
        }
        assert!(ease_out5(0.5) > ease_out3(0.5));
        assert!(ease_out3(0.5) > 0.5);
    }

    #[test]
    fn quadratic_matches_nested_linear() {
        let (z1, z2, z3) = (3.0, -7.0, 11.0);
        for i in 0..=10 {
            let p = i as f32 / 10.0;
            let nested = linear(linear(z1, z2, p), linear(z2, z3, p), p);
            assert!(close(quadratic(z1, z2, z3, p), nested));
        }
    }

    #[test]
    fn quadratic_derivative_is_slope() {
        let (z1, z2, z3) = (0.0, 32.0, 32.0);
        let p = 0.4;
        let h = 1e-3;
        let numeric = (quadratic(z1, z2, z3, p + h) - quadratic(z1, z2, z3, p - h)) / (2.0 * h);
        assert!((d_quadratic(z1, z2, z3, p) - numeric).abs() < 1e-2);
        assert!(close(d_linear(2.0, 5.0), 3.0));
    }

    #[test]
    fn caps() {
        assert_eq!(cap_max(1.4, 1.0), 1.0);
        assert_eq!(cap_max(0.4, 1.0), 0.4);
        assert_eq!(cap_min(-0.2, 0.0), 0.0);
        assert_eq!(clamp_unit(-3.0), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
    }
}
