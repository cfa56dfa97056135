//! Anti-aliased rasterization of the [`Surface`] primitives.
//!
//! Every shape is rendered by evaluating a coverage value at pixel
//! centers inside its clipped bounding box.

use super::{Argb, LineCap, Pixel, PixelBuffer, Stroke, Surface};
use crate::math::{
    ease::{clamp_unit, quadratic_v},
    Vec2, TAU,
};

/// Upper bound on segments used to flatten a quadratic curve.
const MAX_CURVE_SEGMENTS: usize = 24;

type Span = (std::ops::Range<i32>, std::ops::Range<i32>);

impl PixelBuffer {
    fn blend_at(&mut self, x: i32, y: i32, c: Argb, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }

        let alpha = (c.alpha() as f32 * coverage.min(1.0)).round() as u8;
        if alpha == 0 {
            return;
        }

        let i = y as usize * self.width + x as usize;
        self.buffer[i] = (self.mixer)(self.buffer[i], c.set_alpha(alpha));
    }

    /// Pixel ranges covering `min..=max`, clipped to the buffer.
    fn span(&self, min: Vec2<f32>, max: Vec2<f32>) -> Option<Span> {
        let xs = (min.x.floor() as i32).max(0);
        let ys = (min.y.floor() as i32).max(0);
        let xe = (max.x.ceil() as i32).min(self.width as i32);
        let ye = (max.y.ceil() as i32).min(self.height as i32);

        if xs >= xe || ys >= ye {
            return None;
        }

        Some((xs..xe, ys..ye))
    }

    fn shade<F>(&mut self, min: Vec2<f32>, max: Vec2<f32>, c: Argb, coverage: F)
    where
        F: Fn(Vec2<f32>) -> f32,
    {
        let Some((xr, yr)) = self.span(min, max) else {
            return;
        };

        for y in yr {
            for x in xr.clone() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                self.blend_at(x, y, c, coverage(p));
            }
        }
    }

    pub fn fill(&mut self, c: Argb) {
        self.buffer.fill(c);
    }

    pub fn stroke_polyline(&mut self, points: &[Vec2<f32>], stroke: Stroke) {
        let Some(&first) = points.first() else {
            return;
        };

        let half = stroke.width * 0.5;
        let pad = Vec2::new(half + 1.0, half + 1.0);

        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (
                Vec2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vec2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        self.shade(min - pad, max + pad, stroke.color, |p| {
            polyline_coverage(p, points, half, stroke.cap)
        });
    }

    pub fn fill_disc(&mut self, center: Vec2<f32>, radius: f32, c: Argb) {
        self.fill_sector(center, radius, 0.0, TAU, c);
    }

    pub fn fill_sector(&mut self, center: Vec2<f32>, radius: f32, start: f32, end: f32, c: Argb) {
        if radius <= 0.0 {
            return;
        }

        // Clockwise on screen from `start` to `end`, wrapping like a canvas arc.
        let sweep = if end - start >= TAU {
            TAU
        } else {
            (end - start).rem_euclid(TAU)
        };
        if sweep <= 0.0 {
            return;
        }

        let pad = Vec2::new(radius + 1.0, radius + 1.0);

        self.shade(center - pad, center + pad, c, |p| {
            let d = p - center;
            if sweep < TAU && (d.angle() - start).rem_euclid(TAU) > sweep {
                return 0.0;
            }
            clamp_unit(radius - d.mag() + 0.5)
        });
    }

    /// Even-odd fill, sampled at pixel centers.
    pub fn fill_polygon(&mut self, points: &[Vec2<f32>], c: Argb) {
        let Some(&first) = points.first() else {
            return;
        };

        if points.len() < 3 {
            return;
        }

        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (
                Vec2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vec2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });

        self.shade(min, max, c, |p| {
            if polygon_contains(points, p) {
                1.0
            } else {
                0.0
            }
        });
    }

    pub fn fill_rect_f(&mut self, origin: Vec2<f32>, size: Vec2<f32>, c: Argb) {
        let end = origin + size;

        self.shade(origin, end, c, |p| {
            let cx = clamp_unit(p.x - origin.x + 0.5).min(clamp_unit(end.x - p.x + 0.5));
            let cy = clamp_unit(p.y - origin.y + 0.5).min(clamp_unit(end.y - p.y + 0.5));
            cx * cy
        });
    }
}

fn polyline_coverage(p: Vec2<f32>, points: &[Vec2<f32>], half: f32, cap: LineCap) -> f32 {
    if points.len() == 1 {
        return match cap {
            LineCap::Round => clamp_unit(half - p.distance(points[0]) + 0.5),
            LineCap::Butt => 0.0,
        };
    }

    let last = points.len() - 2;
    let mut best = 0.0f32;

    for (i, seg) in points.windows(2).enumerate() {
        let (a, b) = (seg[0], seg[1]);
        let ab = b - a;
        let len2 = ab.dot(ab);

        if len2 <= f32::EPSILON {
            if cap == LineCap::Round || (i != 0 && i != last) {
                best = best.max(clamp_unit(half - p.distance(a) + 0.5));
            }
            continue;
        }

        let len = len2.sqrt();
        let t = (p - a).dot(ab) / len2;

        let before = i == 0 && t < 0.0;
        let after = i == last && t > 1.0;

        let coverage = if cap == LineCap::Butt && (before || after) {
            let beyond = if before { -t } else { t - 1.0 } * len;
            let perp = ((p - a).x * ab.y - (p - a).y * ab.x).abs() / len;
            clamp_unit(0.5 - beyond) * clamp_unit(half - perp + 0.5)
        } else {
            let q = a + ab * t.clamp(0.0, 1.0);
            clamp_unit(half - p.distance(q) + 0.5)
        };

        best = best.max(coverage);
        if best >= 1.0 {
            break;
        }
    }

    best
}

fn polygon_contains(points: &[Vec2<f32>], p: Vec2<f32>) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;

    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Flattens a quadratic curve into points, sized by its control polygon.
pub fn flatten_quadratic(a: Vec2<f32>, control: Vec2<f32>, b: Vec2<f32>) -> Vec<Vec2<f32>> {
    let length = a.distance(control) + control.distance(b);
    let n = ((length / 4.0) as usize).clamp(2, MAX_CURVE_SEGMENTS);

    (0..=n)
        .map(|i| quadratic_v(a, control, b, i as f32 / n as f32))
        .collect()
}

impl Surface for PixelBuffer {
    fn line(&mut self, a: Vec2<f32>, b: Vec2<f32>, stroke: Stroke) {
        self.stroke_polyline(&[a, b], stroke);
    }

    fn quadratic_curve(&mut self, a: Vec2<f32>, control: Vec2<f32>, b: Vec2<f32>, stroke: Stroke) {
        let points = flatten_quadratic(a, control, b);
        self.stroke_polyline(&points, stroke);
    }

    fn arc(&mut self, center: Vec2<f32>, radius: f32, start: f32, end: f32, color: Argb) {
        self.fill_sector(center, radius, start, end, color);
    }

    fn circle(&mut self, center: Vec2<f32>, radius: f32, color: Argb) {
        self.fill_disc(center, radius, color);
    }

    fn fill_path(&mut self, points: &[Vec2<f32>], color: Argb) {
        self.fill_polygon(points, color);
    }

    fn fill_rect(&mut self, origin: Vec2<f32>, size: Vec2<f32>, color: Argb) {
        self.fill_rect_f(origin, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::PI;

    const RED: Argb = 0xFF_FF_00_00;

    fn at(pix: &PixelBuffer, x: usize, y: usize) -> Argb {
        pix.pixel(y * pix.width() + x)
    }

    #[test]
    fn butt_line_stops_at_endpoints() {
        let mut pix = PixelBuffer::new(32, 16);
        pix.line(
            Vec2::new(4.0, 8.0),
            Vec2::new(20.0, 8.0),
            Stroke::new(4.0, RED),
        );

        assert_eq!(at(&pix, 10, 7), RED);
        assert_eq!(at(&pix, 10, 8), RED);
        assert_eq!(at(&pix, 10, 2), Argb::trans());
        assert_eq!(at(&pix, 24, 8), Argb::trans());
        assert_eq!(at(&pix, 1, 8), Argb::trans());
    }

    #[test]
    fn round_cap_extends_past_endpoint() {
        let mut pix = PixelBuffer::new(32, 16);
        pix.line(
            Vec2::new(4.0, 8.0),
            Vec2::new(20.0, 8.0),
            Stroke::new(6.0, RED).round(),
        );

        assert_eq!(at(&pix, 21, 8), RED);
        assert_eq!(at(&pix, 2, 8), RED);
    }

    #[test]
    fn curve_passes_near_control_midpoint() {
        let mut pix = PixelBuffer::new(64, 64);
        let (a, c, b) = (
            Vec2::new(0.0, 32.0),
            Vec2::new(32.0, 32.0),
            Vec2::new(32.0, 0.0),
        );
        pix.quadratic_curve(a, c, b, Stroke::new(6.0, RED));

        let mid = quadratic_v(a, c, b, 0.5).to_p2();
        assert_eq!(at(&pix, mid.x as usize, mid.y as usize), RED);
        assert_eq!(at(&pix, 60, 60), Argb::trans());
    }

    #[test]
    fn sector_covers_only_its_sweep() {
        let mut pix = PixelBuffer::new(32, 32);
        // Lower half on screen (y grows downward).
        pix.arc(Vec2::new(16.0, 16.0), 10.0, 0.0, PI, RED);

        assert_eq!(at(&pix, 16, 22), RED);
        assert_eq!(at(&pix, 16, 10), Argb::trans());
    }

    #[test]
    fn polygon_and_rect_fill() {
        let mut pix = PixelBuffer::new(32, 32);
        let tri = [
            Vec2::new(2.0, 2.0),
            Vec2::new(30.0, 2.0),
            Vec2::new(2.0, 30.0),
        ];
        pix.fill_path(&tri, RED);
        assert_eq!(at(&pix, 5, 5), RED);
        assert_eq!(at(&pix, 28, 28), Argb::trans());

        pix.fill_rect(Vec2::new(20.0, 20.0), Vec2::new(8.0, 8.0), Argb::white());
        assert_eq!(at(&pix, 24, 24), Argb::white());
        assert_eq!(at(&pix, 29, 24), Argb::trans());
    }

    #[test]
    fn shapes_clip_to_buffer() {
        let mut pix = PixelBuffer::new(8, 8);
        pix.circle(Vec2::new(-50.0, -50.0), 4.0, RED);
        pix.circle(Vec2::new(0.0, 0.0), 100.0, RED);
        pix.line(
            Vec2::new(-20.0, 4.0),
            Vec2::new(40.0, 4.0),
            Stroke::new(2.0, RED),
        );
        assert_eq!(at(&pix, 7, 7), RED);
    }

    #[test]
    fn flattening_endpoints() {
        let pts = flatten_quadratic(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(pts.len() >= 3);
        assert_eq!(pts[0], Vec2::new(0.0, 0.0));
        assert!(pts[pts.len() - 1].distance(Vec2::new(10.0, 10.0)) < 1e-4);
    }
}
