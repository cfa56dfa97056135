//! Drawing the board, fruit, stars, overlays and the snake onto a [`Surface`].

use super::{fruit::Fruit, geometry::Grid, snake::SnakeView, stars::Star, Expression};
use crate::data::config::{GameConfig, Palette};
use crate::graphics::{
    gradient::{blend, brightness, make_gradient},
    Argb, Pixel, Stroke, Surface,
};
use crate::math::{
    ease::{d_linear_v, d_quadratic_v, linear_v, quadratic_v},
    nearest, Vec2, TAU,
};

// Body widths, in tiles.
const MAX_WIDTH: f32 = 0.75;
const MIN_WIDTH: f32 = 0.40;
// In pixels.
const MAX_SHRINK: f32 = 0.5;

/// Extra sweep on each side of an end cap so it overlaps the stroke.
const CAP_OVERLAP: f32 = 0.1;

// Face layout in tiles, in a frame where +x points along the head.
const EYE: Vec2<f32> = Vec2::new(-0.25, 0.25);
const NOSTRIL: Vec2<f32> = Vec2::new(0.2, 0.13);
const EYE_RADIUS: f32 = 0.17;
const EYE_BORDER: f32 = 0.05;
const NOSTRIL_RADIUS: f32 = 0.03;

// Relative to the eye radius.
const PUPIL: f32 = 0.6;
const SQUINT_RADIUS: f32 = 0.7;
const SQUINT_THICKNESS: f32 = 0.35;

const LEAF: Argb = 0xFF_4A_D3_10;
const STEM: Argb = 0xFF_9C_59_4C;

pub struct Style {
    tile: f32,
    max_width: f32,
    shrink: f32,
    /// Body colours indexed by distance from the head.
    gradient: Vec<Argb>,
    nostril: Argb,
    pub palette: Palette,
}

impl Style {
    pub fn new(config: &GameConfig) -> Self {
        let tile = config.tile_size as f32;
        let count = config.grid().tile_count();
        let palette = config.palette;

        let max_width = MAX_WIDTH * tile;
        let min_width = MIN_WIDTH * tile;
        let shrink = match count {
            0 | 1 => 0.0,
            _ => ((max_width - min_width) / (count - 1) as f32).min(MAX_SHRINK),
        };

        Self {
            tile,
            max_width,
            shrink,
            gradient: make_gradient(palette.snake_head, palette.snake_tail, count),
            nostril: brightness(palette.snake_head, 0.5),
            palette,
        }
    }

    fn body_color(&self, from_head: usize) -> Argb {
        self.gradient
            .get(from_head)
            .or(self.gradient.last())
            .copied()
            .unwrap_or(self.palette.snake_head)
    }
}

pub fn render_board<S: Surface>(s: &mut S, grid: &Grid, palette: &Palette) {
    let tile = grid.tile_size as f32;
    let size = Vec2::new(tile, tile);

    for r in 0..grid.rows {
        for c in 0..grid.columns {
            let color = if (r + c) % 2 == 0 {
                palette.board_even
            } else {
                palette.board_odd
            };
            s.fill_rect(Vec2::new(c as f32 * tile, r as f32 * tile), size, color);
        }
    }
}

/// Polygon approximating a rotated ellipse.
fn ellipse(center: Vec2<f32>, axes: Vec2<f32>, rotation: f32) -> Vec<Vec2<f32>> {
    const POINTS: usize = 16;
    let rot = Vec2::new(rotation.cos(), rotation.sin());

    (0..POINTS)
        .map(|i| {
            let a = TAU * i as f32 / POINTS as f32;
            center + Vec2::new(axes.x * a.cos(), axes.y * a.sin()) * rot
        })
        .collect()
}

/// An apple, pulsing with the fruit's age.
pub fn render_fruit<S: Surface>(s: &mut S, fruit: &Fruit, tile: f32, color: Argb) {
    let size = tile * (0.15 * (fruit.age * std::f32::consts::PI).cos() + 1.1);
    let c = fruit.pos.to_f32();
    let at = |x: f32, y: f32| c + Vec2::new(x, y).scale(size);

    s.circle(c, 0.36 * size, color);
    s.fill_path(
        &ellipse(at(0.40, -0.21), Vec2::new(0.13, 0.06).scale(size), 0.93),
        LEAF,
    );
    s.fill_path(
        &ellipse(at(-0.16, -0.20), Vec2::new(0.12, 0.05).scale(size), -0.72),
        blend(color, Argb::white(), 0.5),
    );
    s.line(
        at(0.19, -0.16),
        at(0.37, -0.36),
        Stroke::new(0.07 * size, STEM).round(),
    );
}

pub fn render_star<S: Surface>(s: &mut S, star: &Star, color: Argb) {
    s.fill_path(&star.outline(), color);
}

/// Darkens the whole canvas. `alpha` in 0..=1.
pub fn render_overlay<S: Surface>(s: &mut S, size: Vec2<f32>, alpha: f32) {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    if alpha == 0 {
        return;
    }
    s.fill_rect(Vec2::new(0.0, 0.0), size, Argb::black().set_alpha(alpha));
}

/// One full segment: from entry point `d1` to exit point `d2` through tile `b`.
pub fn render_body<S: Surface>(
    s: &mut S,
    d1: Vec2<f32>,
    d2: Vec2<f32>,
    b: Vec2<f32>,
    width: f32,
    color: Argb,
) {
    let stroke = Stroke::new(width, color);

    if d1.x == d2.x || d1.y == d2.y {
        s.line(d1, d2, stroke);
    } else {
        s.quadratic_curve(d1, b, d2, stroke);
    }
}

/// A segment cut at `p`, capped with a half disc facing along the curve.
///
/// With `flip` the segment is drawn from `d2` back toward `d1` and `p`
/// measures the part missing at the `d1` side. Returns the end point and
/// the curve's derivative there.
#[allow(clippy::too_many_arguments)]
pub fn render_end<S: Surface>(
    s: &mut S,
    mut d1: Vec2<f32>,
    mut d2: Vec2<f32>,
    b: Vec2<f32>,
    width: f32,
    color: Argb,
    mut p: f32,
    flip: bool,
) -> (Vec2<f32>, Vec2<f32>) {
    if flip {
        std::mem::swap(&mut d1, &mut d2);
        p = 1.0 - p;
    }

    let stroke = Stroke::new(width, color);

    let (end, tangent) = if d1.x == d2.x || d1.y == d2.y {
        let end = linear_v(d1, d2, p);
        s.line(d1, end, stroke);
        (end, d_linear_v(d1, d2))
    } else {
        let end = quadratic_v(d1, b, d2, p);
        s.quadratic_curve(d1, linear_v(d1, b, p), end, stroke);
        (end, d_quadratic_v(d1, b, d2, p))
    };

    let Vec2 { x: dx, y: dy } = tangent;
    s.arc(
        end,
        width * 0.5,
        (-dx).atan2(dy) - CAP_OVERLAP,
        dx.atan2(-dy) + CAP_OVERLAP,
        color,
    );

    (end, tangent)
}

pub fn render_snake<S: Surface>(
    s: &mut S,
    view: &SnakeView,
    style: &Style,
    fruits: &[Vec2<f32>],
) {
    let (body, draw) = (view.body, view.draw);
    let n = body.len().min(draw.len());
    if n < 2 {
        return;
    }

    let head = n - 1;
    let f = |p: crate::graphics::P2| p.to_f32();
    let mut width = style.max_width - style.shrink * head as f32;

    let tail_phase = if view.growing && view.velocity > 0.0 {
        0.0
    } else {
        view.phase
    };

    render_end(
        s,
        f(draw[0].pos),
        f(draw[1].pos),
        f(body[0]),
        width,
        style.body_color(head),
        tail_phase,
        true,
    );
    width += style.shrink;

    for i in 1..head {
        render_body(
            s,
            f(draw[i].pos),
            f(draw[i + 1].pos),
            f(body[i]),
            width,
            style.body_color(head - i),
        );
        width += style.shrink;
    }

    let exit = view.grid.next_draw_offset(body[head], view.next_direction);
    let (end, tangent) = render_end(
        s,
        f(draw[head].pos),
        f(exit),
        f(body[head]),
        width,
        style.body_color(0),
        view.phase,
        false,
    );

    render_face(s, end, tangent, view.expression, style, fruits);
}

fn render_face<S: Surface>(
    s: &mut S,
    end: Vec2<f32>,
    tangent: Vec2<f32>,
    expression: Expression,
    style: &Style,
    fruits: &[Vec2<f32>],
) {
    if expression == Expression::None || tangent.mag() <= f32::EPSILON {
        return;
    }

    let t = style.tile;
    let rot = tangent.normalize();
    let place = |local: Vec2<f32>| end + local.scale(t) * rot;

    for side in [1.0, -1.0] {
        let nostril = place(Vec2::new(NOSTRIL.x, NOSTRIL.y * side));
        s.circle(nostril, NOSTRIL_RADIUS * t, style.nostril);
    }

    let eyes = [place(EYE), place(Vec2::new(EYE.x, -EYE.y))];
    let r = EYE_RADIUS * t;

    for e in eyes {
        s.circle(e, r + EYE_BORDER * t, style.palette.snake_head);
    }
    for e in eyes {
        s.circle(e, r, Argb::white());
    }

    let black = Argb::black();
    let squint = r * SQUINT_RADIUS;
    let pen = Stroke::new(r * SQUINT_THICKNESS, black).round();

    match expression {
        Expression::Normal => {
            let look = nearest(end, fruits.iter().copied())
                .map(|fruit| fruit - end)
                .filter(|d| d.mag() > f32::EPSILON)
                .map(|d| d.normalize().scale(r - r * PUPIL))
                .unwrap_or(Vec2::<f32>::zero());

            for e in eyes {
                s.circle(e + look, r * PUPIL, black);
            }
        }

        Expression::Happy => {
            let h = 0.5 * 3f32.sqrt() * squint;
            let [a, b, c] = [
                Vec2::new(-squint, 0.0),
                Vec2::new(0.5 * squint, h),
                Vec2::new(0.5 * squint, -h),
            ]
            .map(|v| v * rot);

            for e in eyes {
                s.line(e + a, e + b, pen);
                s.line(e + a, e + c, pen);
            }
        }

        Expression::Dead => {
            let k = 0.5f32.sqrt() * squint;
            let [a, b, c, d] = [
                Vec2::new(k, k),
                Vec2::new(-k, -k),
                Vec2::new(k, -k),
                Vec2::new(-k, k),
            ]
            .map(|v| v * rot);

            for e in eyes {
                s.line(e + a, e + b, pen);
                s.line(e + c, e + d, pen);
            }
        }

        Expression::None => {}
    }
}
