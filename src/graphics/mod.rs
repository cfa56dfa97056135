pub mod blend;
pub mod draw;
pub mod gradient;

use blend::Mixer;

use crate::math::Vec2;

pub type Argb = u32;

/// Integer pixel coordinates. Also used for tile positions.
pub type P2 = Vec2<i32>;

pub(crate) trait Pixel: Copy + Sized + std::fmt::Debug {
    fn black() -> Self;
    fn white() -> Self;
    fn trans() -> Self;

    fn mix(self, other: Self) -> Self;

    fn set_alpha(self, alpha: u8) -> Self;
    fn alpha(self) -> u8;

    fn decompose(self) -> [u8; 4];
    fn compose(array: [u8; 4]) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Argb,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(width: f32, color: Argb) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
        }
    }

    pub fn round(self) -> Self {
        Self {
            cap: LineCap::Round,
            ..self
        }
    }
}

/// Drawing primitives the game renders with.
///
/// Angles follow canvas conventions: radians from the positive x axis,
/// growing clockwise on screen since y points down.
pub trait Surface {
    fn line(&mut self, a: Vec2<f32>, b: Vec2<f32>, stroke: Stroke);

    fn quadratic_curve(&mut self, a: Vec2<f32>, control: Vec2<f32>, b: Vec2<f32>, stroke: Stroke);

    /// Filled circular sector swept from `start` to `end`.
    fn arc(&mut self, center: Vec2<f32>, radius: f32, start: f32, end: f32, color: Argb);

    fn circle(&mut self, center: Vec2<f32>, radius: f32, color: Argb) {
        self.arc(center, radius, 0.0, crate::math::TAU, color);
    }

    fn fill_path(&mut self, points: &[Vec2<f32>], color: Argb);

    fn fill_rect(&mut self, origin: Vec2<f32>, size: Vec2<f32>, color: Argb);
}

pub struct PixelBuffer {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,

    mixer: Mixer,

    background: Argb,
}

impl PixelBuffer {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            buffer: vec![Argb::trans(); w * h],
            width: w,
            height: h,

            mixer: u32::mix,

            background: 0xFF_24_24_24,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Argb::trans());
    }

    pub fn pixel(&self, i: usize) -> Argb {
        self.buffer[i]
    }

    /// Pixel `i` laid over the background.
    pub fn composited(&self, i: usize) -> Argb {
        self.background.mix(self.buffer[i])
    }

    // On Winit Wayland, resize increments hasn't been implemented,
    // So the width parameter is there to ensure that the horizontal
    // lines are aligned.
    pub fn scale_to(&self, scale: usize, dest: &mut [Argb], width: Option<usize>) {
        if self.width == 0 || scale == 0 {
            return;
        }

        let dst_width = width.unwrap_or(self.width * scale);

        self.buffer
            .chunks_exact(self.width) // source lines
            .zip(dest.chunks_exact_mut(dst_width * scale)) // with destination line blocks
            .for_each(|(src_row, dst_block)| {
                let (first, rest) = dst_block.split_at_mut(dst_width);

                src_row
                    .iter()
                    .zip(first.chunks_exact_mut(scale))
                    .for_each(|(src_pixel, dst_chunk)| {
                        // softbuffer expects 0RGB.
                        dst_chunk.fill(self.background.mix(*src_pixel) & 0x00_FF_FF_FF)
                    });

                for row in rest.chunks_exact_mut(dst_width) {
                    row.copy_from_slice(first);
                }
            });
    }
}
