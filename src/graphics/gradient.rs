use super::{Argb, Pixel};
use crate::data::error::ConfigError;

/// Parses `#RRGGBB` (or `RRGGBB`) into an opaque colour.
pub fn parse_hex(s: &str) -> Result<Argb, ConfigError> {
    let digits = s.strip_prefix('#').unwrap_or(s);

    if digits.len() != 6 {
        return Err(ConfigError::Color(s.to_string()));
    }

    u32::from_str_radix(digits, 16)
        .map(|rgb| rgb | 0xFF_00_00_00)
        .map_err(|_| ConfigError::Color(s.to_string()))
}

fn channel(x: f32) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Scales the colour channels by `factor`, keeping alpha.
pub fn brightness(c: Argb, factor: f32) -> Argb {
    let [a, r, g, b] = c.decompose();
    Argb::compose([
        a,
        channel(r as f32 * factor),
        channel(g as f32 * factor),
        channel(b as f32 * factor),
    ])
}

pub fn blend(c1: Argb, c2: Argb, p: f32) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();
    let lerp = |x: u8, y: u8| channel(x as f32 + (y as f32 - x as f32) * p);

    Argb::compose([lerp(a1, a2), lerp(r1, r2), lerp(g1, g2), lerp(b1, b2)])
}

/// `size` colours stepping evenly from `c1` to `c2`, both ends included.
pub fn make_gradient(c1: Argb, c2: Argb, size: usize) -> Vec<Argb> {
    match size {
        0 => Vec::new(),
        1 => vec![c1],
        _ => (0..size)
            .map(|i| blend(c1, c2, i as f32 / (size - 1) as f32))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_hex("#78E1FF").unwrap(), 0xFF_78_E1_FF);
        assert_eq!(parse_hex("b46ee8").unwrap(), 0xFF_B4_6E_E8);
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GG0000").is_err());
    }

    #[test]
    fn brightness_halves_channels() {
        assert_eq!(brightness(0xFF_78_E1_FF, 0.5), 0xFF_3C_71_80);
        assert_eq!(brightness(0xFF_80_80_80, 4.0), 0xFF_FF_FF_FF);
    }

    #[test]
    fn gradient_ends_match_inputs() {
        let g = make_gradient(0xFF_00_00_00, 0xFF_FF_FF_FF, 100);
        assert_eq!(g.len(), 100);
        assert_eq!(g[0], 0xFF_00_00_00);
        assert_eq!(g[99], 0xFF_FF_FF_FF);
        assert!(g[50].decompose()[1] > 0x70);

        assert_eq!(make_gradient(0xFF_12_34_56, 0, 1), vec![0xFF_12_34_56]);
        assert!(make_gradient(0, 0, 0).is_empty());
    }
}
