use super::{Argb, Pixel};

pub type Mixer = fn(Argb, Argb) -> Argb;

/// Source-over compositing of `c2` onto `c1`.
pub fn composite_u32(c1: Argb, c2: Argb) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();

    if a2 == 255 {
        return c2;
    }

    let (a, a3) = {
        let a1 = a1 as u16;
        let a2 = a2 as u16;

        let a3 = (a1 * (255 - a2)) / 255;

        (a2 + a3, a3)
    };

    if a == 0 {
        return Argb::trans();
    }

    let composite_channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as u16;
        let c2 = c2 as u16;
        let a2 = a2 as u16;

        ((c2 * a2 + c1 * a3) / a) as u8
    };

    Argb::compose([
        a as u8,
        composite_channel(r1, r2),
        composite_channel(g1, g2),
        composite_channel(b1, b2),
    ])
}

impl Pixel for Argb {
    fn black() -> Argb {
        0xFF_00_00_00
    }

    fn white() -> Argb {
        0xFF_FF_FF_FF
    }

    fn trans() -> Argb {
        0x0
    }

    fn mix(self, other: Argb) -> Argb {
        composite_u32(self, other)
    }

    fn set_alpha(self, alpha: u8) -> Argb {
        (self & 0x00_FF_FF_FF) | (alpha as Argb) << 24
    }

    fn alpha(self) -> u8 {
        self.decompose()[0]
    }

    fn decompose(self) -> [u8; 4] {
        self.to_be_bytes()
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces() {
        assert_eq!(composite_u32(0xFF_10_20_30, 0xFF_AA_BB_CC), 0xFF_AA_BB_CC);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(composite_u32(0xFF_10_20_30, 0x00_AA_BB_CC), 0xFF_10_20_30);
        assert_eq!(composite_u32(Argb::trans(), Argb::trans()), Argb::trans());
    }

    #[test]
    fn half_black_darkens() {
        let out = composite_u32(0xFF_C8_C8_C8, Argb::black().set_alpha(128));
        let [a, r, g, b] = out.decompose();
        assert_eq!(a, 255);
        assert!(r < 0xC8 && r > 0x50);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn alpha_helpers() {
        assert_eq!(0xFF_12_34_56.set_alpha(0x80), 0x80_12_34_56);
        assert_eq!(0x80_12_34_56.alpha(), 0x80);
    }
}
