use crate::foundation::math::mul_div255;

/// HSL color with straight alpha.
///
/// Beams are authored as a hue in degrees plus fixed saturation/lightness
/// from the palette, with a per-pixel alpha from the gradient profile.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsla {
    /// Hue in degrees; any finite value, reduced mod 360.
    pub h: f64,
    /// Saturation in [0, 1].
    pub s: f64,
    /// Lightness in [0, 1].
    pub l: f64,
    /// Straight alpha in [0, 1].
    pub a: f64,
}

impl Hsla {
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Straight RGB8 channels, alpha ignored.
    pub fn to_rgb8(self) -> [u8; 3] {
        let h = self.h.rem_euclid(360.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;

        let to8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to8(r1), to8(g1), to8(b1)]
    }

    /// Premultiplied RGBA8 (r,g,b already multiplied by a).
    pub fn to_rgba8_premul(self) -> [u8; 4] {
        let [r, g, b] = self.to_rgb8();
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        premul_rgb8([r, g, b], a)
    }
}

/// Premultiply straight RGB8 channels by an 8-bit alpha.
pub(crate) fn premul_rgb8(rgb: [u8; 3], a: u8) -> [u8; 4] {
    [
        mul_div255(u16::from(rgb[0]), u16::from(a)),
        mul_div255(u16::from(rgb[1]), u16::from(a)),
        mul_div255(u16::from(rgb[2]), u16::from(a)),
        a,
    ]
}
