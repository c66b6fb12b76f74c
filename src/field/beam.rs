use kurbo::Point;

use crate::{
    config::Palette,
    foundation::{core::SurfaceSize, math::Rng64},
};

/// Margin in surface pixels past the top edge before a beam is respawned, and
/// below the bottom edge where it reappears.
pub(crate) const RESPAWN_MARGIN_PX: f64 = 100.0;

/// One animated light-streak particle.
///
/// A beam is a `width x length` stroke anchored at `pos` (the top-center of
/// the stroke in local space), rotated by `angle_deg`, ascending `speed`
/// pixels per frame while its alpha breathes on the `pulse` oscillator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Beam {
    pub pos: Point,
    pub width: f64,
    /// Fixed at creation to 2.5x the surface height captured at the pool's
    /// last (re)initialization; never updated afterwards.
    pub length: f64,
    pub angle_deg: f64,
    pub speed: f64,
    /// Base alpha before pulse and intensity scaling.
    pub opacity: f64,
    pub hue: f64,
    pub pulse: f64,
    pub pulse_speed: f64,
}

impl Beam {
    /// Creation algorithm: loose randomness for an organic initial scatter.
    ///
    /// Beams start across an area 50% larger than the surface, offset so
    /// roughly a quarter can sit off-canvas on either side.
    pub fn spawn(rng: &mut Rng64, surface: SurfaceSize, palette: &Palette) -> Self {
        let w = f64::from(surface.width);
        let h = f64::from(surface.height);

        let angle_deg = rng.next_f64_in(-35.0, 10.0);
        let x = rng.next_f64_01() * w * 1.5 - w * 0.25;
        let y = rng.next_f64_01() * h * 1.5 - h * 0.25;
        let width = rng.next_f64_in(30.0, 60.0);
        let speed = rng.next_f64_in(0.6, 1.2);
        let opacity = rng.next_f64_in(0.12, 0.16);
        let hue = palette.hue_base + rng.next_f64_01() * palette.hue_range;
        let pulse = rng.next_f64_01() * std::f64::consts::TAU;
        let pulse_speed = rng.next_f64_in(0.02, 0.03);

        Self {
            pos: Point::new(x, y),
            width,
            length: h * 2.5,
            angle_deg,
            speed,
            opacity,
            hue,
            pulse,
            pulse_speed,
        }
    }

    /// Whether the beam has fully scrolled past the top of the surface.
    pub fn is_spent(&self) -> bool {
        self.pos.y + self.length < -RESPAWN_MARGIN_PX
    }

    /// Respawn in place below the bottom edge.
    ///
    /// Steady-state placement is tighter than creation: beams land in one of
    /// 3 jittered lanes and take an evenly spread hue keyed by pool index, so
    /// the settled animation reads as distributed light columns. `angle_deg`,
    /// `length`, `pulse`, and `pulse_speed` keep their creation values.
    pub fn recycle(
        &mut self,
        rng: &mut Rng64,
        index: usize,
        total: usize,
        surface: SurfaceSize,
        palette: &Palette,
    ) {
        let w = f64::from(surface.width);
        let h = f64::from(surface.height);

        let column = (index % 3) as f64;
        let spacing = w / 3.0;

        self.pos.y = h + RESPAWN_MARGIN_PX;
        self.pos.x = column * spacing + spacing / 2.0 + (rng.next_f64_01() - 0.5) * spacing * 0.5;
        self.width = rng.next_f64_in(100.0, 100.0);
        self.speed = rng.next_f64_in(0.5, 0.4);
        self.hue = palette.hue_base + (index as f64 * palette.hue_range) / total as f64;
        self.opacity = rng.next_f64_in(0.2, 0.1);
    }

    /// Alpha after pulse modulation and the intensity profile.
    pub fn shimmer_alpha(&self, intensity_factor: f64) -> f64 {
        self.opacity * (0.8 + self.pulse.sin() * 0.2) * intensity_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;

    fn surface() -> SurfaceSize {
        SurfaceSize {
            width: 300,
            height: 200,
        }
    }

    #[test]
    fn spawn_respects_creation_bands() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(11);
        for _ in 0..500 {
            let b = Beam::spawn(&mut rng, surface(), &palette);
            assert!((-35.0..-25.0).contains(&b.angle_deg));
            assert!((-75.0..375.0).contains(&b.pos.x)); // [-W*0.25, W*1.25)
            assert!((-50.0..250.0).contains(&b.pos.y)); // [-H*0.25, H*1.25)
            assert!((30.0..90.0).contains(&b.width));
            assert_eq!(b.length, 500.0); // H * 2.5
            assert!((0.6..1.8).contains(&b.speed));
            assert!((0.12..0.28).contains(&b.opacity));
            assert!((210.0..260.0).contains(&b.hue));
            assert!((0.0..std::f64::consts::TAU).contains(&b.pulse));
            assert!((0.02..0.05).contains(&b.pulse_speed));
        }
    }

    #[test]
    fn spent_threshold_is_strict() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(1);
        let mut b = Beam::spawn(&mut rng, surface(), &palette);

        b.pos.y = -RESPAWN_MARGIN_PX - b.length;
        assert!(!b.is_spent());

        b.pos.y = -RESPAWN_MARGIN_PX - b.length - f64::EPSILON * 1e3;
        assert!(b.is_spent());
    }

    #[test]
    fn recycle_respects_steady_state_bands_and_lanes() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(5);
        let total = 30;
        for index in 0..total {
            let mut b = Beam::spawn(&mut rng, surface(), &palette);
            b.recycle(&mut rng, index, total, surface(), &palette);

            assert_eq!(b.pos.y, 300.0); // H + margin
            assert!((100.0..200.0).contains(&b.width));
            assert!((0.5..0.9).contains(&b.speed));
            assert!((0.2..0.3).contains(&b.opacity));

            let spacing = 100.0;
            let center = (index % 3) as f64 * spacing + spacing / 2.0;
            assert!((b.pos.x - center).abs() <= spacing * 0.25);
        }
    }

    #[test]
    fn recycle_hue_is_deterministic_spread() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(9);
        let total = 30;

        let mut first = Beam::spawn(&mut rng, surface(), &palette);
        first.recycle(&mut rng, 0, total, surface(), &palette);
        assert_eq!(first.hue, 210.0);

        let mut last = Beam::spawn(&mut rng, surface(), &palette);
        last.recycle(&mut rng, total - 1, total, surface(), &palette);
        let expected = 210.0 + 50.0 * (total as f64 - 1.0) / total as f64;
        assert!((last.hue - expected).abs() < 1e-12);
    }

    #[test]
    fn recycle_preserves_angle_length_and_pulse() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(17);
        let mut b = Beam::spawn(&mut rng, surface(), &palette);
        let before = b;

        b.recycle(&mut rng, 4, 30, surface(), &palette);
        assert_eq!(b.angle_deg, before.angle_deg);
        assert_eq!(b.length, before.length);
        assert_eq!(b.pulse, before.pulse);
        assert_eq!(b.pulse_speed, before.pulse_speed);
    }

    #[test]
    fn shimmer_alpha_matches_profile_exactly() {
        let palette = Theme::Light.palette();
        let mut rng = Rng64::new(3);
        let mut b = Beam::spawn(&mut rng, surface(), &palette);
        b.opacity = 0.2;
        b.pulse = 0.0;

        // 0.2 * 0.8 * 0.85
        let a = b.shimmer_alpha(crate::Intensity::Medium.factor());
        assert!((a - 0.136).abs() < 1e-12);
    }
}
