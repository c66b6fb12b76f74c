//! Turning a [`BeamField`] into pixels.

pub mod blur;
pub(crate) mod composite;
pub(crate) mod paint;

use crate::{
    config::{BlurOpts, Intensity},
    field::pool::BeamField,
    foundation::error::BeamResult,
};

/// One rendered frame: RGBA8 pixels, premultiplied.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Paints a beam field into premultiplied RGBA8 frames.
///
/// Per frame: clear, paint every beam in pool order (later indices composite
/// over earlier ones), then run the field and surface blur passes.
#[derive(Clone, Debug)]
pub struct FieldRenderer {
    intensity: Intensity,
    blur: BlurOpts,
    clear_rgba: Option<[u8; 4]>,
}

impl FieldRenderer {
    /// `clear_rgba` is a premultiplied RGBA8 clear color; `None` leaves the
    /// frame transparent for the host to layer.
    pub fn new(
        intensity: Intensity,
        blur: BlurOpts,
        clear_rgba: Option<[u8; 4]>,
    ) -> BeamResult<Self> {
        blur.validate()?;
        Ok(Self {
            intensity,
            blur,
            clear_rgba,
        })
    }

    pub fn render(&self, field: &BeamField) -> BeamResult<FrameRGBA> {
        let surface = field.surface();
        let len = surface.rgba8_len()?;

        let mut data = vec![0u8; len];
        if let Some(clear) = self.clear_rgba {
            for px in data.chunks_exact_mut(4) {
                px.copy_from_slice(&clear);
            }
        }

        let factor = self.intensity.factor();
        for beam in field.beams() {
            paint::paint_beam(&mut data, surface, beam, field.palette(), factor);
        }

        // Soften the whole surface twice: the heavy field pass, then the
        // lighter surface-level pass.
        for radius in [self.blur.field_radius_px, self.blur.surface_radius_px] {
            if radius > 0 {
                data = blur::blur_rgba8_premul(&data, surface.width, surface.height, radius, 0.0)?;
            }
        }

        Ok(FrameRGBA {
            width: surface.width,
            height: surface.height,
            data,
            premultiplied: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldOpts;
    use crate::foundation::core::SurfaceSize;

    fn no_blur() -> BlurOpts {
        BlurOpts {
            field_radius_px: 0,
            surface_radius_px: 0,
        }
    }

    fn tiny_field(seed: u64) -> BeamField {
        let opts = FieldOpts {
            seed,
            ..FieldOpts::default()
        };
        BeamField::new(
            SurfaceSize {
                width: 48,
                height: 32,
            },
            &opts,
        )
        .unwrap()
    }

    #[test]
    fn render_matches_surface_and_is_premultiplied() {
        let field = tiny_field(1);
        let renderer = FieldRenderer::new(Intensity::Medium, no_blur(), None).unwrap();
        let frame = renderer.render(&field).unwrap();

        assert_eq!(frame.width, 48);
        assert_eq!(frame.height, 32);
        assert_eq!(frame.data.len(), 48 * 32 * 4);
        assert!(frame.premultiplied);
        assert!(frame.data.iter().any(|&b| b != 0));
    }

    #[test]
    fn render_is_deterministic_for_a_seed() {
        let renderer = FieldRenderer::new(Intensity::Strong, no_blur(), None).unwrap();
        let a = renderer.render(&tiny_field(9)).unwrap();
        let b = renderer.render(&tiny_field(9)).unwrap();
        assert_eq!(a.data, b.data);
    }

    #[test]
    fn clear_color_fills_uncovered_pixels() {
        let field = tiny_field(2);
        let clear = [255, 255, 255, 255];
        let renderer = FieldRenderer::new(Intensity::Subtle, no_blur(), Some(clear)).unwrap();
        let frame = renderer.render(&field).unwrap();

        // Every pixel is at least the opaque clear alpha.
        assert!(frame.data.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn renderer_rejects_oversized_blur() {
        let blur = BlurOpts {
            field_radius_px: 1000,
            surface_radius_px: 0,
        };
        assert!(FieldRenderer::new(Intensity::Strong, blur, None).is_err());
    }
}
