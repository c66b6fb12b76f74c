use crate::foundation::error::{BeamError, BeamResult};

/// Host viewport in logical (CSS) pixels plus the device pixel ratio.
///
/// The simulation and rasterizer never see logical pixels: a `Viewport` is
/// collapsed into a [`SurfaceSize`] once per sizing event, and everything
/// downstream works in physical surface space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> BeamResult<Self> {
        let v = Self { width, height, dpr };
        v.validate()?;
        Ok(v)
    }

    pub fn validate(&self) -> BeamResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(BeamError::validation("viewport width must be finite and > 0"));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(BeamError::validation(
                "viewport height must be finite and > 0",
            ));
        }
        if !self.dpr.is_finite() || self.dpr <= 0.0 {
            return Err(BeamError::validation("viewport dpr must be finite and > 0"));
        }
        Ok(())
    }

    /// Physical pixel dimensions of the drawable surface.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: (self.width * self.dpr).round().max(1.0) as u32,
            height: (self.height * self.dpr).round().max(1.0) as u32,
        }
    }
}

/// Drawable surface dimensions in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn validate(&self) -> BeamResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BeamError::validation("surface width/height must be > 0"));
        }
        Ok(())
    }

    /// Byte length of a premultiplied RGBA8 buffer for this surface.
    pub fn rgba8_len(&self) -> BeamResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| BeamError::validation("surface buffer size overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_non_positive_dims() {
        assert!(Viewport::new(0.0, 100.0, 1.0).is_err());
        assert!(Viewport::new(100.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(100.0, 100.0, 0.0).is_err());
        assert!(Viewport::new(f64::NAN, 100.0, 1.0).is_err());
    }

    #[test]
    fn surface_size_applies_dpr_with_rounding() {
        let v = Viewport::new(100.4, 50.0, 2.0).unwrap();
        let s = v.surface_size();
        assert_eq!(s.width, 201);
        assert_eq!(s.height, 100);
    }

    #[test]
    fn rgba8_len_is_w_h_4() {
        let s = SurfaceSize {
            width: 3,
            height: 2,
        };
        assert_eq!(s.rgba8_len().unwrap(), 24);
    }
}
