use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::Viewport,
    error::{BeamError, BeamResult},
};

/// Named multiplier profile scaling the rendered opacity of the whole effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Subtle,
    Medium,
    #[default]
    Strong,
}

impl Intensity {
    /// Alpha factor applied on top of each beam's own opacity.
    pub fn factor(self) -> f64 {
        match self {
            Self::Subtle => 0.7,
            Self::Medium => 0.85,
            Self::Strong => 1.0,
        }
    }
}

/// Visual mode selecting the beam palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                hue_base: 210.0,
                hue_range: 50.0,
                saturation: 0.75,
                lightness: 0.45,
            },
            Self::Dark => Palette {
                hue_base: 190.0,
                hue_range: 70.0,
                saturation: 0.85,
                lightness: 0.65,
            },
        }
    }
}

/// Hue band and fixed saturation/lightness the beams draw their color from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub hue_base: f64,
    pub hue_range: f64,
    /// Saturation in [0, 1].
    pub saturation: f64,
    /// Lightness in [0, 1].
    pub lightness: f64,
}

/// Construction-time options for a [`BeamField`](crate::BeamField).
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FieldOpts {
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub theme: Theme,
    /// Baseline beam count; the effective pool holds `round(minimum_beams * 1.5)`.
    #[serde(default = "default_minimum_beams")]
    pub minimum_beams: u32,
    /// Seed for the field's random stream.
    #[serde(default)]
    pub seed: u64,
}

fn default_minimum_beams() -> u32 {
    20
}

impl Default for FieldOpts {
    fn default() -> Self {
        Self {
            intensity: Intensity::default(),
            theme: Theme::default(),
            minimum_beams: default_minimum_beams(),
            seed: 0,
        }
    }
}

impl FieldOpts {
    pub fn validate(&self) -> BeamResult<()> {
        if self.minimum_beams == 0 {
            return Err(BeamError::validation("minimum_beams must be >= 1"));
        }
        Ok(())
    }

    /// Effective pool size, fixed per sizing event.
    pub fn pool_size(&self) -> usize {
        (f64::from(self.minimum_beams) * 1.5).round() as usize
    }
}

/// The two blur passes softening the rendered field.
///
/// Two Gaussian passes run in sequence: a heavy one over the painted field,
/// then a lighter surface-level one. Each is independently tunable; radius 0
/// disables a pass.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct BlurOpts {
    #[serde(default = "default_field_radius")]
    pub field_radius_px: u32,
    #[serde(default = "default_surface_radius")]
    pub surface_radius_px: u32,
}

fn default_field_radius() -> u32 {
    35
}

fn default_surface_radius() -> u32 {
    15
}

impl Default for BlurOpts {
    fn default() -> Self {
        Self {
            field_radius_px: default_field_radius(),
            surface_radius_px: default_surface_radius(),
        }
    }
}

impl BlurOpts {
    pub fn validate(&self) -> BeamResult<()> {
        if self.field_radius_px > 256 || self.surface_radius_px > 256 {
            return Err(BeamError::validation("blur radius must be <= 256"));
        }
        Ok(())
    }
}

/// A complete renderable description: viewport, field options, post passes,
/// and timing for encoded output.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub viewport: Viewport,
    #[serde(default)]
    pub field: FieldOpts,
    #[serde(default)]
    pub blur: BlurOpts,
    /// Clear color as premultiplied RGBA8; `None` leaves the frame transparent
    /// for the host to layer.
    #[serde(default)]
    pub background: Option<[u8; 4]>,
    pub fps: u32,
    pub duration_frames: u64,
}

impl Scene {
    /// Load a scene from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> BeamResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read scene file '{}'", path.display()))?;
        let scene: Scene = serde_json::from_slice(&bytes)
            .map_err(|e| BeamError::serde(format!("parse scene '{}': {e}", path.display())))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> BeamResult<()> {
        self.viewport.validate()?;
        self.field.validate()?;
        self.blur.validate()?;
        if self.fps == 0 {
            return Err(BeamError::validation("fps must be > 0"));
        }
        if self.duration_frames == 0 {
            return Err(BeamError::validation("duration must be > 0 frames"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_factors_match_profiles() {
        assert_eq!(Intensity::Subtle.factor(), 0.7);
        assert_eq!(Intensity::Medium.factor(), 0.85);
        assert_eq!(Intensity::Strong.factor(), 1.0);
        assert_eq!(Intensity::default(), Intensity::Strong);
    }

    #[test]
    fn light_palette_matches_single_mode_constants() {
        let p = Theme::Light.palette();
        assert_eq!(p.hue_base, 210.0);
        assert_eq!(p.hue_range, 50.0);
        assert_eq!(p.saturation, 0.75);
        assert_eq!(p.lightness, 0.45);
    }

    #[test]
    fn pool_size_rounds_the_multiplier() {
        let opts = FieldOpts::default();
        assert_eq!(opts.pool_size(), 30);

        let odd = FieldOpts {
            minimum_beams: 7,
            ..FieldOpts::default()
        };
        assert_eq!(odd.pool_size(), 11); // round(10.5)
    }

    #[test]
    fn validation_rejects_empty_pool_and_huge_blur() {
        let opts = FieldOpts {
            minimum_beams: 0,
            ..FieldOpts::default()
        };
        assert!(opts.validate().is_err());

        let blur = BlurOpts {
            field_radius_px: 300,
            surface_radius_px: 0,
        };
        assert!(blur.validate().is_err());
    }

    #[test]
    fn scene_validate_checks_timing() {
        let scene = Scene {
            viewport: Viewport::new(100.0, 100.0, 1.0).unwrap(),
            field: FieldOpts::default(),
            blur: BlurOpts::default(),
            background: None,
            fps: 0,
            duration_frames: 10,
        };
        assert!(scene.validate().is_err());
    }

    #[test]
    fn scene_json_defaults_apply() {
        let json = r#"{
            "viewport": { "width": 640.0, "height": 360.0, "dpr": 1.0 },
            "fps": 30,
            "duration_frames": 60
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.field.minimum_beams, 20);
        assert_eq!(scene.field.intensity, Intensity::Strong);
        assert_eq!(scene.blur.field_radius_px, 35);
        assert!(scene.background.is_none());
    }
}
