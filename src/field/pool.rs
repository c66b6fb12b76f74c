use crate::{
    config::{FieldOpts, Palette},
    field::beam::Beam,
    foundation::{core::SurfaceSize, error::BeamResult, math::Rng64},
};

/// The fixed-size collection of beams owned by the renderer.
///
/// The pool is created fresh for every sizing event (initial mount and each
/// resize) and replaced wholesale; individual beams are recycled in place when
/// they leave the surface. Pool length never changes between sizing events.
#[derive(Clone, Debug)]
pub struct BeamField {
    beams: Vec<Beam>,
    surface: SurfaceSize,
    palette: Palette,
    rng: Rng64,
}

impl BeamField {
    /// Build the full pool for `surface`, sized `round(minimum_beams * 1.5)`.
    pub fn new(surface: SurfaceSize, opts: &FieldOpts) -> BeamResult<Self> {
        opts.validate()?;
        surface.validate()?;

        let mut field = Self {
            beams: Vec::new(),
            surface,
            palette: opts.theme.palette(),
            rng: Rng64::new(opts.seed),
        };
        field.rebuild_pool(opts.pool_size());
        Ok(field)
    }

    fn rebuild_pool(&mut self, size: usize) {
        tracing::debug!(
            width = self.surface.width,
            height = self.surface.height,
            beams = size,
            "building beam pool"
        );
        self.beams = (0..size)
            .map(|_| Beam::spawn(&mut self.rng, self.surface, &self.palette))
            .collect();
    }

    /// React to a sizing event: adopt the new surface and regenerate the
    /// entire pool. No partial update; no beam survives a resize.
    pub fn resize(&mut self, surface: SurfaceSize) {
        if surface.validate().is_err() {
            return;
        }
        self.surface = surface;
        let size = self.beams.len();
        self.rebuild_pool(size);
    }

    /// Advance the simulation one frame, in pool order: ascend, advance the
    /// pulse oscillator, and recycle any beam that has fully left the top.
    pub fn tick(&mut self) {
        let total = self.beams.len();
        for index in 0..total {
            let beam = &mut self.beams[index];
            beam.pos.y -= beam.speed;
            beam.pulse += beam.pulse_speed;

            if beam.is_spent() {
                beam.recycle(&mut self.rng, index, total, self.surface, &self.palette);
            }
        }
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn len(&self) -> usize {
        self.beams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beams.is_empty()
    }
}
