//! Host-facing lifecycle: an animator that owns the field, reacts to resize
//! events, and stops cleanly on teardown.

use crate::{
    config::{BlurOpts, FieldOpts},
    field::pool::BeamField,
    foundation::{core::Viewport, error::BeamResult},
    render::{FieldRenderer, FrameRGBA},
};

/// Lifecycle state of an [`Animator`]. There is no paused state: a mounted
/// animator runs until it is disposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    Running,
    Stopped,
}

/// Injected scheduling capability standing in for the host's "run before next
/// repaint" primitive.
///
/// `tick` blocks until the next frame slot and returns `false` once the host
/// stops granting slots. [`CountdownClock`] grants a fixed number of slots,
/// which makes single-stepping in tests deterministic.
pub trait FrameClock {
    fn tick(&mut self) -> bool;
}

/// Grants exactly `frames` slots, then closes.
#[derive(Clone, Copy, Debug)]
pub struct CountdownClock {
    remaining: u64,
}

impl CountdownClock {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl FrameClock for CountdownClock {
    fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

struct Mounted {
    field: BeamField,
    renderer: FieldRenderer,
}

/// Drives a [`BeamField`] through the mount / animate / teardown lifecycle.
///
/// Each `advance` call is one frame: tick the simulation, render. Resize
/// events regenerate the whole pool. After `dispose`, the animator produces
/// no further frames and ignores resize events, mirroring a host that has
/// cancelled its frame callback and removed its resize listener.
pub struct Animator {
    mounted: Option<Mounted>,
    state: AnimatorState,
}

impl Animator {
    pub fn new(viewport: Viewport, opts: FieldOpts, blur: BlurOpts) -> BeamResult<Self> {
        let field = BeamField::new(viewport.surface_size(), &opts)?;
        let renderer = FieldRenderer::new(opts.intensity, blur, None)?;
        Ok(Self {
            mounted: Some(Mounted { field, renderer }),
            state: AnimatorState::Running,
        })
    }

    /// The surface-acquisition failure policy: no drawing context means no
    /// pool, no frames, and no error. Every operation on an inert animator is
    /// a silent no-op.
    pub fn inert() -> Self {
        Self {
            mounted: None,
            state: AnimatorState::Stopped,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// The owned field, if one was mounted. Stays readable after disposal so
    /// hosts can inspect the final state.
    pub fn field(&self) -> Option<&BeamField> {
        self.mounted.as_ref().map(|m| &m.field)
    }

    /// Advance one frame and render it. Returns `Ok(None)` once stopped or
    /// inert; no frame is ever produced after [`Animator::dispose`].
    pub fn advance(&mut self) -> BeamResult<Option<FrameRGBA>> {
        if self.state == AnimatorState::Stopped {
            return Ok(None);
        }
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(None);
        };

        mounted.field.tick();
        let frame = mounted.renderer.render(&mounted.field)?;
        Ok(Some(frame))
    }

    /// Handle a viewport-resize event by regenerating the pool. Ignored after
    /// disposal: the listener is detached, so teardown-then-resize must not
    /// mutate anything.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        if let Some(mounted) = self.mounted.as_mut() {
            mounted.field.resize(viewport.surface_size());
        }
    }

    /// Teardown: cancel the pending frame and detach from resize events.
    /// Idempotent.
    pub fn dispose(&mut self) {
        if self.state == AnimatorState::Running {
            tracing::debug!("disposing animator");
        }
        self.state = AnimatorState::Stopped;
    }
}

/// Drive `animator` until the clock closes or the animator stops, delivering
/// each frame to `on_frame`. Returns the number of frames produced.
pub fn run<F>(
    animator: &mut Animator,
    clock: &mut dyn FrameClock,
    mut on_frame: F,
) -> BeamResult<u64>
where
    F: FnMut(&FrameRGBA),
{
    let mut frames = 0u64;
    while clock.tick() {
        match animator.advance()? {
            Some(frame) => {
                on_frame(&frame);
                frames += 1;
            }
            None => break,
        }
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(64.0, 48.0, 1.0).unwrap()
    }

    fn no_blur() -> BlurOpts {
        BlurOpts {
            field_radius_px: 0,
            surface_radius_px: 0,
        }
    }

    #[test]
    fn advance_produces_frames_while_running() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        assert_eq!(anim.state(), AnimatorState::Running);

        let frame = anim.advance().unwrap().unwrap();
        assert_eq!(frame.width, 64);
        assert_eq!(frame.height, 48);
    }

    #[test]
    fn dispose_stops_frames_and_detaches_resize() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        anim.advance().unwrap();

        anim.dispose();
        assert_eq!(anim.state(), AnimatorState::Stopped);
        assert!(anim.advance().unwrap().is_none());

        let before: Vec<_> = anim.field().unwrap().beams().to_vec();
        anim.on_resize(Viewport::new(640.0, 480.0, 2.0).unwrap());
        assert_eq!(anim.field().unwrap().beams(), &before[..]);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        anim.dispose();
        anim.dispose();
        assert!(anim.advance().unwrap().is_none());
    }

    #[test]
    fn inert_animator_is_a_silent_no_op() {
        let mut anim = Animator::inert();
        assert_eq!(anim.state(), AnimatorState::Stopped);
        assert!(anim.field().is_none());
        assert!(anim.advance().unwrap().is_none());
        anim.on_resize(viewport());
        anim.dispose();
    }

    #[test]
    fn run_honors_the_clock() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        let mut clock = CountdownClock::new(5);
        let mut seen = 0u64;
        let produced = run(&mut anim, &mut clock, |_| seen += 1).unwrap();
        assert_eq!(produced, 5);
        assert_eq!(seen, 5);
    }

    #[test]
    fn run_stops_early_when_disposed() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        anim.dispose();
        let mut clock = CountdownClock::new(5);
        let produced = run(&mut anim, &mut clock, |_| {}).unwrap();
        assert_eq!(produced, 0);
    }

    #[test]
    fn resize_while_running_regenerates_the_pool() {
        let mut anim = Animator::new(viewport(), FieldOpts::default(), no_blur()).unwrap();
        let before: Vec<_> = anim
            .field()
            .unwrap()
            .beams()
            .iter()
            .map(|b| b.pos)
            .collect();

        anim.on_resize(Viewport::new(100.0, 80.0, 1.0).unwrap());
        let field = anim.field().unwrap();
        assert_eq!(field.surface().width, 100);
        for b in field.beams() {
            assert!(!before.contains(&b.pos));
        }
    }
}
