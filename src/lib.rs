//! Beamfield is a procedural light-beam background animation renderer.
//!
//! A [`BeamField`] owns a fixed-size pool of beam particles that drift upward,
//! pulse, and recycle into evenly spaced columns once they scroll off the top
//! of the surface. A [`FieldRenderer`] turns the field into premultiplied
//! RGBA8 pixels ([`FrameRGBA`]): rotated linear-gradient strokes painted in
//! pool order, softened by Gaussian blur passes.
//!
//! # Pipeline overview
//!
//! 1. **Size**: `Viewport -> SurfaceSize` (physical pixels, device pixel ratio
//!    applied once per sizing event)
//! 2. **Simulate**: `BeamField::tick` (ascend, pulse, recycle in place)
//! 3. **Paint**: beams in pool order onto a premultiplied RGBA8 frame
//! 4. **Soften**: field blur pass, then surface blur pass
//! 5. **Encode** (optional): stream frames to the system `ffmpeg` binary
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: all randomness flows through a seeded
//!   [`Rng64`]; a given [`Scene`] renders bit-identically.
//! - **Premultiplied RGBA8** end-to-end.
//!
//! The whole effect is decorative: the host layers the frames behind its own
//! content. [`runtime::Animator`] models the host-facing lifecycle
//! (advance / resize / dispose) without assuming a real display loop.
#![forbid(unsafe_code)]

pub mod config;
pub mod encode;
pub mod field;
pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod runtime;

pub use config::{BlurOpts, FieldOpts, Intensity, Palette, Scene, Theme};
pub use encode::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use field::beam::Beam;
pub use field::pool::BeamField;
pub use foundation::color::Hsla;
pub use foundation::core::{SurfaceSize, Viewport};
pub use foundation::error::{BeamError, BeamResult};
pub use foundation::math::Rng64;
pub use pipeline::{RenderThreading, RenderToMp4Opts, render_frame, render_frames, render_to_mp4};
pub use render::{FieldRenderer, FrameRGBA};
pub use runtime::{Animator, AnimatorState, CountdownClock, FrameClock, run};
