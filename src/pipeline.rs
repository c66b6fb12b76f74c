//! One-shot and batch rendering entry points over a [`Scene`].

use rayon::prelude::*;

use crate::{
    config::Scene,
    encode::{EncodeConfig, FfmpegEncoder},
    field::pool::BeamField,
    foundation::error::{BeamError, BeamResult},
    render::{FieldRenderer, FrameRGBA},
};

fn build_field_and_renderer(scene: &Scene) -> BeamResult<(BeamField, FieldRenderer)> {
    scene.validate()?;
    let field = BeamField::new(scene.viewport.surface_size(), &scene.field)?;
    let renderer = FieldRenderer::new(scene.field.intensity, scene.blur, scene.background)?;
    Ok((field, renderer))
}

/// Simulate a fresh field up to `frame` (0-based) and render that frame.
///
/// Frame N is the field state after N+1 ticks: the simulation advances before
/// each draw, so even frame 0 has moved once.
#[tracing::instrument(skip(scene))]
pub fn render_frame(scene: &Scene, frame: u64) -> BeamResult<FrameRGBA> {
    let (mut field, renderer) = build_field_and_renderer(scene)?;
    for _ in 0..=frame {
        field.tick();
    }
    renderer.render(&field)
}

/// Render the first `frames` frames of the scene into memory.
pub fn render_frames(scene: &Scene, frames: u64) -> BeamResult<Vec<FrameRGBA>> {
    if frames == 0 {
        return Err(BeamError::validation("frame count must be non-zero"));
    }
    let (mut field, renderer) = build_field_and_renderer(scene)?;
    let mut out = Vec::with_capacity(frames.min(4096) as usize);
    for _ in 0..frames {
        field.tick();
        out.push(renderer.render(&field)?);
    }
    Ok(out)
}

/// Threading and chunking configuration for batch rendering.
///
/// The simulation itself always advances sequentially (ticks are stateful);
/// `parallel` fans the per-frame rasterization and blur out on a rayon pool,
/// one chunk of snapshotted field states at a time, preserving frame order.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame count override; `None` renders `scene.duration_frames`.
    pub frames: Option<u64>,
    /// Background color to flatten alpha over (opaque RGBA8).
    pub bg_rgba: [u8; 4],
    /// Whether to overwrite the output file if it already exists.
    pub overwrite: bool,
    pub threading: RenderThreading,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            frames: None,
            bg_rgba: [255, 255, 255, 255],
            overwrite: true,
            threading: RenderThreading::default(),
        }
    }
}

/// Render the scene to an MP4 by invoking the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`; this is checked up front.
/// Returns the number of frames encoded.
#[tracing::instrument(skip_all)]
pub fn render_to_mp4(
    scene: &Scene,
    out_path: impl Into<std::path::PathBuf>,
    opts: RenderToMp4Opts,
) -> BeamResult<u64> {
    let (mut field, renderer) = build_field_and_renderer(scene)?;
    let duration = opts.frames.unwrap_or(scene.duration_frames);
    if duration == 0 {
        return Err(BeamError::validation("frame count must be non-zero"));
    }

    let surface = field.surface();
    let cfg = EncodeConfig {
        width: surface.width,
        height: surface.height,
        fps: scene.fps,
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    };
    let mut enc = FfmpegEncoder::new(cfg, opts.bg_rgba)?;

    let mut encoded = 0u64;
    if !opts.threading.parallel {
        for _ in 0..duration {
            field.tick();
            enc.encode_frame(&renderer.render(&field)?)?;
            encoded += 1;
        }
    } else {
        let pool = build_thread_pool(opts.threading.threads)?;
        let chunk_size = normalized_chunk_size(opts.threading.chunk_size);

        let mut remaining = duration;
        while remaining > 0 {
            let n = remaining.min(chunk_size);
            let mut snapshots = Vec::with_capacity(n as usize);
            for _ in 0..n {
                field.tick();
                snapshots.push(field.clone());
            }

            let frames: Vec<BeamResult<FrameRGBA>> = pool.install(|| {
                snapshots
                    .par_iter()
                    .map(|snapshot| renderer.render(snapshot))
                    .collect()
            });
            for frame in frames {
                enc.encode_frame(&frame?)?;
                encoded += 1;
            }
            remaining -= n;
        }
    }

    enc.finish()?;
    Ok(encoded)
}

fn build_thread_pool(threads: Option<usize>) -> BeamResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BeamError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BeamError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}
