//! MP4 output by streaming raw frames to the system `ffmpeg` binary.

use std::{
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use crate::{
    foundation::error::{BeamError, BeamResult},
    render::FrameRGBA,
};

#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub out_path: PathBuf,
    pub overwrite: bool,
}

impl EncodeConfig {
    pub fn validate(&self) -> BeamResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BeamError::validation("encode width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(BeamError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // Default settings target yuv420p output for maximum compatibility.
            return Err(BeamError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> BeamResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams premultiplied RGBA8 frames into an `ffmpeg` child process,
/// flattening alpha over `bg_rgba` on the way out.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> BeamResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(BeamError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(BeamError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        // The system `ffmpeg` binary is used on purpose: no native FFmpeg dev
        // header/lib requirements.
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if cfg.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &cfg.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&cfg.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            BeamError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BeamError::render("failed to open ffmpeg stdin (unexpected)"))?;

        Ok(Self {
            scratch: vec![0u8; (cfg.width * cfg.height * 4) as usize],
            cfg,
            bg_rgba,
            child,
            stdin: Some(stdin),
        })
    }

    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> BeamResult<()> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(BeamError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if !frame.premultiplied {
            return Err(BeamError::validation(
                "encoder expects premultiplied frames",
            ));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(BeamError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_premul_over(&mut self.scratch, &frame.data, self.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(BeamError::render("ffmpeg encoder is already finalized"));
        };

        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| BeamError::render(format!("failed to write frame to ffmpeg stdin: {e}")))?;

        Ok(())
    }

    pub fn finish(mut self) -> BeamResult<()> {
        drop(self.stdin.take());

        let output = self
            .child
            .wait_with_output()
            .map_err(|e| BeamError::render(format!("failed to wait for ffmpeg to finish: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BeamError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Flatten premultiplied RGBA8 over an opaque background color.
fn flatten_premul_over(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> BeamResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BeamError::validation(
            "flatten_premul_over expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }

    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
