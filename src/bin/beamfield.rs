use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "beamfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render the animation as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Frame count override (defaults to the scene's duration).
    #[arg(long)]
    frames: Option<u64>,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,

    /// Enable frame-level parallelism for rasterization.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = beamfield::Scene::from_path(&args.scene)?;
    let frame = beamfield::render_frame(&scene, args.frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = beamfield::Scene::from_path(&args.scene)?;

    let opts = beamfield::RenderToMp4Opts {
        frames: args.frames,
        overwrite: args.overwrite,
        threading: beamfield::RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
        ..beamfield::RenderToMp4Opts::default()
    };

    let encoded = beamfield::render_to_mp4(&scene, &args.out, opts)?;

    eprintln!("wrote {} ({encoded} frames)", args.out.display());
    Ok(())
}
