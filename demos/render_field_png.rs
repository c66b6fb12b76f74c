use std::path::PathBuf;

use beamfield::{BlurOpts, FieldOpts, Intensity, Scene, Theme, Viewport};

fn build_scene() -> anyhow::Result<Scene> {
    Ok(Scene {
        viewport: Viewport::new(640.0, 360.0, 1.0)?,
        field: FieldOpts {
            intensity: Intensity::Medium,
            theme: Theme::Light,
            minimum_beams: 20,
            seed: 7,
        },
        blur: BlurOpts {
            field_radius_px: 12,
            surface_radius_px: 5,
        },
        background: Some([255, 255, 255, 255]),
        fps: 30,
        duration_frames: 1,
    })
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let scene = build_scene()?;
    let frame = beamfield::render_frame(&scene, 0)?;

    let out_dir = PathBuf::from("target");
    std::fs::create_dir_all(&out_dir)?;
    let out_path = out_dir.join("beamfield_demo.png");

    image::save_buffer_with_format(
        &out_path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}
