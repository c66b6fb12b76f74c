use kurbo::{Affine, Point, Rect};

use crate::{
    config::Palette,
    field::beam::Beam,
    foundation::{
        color::{Hsla, premul_rgb8},
        core::SurfaceSize,
    },
    render::composite::over_px,
};

/// Alpha stops along the beam length, interpolated linearly in between.
/// Fades in over the leading tenth, holds through the middle, fades out.
const ALPHA_STOPS: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.1, 0.5),
    (0.4, 1.0),
    (0.6, 1.0),
    (0.9, 0.5),
    (1.0, 0.0),
];

pub(crate) fn gradient_profile(t: f64) -> f64 {
    if !(0.0..=1.0).contains(&t) {
        return 0.0;
    }
    for pair in ALPHA_STOPS.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let u = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return v0 + (v1 - v0) * u;
        }
    }
    0.0
}

/// Paint one beam onto a premultiplied RGBA8 buffer, compositing source-over.
///
/// The stroke is a `width x length` rectangle in beam-local space (centered
/// horizontally on the origin, extending downward), placed by
/// `translate(pos) * rotate(angle)`. Pixels are resolved by mapping their
/// centers back into local space through the inverse transform.
pub(crate) fn paint_beam(
    dst: &mut [u8],
    surface: SurfaceSize,
    beam: &Beam,
    palette: &Palette,
    intensity_factor: f64,
) {
    let alpha = beam.shimmer_alpha(intensity_factor).clamp(0.0, 1.0);
    if alpha <= 0.0 || beam.width <= 0.0 || beam.length <= 0.0 {
        return;
    }

    let rgb = Hsla::new(beam.hue, palette.saturation, palette.lightness, 1.0).to_rgb8();

    let affine = Affine::translate(beam.pos.to_vec2()) * Affine::rotate(beam.angle_deg.to_radians());
    let inv = affine.inverse();

    let half_w = beam.width / 2.0;
    let local = Rect::new(-half_w, 0.0, half_w, beam.length);
    let bbox = affine.transform_rect_bbox(local);

    let x0 = bbox.x0.floor().max(0.0) as usize;
    let y0 = bbox.y0.floor().max(0.0) as usize;
    let x1 = (bbox.x1.ceil().min(f64::from(surface.width)) as usize).min(surface.width as usize);
    let y1 = (bbox.y1.ceil().min(f64::from(surface.height)) as usize).min(surface.height as usize);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let row_bytes = surface.width as usize * 4;
    for y in y0..y1 {
        let row = &mut dst[y * row_bytes..(y + 1) * row_bytes];
        for x in x0..x1 {
            let p = inv * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if p.x < -half_w || p.x > half_w || p.y < 0.0 || p.y > beam.length {
                continue;
            }

            let a = alpha * gradient_profile(p.y / beam.length);
            if a <= 0.0 {
                continue;
            }
            let a8 = (a * 255.0).round() as u8;
            if a8 == 0 {
                continue;
            }

            over_px(&mut row[x * 4..x * 4 + 4], premul_rgb8(rgb, a8));
        }
    }
}
