use rayon::prelude::*;

use crate::foundation::error::{BeamError, BeamResult};

/// Separable Gaussian blur over a premultiplied RGBA8 buffer.
///
/// `sigma <= 0` derives the usual `radius / 2`. Radius 0 is the identity.
/// Rows fan out on rayon.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BeamResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BeamError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BeamError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        radius as f32 / 2.0
    };
    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BeamResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BeamError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(BeamError::render("gaussian kernel sum is zero"));
    }

    // Q16 weights, renormalized so the row sums to exactly 1<<16.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_bytes = (width as usize) * 4;

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let dx = ki as i32 - radius;
                    let sx = (x + dx).clamp(0, w - 1);
                    let idx = (sx as usize) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src_row[idx + c]);
                    }
                }
                let out_idx = (x as usize) * 4;
                for c in 0..4 {
                    row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_bytes = (width as usize) * 4;

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let dy = ki as i32 - radius;
                    let sy = (y as i32 + dy).clamp(0, h - 1);
                    let idx = (sy as usize) * row_bytes + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                let out_idx = x * 4;
                for c in 0..4 {
                    row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_radius_0_is_identity() {
        let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_constant_image_is_identity() {
        let (w, h) = (4u32, 3u32);
        let px = [10u8, 20u8, 30u8, 40u8];
        let src = px.repeat((w * h) as usize);
        let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn blur_spreads_energy_from_single_pixel() {
        let (w, h) = (5u32, 5u32);
        let mut src = vec![0u8; (w * h * 4) as usize];
        let center = ((2 * w + 2) * 4) as usize;
        src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

        let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert!(nonzero > 1);

        let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
        assert!((sum_a as i32 - 255).abs() <= 4);
    }

    #[test]
    fn blur_derives_sigma_when_unset() {
        let (w, h) = (5u32, 1u32);
        let mut src = vec![0u8; (w * h * 4) as usize];
        src[8..12].copy_from_slice(&[0, 0, 0, 255]);

        let explicit = blur_rgba8_premul(&src, w, h, 4, 2.0).unwrap();
        let derived = blur_rgba8_premul(&src, w, h, 4, 0.0).unwrap();
        assert_eq!(explicit, derived);
    }

    #[test]
    fn blur_rejects_mismatched_buffer() {
        let src = vec![0u8; 7];
        assert!(blur_rgba8_premul(&src, 2, 2, 1, 1.0).is_err());
    }
}
