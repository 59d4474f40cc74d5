//! Isotropic Gaussian blur over premultiplied RGBA8.
//!
//! Sampling outside the buffer clamps to the nearest edge pixel, so a blurred region never
//! pulls in transparency (or wrapped pixels) from beyond its own bounds.

use crate::foundation::error::{SquareError, SquareResult};

/// Above this sigma the exact kernel gets too wide; switch to three box passes.
pub const EXACT_KERNEL_MAX_SIGMA: f32 = 4.0;

/// Blur with standard deviation `sigma` pixels.
pub fn blur_rgba8_premul(src: &[u8], width: u32, height: u32, sigma: f32) -> SquareResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SquareError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SquareError::validation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(SquareError::validation("blur sigma must be finite and >= 0"));
    }
    if sigma == 0.0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    if sigma <= EXACT_KERNEL_MAX_SIGMA {
        let radius = (3.0 * sigma).ceil() as u32;
        let kernel = gaussian_kernel_q16(radius, sigma)?;
        let mut tmp = vec![0u8; expected_len];
        let mut out = vec![0u8; expected_len];
        horizontal_pass(src, &mut tmp, width, height, &kernel);
        vertical_pass(&tmp, &mut out, width, height, &kernel);
        Ok(out)
    } else {
        Ok(box_approx(src, width as usize, height as usize, sigma))
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> SquareResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
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
        return Err(SquareError::validation("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += (kw as u64) * (src[idx + c] as u64);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

fn box_approx(src: &[u8], width: usize, height: usize, sigma: f32) -> Vec<u8> {
    let mut a = src.to_vec();
    let mut b = vec![0u8; a.len()];
    for size in box_sizes_for_gauss(sigma) {
        let radius = size.saturating_sub(1) / 2;
        if radius == 0 {
            continue;
        }
        box_blur_h(&a, &mut b, width, height, radius);
        box_blur_v(&b, &mut a, width, height, radius);
    }
    a
}

// Three box widths whose convolution approximates a Gaussian of the given sigma
// (Kovesi, "Fast almost-Gaussian filtering").
fn box_sizes_for_gauss(sigma: f32) -> [usize; 3] {
    let sigma = f64::from(sigma.abs());
    if sigma <= 0.0 {
        return [1, 1, 1];
    }
    let n = 3.0f64;
    let w_ideal = ((12.0 * sigma * sigma / n) + 1.0).sqrt();
    let mut wl = w_ideal.floor() as i64;
    if wl % 2 == 0 {
        wl -= 1;
    }
    let wu = wl + 2;

    let wlf = wl as f64;
    let m_ideal = (12.0 * sigma * sigma - n * wlf * wlf - 4.0 * n * wlf - 3.0 * n) / (-4.0 * wlf - 4.0);
    let m = m_ideal.round().clamp(0.0, n) as usize;

    let mut sizes = [wu.max(1) as usize; 3];
    for s in sizes.iter_mut().take(m) {
        *s = wl.max(1) as usize;
    }
    sizes
}

fn box_blur_h(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (radius * 2 + 1) as u32;
    let last = width as isize - 1;
    for y in 0..height {
        let row = y * width * 4;
        let mut sum = [0u32; 4];
        for dx in -(radius as isize)..=(radius as isize) {
            let idx = row + (dx.clamp(0, last) as usize) * 4;
            for c in 0..4 {
                sum[c] += u32::from(src[idx + c]);
            }
        }

        for x in 0..width {
            write_box_avg(&mut dst[row + x * 4..row + x * 4 + 4], &sum, window);

            let rem = row + ((x as isize - radius as isize).clamp(0, last) as usize) * 4;
            let add = row + ((x as isize + radius as isize + 1).clamp(0, last) as usize) * 4;
            for c in 0..4 {
                sum[c] = sum[c] + u32::from(src[add + c]) - u32::from(src[rem + c]);
            }
        }
    }
}

fn box_blur_v(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize) {
    let window = (radius * 2 + 1) as u32;
    let last = height as isize - 1;
    for x in 0..width {
        let mut sum = [0u32; 4];
        for dy in -(radius as isize)..=(radius as isize) {
            let idx = ((dy.clamp(0, last) as usize) * width + x) * 4;
            for c in 0..4 {
                sum[c] += u32::from(src[idx + c]);
            }
        }

        for y in 0..height {
            let out = (y * width + x) * 4;
            write_box_avg(&mut dst[out..out + 4], &sum, window);

            let rem = (((y as isize - radius as isize).clamp(0, last) as usize) * width + x) * 4;
            let add =
                (((y as isize + radius as isize + 1).clamp(0, last) as usize) * width + x) * 4;
            for c in 0..4 {
                sum[c] = sum[c] + u32::from(src[add + c]) - u32::from(src[rem + c]);
            }
        }
    }
}

fn write_box_avg(dst: &mut [u8], sum: &[u32; 4], window: u32) {
    let half = window / 2;
    let a = ((sum[3] + half) / window).min(255);
    for c in 0..3 {
        dst[c] = ((sum[c] + half) / window).min(a) as u8;
    }
    dst[3] = a as u8;
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
