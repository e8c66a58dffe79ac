//! Premultiplied-alpha pixel primitives: source-over blending, scaled image
//! blits, and the corner vignette fill.

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Corner;
use crate::render::surface::FrameSurface;

pub type PremulRgba8 = [u8; 4];

/// Vignette alpha at the anchor corner.
const VIGNETTE_PEAK_ALPHA: f64 = 0.4;
/// Normalized axis position where the flat plateau ends and the fade begins.
const VIGNETTE_PLATEAU_END: f64 = 0.1;

/// Source-over for premultiplied RGBA8.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Draw `src` scaled to `(dst_w, dst_h)` with its top-left at
/// `(dst_x, dst_y)`, sampling bilinearly and compositing source-over.
/// Regions outside the destination are clipped, which is how an oversized
/// cover-fit image crops to the frame.
pub fn draw_image_scaled(
    dest: &mut FrameSurface,
    src: &PreparedImage,
    dst_x: f64,
    dst_y: f64,
    dst_w: f64,
    dst_h: f64,
) {
    if src.width == 0 || src.height == 0 || dst_w <= 0.0 || dst_h <= 0.0 {
        return;
    }

    let dest_w = dest.width() as i64;
    let dest_h = dest.height() as i64;
    let x0 = (dst_x.floor().max(0.0) as i64).min(dest_w);
    let y0 = (dst_y.floor().max(0.0) as i64).min(dest_h);
    let x1 = ((dst_x + dst_w).ceil() as i64).clamp(0, dest_w);
    let y1 = ((dst_y + dst_h).ceil() as i64).clamp(0, dest_h);

    let sx_scale = f64::from(src.width) / dst_w;
    let sy_scale = f64::from(src.height) / dst_h;

    let row_stride = dest.width() as usize * 4;
    let data = dest.data_mut();
    for y in y0..y1 {
        let sy = ((y as f64) + 0.5 - dst_y) * sy_scale - 0.5;
        for x in x0..x1 {
            let sx = ((x as f64) + 0.5 - dst_x) * sx_scale - 0.5;
            let px = sample_bilinear(src, sx, sy);
            let idx = (y as usize) * row_stride + (x as usize) * 4;
            let dst_px = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
            data[idx..idx + 4].copy_from_slice(&over(dst_px, px));
        }
    }
}

/// Composite the corner vignette over the whole surface.
///
/// The gradient axis runs from `corner` to the opposite corner. Alpha is
/// flat at the peak across the plateau, then fades linearly to fully
/// transparent at the far corner; color is black throughout.
pub fn fill_corner_gradient(dest: &mut FrameSurface, corner: Corner) {
    let w = dest.width();
    let h = dest.height();
    if w == 0 || h == 0 {
        return;
    }

    let (ox, oy) = corner_point(corner, w, h);
    let (ex, ey) = corner_point(corner.opposite(), w, h);
    let ax = ex - ox;
    let ay = ey - oy;
    let len2 = ax * ax + ay * ay;

    let row_stride = w as usize * 4;
    let data = dest.data_mut();
    for y in 0..h {
        for x in 0..w {
            let t = ((f64::from(x) + 0.5 - ox) * ax + (f64::from(y) + 0.5 - oy) * ay) / len2;
            let alpha = gradient_alpha_at(t);
            if alpha <= 0.0 {
                continue;
            }
            let a = (alpha * 255.0).round() as u8;
            let idx = (y as usize) * row_stride + (x as usize) * 4;
            let dst_px = [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]];
            // Premultiplied black: only the alpha channel carries weight.
            data[idx..idx + 4].copy_from_slice(&over(dst_px, [0, 0, 0, a]));
        }
    }
}

/// Vignette alpha at normalized axis position `t` (clamped into `[0, 1]`).
pub fn gradient_alpha_at(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t <= VIGNETTE_PLATEAU_END {
        VIGNETTE_PEAK_ALPHA
    } else {
        VIGNETTE_PEAK_ALPHA * (1.0 - (t - VIGNETTE_PLATEAU_END) / (1.0 - VIGNETTE_PLATEAU_END))
    }
}

fn corner_point(corner: Corner, w: u32, h: u32) -> (f64, f64) {
    let x = if corner.is_left() { 0.0 } else { f64::from(w) };
    let y = if corner.is_top() { 0.0 } else { f64::from(h) };
    (x, y)
}

fn sample_bilinear(src: &PreparedImage, x: f64, y: f64) -> PremulRgba8 {
    let max_x = f64::from(src.width - 1);
    let max_y = f64::from(src.height - 1);
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(src.width - 1);
    let y1 = (y0 + 1).min(src.height - 1);
    let fx = x - f64::from(x0);
    let fy = y - f64::from(y0);

    let p00 = fetch(src, x0, y0);
    let p10 = fetch(src, x1, y0);
    let p01 = fetch(src, x0, y1);
    let p11 = fetch(src, x1, y1);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = f64::from(p00[i]) + (f64::from(p10[i]) - f64::from(p00[i])) * fx;
        let bottom = f64::from(p01[i]) + (f64::from(p11[i]) - f64::from(p01[i])) * fx;
        out[i] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn fetch(src: &PreparedImage, x: u32, y: u32) -> PremulRgba8 {
    let idx = ((y as usize) * (src.width as usize) + (x as usize)) * 4;
    let px = &src.rgba8_premul[idx..idx + 4];
    [px[0], px[1], px[2], px[3]]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
