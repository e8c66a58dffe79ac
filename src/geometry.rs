//! Pure fit/placement math. No state, no pixels, no I/O.

use crate::foundation::core::{Corner, FrameSize, Point, Vec2};

/// How a source image maps into an output frame: scaled draw dimensions plus
/// the pan window into them.
///
/// Invariant: `0 <= offset <= max_offset` per axis. `max_offset` is the slack
/// between the scaled image and the frame, so it is never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoverFit {
    /// Scaled draw width in frame pixels.
    pub draw_w: f64,
    /// Scaled draw height in frame pixels.
    pub draw_h: f64,
    /// Current pan offset, x axis (top-left of the visible window).
    pub offset_x: f64,
    /// Current pan offset, y axis.
    pub offset_y: f64,
    /// Upper bound for `offset_x`.
    pub max_offset_x: f64,
    /// Upper bound for `offset_y`.
    pub max_offset_y: f64,
}

/// Scale an image to fully cover `target`, centering the crop window.
///
/// With `keep_original` the frame is the image itself: native draw
/// dimensions, zero offsets, zero slack. Zero-sized sources have no usable
/// fit and degrade the same way.
pub fn compute_cover_fit(
    img_w: u32,
    img_h: u32,
    target: FrameSize,
    keep_original: bool,
) -> CoverFit {
    if keep_original || img_w == 0 || img_h == 0 {
        return CoverFit {
            draw_w: f64::from(img_w),
            draw_h: f64::from(img_h),
            ..CoverFit::default()
        };
    }

    let scale = (f64::from(target.width) / f64::from(img_w))
        .max(f64::from(target.height) / f64::from(img_h));
    let draw_w = f64::from(img_w) * scale;
    let draw_h = f64::from(img_h) * scale;
    let max_offset_x = (draw_w - f64::from(target.width)).max(0.0);
    let max_offset_y = (draw_h - f64::from(target.height)).max(0.0);

    CoverFit {
        draw_w,
        draw_h,
        offset_x: max_offset_x / 2.0,
        offset_y: max_offset_y / 2.0,
        max_offset_x,
        max_offset_y,
    }
}

/// Logo draw size for a frame of height `frame_h`, preserving the logo's
/// native aspect ratio.
///
/// Returns `(0.0, 0.0)` when the native dimensions are unusable; callers
/// treat that as "do not draw".
pub fn compute_logo_size(
    native_w: u32,
    native_h: u32,
    frame_h: u32,
    size_fraction: f64,
) -> (f64, f64) {
    if native_w == 0 || native_h == 0 {
        tracing::warn!(native_w, native_h, "invalid logo dimensions, skipping logo");
        return (0.0, 0.0);
    }

    let height = f64::from(frame_h) * size_fraction;
    let width = f64::from(native_w) * (height / f64::from(native_h));
    (width, height)
}

/// Top-left position of a logo of `(logo_w, logo_h)` anchored at `corner`,
/// inset by `logo_h * margin_fraction` from both edges.
pub fn logo_placement(
    corner: Corner,
    frame: FrameSize,
    logo_w: f64,
    logo_h: f64,
    margin_fraction: f64,
) -> Point {
    let margin = logo_h * margin_fraction;
    let x = if corner.is_left() {
        margin
    } else {
        f64::from(frame.width) - logo_w - margin
    };
    let y = if corner.is_top() {
        margin
    } else {
        f64::from(frame.height) - logo_h - margin
    };
    Point::new(x, y)
}

/// Pan delta for a pointer drag from `start` to `current`, in frame pixels.
///
/// `scale` converts pointer units to frame pixels per axis. The delta runs
/// opposite to the pointer so the photo follows the grab.
pub fn drag_delta(start: Point, current: Point, scale: Vec2) -> Vec2 {
    let d = start - current;
    Vec2::new(d.x * scale.x, d.y * scale.y)
}

/// Clamp a pan offset into `[0, max]`. Total for any input, including
/// negative `max`.
pub fn clamp_offset(value: f64, max: f64) -> f64 {
    value.max(0.0).min(max.max(0.0))
}
