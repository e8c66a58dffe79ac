//! Per-image display settings and the mutations that keep their fit geometry
//! consistent.

use crate::foundation::core::{Corner, FrameSize, Vec2};
use crate::geometry::{self, CoverFit};

/// Policy applied to freshly loaded images, and the part of the settings
/// that broadcasts across a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SettingsPolicy {
    pub keep_original: bool,
    pub add_gradient: bool,
    pub logo_corner: Corner,
}

impl Default for SettingsPolicy {
    fn default() -> Self {
        Self {
            keep_original: false,
            add_gradient: false,
            logo_corner: Corner::TopRight,
        }
    }
}

/// Display settings for one loaded image.
///
/// The fit record is derived state: every mutation that can invalidate it
/// (keep-original toggles, policy adoption) re-runs the fit computation, and
/// pan offsets are clamped into `[0, max_offset]` on every write.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageSettings {
    pub keep_original: bool,
    pub add_gradient: bool,
    pub logo_corner: Corner,
    pub fit: CoverFit,
}

impl ImageSettings {
    /// Settings for an image of `(img_w, img_h)`, fit per `policy`.
    pub fn new(img_w: u32, img_h: u32, target: FrameSize, policy: SettingsPolicy) -> Self {
        Self {
            keep_original: policy.keep_original,
            add_gradient: policy.add_gradient,
            logo_corner: policy.logo_corner,
            fit: geometry::compute_cover_fit(img_w, img_h, target, policy.keep_original),
        }
    }

    /// Settings for a slot with no decoded pixels: policy only, degenerate
    /// fit.
    pub fn empty(policy: SettingsPolicy) -> Self {
        Self {
            keep_original: policy.keep_original,
            add_gradient: policy.add_gradient,
            logo_corner: policy.logo_corner,
            fit: CoverFit::default(),
        }
    }

    /// Toggle between the fixed crop frame and the image's native frame.
    ///
    /// The fit is re-derived either way, so offsets re-center rather than
    /// survive the toggle.
    pub fn set_keep_original(&mut self, img_w: u32, img_h: u32, target: FrameSize, keep: bool) {
        self.keep_original = keep;
        self.fit = geometry::compute_cover_fit(img_w, img_h, target, keep);
    }

    pub fn set_gradient(&mut self, on: bool) {
        self.add_gradient = on;
    }

    pub fn set_logo_corner(&mut self, corner: Corner) {
        self.logo_corner = corner;
    }

    /// Apply a drag delta relative to a captured drag-start offset.
    ///
    /// An axis is adjustable only while the scaled image exceeds the frame on
    /// that axis; both axes clamp independently.
    pub fn pan_from(&mut self, start: (f64, f64), delta: Vec2, target: FrameSize) {
        if self.keep_original {
            return;
        }
        if self.fit.draw_w > f64::from(target.width) {
            self.fit.offset_x = geometry::clamp_offset(start.0 + delta.x, self.fit.max_offset_x);
        }
        if self.fit.draw_h > f64::from(target.height) {
            self.fit.offset_y = geometry::clamp_offset(start.1 + delta.y, self.fit.max_offset_y);
        }
    }

    /// Take over another record's policy, re-deriving the fit for this
    /// image's own native dimensions.
    pub fn adopt_policy(&mut self, policy: &ImageSettings, img_w: u32, img_h: u32, target: FrameSize) {
        self.keep_original = policy.keep_original;
        self.add_gradient = policy.add_gradient;
        self.logo_corner = policy.logo_corner;
        self.fit = geometry::compute_cover_fit(img_w, img_h, target, self.keep_original);
    }
}
