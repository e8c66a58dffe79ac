//! The editing session: an ordered batch of loaded images, the current
//! selection, and the command surface the UI (or CLI) drives.

use std::path::Path;

use anyhow::Context as _;

use crate::assets::decode::{self, PreparedImage};
use crate::assets::logo::LogoAsset;
use crate::foundation::core::{Corner, FrameSize, Vec2};
use crate::foundation::error::FramepressResult;
use crate::render::composer;
use crate::render::surface::FrameSurface;
use crate::settings::{ImageSettings, SettingsPolicy};

/// Fixed output crop frame.
pub const TARGET_FRAME: FrameSize = FrameSize {
    width: 1080,
    height: 1350,
};

/// One file handed to [`BatchSession::load`]: the name is the only metadata
/// the session consumes.
#[derive(Clone, Debug)]
pub struct BatchInput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl BatchInput {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an input file from disk, keeping only its final path component
    /// as the name.
    pub fn read(path: &Path) -> FramepressResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }
}

/// Decoded pixels for one slot, or the reason decoding failed.
///
/// A failed slot stays in the batch (it keeps its position and name) but is
/// excluded from rendering and export.
#[derive(Clone, Debug)]
pub enum SlotPixels {
    Ready(PreparedImage),
    Failed(String),
}

/// One image in the batch: source pixels, originating file name, and its
/// own settings record.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub file_name: String,
    pub pixels: SlotPixels,
    pub settings: ImageSettings,
}

impl LoadedImage {
    pub fn is_ready(&self) -> bool {
        matches!(self.pixels, SlotPixels::Ready(_))
    }

    fn native_dims(&self) -> Option<(u32, u32)> {
        match &self.pixels {
            SlotPixels::Ready(p) => Some((p.width, p.height)),
            SlotPixels::Failed(_) => None,
        }
    }
}

/// A captured drag-start offset; pan deltas apply relative to it.
#[derive(Clone, Copy, Debug)]
pub struct DragStart {
    offset_x: f64,
    offset_y: f64,
}

/// One editing context: the ordered batch, the current index, the shared
/// render surface, and the shared logo.
///
/// Every operation that is handed an out-of-range index, or runs against an
/// empty batch, is a silent no-op.
pub struct BatchSession {
    target: FrameSize,
    policy: SettingsPolicy,
    images: Vec<LoadedImage>,
    current: usize,
    surface: FrameSurface,
    logo: LogoAsset,
}

impl BatchSession {
    pub fn new(target: FrameSize, policy: SettingsPolicy) -> Self {
        Self {
            target,
            policy,
            images: Vec::new(),
            current: 0,
            surface: FrameSurface::new(),
            logo: LogoAsset::pending(),
        }
    }

    /// Replace the whole batch with `inputs`, decoding every slot before
    /// anything is selected.
    ///
    /// Decode results land per slot; a failure marks that slot only. The
    /// first index is selected (and rendered) once every slot has resolved,
    /// never earlier.
    #[tracing::instrument(skip_all, fields(inputs = inputs.len()))]
    pub fn load(&mut self, inputs: Vec<BatchInput>) {
        let mut slots = Vec::with_capacity(inputs.len());
        for input in inputs {
            let slot = match decode::decode_image(&input.bytes) {
                Ok(pixels) => {
                    let settings =
                        ImageSettings::new(pixels.width, pixels.height, self.target, self.policy);
                    LoadedImage {
                        file_name: input.file_name,
                        pixels: SlotPixels::Ready(pixels),
                        settings,
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, file = %input.file_name, "image decode failed, slot excluded from export");
                    LoadedImage {
                        file_name: input.file_name,
                        pixels: SlotPixels::Failed(err.to_string()),
                        settings: ImageSettings::empty(self.policy),
                    }
                }
            };
            slots.push(slot);
        }

        self.images = slots;
        self.current = 0;
        if !self.images.is_empty() {
            self.render_current();
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&LoadedImage> {
        self.images.get(self.current)
    }

    pub fn images(&self) -> &[LoadedImage] {
        &self.images
    }

    pub fn target(&self) -> FrameSize {
        self.target
    }

    pub fn logo(&self) -> &LogoAsset {
        &self.logo
    }

    /// Select `index` and render it. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        self.current = index;
        self.render_current();
    }

    /// Advance the selection, wrapping past the end.
    pub fn next(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.select((self.current + 1) % self.images.len());
    }

    /// Step the selection back, wrapping past the start.
    pub fn prev(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.select((self.current + self.images.len() - 1) % self.images.len());
    }

    /// Toggle the current image between crop frame and native frame.
    pub fn set_keep_original(&mut self, keep: bool) {
        let target = self.target;
        let Some(img) = self.images.get_mut(self.current) else {
            return;
        };
        let Some((w, h)) = img.native_dims() else {
            return;
        };
        img.settings.set_keep_original(w, h, target, keep);
        self.render_current();
    }

    pub fn set_gradient(&mut self, on: bool) {
        let Some(img) = self.images.get_mut(self.current) else {
            return;
        };
        img.settings.set_gradient(on);
        self.render_current();
    }

    pub fn set_logo_corner(&mut self, corner: Corner) {
        let Some(img) = self.images.get_mut(self.current) else {
            return;
        };
        img.settings.set_logo_corner(corner);
        self.render_current();
    }

    /// Capture the current offsets as a drag origin. `None` when there is
    /// nothing to pan.
    pub fn begin_drag(&self) -> Option<DragStart> {
        let img = self.images.get(self.current)?;
        if img.settings.keep_original {
            return None;
        }
        Some(DragStart {
            offset_x: img.settings.fit.offset_x,
            offset_y: img.settings.fit.offset_y,
        })
    }

    /// Pan the current image by `delta` relative to the captured drag
    /// origin, clamped per axis.
    pub fn drag_update(&mut self, start: DragStart, delta: Vec2) {
        let target = self.target;
        let Some(img) = self.images.get_mut(self.current) else {
            return;
        };
        img.settings
            .pan_from((start.offset_x, start.offset_y), delta, target);
        self.render_current();
    }

    /// Broadcast the current record's policy to every record, re-deriving
    /// fit geometry per image.
    pub fn apply_current_to_all(&mut self) {
        let Some(current) = self.images.get(self.current) else {
            return;
        };
        let policy = current.settings;
        let target = self.target;
        for img in &mut self.images {
            let Some((w, h)) = img.native_dims() else {
                continue;
            };
            img.settings.adopt_policy(&policy, w, h, target);
        }
        self.render_current();
    }

    /// Install the logo and re-render the current selection once.
    pub fn attach_logo(&mut self, logo: LogoAsset) {
        self.logo = logo;
        if !self.images.is_empty() {
            self.render_current();
        }
    }

    /// Render the current image into the shared surface.
    ///
    /// Returns `None` for an empty batch or a slot without decoded pixels
    /// (the degraded states render nothing rather than failing).
    pub fn render_current(&mut self) -> Option<&FrameSurface> {
        let img = self.images.get(self.current)?;
        let pixels = match &img.pixels {
            SlotPixels::Ready(p) => p,
            SlotPixels::Failed(_) => {
                tracing::debug!(file = %img.file_name, "slot has no decoded pixels, skipping render");
                return None;
            }
        };
        composer::render_frame(&mut self.surface, pixels, &img.settings, &self.logo, self.target);
        Some(&self.surface)
    }

    /// The shared surface as rendered by the latest selection, without
    /// re-rendering.
    pub fn current_frame(&self) -> Option<&FrameSurface> {
        let img = self.images.get(self.current)?;
        match img.pixels {
            SlotPixels::Ready(_) => Some(&self.surface),
            SlotPixels::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut buf),
                image::ImageFormat::Png,
            )
            .unwrap();
        buf
    }

    fn session_with(sizes: &[(u32, u32)]) -> BatchSession {
        let mut session = BatchSession::new(TARGET_FRAME, SettingsPolicy::default());
        let inputs = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| BatchInput::new(format!("img-{i}.png"), png_bytes(w, h)))
            .collect();
        session.load(inputs);
        session
    }

    #[test]
    fn load_selects_first_and_fits_each_slot() {
        let session = session_with(&[(2000, 1000), (800, 1600)]);
        assert_eq!(session.len(), 2);
        assert_eq!(session.current_index(), 0);

        let fits: Vec<_> = session.images().iter().map(|i| i.settings.fit).collect();
        assert!((fits[0].max_offset_x - 1620.0).abs() < 1e-6);
        assert!((fits[0].offset_x - 810.0).abs() < 1e-6);
        assert!((fits[1].max_offset_y - 810.0).abs() < 1e-6);
        assert!((fits[1].max_offset_x).abs() < 1e-6);
    }

    #[test]
    fn load_replaces_prior_state_entirely() {
        let mut session = session_with(&[(100, 100), (200, 200), (300, 300)]);
        session.select(2);

        session.load(vec![BatchInput::new("only.png", png_bytes(50, 50))]);
        assert_eq!(session.len(), 1);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn navigation_is_circular() {
        let mut session = session_with(&[(100, 100), (200, 200), (300, 300)]);
        session.select(1);
        for _ in 0..3 {
            session.next();
        }
        assert_eq!(session.current_index(), 1);

        session.prev();
        assert_eq!(session.current_index(), 0);
        session.prev();
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn select_out_of_range_is_a_no_op() {
        let mut session = session_with(&[(100, 100)]);
        session.select(5);
        assert_eq!(session.current_index(), 0);

        let mut empty = BatchSession::new(TARGET_FRAME, SettingsPolicy::default());
        empty.select(0);
        empty.next();
        empty.prev();
        empty.set_gradient(true);
        empty.apply_current_to_all();
        assert!(empty.render_current().is_none());
    }

    #[test]
    fn settings_are_per_image_until_broadcast() {
        let mut session = session_with(&[(2000, 1000), (800, 1600)]);
        session.set_gradient(true);
        session.set_logo_corner(Corner::BottomLeft);

        assert!(session.images()[0].settings.add_gradient);
        assert!(!session.images()[1].settings.add_gradient);

        session.apply_current_to_all();
        assert!(session.images()[1].settings.add_gradient);
        assert_eq!(session.images()[1].settings.logo_corner, Corner::BottomLeft);
        // Broadcast re-derives geometry per image instead of copying it.
        assert!((session.images()[1].settings.fit.max_offset_y - 810.0).abs() < 1e-6);
    }

    #[test]
    fn apply_current_to_all_is_idempotent() {
        let mut session = session_with(&[(2000, 1000), (800, 1600), (500, 500)]);
        session.set_gradient(true);

        session.apply_current_to_all();
        let once: Vec<_> = session.images().iter().map(|i| i.settings).collect();
        session.apply_current_to_all();
        let twice: Vec<_> = session.images().iter().map(|i| i.settings).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn drag_pans_within_bounds() {
        let mut session = session_with(&[(2000, 1000)]);
        let start = session.begin_drag().unwrap();

        session.drag_update(start, Vec2::new(-100.0, 0.0));
        let fit = session.current().unwrap().settings.fit;
        assert!((fit.offset_x - 710.0).abs() < 1e-6);

        session.drag_update(start, Vec2::new(-1e9, 0.0));
        let fit = session.current().unwrap().settings.fit;
        assert_eq!(fit.offset_x, 0.0);
    }

    #[test]
    fn begin_drag_is_unavailable_in_keep_original_mode() {
        let mut session = session_with(&[(2000, 1000)]);
        session.set_keep_original(true);
        assert!(session.begin_drag().is_none());

        session.set_keep_original(false);
        assert!(session.begin_drag().is_some());
    }

    #[test]
    fn keep_original_toggle_recenters_offsets() {
        let mut session = session_with(&[(2000, 1000)]);
        let start = session.begin_drag().unwrap();
        session.drag_update(start, Vec2::new(-300.0, 0.0));

        session.set_keep_original(true);
        session.set_keep_original(false);
        let fit = session.current().unwrap().settings.fit;
        assert!((fit.offset_x - 810.0).abs() < 1e-6);
    }

    #[test]
    fn failed_decode_marks_slot_but_keeps_batch_order() {
        let mut session = BatchSession::new(TARGET_FRAME, SettingsPolicy::default());
        session.load(vec![
            BatchInput::new("good.png", png_bytes(100, 100)),
            BatchInput::new("bad.png", b"garbage".to_vec()),
            BatchInput::new("also-good.png", png_bytes(100, 100)),
        ]);

        assert_eq!(session.len(), 3);
        assert!(session.images()[0].is_ready());
        assert!(!session.images()[1].is_ready());
        assert!(session.images()[2].is_ready());
        assert_eq!(session.images()[1].file_name, "bad.png");

        session.select(1);
        assert!(session.render_current().is_none());
        assert!(session.current_frame().is_none());
    }

    #[test]
    fn attach_logo_rerenders_current() {
        let mut session = session_with(&[(2000, 1000)]);
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;
        session.attach_logo(LogoAsset::from_bytes("logo.svg", svg));
        assert!(session.logo().is_ready());
        assert!(session.current_frame().is_some());
    }
}
