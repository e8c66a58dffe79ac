//! Framepress batch-edits photos into a fixed-aspect watermarked crop.
//!
//! Each source image is scaled to cover a fixed output frame, panned inside
//! it, optionally darkened with a corner vignette, and stamped with a shared
//! logo, then exported as PNG (one file, or a zip archive for a batch). The
//! public API is session-oriented:
//!
//! - Load a batch into a [`BatchSession`]
//! - Mutate the current image's [`ImageSettings`] through session commands
//! - Export through [`export_batch`] or [`export_to_dir`]
#![forbid(unsafe_code)]

pub mod assets;
pub mod batch;
pub mod export;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod settings;

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::logo::LogoAsset;
pub use crate::batch::{BatchInput, BatchSession, DragStart, LoadedImage, SlotPixels, TARGET_FRAME};
pub use crate::export::pipeline::{
    ARCHIVE_FILE_NAME, ExportSummary, FILE_NAME_SUFFIX, export_batch, export_to_dir,
};
pub use crate::export::sink::{EntrySink, MemorySink, SinkConfig, ZipSink};
pub use crate::foundation::core::{Corner, FrameSize, Point, Vec2};
pub use crate::foundation::error::{FramepressError, FramepressResult};
pub use crate::geometry::CoverFit;
pub use crate::render::surface::FrameSurface;
pub use crate::settings::{ImageSettings, SettingsPolicy};
