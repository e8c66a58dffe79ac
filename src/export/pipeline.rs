//! The select → render → encode → sink loop over a batch.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::batch::BatchSession;
use crate::export::sink::{EntrySink, MemorySink, SinkConfig, ZipSink};
use crate::foundation::error::{FramepressError, FramepressResult};
use crate::render::surface::FrameSurface;

/// Suffix appended to every exported file name.
pub const FILE_NAME_SUFFIX: &str = "-watermarked";
/// Name of the archive produced by multi-image exports.
pub const ARCHIVE_FILE_NAME: &str = "images.zip";

/// Outcome counts for one export run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Entries pushed into the sink.
    pub exported: usize,
    /// Slots skipped over decode or encode failures.
    pub skipped: usize,
}

/// Output name for `input`: the last extension stripped, `suffix` appended,
/// `.png` appended.
pub fn output_file_name(input: &str, suffix: &str) -> String {
    let stem = match input.rfind('.') {
        Some(idx) if idx + 1 < input.len() && !input[idx + 1..].contains('/') => &input[..idx],
        _ => input,
    };
    format!("{stem}{suffix}.png")
}

/// Encode the surface to PNG bytes.
pub fn encode_png(surface: &FrameSurface) -> FramepressResult<Vec<u8>> {
    let data = surface.to_straight_rgba();
    let mut buf = Vec::new();
    image::write_buffer_with_format(
        &mut std::io::Cursor::new(&mut buf),
        &data,
        surface.width(),
        surface.height(),
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| FramepressError::encode(format!("png encode: {e}")))?;
    Ok(buf)
}

/// Render and encode every exportable slot, in index order, into `sink`.
///
/// Strictly sequential: the render surface is shared across the whole batch,
/// so each image's render and encode completes before the next selection
/// reuses it. A failed slot or a failed encode skips that entry only. The
/// previously-selected index is restored before returning.
#[tracing::instrument(skip_all, fields(images = session.len()))]
pub fn export_batch(
    session: &mut BatchSession,
    sink: &mut dyn EntrySink,
) -> FramepressResult<ExportSummary> {
    let mut summary = ExportSummary::default();
    if session.is_empty() {
        return Ok(summary);
    }

    let restore = session.current_index();
    sink.begin(SinkConfig {
        entry_count: session.len(),
    })?;

    for index in 0..session.len() {
        session.select(index);
        let Some(img) = session.current() else {
            continue;
        };
        let name = output_file_name(&img.file_name, FILE_NAME_SUFFIX);

        let Some(frame) = session.current_frame() else {
            tracing::warn!(file = %name, "slot has no decoded pixels, entry skipped");
            summary.skipped += 1;
            continue;
        };
        let png = match encode_png(frame) {
            Ok(png) => png,
            Err(err) => {
                tracing::warn!(%err, file = %name, "png encode failed, entry skipped");
                summary.skipped += 1;
                continue;
            }
        };

        sink.push_entry(&name, &png)?;
        summary.exported += 1;
    }

    session.select(restore);
    sink.finish()?;
    Ok(summary)
}

/// Export the batch into `dir`: a single named PNG for a one-image batch,
/// an `images.zip` archive otherwise. Returns the written paths.
pub fn export_to_dir(session: &mut BatchSession, dir: &Path) -> FramepressResult<Vec<PathBuf>> {
    if session.is_empty() {
        return Ok(Vec::new());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        FramepressError::encode(format!("create output dir '{}': {e}", dir.display()))
    })?;

    if session.len() == 1 {
        let mut sink = MemorySink::new();
        export_batch(session, &mut sink)?;

        let mut written = Vec::new();
        for (name, png) in sink.entries() {
            let path = dir.join(name);
            std::fs::write(&path, png).map_err(|e| {
                FramepressError::encode(format!("write '{}': {e}", path.display()))
            })?;
            written.push(path);
        }
        return Ok(written);
    }

    let path = dir.join(ARCHIVE_FILE_NAME);
    let file = std::fs::File::create(&path).map_err(|e| {
        FramepressError::encode(format!("create '{}': {e}", path.display()))
    })?;
    let mut sink = ZipSink::new(BufWriter::new(file));
    let summary = export_batch(session, &mut sink)?;
    tracing::debug!(
        exported = summary.exported,
        skipped = summary.skipped,
        archive = %path.display(),
        "archive export finished"
    );
    Ok(vec![path])
}
