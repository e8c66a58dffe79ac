use std::io::{Seek, Write};

use crate::foundation::error::{FramepressError, FramepressResult};

/// Configuration handed to a sink before any entries are pushed.
#[derive(Clone, Copy, Debug)]
pub struct SinkConfig {
    /// Upper bound on the number of entries that will be pushed.
    pub entry_count: usize,
}

/// Sink contract for consuming encoded outputs.
///
/// Ordering contract: `push_entry` is called in strictly increasing batch
/// index order, between exactly one `begin` and one `finish`.
pub trait EntrySink {
    /// Called once before any entries are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FramepressResult<()>;
    /// Push one named PNG entry in batch order.
    fn push_entry(&mut self, name: &str, png: &[u8]) -> FramepressResult<()>;
    /// Called once after the last entry; finalizes the output.
    fn finish(&mut self) -> FramepressResult<()>;
}

/// In-memory sink for tests and single-file exports.
#[derive(Debug, Default)]
pub struct MemorySink {
    cfg: Option<SinkConfig>,
    entries: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Entries in push order.
    pub fn entries(&self) -> &[(String, Vec<u8>)] {
        &self.entries
    }
}

impl EntrySink for MemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FramepressResult<()> {
        self.cfg = Some(cfg);
        self.entries.clear();
        Ok(())
    }

    fn push_entry(&mut self, name: &str, png: &[u8]) -> FramepressResult<()> {
        self.entries.push((name.to_owned(), png.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> FramepressResult<()> {
        Ok(())
    }
}

/// Zip archive sink.
///
/// Entries stream into the underlying writer as they arrive; the central
/// directory is written in `finish`, so the archive is only valid once
/// every entry has been inserted.
pub struct ZipSink<W: Write + Seek> {
    writer: Option<zip::ZipWriter<W>>,
}

impl<W: Write + Seek> ZipSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Some(zip::ZipWriter::new(inner)),
        }
    }
}

impl<W: Write + Seek> EntrySink for ZipSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> FramepressResult<()> {
        if self.writer.is_none() {
            return Err(FramepressError::encode("zip sink already finished"));
        }
        Ok(())
    }

    fn push_entry(&mut self, name: &str, png: &[u8]) -> FramepressResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| FramepressError::encode("zip sink already finished"))?;
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .map_err(|e| FramepressError::encode(format!("zip entry '{name}': {e}")))?;
        writer
            .write_all(png)
            .map_err(|e| FramepressError::encode(format!("zip entry '{name}': {e}")))?;
        Ok(())
    }

    fn finish(&mut self) -> FramepressResult<()> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| FramepressError::encode("zip sink already finished"))?;
        writer
            .finish()
            .map_err(|e| FramepressError::encode(format!("finalize zip archive: {e}")))?;
        Ok(())
    }
}
