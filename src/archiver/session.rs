//! Container session: opening and finalizing the archive.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use zip::ZipWriter;

use crate::{Error, Result, WriteResult};

use super::{ArchiveState, Archiver, Sink, ZipSink};

impl<'a> Archiver<'a> {
    /// Creates the archive file at the given path and opens the container.
    ///
    /// The file is created or truncated. The archiver owns it and closes it
    /// when the archive is closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created, or
    /// [`Error::AlreadyInitialized`] / [`Error::Closed`] if the archiver is
    /// not in the `Uninitialized` state.
    pub fn create(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_uninitialized()?;

        let path = path.as_ref();
        let file = File::create(path)?;
        self.open(Box::new(BufWriter::new(file)))?;
        self.destination = Some(path.to_path_buf());

        log::debug!("Created archive {}", path.display());
        Ok(())
    }

    /// Opens the container on a caller-supplied sink.
    ///
    /// Pass `&mut sink` to keep ownership: the archiver flushes the sink
    /// when the archive is closed but never closes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] / [`Error::Closed`] if the
    /// archiver is not in the `Uninitialized` state, or [`Error::Io`] if the
    /// sink cannot report its position.
    pub fn create_with_writer(&mut self, sink: impl Write + Seek + 'a) -> Result<()> {
        self.ensure_uninitialized()?;
        self.open(Box::new(sink))
    }

    fn open(&mut self, mut sink: Box<dyn Sink + 'a>) -> Result<()> {
        self.start_offset = sink.stream_position()?;
        self.writer = Some(ZipWriter::new(sink));
        self.state = ArchiveState::Open;
        Ok(())
    }

    /// Finalizes the archive and returns statistics.
    ///
    /// Writes the central directory, flushes the sink, and closes the
    /// destination file if the archiver created it. After this call the
    /// archiver is `Closed`, whether or not finalization succeeded. Calling
    /// `finish` again returns the same statistics, or
    /// [`Error::FinalizeFailed`] if the first call failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] if no container was ever opened,
    /// the codec / I/O error raised while finalizing, and
    /// [`Error::FinalizeFailed`] on any call after a failed one.
    pub fn finish(&mut self) -> Result<WriteResult> {
        match self.state {
            ArchiveState::Uninitialized => return Err(Error::NotInitialized),
            ArchiveState::Closed if self.finalize_failed => return Err(Error::FinalizeFailed),
            ArchiveState::Closed => return Ok(self.stats.clone()),
            ArchiveState::Open => {}
        }
        self.state = ArchiveState::Closed;

        if let Some(writer) = self.writer.take() {
            match Self::finalize(writer) {
                Ok(end) => self.stats.archive_size = end.saturating_sub(self.start_offset),
                Err(e) => {
                    self.finalize_failed = true;
                    return Err(e);
                }
            }
        }

        if let Some(path) = &self.destination {
            log::debug!(
                "Closed archive {} ({} entries)",
                path.display(),
                self.stats.total_entries()
            );
        }
        Ok(self.stats.clone())
    }

    /// Finalizes the archive, ignoring errors.
    ///
    /// Does nothing unless the archive is open, so it can be called any
    /// number of times. A finalization failure is logged; use
    /// [`Archiver::finish`] to observe it.
    pub fn close(&mut self) {
        if self.state != ArchiveState::Open {
            return;
        }
        if let Err(e) = self.finish() {
            log::warn!("Failed to finalize archive: {}", e);
        }
    }

    /// Writes the central directory and flushes, returning the end position.
    fn finalize(writer: ZipSink<'a>) -> Result<u64> {
        let mut sink = writer.finish()?;
        let end = sink.stream_position()?;
        sink.flush()?;
        Ok(end)
    }

    fn ensure_uninitialized(&self) -> Result<()> {
        match self.state {
            ArchiveState::Uninitialized => Ok(()),
            ArchiveState::Open => Err(Error::AlreadyInitialized),
            ArchiveState::Closed => Err(Error::Closed),
        }
    }
}
