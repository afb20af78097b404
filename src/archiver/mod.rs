//! Archive building API.
//!
//! An [`Archiver`] owns one ZIP container session. It is opened on a file
//! ([`Archiver::create`]) or on a caller-supplied sink
//! ([`Archiver::create_with_writer`]), receives any number of
//! [`Archiver::add`] calls, and is finalized by [`Archiver::close`] or
//! [`Archiver::finish`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ziptree::{ArchiveOptions, Archiver};
//!
//! let mut archiver = Archiver::new().options(ArchiveOptions::new().sub_path("testdata/"));
//! archiver.create("out.zip")?;
//! archiver.add("testdata")?;
//! let result = archiver.finish()?;
//! println!("Wrote {} entries", result.total_entries());
//! # Ok::<(), ziptree::Error>(())
//! ```

mod session;
mod walk;

use std::fmt;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use zip::ZipWriter;

use crate::{ArchiveOptions, Error, Result, WriteResult};

/// A byte sink an archive can be written to.
///
/// Implemented for every `Write + Seek` type, including `&mut` references,
/// which lets callers keep ownership of their sink.
pub trait Sink: Write + Seek {}

impl<T: Write + Seek + ?Sized> Sink for T {}

type ZipSink<'a> = ZipWriter<Box<dyn Sink + 'a>>;

/// Lifecycle state of an [`Archiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// No container has been opened yet.
    Uninitialized,
    /// Accepting entries.
    Open,
    /// The container was finalized. Terminal.
    Closed,
}

/// Builds a ZIP archive from files and directory trees.
///
/// The optional diagnostic sink receives one line per entry added. It is
/// borrowed for `'a`, so a caller can pass `&mut Vec<u8>` and read it back
/// once the archiver is dropped.
pub struct Archiver<'a> {
    writer: Option<ZipSink<'a>>,
    /// Path of the destination file when the archiver opened it itself.
    destination: Option<PathBuf>,
    /// Sink position when the session was opened.
    start_offset: u64,
    debug: Option<Box<dyn Write + 'a>>,
    options: ArchiveOptions,
    state: ArchiveState,
    /// Set when finalization failed; later `finish` calls report it.
    finalize_failed: bool,
    stats: WriteResult,
}

impl<'a> Archiver<'a> {
    /// Creates an archiver with default options and no open container.
    pub fn new() -> Self {
        Self {
            writer: None,
            destination: None,
            start_offset: 0,
            debug: None,
            options: ArchiveOptions::default(),
            state: ArchiveState::Uninitialized,
            finalize_failed: false,
            stats: WriteResult::default(),
        }
    }

    /// Sets the archive options.
    pub fn options(mut self, options: ArchiveOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the diagnostic sink.
    pub fn debug(mut self, sink: impl Write + 'a) -> Self {
        self.debug = Some(Box::new(sink));
        self
    }

    /// Replaces the diagnostic sink, or removes it with `None`.
    pub fn set_debug(&mut self, sink: Option<Box<dyn Write + 'a>>) {
        self.debug = sink;
    }

    /// Returns the current options.
    pub fn config(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Returns the options for modification between `add` calls.
    pub fn config_mut(&mut self) -> &mut ArchiveOptions {
        &mut self.options
    }

    /// Sets the prefix stripped from entry names.
    pub fn set_sub_path(&mut self, sub_path: impl Into<String>) {
        self.options.sub_path = sub_path.into();
    }

    /// Returns the prefix stripped from entry names.
    pub fn sub_path(&self) -> &str {
        &self.options.sub_path
    }

    /// Returns the configured ignore patterns.
    pub fn ignore_patterns(&self) -> &[String] {
        &self.options.ignore
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> ArchiveState {
        self.state
    }

    /// Returns `true` while entries can be added.
    pub fn is_open(&self) -> bool {
        self.state == ArchiveState::Open
    }

    /// Returns the destination path when the archive was opened with
    /// [`Archiver::create`].
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Returns the running statistics.
    ///
    /// `archive_size` is only filled in once the archive is finished.
    pub fn stats(&self) -> &WriteResult {
        &self.stats
    }

    /// Returns the codec writer, checking the archiver is open.
    pub(crate) fn writer_mut(&mut self) -> Result<&mut ZipSink<'a>> {
        match self.state {
            ArchiveState::Uninitialized => Err(Error::NotInitialized),
            ArchiveState::Closed => Err(Error::Closed),
            ArchiveState::Open => self.writer.as_mut().ok_or(Error::NotInitialized),
        }
    }

    /// Ensures the archiver is in the `Open` state.
    pub(crate) fn ensure_open(&self) -> Result<()> {
        match self.state {
            ArchiveState::Uninitialized => Err(Error::NotInitialized),
            ArchiveState::Closed => Err(Error::Closed),
            ArchiveState::Open => Ok(()),
        }
    }

    /// Reports a diagnostic event.
    ///
    /// Goes to the `log` facade and, when configured, to the diagnostic
    /// sink. Failures of the sink never reach the caller.
    pub(crate) fn diagnostic(&mut self, message: fmt::Arguments<'_>) {
        log::debug!("{}", message);
        if let Some(sink) = self.debug.as_mut() {
            if let Err(e) = writeln!(sink, "{}", message) {
                log::warn!("Diagnostic sink write failed: {}", e);
            }
        }
    }
}

impl Default for Archiver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Archiver<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Archiver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archiver")
            .field("state", &self.state)
            .field("destination", &self.destination)
            .field("options", &self.options)
            .field("has_debug_sink", &self.debug.is_some())
            .field("finalize_failed", &self.finalize_failed)
            .field("stats", &self.stats)
            .finish()
    }
}
