//! Archive options and per-entry metadata.

use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, Timelike};
use zip::write::SimpleFileOptions;

use crate::{Error, Result};

/// Size at which an entry needs ZIP64 extensions.
const LARGE_FILE_THRESHOLD: u64 = u32::MAX as u64;

/// Compression method used for file entries.
///
/// Directory and symbolic link entries are always stored. The default is
/// `Deflated` when the `deflate` feature is enabled and `Stored` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CompressionMethod {
    /// No compression.
    #[cfg_attr(not(feature = "deflate"), default)]
    Stored,
    /// Deflate, readable by every ZIP tool (requires the `deflate` feature).
    #[cfg_attr(feature = "deflate", default)]
    Deflated,
    /// BZip2 (requires the `bzip2` feature).
    Bzip2,
    /// Zstandard (requires the `zstd` feature).
    Zstd,
}

impl CompressionMethod {
    /// Returns the method name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Deflated => "deflated",
            Self::Bzip2 => "bzip2",
            Self::Zstd => "zstd",
        }
    }

    /// Maps this method onto the codec's method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedMethod`] if the method's feature is not
    /// enabled.
    pub(crate) fn to_codec(self) -> Result<zip::CompressionMethod> {
        match self {
            Self::Stored => Ok(zip::CompressionMethod::Stored),
            #[cfg(feature = "deflate")]
            Self::Deflated => Ok(zip::CompressionMethod::Deflated),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(zip::CompressionMethod::Bzip2),
            #[cfg(feature = "zstd")]
            Self::Zstd => Ok(zip::CompressionMethod::Zstd),
            #[allow(unreachable_patterns)]
            other => Err(Error::UnsupportedMethod {
                method: other.name(),
            }),
        }
    }
}

/// Maps the 0-9 level scale onto the Zstd scale (1-22).
#[cfg(feature = "zstd")]
const ZSTD_LEVEL_MAP: [i64; 10] = [1, 1, 2, 3, 5, 7, 9, 12, 15, 19];

/// Options for building an archive.
///
/// # Example
///
/// ```rust
/// use ziptree::{ArchiveOptions, CompressionMethod};
///
/// let options = ArchiveOptions::new()
///     .sub_path("testdata/")
///     .method(CompressionMethod::Deflated)
///     .level(9)
///     .unwrap();
/// assert_eq!(options.sub_path, "testdata/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptions {
    /// Prefix stripped from the front of every filesystem path before it
    /// becomes an entry name. Empty by default, which keeps paths as given
    /// (minus any leading slash).
    pub sub_path: String,
    /// Ignore patterns.
    ///
    /// Accepted and kept for callers that inspect them, but not consulted
    /// while walking: every visited path is archived.
    pub ignore: Vec<String>,
    /// Compression method for file entries.
    pub method: CompressionMethod,
    /// Compression level (0-9), or `None` for the codec's default.
    pub level: Option<u32>,
}

impl ArchiveOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix stripped from entry names.
    pub fn sub_path(mut self, sub_path: impl Into<String>) -> Self {
        self.sub_path = sub_path.into();
        self
    }

    /// Sets the ignore patterns.
    pub fn ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the compression method.
    pub fn method(mut self, method: CompressionMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the compression level (0-9).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`] if `level` is greater than 9.
    pub fn level(mut self, level: u32) -> Result<Self> {
        if level > 9 {
            return Err(Error::InvalidCompressionLevel { level });
        }
        self.level = Some(level);
        Ok(self)
    }

    /// Sets the compression level, clamping values above 9.
    pub fn level_clamped(mut self, level: u32) -> Self {
        self.level = Some(level.min(9));
        self
    }

    /// Returns the level in the codec's scale for the configured method.
    ///
    /// `level` is a public field, so the range is checked again here.
    fn codec_level(&self) -> Result<Option<i64>> {
        let Some(level) = self.level else {
            return Ok(None);
        };
        if level > 9 {
            return Err(Error::InvalidCompressionLevel { level });
        }
        Ok(match self.method {
            CompressionMethod::Stored => None,
            #[cfg(feature = "zstd")]
            CompressionMethod::Zstd => Some(ZSTD_LEVEL_MAP[level as usize]),
            // bzip2 accepts 1-9
            CompressionMethod::Bzip2 => Some(i64::from(level.max(1))),
            _ => Some(i64::from(level)),
        })
    }

    /// Builds the codec options for a file entry.
    pub(crate) fn file_options(&self, meta: &EntryMeta) -> Result<SimpleFileOptions> {
        let options = SimpleFileOptions::default()
            .compression_method(self.method.to_codec()?)
            .compression_level(self.codec_level()?)
            .large_file(meta.size >= LARGE_FILE_THRESHOLD);
        Ok(meta.apply(options))
    }

    /// Builds the codec options for a directory or symbolic link entry.
    pub(crate) fn stored_options(&self, meta: &EntryMeta) -> SimpleFileOptions {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        meta.apply(options)
    }
}

/// Metadata for an entry being written.
#[derive(Debug, Clone, Default)]
pub struct EntryMeta {
    /// Whether this is a directory.
    pub is_directory: bool,
    /// Whether this is a symbolic link (never followed).
    pub is_symlink: bool,
    /// File size (0 for directories).
    pub size: u64,
    /// Last modification time.
    pub modified: Option<SystemTime>,
    /// Unix permission bits.
    pub permissions: Option<u32>,
}

impl EntryMeta {
    /// Creates metadata for a file.
    pub fn file(size: u64) -> Self {
        Self {
            is_directory: false,
            size,
            ..Default::default()
        }
    }

    /// Creates metadata for a directory.
    pub fn directory() -> Self {
        Self {
            is_directory: true,
            size: 0,
            ..Default::default()
        }
    }

    /// Creates metadata from a filesystem path without following symbolic
    /// links.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the path cannot be stat'ed.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let metadata = std::fs::symlink_metadata(path)?;
        Ok(Self::from_metadata(&metadata))
    }

    /// Creates metadata from `std::fs::Metadata`.
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        Self {
            is_directory: metadata.is_dir(),
            is_symlink: metadata.file_type().is_symlink(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            permissions: unix_mode(metadata),
        }
    }

    /// Sets the modification time.
    pub fn modified(mut self, time: SystemTime) -> Self {
        self.modified = Some(time);
        self
    }

    /// Sets the permission bits.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    /// Copies the timestamp and permissions onto codec options.
    fn apply(&self, mut options: SimpleFileOptions) -> SimpleFileOptions {
        if let Some(time) = self.modified.and_then(dos_time) {
            options = options.last_modified_time(time);
        }
        if let Some(mode) = self.permissions {
            options = options.unix_permissions(mode);
        }
        options
    }
}

#[cfg(unix)]
fn unix_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}

/// Converts a `SystemTime` into an MS-DOS timestamp in local time.
///
/// Returns `None` for times the format cannot represent (before 1980 or
/// after 2107).
pub(crate) fn dos_time(time: SystemTime) -> Option<zip::DateTime> {
    let local: DateTime<Local> = time.into();
    let year = u16::try_from(local.year()).ok()?;
    zip::DateTime::from_date_and_time(
        year,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .ok()
}

/// Result of writing an archive.
#[must_use = "write results should be checked to ensure archive was created successfully"]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    /// Number of file and symbolic link entries written.
    pub entries_written: usize,
    /// Number of directory entries written.
    pub directories_written: usize,
    /// Total bytes copied from source files.
    pub total_size: u64,
    /// Size of the finished archive in bytes.
    pub archive_size: u64,
}

impl WriteResult {
    /// Returns the total number of entries, files and directories.
    pub fn total_entries(&self) -> usize {
        self.entries_written + self.directories_written
    }

    /// Returns the compression ratio (archive size / source bytes).
    pub fn compression_ratio(&self) -> f64 {
        if self.total_size == 0 {
            1.0
        } else {
            self.archive_size as f64 / self.total_size as f64
        }
    }
}
