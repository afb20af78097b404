//! Error types for archive building.
//!
//! This module provides the [`Error`] enum which represents every failure
//! mode of an [`Archiver`](crate::Archiver), along with a convenient
//! [`Result<T>`] alias.
//!
//! # Error Handling
//!
//! All fallible operations return `Result<T, Error>`. The first error met
//! while walking a directory aborts the walk and is returned as-is; entries
//! written before it stay in the archive.
//!
//! ```rust,no_run
//! use ziptree::{Archiver, Error};
//!
//! fn archive_tree(dest: &str, src: &str) -> ziptree::Result<()> {
//!     let mut archiver = Archiver::new();
//!     archiver.create(dest)?;
//!     match archiver.add(src) {
//!         Ok(()) => {}
//!         Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
//!             eprintln!("Nothing to archive at {}", src);
//!         }
//!         Err(e) => return Err(e),
//!     }
//!     archiver.close();
//!     Ok(())
//! }
//! ```

use std::io;

/// The main error type for archive building.
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | Usage | [`NotInitialized`][Self::NotInitialized], [`Closed`][Self::Closed], [`AlreadyInitialized`][Self::AlreadyInitialized] | Calls out of lifecycle order |
/// | Finalize | [`FinalizeFailed`][Self::FinalizeFailed] | Retrying `finish` after it failed |
/// | I/O | [`Io`][Self::Io] | Sink creation, stat, open, read |
/// | Codec | [`Codec`][Self::Codec] | Entry creation rejected by the ZIP writer |
/// | Naming | [`InvalidEntryName`][Self::InvalidEntryName] | Path collapses to no name |
/// | Options | [`InvalidCompressionLevel`][Self::InvalidCompressionLevel], [`UnsupportedMethod`][Self::UnsupportedMethod] | Bad configuration |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An entry was added before the archive was opened.
    ///
    /// Call [`Archiver::create`](crate::Archiver::create) or
    /// [`Archiver::create_with_writer`](crate::Archiver::create_with_writer)
    /// first.
    #[error("archive not initialized")]
    NotInitialized,

    /// An operation was attempted on an archive that was already closed.
    #[error("archive already closed")]
    Closed,

    /// The archiver already has an open container.
    #[error("archive already initialized")]
    AlreadyInitialized,

    /// An earlier [`Archiver::finish`](crate::Archiver::finish) failed, so
    /// the archive on the sink is incomplete.
    #[error("archive finalization failed earlier; the archive is incomplete")]
    FinalizeFailed,

    /// An I/O error occurred while creating the destination or reading a
    /// source file.
    ///
    /// Check the underlying [`std::io::ErrorKind`] for specific handling:
    ///
    /// ```rust
    /// use ziptree::Error;
    /// use std::io::ErrorKind;
    ///
    /// fn describe(error: &Error) -> &'static str {
    ///     match error.io_kind() {
    ///         Some(ErrorKind::NotFound) => "missing source",
    ///         Some(ErrorKind::PermissionDenied) => "access denied",
    ///         Some(_) => "other I/O failure",
    ///         None => "not an I/O error",
    ///     }
    /// }
    /// ```
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The ZIP codec refused an operation, e.g. a duplicate entry name.
    #[error("codec error: {0}")]
    Codec(#[source] zip::result::ZipError),

    /// A path cannot be turned into an entry name.
    ///
    /// This happens when a file path equals the configured `sub_path`,
    /// leaving nothing to name the entry with, or when a path (or a symbolic
    /// link target) is not valid UTF-8.
    #[error("path '{path}' does not produce an entry name")]
    InvalidEntryName {
        /// The filesystem path that was being added.
        path: String,
    },

    /// The compression level is outside the valid range (0-9).
    #[error("invalid compression level {level}: must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u32,
    },

    /// The compression method is not compiled into this build.
    #[error("compression method {method} is not enabled in this build")]
    UnsupportedMethod {
        /// Name of the requested method.
        method: &'static str,
    },
}

impl Error {
    /// Returns `true` if this error comes from calling the archiver out of
    /// lifecycle order rather than from the filesystem or the codec.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::NotInitialized | Error::Closed | Error::AlreadyInitialized
        )
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Returns `true` if this error was raised by the ZIP codec.
    pub fn is_codec(&self) -> bool {
        matches!(self, Error::Codec(_))
    }

    /// Returns the I/O error kind, if this is an I/O error.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::Codec(other),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

/// A specialized Result type for archive building.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.is_io());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_zip_io_error_becomes_io() {
        let zip_err = zip::result::ZipError::Io(io::Error::new(
            io::ErrorKind::WriteZero,
            "sink full",
        ));
        let err: Error = zip_err.into();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::WriteZero));
    }

    #[test]
    fn test_zip_other_error_becomes_codec() {
        let zip_err = zip::result::ZipError::InvalidArchive("Duplicate filename".into());
        let err: Error = zip_err.into();
        assert!(err.is_codec());
        assert!(!err.is_io());
        assert!(err.to_string().contains("Duplicate filename"));
    }

    #[test]
    fn test_usage_errors() {
        assert!(Error::NotInitialized.is_usage_error());
        assert!(Error::Closed.is_usage_error());
        assert!(Error::AlreadyInitialized.is_usage_error());
        assert!(!Error::InvalidCompressionLevel { level: 12 }.is_usage_error());
    }

    #[test]
    fn test_finalize_failed_is_not_usage_error() {
        let err = Error::FinalizeFailed;
        assert!(!err.is_usage_error());
        assert!(!err.is_io());
        assert!(err.to_string().contains("incomplete"));
    }

    #[test]
    fn test_not_initialized_message() {
        assert_eq!(
            Error::NotInitialized.to_string(),
            "archive not initialized"
        );
    }

    #[test]
    fn test_invalid_entry_name() {
        let err = Error::InvalidEntryName {
            path: "testdata".into(),
        };
        assert!(err.to_string().contains("testdata"));
        assert_eq!(err.io_kind(), None);
    }

    #[test]
    fn test_invalid_compression_level() {
        let err = Error::InvalidCompressionLevel { level: 42 };
        assert_eq!(
            err.to_string(),
            "invalid compression level 42: must be 0-9"
        );
    }
}
