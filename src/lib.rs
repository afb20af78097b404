//! # ziptree
//!
//! A small library for packing files and directory trees into ZIP archives.
//!
//! An [`Archiver`] opens one ZIP container, on a file path or on any
//! `Write + Seek` sink, and adds filesystem paths to it. A directory is
//! walked recursively: every sub-directory becomes a `name/` header entry
//! and every file is streamed into its own entry. Entry names are derived
//! from the filesystem path with a configurable prefix stripped, and are
//! always forward-slash separated and relative.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ziptree::{ArchiveOptions, Archiver, Result};
//!
//! fn main() -> Result<()> {
//!     let options = ArchiveOptions::new().sub_path("testdata/");
//!     let mut archiver = Archiver::new().options(options);
//!
//!     archiver.create("out.zip")?;
//!     // Stored as "a.txt", "sub/", "sub/b.txt", ...
//!     archiver.add("testdata")?;
//!
//!     let result = archiver.finish()?;
//!     println!("Wrote {} entries ({} bytes)", result.total_entries(), result.archive_size);
//!     Ok(())
//! }
//! ```
//!
//! ### Writing to Memory
//!
//! Pass `&mut sink` to keep ownership of the sink:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use ziptree::Archiver;
//!
//! let mut buffer = Cursor::new(Vec::new());
//! {
//!     let mut archiver = Archiver::new();
//!     archiver.create_with_writer(&mut buffer)?;
//!     archiver.add("notes.txt")?;
//!     archiver.close();
//! }
//! println!("{} bytes", buffer.get_ref().len());
//! # Ok::<(), ziptree::Error>(())
//! ```
//!
//! ### Diagnostics
//!
//! Every entry is reported through the [`log`](https://docs.rs/log) facade
//! at debug level. A diagnostic sink can also be attached to receive one
//! line per entry:
//!
//! ```rust,no_run
//! use ziptree::Archiver;
//!
//! let mut archiver = Archiver::new().debug(std::io::stderr());
//! archiver.create("out.zip")?;
//! archiver.add("testdata")?; // "Adding folder testdata header as testdata/" ...
//! # Ok::<(), ziptree::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `deflate` | Yes | Deflate compression |
//! | `bzip2` | No | BZip2 compression |
//! | `zstd` | No | Zstandard compression |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], which is an alias for
//! `std::result::Result<T, Error>`:
//!
//! ```rust,no_run
//! use ziptree::{Archiver, Error};
//!
//! fn pack(dest: &str, src: &str) -> ziptree::Result<()> {
//!     let mut archiver = Archiver::new();
//!     archiver.create(dest)?;
//!     match archiver.add(src) {
//!         Ok(()) => {}
//!         Err(Error::Codec(e)) => {
//!             eprintln!("Entry rejected: {}", e);
//!         }
//!         Err(e) => return Err(e),
//!     }
//!     archiver.finish()?;
//!     Ok(())
//! }
//! # fn main() {}
//! ```
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archiver;
pub mod entry_name;
pub mod error;
pub mod options;

pub use archiver::{ArchiveState, Archiver, Sink};
pub use entry_name::EntryName;
pub use error::{Error, Result};
pub use options::{ArchiveOptions, CompressionMethod, EntryMeta, WriteResult};
