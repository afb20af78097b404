//! Tree walking and entry emission.

use std::fs::File;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::entry_name::{self, EntryName};
use crate::{EntryMeta, Error, Result};

use super::Archiver;

impl Archiver<'_> {
    /// Adds a file or a directory tree to the archive.
    ///
    /// A regular file becomes a single entry. A directory is walked in
    /// pre-order with siblings sorted by name: each directory is written as
    /// a `name/` header before its children, and each file is streamed into
    /// its own entry. Symbolic links are never followed: a link is stored as
    /// a link entry holding its target path.
    ///
    /// The first failure aborts the walk and is returned. Entries written
    /// before it remain in the archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] / [`Error::Closed`] outside the
    /// `Open` state, [`Error::Io`] when a path cannot be stat'ed or read,
    /// [`Error::InvalidEntryName`] for paths that are not valid UTF-8, and
    /// [`Error::Codec`] when the writer rejects an entry (for example a
    /// duplicate name).
    pub fn add(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = entry_name::clean(path);
        self.ensure_open()?;

        let metadata = std::fs::symlink_metadata(&path)?;
        if !metadata.is_dir() {
            return self.add_entry(&path, &EntryMeta::from_metadata(&metadata));
        }

        for entry in WalkDir::new(&path).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            let meta = EntryMeta::from_metadata(&entry.metadata()?);
            self.add_entry(&entry_name::clean(entry.path()), &meta)?;
        }
        Ok(())
    }

    fn add_entry(&mut self, path: &Path, meta: &EntryMeta) -> Result<()> {
        if meta.is_directory {
            self.add_directory(path, meta)
        } else if meta.is_symlink {
            self.add_symlink(path, meta)
        } else {
            self.add_file(path, meta)
        }
    }

    fn add_directory(&mut self, path: &Path, meta: &EntryMeta) -> Result<()> {
        let display = utf8(path)?;
        let Some(name) = EntryName::directory(display, &self.options.sub_path) else {
            log::trace!("Skipping archive root {}", display);
            return Ok(());
        };

        self.diagnostic(format_args!("Adding folder {} header as {}", display, name));
        let options = self.options.stored_options(meta);
        self.writer_mut()?.add_directory(name.as_str(), options)?;
        self.stats.directories_written += 1;
        Ok(())
    }

    fn add_symlink(&mut self, path: &Path, meta: &EntryMeta) -> Result<()> {
        let display = utf8(path)?;
        let name = self.file_name(display)?;
        let target = std::fs::read_link(path)?;
        let target = utf8(&target)?.to_string();

        self.diagnostic(format_args!("Adding link {} to archive as {}", display, name));
        let options = self.options.stored_options(meta);
        self.writer_mut()?.add_symlink(name.as_str(), target, options)?;
        self.stats.entries_written += 1;
        Ok(())
    }

    fn add_file(&mut self, path: &Path, meta: &EntryMeta) -> Result<()> {
        let display = utf8(path)?;
        let name = self.file_name(display)?;

        self.diagnostic(format_args!("Adding {} to archive as {}", display, name));
        let options = self.options.file_options(meta)?;

        // Open before starting the entry so a missing file leaves no header
        let mut source = File::open(path)?;
        let writer = self.writer_mut()?;
        writer.start_file(name.as_str(), options)?;
        let copied = io::copy(&mut source, writer)?;

        self.stats.entries_written += 1;
        self.stats.total_size += copied;
        Ok(())
    }

    fn file_name(&self, path: &str) -> Result<EntryName> {
        EntryName::file(path, &self.options.sub_path).ok_or_else(|| Error::InvalidEntryName {
            path: path.to_string(),
        })
    }
}

/// Borrows a path as UTF-8; entry names cannot carry other encodings.
fn utf8(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::InvalidEntryName {
        path: path.to_string_lossy().into_owned(),
    })
}
