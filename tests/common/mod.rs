//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use ziptree::{ArchiveOptions, Archiver, WriteResult};

/// An entry read back from a finished archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadEntry {
    pub name: String,
    pub is_dir: bool,
    pub data: Vec<u8>,
    pub unix_mode: Option<u32>,
}

/// Writes `files` under `root`, creating parent directories as needed.
///
/// A name ending in `/` creates an empty directory.
pub fn build_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (name, data) in files {
        let path = root.join(name);
        if name.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, data).unwrap();
    }
}

/// Returns a strip prefix that maps `dir/x` onto the entry name `x`.
pub fn sub_path_of(dir: &Path) -> String {
    format!("{}/", ziptree::entry_name::clean(dir).display())
}

/// Archives each of `sources` into an in-memory ZIP with the given options.
pub fn archive_to_vec<P: AsRef<Path>>(
    options: ArchiveOptions,
    sources: &[P],
) -> ziptree::Result<(Vec<u8>, WriteResult)> {
    let mut buffer = Cursor::new(Vec::new());
    let result = {
        let mut archiver = Archiver::new().options(options);
        archiver.create_with_writer(&mut buffer)?;
        for source in sources {
            archiver.add(source)?;
        }
        archiver.finish()?
    };
    Ok((buffer.into_inner(), result))
}

/// Reads every entry of an archive, in central directory order.
pub fn read_entries(bytes: &[u8]) -> Vec<ReadEntry> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip archive");
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.push(ReadEntry {
            name: file.name().to_string(),
            is_dir: file.is_dir(),
            data,
            unix_mode: file.unix_mode(),
        });
    }
    entries
}

/// Returns the entry names of an archive, in central directory order.
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    read_entries(bytes).into_iter().map(|e| e.name).collect()
}

/// Looks up an entry by name and returns its content.
pub fn entry_data(bytes: &[u8], name: &str) -> Option<Vec<u8>> {
    read_entries(bytes)
        .into_iter()
        .find(|e| e.name == name)
        .map(|e| e.data)
}
