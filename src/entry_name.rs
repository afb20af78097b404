//! Entry naming: mapping filesystem paths onto ZIP entry names.
//!
//! Entry names inside a ZIP archive are forward-slash separated, never start
//! with a slash or a drive prefix, and end with a slash exactly when they
//! name a directory. [`normalize`] turns a filesystem path into such a name
//! after removing the configured strip prefix, and [`EntryName`] carries the
//! result with its directory flag so the invariants are checked in one place.
//!
//! # Examples
//!
//! ```
//! use ziptree::entry_name::{normalize, EntryName};
//!
//! assert_eq!(normalize("testdata/sub/b.txt", "testdata/"), "sub/b.txt");
//! assert_eq!(normalize(r"C:\data\a.txt", ""), "data/a.txt");
//!
//! let dir = EntryName::directory("testdata/sub", "testdata/").unwrap();
//! assert_eq!(dir.as_str(), "sub/");
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Lexically cleans a filesystem path.
///
/// Repeated separators and `.` segments are dropped, `name/..` pairs are
/// resolved, and `..` directly under the root is discarded. An empty result
/// becomes `.`. The filesystem is never consulted, so symbolic links are not
/// taken into account.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptree::entry_name::clean;
///
/// assert_eq!(clean("a//b/./c/"), Path::new("a/b/c"));
/// assert_eq!(clean("a/b/../c"), Path::new("a/c"));
/// assert_eq!(clean("/../x"), Path::new("/x"));
/// assert_eq!(clean(""), Path::new("."));
/// ```
pub fn clean(path: impl AsRef<Path>) -> PathBuf {
    let mut prefix = PathBuf::new();
    let mut rooted = false;
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in path.as_ref().components() {
        match component {
            Component::Prefix(p) => prefix.push(p.as_os_str()),
            Component::RootDir => rooted = true,
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(component.as_os_str()),
            },
            Component::Normal(name) => parts.push(name),
        }
    }

    let mut cleaned = prefix;
    if rooted {
        cleaned.push(Component::RootDir.as_os_str());
    }
    for part in parts {
        cleaned.push(part);
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Normalizes a filesystem path into an archive entry name.
///
/// The steps are:
///
/// 1. convert backslashes to forward slashes (in both `path` and
///    `sub_path`);
/// 2. strip `sub_path` from the front when `path` starts with it;
/// 3. drop a leading drive prefix such as `C:`;
/// 4. trim leading slashes.
///
/// A path that normalizes to `.` names the archive root and yields an empty
/// string. The function is total: every input produces a name, possibly
/// empty.
///
/// # Examples
///
/// ```
/// use ziptree::entry_name::normalize;
///
/// assert_eq!(normalize("/abs/dir/file.txt", ""), "abs/dir/file.txt");
/// assert_eq!(normalize("testdata/a.txt", "testdata"), "a.txt");
/// assert_eq!(normalize(r"root\sub\x.bin", r"root\"), "sub/x.bin");
/// assert_eq!(normalize("testdata", "testdata/"), "");
/// ```
pub fn normalize(path: &str, sub_path: &str) -> String {
    let path = path.replace('\\', "/");
    let sub_path = sub_path.replace('\\', "/");

    let relative = strip_sub_path(&path, &sub_path);
    let relative = strip_drive(relative);
    let name = relative.trim_start_matches('/');

    if name == "." {
        String::new()
    } else {
        name.to_string()
    }
}

/// Removes `sub_path` from the front of `path`.
///
/// A `sub_path` with a trailing slash also matches the bare directory it
/// names, so the root of an added tree maps to the empty name.
fn strip_sub_path<'p>(path: &'p str, sub_path: &str) -> &'p str {
    if sub_path.is_empty() {
        return path;
    }
    if let Some(rest) = path.strip_prefix(sub_path) {
        return rest;
    }
    let trimmed = sub_path.trim_end_matches('/');
    if !trimmed.is_empty() && path == trimmed {
        return "";
    }
    path
}

/// Drops a `X:` drive prefix when it is the whole path or followed by `/`.
fn strip_drive(path: &str) -> &str {
    let bytes = path.as_bytes();
    let is_drive = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/');
    if is_drive { &path[2..] } else { path }
}

/// A normalized entry name together with its kind.
///
/// `EntryName` upholds the naming invariants of the archive: no leading
/// slash, directory names end with exactly one `/`, file names never end
/// with `/`, and no name is empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName {
    name: String,
    is_directory: bool,
}

impl EntryName {
    /// Builds the entry name for a regular file.
    ///
    /// Returns `None` when the path normalizes to the archive root, since a
    /// file cannot be stored without a name.
    pub fn file(path: &str, sub_path: &str) -> Option<Self> {
        let name = normalize(path, sub_path);
        let name = name.trim_end_matches('/');
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            is_directory: false,
        })
    }

    /// Builds the entry name for a directory, with its trailing slash.
    ///
    /// Returns `None` when the path normalizes to the archive root; the root
    /// itself is never stored as an entry.
    pub fn directory(path: &str, sub_path: &str) -> Option<Self> {
        let name = normalize(path, sub_path);
        let name = name.trim_end_matches('/');
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: format!("{}/", name),
            is_directory: true,
        })
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this names a directory entry.
    #[inline]
    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Consumes the name, returning the underlying string.
    pub fn into_string(self) -> String {
        self.name
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_separators() {
        assert_eq!(clean("a//b///c"), Path::new("a/b/c"));
    }

    #[test]
    fn test_clean_drops_cur_dir() {
        assert_eq!(clean("./a/./b"), Path::new("a/b"));
        assert_eq!(clean("."), Path::new("."));
    }

    #[test]
    fn test_clean_trailing_slash() {
        assert_eq!(clean("testdata/"), Path::new("testdata"));
    }

    #[test]
    fn test_clean_resolves_parent() {
        assert_eq!(clean("a/b/../c"), Path::new("a/c"));
        assert_eq!(clean("a/.."), Path::new("."));
    }

    #[test]
    fn test_clean_keeps_leading_parent_when_relative() {
        assert_eq!(clean("../a"), Path::new("../a"));
        assert_eq!(clean("../../a/../b"), Path::new("../../b"));
    }

    #[test]
    fn test_clean_rooted_parent_discarded() {
        assert_eq!(clean("/.."), Path::new("/"));
        assert_eq!(clean("/../a"), Path::new("/a"));
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), Path::new("."));
    }

    #[test]
    fn test_normalize_relative() {
        assert_eq!(normalize("testdata/a.txt", ""), "testdata/a.txt");
    }

    #[test]
    fn test_normalize_strips_sub_path() {
        assert_eq!(normalize("testdata/a.txt", "testdata/"), "a.txt");
        assert_eq!(normalize("testdata/sub/b.txt", "testdata"), "sub/b.txt");
    }

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(normalize("/tmp/x/a.txt", ""), "tmp/x/a.txt");
        assert_eq!(normalize("/tmp/x/a.txt", "/tmp"), "x/a.txt");
    }

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize(r"dir\sub\file.txt", ""), "dir/sub/file.txt");
        assert_eq!(normalize(r"\\leading\x", ""), "leading/x");
    }

    #[test]
    fn test_normalize_backslash_sub_path() {
        assert_eq!(normalize("root/sub/x", r"root\"), "sub/x");
    }

    #[test]
    fn test_normalize_drive_prefix() {
        assert_eq!(normalize(r"C:\Users\me\a.txt", ""), "Users/me/a.txt");
        assert_eq!(normalize("d:", ""), "");
    }

    #[test]
    fn test_normalize_colon_in_name_kept() {
        assert_eq!(normalize("a:b.txt", ""), "a:b.txt");
    }

    #[test]
    fn test_normalize_root_is_empty() {
        assert_eq!(normalize("testdata", "testdata/"), "");
        assert_eq!(normalize("testdata", "testdata"), "");
        assert_eq!(normalize(".", ""), "");
        assert_eq!(normalize("/", ""), "");
    }

    #[test]
    fn test_normalize_unmatched_sub_path_left_alone() {
        assert_eq!(normalize("other/file.txt", "testdata/"), "other/file.txt");
    }

    #[test]
    fn test_normalize_unicode() {
        assert_eq!(normalize("данные/日本語.txt", "данные/"), "日本語.txt");
    }

    #[test]
    fn test_entry_name_file() {
        let name = EntryName::file("testdata/a.txt", "testdata/").unwrap();
        assert_eq!(name.as_str(), "a.txt");
        assert!(!name.is_directory());
    }

    #[test]
    fn test_entry_name_file_root_rejected() {
        assert!(EntryName::file("testdata", "testdata").is_none());
    }

    #[test]
    fn test_entry_name_directory() {
        let name = EntryName::directory("testdata/sub", "testdata/").unwrap();
        assert_eq!(name.as_str(), "sub/");
        assert!(name.is_directory());
    }

    #[test]
    fn test_entry_name_directory_single_trailing_slash() {
        let name = EntryName::directory(r"testdata\sub\", "").unwrap();
        assert_eq!(name.as_str(), "testdata/sub/");
    }

    #[test]
    fn test_entry_name_directory_root_skipped() {
        assert!(EntryName::directory("testdata", "testdata/").is_none());
    }

    #[test]
    fn test_entry_name_display() {
        let name = EntryName::directory("a/b", "").unwrap();
        assert_eq!(format!("{}", name), "a/b/");
        assert_eq!(name.into_string(), "a/b/");
    }
}
