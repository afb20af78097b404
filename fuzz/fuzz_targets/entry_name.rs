//! Fuzz target for entry name normalization with arbitrary string input.
//!
//! Run with: cargo +nightly fuzz run entry_name
//!
//! Properties checked:
//! - No leading slash or backslash in any normalized name
//! - Directory names end with exactly one slash
//! - File names are never empty and never end with a slash

#![no_main]

use libfuzzer_sys::fuzz_target;
use ziptree::EntryName;
use ziptree::entry_name::normalize;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the path, the rest is the strip prefix
    let (path, sub_path) = input.split_once('\n').unwrap_or((input, ""));

    let name = normalize(path, sub_path);
    assert!(!name.starts_with('/'), "Leading slash: {:?}", name);
    assert!(!name.contains('\\'), "Backslash: {:?}", name);

    if let Some(dir) = EntryName::directory(path, sub_path) {
        assert!(dir.as_str().ends_with('/'));
        assert!(!dir.as_str().ends_with("//"), "Double slash: {:?}", dir);
    }

    if let Some(file) = EntryName::file(path, sub_path) {
        assert!(!file.as_str().is_empty());
        assert!(!file.as_str().ends_with('/'), "File as directory: {:?}", file);
    }
});
