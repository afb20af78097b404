//! Property-based tests using proptest.
//!
//! These tests verify the entry naming invariants with randomly generated
//! paths.

use proptest::prelude::*;
use ziptree::EntryName;
use ziptree::entry_name::{clean, normalize};

/// Strategy for path segments that are never `.` or `..`.
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,7}"
}

/// Strategy for filesystem-like paths with mixed separators, optional drive
/// letters and leading slashes.
fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(""), Just("/"), Just("//"), Just("C:"), Just(r"C:\")],
        proptest::collection::vec(segment_strategy(), 0..5),
        prop_oneof![Just("/"), Just(r"\")],
        prop_oneof![Just(""), Just("/"), Just(r"\")],
    )
        .prop_map(|(prefix, parts, sep, suffix)| {
            format!("{}{}{}", prefix, parts.join(sep), suffix)
        })
}

proptest! {
    /// Normalized names never start with a slash or contain a backslash.
    #[test]
    fn normalized_names_are_relative(path in path_strategy(), sub in path_strategy()) {
        let name = normalize(&path, &sub);
        prop_assert!(!name.starts_with('/'), "leading slash in {:?}", name);
        prop_assert!(!name.contains('\\'), "backslash in {:?}", name);
    }

    /// Normalization never panics on arbitrary input.
    #[test]
    fn normalize_is_total(path in ".*", sub in ".*") {
        let _ = normalize(&path, &sub);
    }

    /// Directory names end with exactly one slash.
    #[test]
    fn directory_names_end_with_one_slash(path in path_strategy()) {
        if let Some(name) = EntryName::directory(&path, "") {
            let s = name.as_str();
            prop_assert!(s.ends_with('/'));
            prop_assert!(!s.ends_with("//"));
            prop_assert!(s.len() > 1);
        }
    }

    /// File names never end with a slash and are never empty.
    #[test]
    fn file_names_never_end_with_slash(path in path_strategy()) {
        if let Some(name) = EntryName::file(&path, "") {
            prop_assert!(!name.as_str().ends_with('/'));
            prop_assert!(!name.as_str().is_empty());
        }
    }

    /// Stripping a directory prefix leaves exactly the remainder.
    #[test]
    fn sub_path_prefix_is_removed(
        root in proptest::collection::vec(segment_strategy(), 1..3),
        rest in proptest::collection::vec(segment_strategy(), 1..3),
    ) {
        let root = root.join("/");
        let rest = rest.join("/");
        let path = format!("{}/{}", root, rest);
        prop_assert_eq!(normalize(&path, &format!("{}/", root)), rest);
    }

    /// Cleaning is idempotent.
    #[test]
    fn clean_is_idempotent(path in path_strategy()) {
        let path = path.replace('\\', "/");
        let once = clean(&path);
        let twice = clean(&once);
        prop_assert_eq!(once, twice);
    }
}
