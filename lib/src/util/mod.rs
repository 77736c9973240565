use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serializer;

use crate::error::{Chainable, Result};

/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing whitespace.
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        for b in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => {
                    if need_dash {
                        output.push('-');
                        need_dash = false;
                    }

                    output.push(b.to_ascii_lowercase() as char);
                }
                _ => {
                    // All sequences of characters that aren't alphanumeric or
                    // `_` are converted into one `-`.
                    need_dash = !output.is_empty();
                }
            }
        }
    }

    output
}

/// Returns `true` for names the build never treats as content: dotfiles such
/// as `.DS_Store` or editor swap files.
pub fn is_hidden(file_name: &OsStr) -> bool {
    file_name.as_encoded_bytes().first() == Some(&b'.')
}

/// Which entries of a directory [`list_dir`] returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Entries {
    /// Visible files (and links to files) only.
    Content,
    /// Every entry, hidden or not, including directories.
    All,
}

/// Lists the entries of `dir` selected by `which`, sorted by file name so
/// builds are reproducible.
pub fn list_dir<P: AsRef<Path>>(dir: P, which: Entries) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_dir = fs::read_dir(dir).chain_with(|| error! {
        "failed to list source directory",
        "directory" => dir.display(),
    })?;

    let mut entries = vec![];
    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();
        if which == Entries::Content && (is_hidden(&entry.file_name()) || path.is_dir()) {
            continue;
        }

        entries.push(path);
    }

    entries.sort();
    Ok(entries)
}

/// Serializes an absent string as `""`, so templates print nothing for it.
pub fn or_empty<S: Serializer>(value: &Option<String>, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(value.as_deref().unwrap_or_default())
}

/// The name a rendered page is written under: the source file name with a
/// trailing `.md` removed. `hello.md` becomes `hello`; `notes.txt` is kept.
pub fn output_name(source: &Path) -> String {
    let name = source.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();

    match name.strip_suffix(".md") {
        Some(stem) => stem.to_string(),
        None => name.into_owned(),
    }
}

#[cfg(test)]
mod util_tests {
    use std::path::Path;

    use crate::util::{list_dir, output_name, slugify, Entries};

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Test String!!!1!1"), "my-test-string-1-1");
        assert_eq!(slugify("test\nit   now!"), "test-it-now");
        assert_eq!(slugify("  --test_-_cool- -  "), "test_-_cool");
        assert_eq!(slugify("Æúű--cool?"), "aeuu-cool");
        assert_eq!(slugify("You & Me"), "you-me");
    }

    #[test]
    fn output_name_strips_markdown_extension() {
        assert_eq!(output_name(Path::new("articles/hello.md")), "hello");
        assert_eq!(output_name(Path::new("articles/hello.world.md")), "hello.world");
        assert_eq!(output_name(Path::new("articles/notes.txt")), "notes.txt");
    }

    #[test]
    fn list_dir_selects_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), "").unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::write(dir.path().join(".DS_Store"), "").unwrap();
        std::fs::create_dir(dir.path().join("drafts")).unwrap();

        let names = |entries: Vec<std::path::PathBuf>| entries.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        assert_eq!(names(list_dir(dir.path(), Entries::Content).unwrap()), ["a.md", "b.md"]);
        assert_eq!(names(list_dir(dir.path(), Entries::All).unwrap()), [".DS_Store", "a.md", "b.md", "drafts"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_listed() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = std::ffi::OsStr::from_bytes(b"caf\xe9.md");
        if std::fs::write(dir.path().join(name), "").is_err() {
            // Some filesystems only accept UTF-8 names.
            return;
        }

        let entries = list_dir(dir.path(), Entries::Content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name(), Some(name));
    }

    #[test]
    fn list_dir_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_dir(dir.path().join("nope"), Entries::Content).is_err());
    }
}
