//! File operations for notes system
//!
//! Handles identifier sanitization, enumeration of the flat notes directory,
//! and reading/writing individual note files.

use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tempfile::NamedTempFile;

pub const NOTE_EXTENSION: &str = "md";

static UNSAFE_IDENTIFIER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z._-]").unwrap());

/// Turn a note title into a filename stem (e.g. "My Note!" -> "MyNote")
pub fn sanitize_identifier(title: &str) -> String {
    UNSAFE_IDENTIFIER_CHARS
        .replace_all(title.trim(), "")
        .into_owned()
}

/// Check that an identifier taken from a URL names a file directly inside the notes dir
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
}

/// Path of the file backing a note identifier
pub fn note_file_path(notes_dir: &Path, id: &str) -> PathBuf {
    notes_dir.join(format!("{}.{}", id, NOTE_EXTENSION))
}

/// List note identifiers: stems of the regular `.md` files directly inside `notes_dir`,
/// sorted by file name. Dotfiles and subdirectories are ignored.
pub fn list_note_ids(notes_dir: &Path) -> io::Result<Vec<String>> {
    let mut ids = Vec::new();

    for entry in fs::read_dir(notes_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true)
        {
            continue;
        }
        if !entry.file_type()?.is_file() {
            continue;
        }
        if path.extension().map(|e| e != NOTE_EXTENSION).unwrap_or(true) {
            continue;
        }
        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => ids.push(stem.to_string()),
            None => log::warn!("[NOTES] Skipping note with non UTF-8 name {:?}", path),
        }
    }

    ids.sort();
    Ok(ids)
}

/// Read a note file
pub fn read_note(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Write a note file through a temporary file in the same directory, so readers
/// only ever see the old or the new content.
pub fn write_note(path: &Path, content: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("My Note!"), "MyNote");
        assert_eq!(sanitize_identifier("  padded title  "), "paddedtitle");
        assert_eq!(sanitize_identifier("release-notes_v1.2"), "release-notes_v1.2");
        assert_eq!(sanitize_identifier("what? (draft) #3"), "whatdraft3");
        assert_eq!(sanitize_identifier("Café Ünïcode"), "Cafncode");
        assert_eq!(sanitize_identifier("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_identifier("日本語"), "");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("MyNote"));
        assert!(is_valid_identifier("v1.2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier(".."));
        assert!(!is_valid_identifier("a/b"));
        assert!(!is_valid_identifier("a\\b"));
    }

    #[test]
    fn test_write_and_read_note() {
        let dir = tempdir().unwrap();
        let path = note_file_path(dir.path(), "test-note");

        write_note(&path, "# Test\n\nContent here").unwrap();
        let content = read_note(&path).unwrap();
        assert!(content.contains("# Test"));
        assert!(content.contains("Content here"));

        write_note(&path, "replaced").unwrap();
        assert_eq!(read_note(&path).unwrap(), "replaced");
    }

    #[test]
    fn test_read_note_not_found() {
        let dir = tempdir().unwrap();
        let err = read_note(&note_file_path(dir.path(), "nonexistent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_list_note_ids() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path();

        fs::write(notes_dir.join("b-note.md"), "content").unwrap();
        fs::write(notes_dir.join("a-note.md"), "content").unwrap();
        fs::write(notes_dir.join("readme.txt"), "not a note").unwrap();
        fs::write(notes_dir.join(".hidden.md"), "skipped").unwrap();
        fs::create_dir(notes_dir.join("nested.md")).unwrap();
        fs::create_dir(notes_dir.join("ideas")).unwrap();
        fs::write(notes_dir.join("ideas/idea1.md"), "not scanned").unwrap();

        let ids = list_note_ids(notes_dir).unwrap();
        assert_eq!(ids, vec!["a-note", "b-note"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_note_ids_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plain.md"), "content").unwrap();
        let odd = dir.path().join(OsStr::from_bytes(b"bad\xff.md"));
        // Some filesystems refuse such names outright
        if fs::write(&odd, "content").is_err() {
            return;
        }

        assert_eq!(list_note_ids(dir.path()).unwrap(), vec!["plain"]);
    }

    #[test]
    fn test_list_note_ids_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(list_note_ids(&dir.path().join("absent")).is_err());
    }
}
