use std::fs;
use std::io;
use std::path::Path;

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Check whether a path's file name ends with one of the given suffixes.
///
/// Suffixes are matched literally against the full file name, so `.d.ts`
/// works as well as `.ts`. A path without a file name never matches.
#[must_use]
pub fn has_suffix<S: AsRef<str>>(path: &Path, suffixes: &[S]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    suffixes.iter().any(|s| name.ends_with(s.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_to_string_lossy_valid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        // Write invalid UTF-8: valid start, then invalid continuation
        file.write_all(&[0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x80, 0x81])
            .unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert!(content.starts_with("Hello"));
        assert!(content.contains('\u{FFFD}'));
    }

    #[test]
    fn test_read_missing_file_errors() {
        let result = read_to_string_lossy(Path::new("/nonexistent/reqlink/file.js"));
        assert!(result.is_err());
    }

    #[test]
    fn test_has_suffix() {
        let exts = [".js", ".ts"];
        assert!(has_suffix(Path::new("src/app.js"), &exts));
        assert!(has_suffix(Path::new("types.d.ts"), &exts));
        assert!(!has_suffix(Path::new("style.css"), &exts));
        assert!(!has_suffix(Path::new("/"), &exts));
    }

    #[test]
    fn test_has_suffix_empty_list() {
        let exts: [&str; 0] = [];
        assert!(!has_suffix(Path::new("app.js"), &exts));
    }
}
