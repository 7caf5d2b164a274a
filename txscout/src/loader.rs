use std::path::Path;
use tracing::trace;

use crate::errors::{AnalysisError, AnalysisResult};

/// Reads a whole file and joins its lines with no separator.
///
/// Both `\n` and `\r\n` terminators are removed; every other byte is kept as is, so offsets
/// reported by the matcher refer to the joined text.
pub fn load_text(path: &Path) -> AnalysisResult<Vec<u8>> {
    trace!("Loading {}", path.display());

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AnalysisError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => AnalysisError::permission_denied(path),
        _ => AnalysisError::IoError(e),
    })?;

    let text = join_lines(&bytes);
    trace!(
        "Loaded {} bytes ({} after joining lines) from {}",
        bytes.len(),
        text.len(),
        path.display()
    );
    Ok(text)
}

/// Concatenates the lines of `bytes`, dropping their terminators
pub fn join_lines(bytes: &[u8]) -> Vec<u8> {
    let mut text = Vec::with_capacity(bytes.len());
    for line in bytes.split(|&b| b == b'\n') {
        text.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_join_lines() {
        assert_eq!(join_lines(b"abc\ndef\n"), b"abcdef".to_vec());
        assert_eq!(join_lines(b"abc\r\ndef"), b"abcdef".to_vec());
        assert_eq!(join_lines(b"\n\n"), Vec::<u8>::new());
        assert_eq!(join_lines(b""), Vec::<u8>::new());
        // Interior spaces and lone carriage returns are data
        assert_eq!(join_lines(b"a b\rc\n"), b"a b\rc".to_vec());
    }

    #[test]
    fn test_load_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transmission1.txt");
        std::fs::write(&path, "4A3B\n5C6D\n").unwrap();

        assert_eq!(load_text(&path).unwrap(), b"4A3B5C6D".to_vec());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_text(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound(p) if p == path));
    }
}
