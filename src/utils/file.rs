use crate::error::{ReportError, Result};
use log::debug;
use std::{fs, io::ErrorKind, path::Path};

/// Reads an optional status file, trimmed. Falls back to `placeholder` when the
/// file is absent or unreadable.
pub fn read_or_placeholder(path: &Path, placeholder: &str) -> String {
    match fs::read_to_string(path) {
        Ok(value) => value.trim().to_string(),
        Err(err_type) => {
            match err_type.kind() {
                ErrorKind::NotFound => debug!("File \"{}\" not found", path.display()),
                _ => debug!("Error occurred while attempting to read {}", path.display()),
            };
            placeholder.to_string()
        }
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deadlock.txt");
        fs::write(&path, "\n  Deadlock: [0, 1, 0]  \n\n").unwrap();
        assert_eq!(read_or_placeholder(&path, "none"), "Deadlock: [0, 1, 0]");
    }

    #[test]
    fn missing_file_gives_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optimum.txt");
        assert_eq!(
            read_or_placeholder(&path, "No optimization info"),
            "No optimization info"
        );
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("table.tex");
        let err = write_file(&path, "x").unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
