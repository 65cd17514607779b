//! Filesystem path removal.

use std::fs;
use std::io;
use std::path::Path;

use super::processors::PathRemover;

/// Removes paths with `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl PathRemover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_removes_file_and_folder() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("main.css");
        let folder = dir.path().join("results");
        fs::write(&file, "a{}").unwrap();
        fs::create_dir_all(folder.join("nested")).unwrap();
        fs::write(folder.join("nested/report.json"), "{}").unwrap();

        FsRemover.remove(&file).unwrap();
        FsRemover.remove(&folder).unwrap();

        assert!(!file.exists());
        assert!(!folder.exists());
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let err = FsRemover.remove(&dir.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
