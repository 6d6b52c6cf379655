//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blacklist.yaml");
        std::fs::write(&path, "- a.txt\n").unwrap();

        let fs = LiveFileSystem;
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "- a.txt\n");
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let fs = LiveFileSystem;
        assert!(!fs.exists(&path));
        assert!(fs.read_to_string(&path).is_err());
    }
}
