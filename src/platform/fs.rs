// LogAnalyzer - platform/fs.rs
//
// Filesystem abstraction trait.
// Lets the task runner be tested without real filesystem failures
// (permission errors cannot be produced portably, e.g. when running as root).

use std::io;
use std::path::Path;

/// Two-step accessibility probe for a task's target.
///
/// The runner calls `stat` first and `open` only when `stat` succeeded, so
/// implementations can distinguish "missing" from "present but unreadable".
pub trait ResourceProbe: Send + Sync {
    /// Confirm the target exists (metadata lookup).
    fn stat(&self, target: &Path) -> io::Result<()>;

    /// Confirm the target can be opened for reading.
    fn open(&self, target: &Path) -> io::Result<()>;
}

/// `ResourceProbe` backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl ResourceProbe for LocalFs {
    fn stat(&self, target: &Path) -> io::Result<()> {
        std::fs::metadata(target).map(|_| ())
    }

    fn open(&self, target: &Path) -> io::Result<()> {
        // The handle is closed on drop; only readability matters here.
        std::fs::File::open(target).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_fs_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "line\n").unwrap();

        assert!(LocalFs.stat(&path).is_ok());
        assert!(LocalFs.open(&path).is_ok());
    }

    #[test]
    fn test_local_fs_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");

        let err = LocalFs.stat(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
