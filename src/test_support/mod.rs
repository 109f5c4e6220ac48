//! Test support utilities for tsbundle.
//!
//! This module provides an in-memory [`FileSystem`] and fixture generators
//! so resolution and loader generation can be tested without touching disk.
//!
//! # Example
//!
//! ```ignore
//! use tsbundle::test_support::{reference_file, MockFileSystem};
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let fs = MockFileSystem::new();
//!     fs.add_file("/proj/reference.ts", reference_file(&["a.ts"], &[], &[]));
//!
//!     // Pass `&fs` wherever a FileSystem is expected...
//! }
//! ```

pub mod fixtures;

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::util::fs::FileSystem;

pub use fixtures::*;

/// Mock filesystem for testing without real I/O.
///
/// Every method takes `&self` so the same instance can be handed to code
/// under test and inspected afterwards.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    inner: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    reads: Vec<PathBuf>,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given content.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        let mut state = self.state();
        if let Some(parent) = path.parent() {
            state.add_dir(parent);
        }
        state.files.insert(path, content.into());
    }

    /// Add a directory and all of its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.state().add_dir(path.as_ref());
    }

    /// Current contents of a file, if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state().files.get(path.as_ref()).cloned()
    }

    /// Every path read so far, in order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.state().reads.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl MockState {
    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("file not found: {}", path.display()),
    )
}

impl FileSystem for MockFileSystem {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut state = self.state();
        state.reads.push(path.to_path_buf());
        state.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path, contents);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> bool {
        let state = self.state();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let state = self.state();
        if state.dirs.contains(path) {
            Ok(true)
        } else if state.files.contains_key(path) {
            Ok(false)
        } else {
            Err(not_found(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file("/proj/src/a.ts", "export {}");

        assert!(fs.exists(Path::new("/proj/src/a.ts")).await);
        assert!(fs.exists(Path::new("/proj/src")).await);
        assert!(fs.is_dir(Path::new("/proj")).await.unwrap());
        assert!(!fs.is_dir(Path::new("/proj/src/a.ts")).await.unwrap());

        let err = fs.is_dir(Path::new("/nope")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        let text = fs.read_to_string(Path::new("/proj/src/a.ts")).await.unwrap();
        assert_eq!(text, "export {}");
        assert_eq!(fs.reads(), vec![PathBuf::from("/proj/src/a.ts")]);
    }

    #[tokio::test]
    async fn test_mock_write() {
        let fs = MockFileSystem::new();
        fs.write(Path::new("/out/x.js"), "x").await.unwrap();
        assert_eq!(fs.contents("/out/x.js").as_deref(), Some("x"));
        assert!(fs.is_dir(Path::new("/out")).await.unwrap());
    }
}
