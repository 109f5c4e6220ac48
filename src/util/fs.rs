//! Filesystem capability and helpers.
//!
//! Reference files and tsconfig documents are read through the
//! [`FileSystem`] trait so that resolution can run against the real disk or
//! an in-memory tree in tests.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Asynchronous file access used by the resolution pipelines.
#[allow(async_fn_in_trait)]
pub trait FileSystem {
    /// Read a whole file as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a file, creating parent directories as needed.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Check whether a file or directory exists.
    async fn exists(&self, path: &Path) -> bool;

    /// Stat a path and report whether it is a directory.
    ///
    /// Fails with [`io::ErrorKind::NotFound`] when nothing is there.
    async fn is_dir(&self, path: &Path) -> io::Result<bool>;
}

/// The real filesystem, backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, contents).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn is_dir(&self, path: &Path) -> io::Result<bool> {
        let meta = tokio::fs::symlink_metadata(path).await?;
        Ok(meta.is_dir())
    }
}

/// Write a string to a file through a [`FileSystem`], with a nice error message.
pub async fn write_string(fs: &impl FileSystem, path: &Path, contents: &str) -> Result<()> {
    fs.write(path, contents)
        .await
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Find files matching glob patterns relative to a base directory.
///
/// Results keep the order of the patterns; within one pattern they follow
/// the glob walk order. A file matched by several patterns is listed once.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        // Make pattern absolute by joining with base
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() && !results.contains(&path) {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("main.ts"), "export {}").unwrap();
        std::fs::write(src.join("util.ts"), "export {}").unwrap();
        std::fs::write(src.join("readme.txt"), "readme").unwrap();

        let files = glob_files(tmp.path(), &["src/**/*.ts".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_glob_files_dedups_across_patterns() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.ts"), "").unwrap();

        let files =
            glob_files(tmp.path(), &["*.ts".to_string(), "a.ts".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_real_fs_write_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build").join("js").join("loader.js");

        RealFs.write(&path, "define([]);").await.unwrap();

        assert!(RealFs.exists(&path).await);
        assert!(RealFs.is_dir(&tmp.path().join("build")).await.unwrap());
        assert!(!RealFs.is_dir(&path).await.unwrap());
        assert_eq!(RealFs.read_to_string(&path).await.unwrap(), "define([]);");
    }

    #[tokio::test]
    async fn test_real_fs_is_dir_missing() {
        let tmp = TempDir::new().unwrap();
        let err = RealFs.is_dir(&tmp.path().join("nope")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
