//! Lexical path helpers.
//!
//! Nothing in here touches the filesystem: paths are resolved, compared and
//! rewritten purely by their components, the way a bundler has to treat
//! output locations that do not exist yet.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// A `..` that would climb above the root of an absolute path is dropped;
/// leading `..` components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Resolve `path` against `base`, returning a normalized absolute path when
/// `base` is absolute.
pub fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a path with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Relative path from `base` to `path`, rendered with forward slashes.
pub fn relative_slash(base: &Path, path: &Path) -> String {
    to_slash(&relative_path(base, path))
}

/// Longest directory prefix shared by every path in `paths`.
///
/// Only parent directories are compared, so a single file yields its own
/// directory. Returns `None` for an empty set or when nothing is shared.
pub fn common_dir<P: AsRef<Path>>(paths: &[P]) -> Option<PathBuf> {
    let mut iter = paths.iter().map(|p| p.as_ref().parent().unwrap_or(Path::new("")));
    let first = iter.next()?;
    let mut shared: Vec<Component<'_>> = first.components().collect();

    for dir in iter {
        let len = shared
            .iter()
            .zip(dir.components())
            .take_while(|(a, b)| *a == b)
            .count();
        shared.truncate(len);
    }

    if shared.is_empty() {
        None
    } else {
        Some(shared.iter().collect())
    }
}

/// Drop the final `.ext` of the file name, keeping any earlier dots.
pub fn strip_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// Check whether a path names a TypeScript declaration file.
pub fn is_declaration_file(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".d.ts")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
        assert_eq!(normalize(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Path::new("/work/project");
        assert_eq!(resolve(base, "src/a.ts"), PathBuf::from("/work/project/src/a.ts"));
        assert_eq!(resolve(base, "../lib/b.ts"), PathBuf::from("/work/lib/b.ts"));
        assert_eq!(resolve(base, "/abs/c.ts"), PathBuf::from("/abs/c.ts"));
    }

    #[test]
    fn test_relative_slash() {
        let base = Path::new("/work/build");
        assert_eq!(relative_slash(base, Path::new("/work/build/js/a")), "js/a");
        assert_eq!(relative_slash(base, Path::new("/work/other/b")), "../other/b");
    }

    #[test]
    fn test_common_dir() {
        let paths = vec![
            PathBuf::from("/src/ts/a.ts"),
            PathBuf::from("/src/ts/inside/b.ts"),
        ];
        assert_eq!(common_dir(&paths), Some(PathBuf::from("/src/ts")));

        let single = vec![PathBuf::from("/src/ts/inside/b.ts")];
        assert_eq!(common_dir(&single), Some(PathBuf::from("/src/ts/inside")));

        let none: Vec<PathBuf> = Vec::new();
        assert_eq!(common_dir(&none), None);
    }

    #[test]
    fn test_common_dir_does_not_split_names() {
        let paths = vec![PathBuf::from("/src/app/a.ts"), PathBuf::from("/src/apple/b.ts")];
        assert_eq!(common_dir(&paths), Some(PathBuf::from("/src")));
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension(Path::new("/a/b.ts")), PathBuf::from("/a/b"));
        assert_eq!(strip_extension(Path::new("/a/b.spec.tsx")), PathBuf::from("/a/b.spec"));
        assert_eq!(strip_extension(Path::new("/a/b")), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_is_declaration_file() {
        assert!(is_declaration_file(Path::new("/defs/tsd.d.ts")));
        assert!(!is_declaration_file(Path::new("/src/app.ts")));
    }
}
