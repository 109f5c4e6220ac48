//! Reading load order out of a reference file.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::reference::{ReferenceOrder, ScanState};
use crate::util::fs::FileSystem;
use crate::util::paths;

/// Prefix that marks a line as a reference directive.
const REFERENCE_INTRO: &str = "/// <reference path=\"";

static REFERENCE_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"/// <reference path="(.*?)""#).expect("reference pattern is valid")
});

/// Classify the references in `text` and resolve them against `reference_dir`.
///
/// `generated` lists reference paths (exactly as written in the file) that
/// are produced by earlier build steps; inside the unordered region they go
/// to the `generated` bucket instead of `unordered`.
pub fn parse(text: &str, reference_dir: &Path, generated: &[String]) -> ReferenceOrder {
    let mut sorted_generated: Vec<&str> = generated.iter().map(String::as_str).collect();
    sorted_generated.sort_unstable();
    let is_generated = |name: &str| sorted_generated.binary_search(&name).is_ok();

    let mut order = ReferenceOrder::default();
    let mut state = ScanState::default();

    for line in text.split('\n') {
        let line = line.trim();
        state = state.advance(line);

        if !line.contains(REFERENCE_INTRO) {
            continue;
        }
        let Some(captures) = REFERENCE_MATCH.captures(line) else {
            continue;
        };
        let filename = &captures[1];

        let bucket = match state {
            ScanState::Before => &mut order.before,
            ScanState::Unordered if is_generated(filename) => &mut order.generated,
            ScanState::Unordered => &mut order.unordered,
            ScanState::After => &mut order.after,
        };
        bucket.push(filename.into());
    }

    order.map_paths(|relative| paths::resolve(reference_dir, relative))
}

/// Read `reference_file` and classify its references.
///
/// The file must exist; checking for it is up to the caller.
pub async fn load(
    fs: &impl FileSystem,
    reference_file: &Path,
    reference_dir: &Path,
    generated: &[String],
) -> Result<ReferenceOrder> {
    let text = fs
        .read_to_string(reference_file)
        .await
        .with_context(|| format!("failed to read reference file: {}", reference_file.display()))?;

    let order = parse(&text, reference_dir, generated);
    tracing::debug!(
        "{} references in {}",
        order.len(),
        reference_file.display()
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reference_file, MockFileSystem};
    use std::path::PathBuf;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    }

    #[test]
    fn test_three_regions() {
        let text = reference_file(&["a.ts"], &["b.ts"], &["c.ts"]);
        let order = parse(&text, Path::new("/proj/src"), &[]);

        assert_eq!(names(&order.before), vec!["/proj/src/a.ts"]);
        assert_eq!(names(&order.unordered), vec!["/proj/src/b.ts"]);
        assert_eq!(names(&order.after), vec!["/proj/src/c.ts"]);
        assert!(order.generated.is_empty());
    }

    #[test]
    fn test_without_signatures_everything_is_before() {
        let text = "/// <reference path=\"a.ts\" />\n\
                    /// <reference path=\"gen.ts\" />\n\
                    /// <reference path=\"b.ts\" />\n\
                    /// <reference path=\"c.ts\" />\n";
        let order = parse(text, Path::new("/p"), &["gen.ts".to_string()]);

        assert_eq!(order.before.len(), 4);
        assert!(order.generated.is_empty());
        assert!(order.unordered.is_empty());
        assert!(order.after.is_empty());
    }

    #[test]
    fn test_generated_only_inside_unordered_region() {
        let text = reference_file(&["gen.ts"], &["gen.ts", "x.ts", "other.ts"], &[]);
        let generated = vec!["other.ts".to_string(), "gen.ts".to_string()];
        let order = parse(&text, Path::new("/p"), &generated);

        assert_eq!(names(&order.before), vec!["/p/gen.ts"]);
        assert_eq!(names(&order.generated), vec!["/p/gen.ts", "/p/other.ts"]);
        assert_eq!(names(&order.unordered), vec!["/p/x.ts"]);
    }

    #[test]
    fn test_generated_match_is_exact() {
        let text = reference_file(&[], &["lib/gen.ts"], &[]);
        let order = parse(&text, Path::new("/p"), &["gen.ts".to_string()]);

        assert!(order.generated.is_empty());
        assert_eq!(names(&order.unordered), vec!["/p/lib/gen.ts"]);
    }

    #[test]
    fn test_preserves_declared_order_and_resolves_parents() {
        let text = reference_file(&["z.ts", "../lib/a.ts"], &[], &["y.ts", "b.ts"]);
        let order = parse(&text, Path::new("/p/src"), &[]);

        assert_eq!(names(&order.before), vec!["/p/src/z.ts", "/p/lib/a.ts"]);
        assert_eq!(names(&order.after), vec!["/p/src/y.ts", "/p/src/b.ts"]);
    }

    #[test]
    fn test_signature_and_reference_on_one_line() {
        let text = "//grunt-start /// <reference path=\"a.ts\" />\n\
                    /// <reference path=\"b.ts\" /> //grunt-end\n";
        let order = parse(text, Path::new("/p"), &[]);

        assert_eq!(names(&order.unordered), vec!["/p/a.ts"]);
        assert_eq!(names(&order.after), vec!["/p/b.ts"]);
    }

    #[test]
    fn test_ignores_noise_and_handles_crlf() {
        let text = "// a comment\r\n\
                    /// <reference path=\"a.ts\" />\r\n\
                    /// <reference path=\"unterminated.ts />\r\n\
                    \r\n\
                    import x = require('x');\r\n";
        let order = parse(text, Path::new("/p"), &[]);

        assert_eq!(names(&order.before), vec!["/p/a.ts"]);
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_all_matches_bucket_concatenation() {
        let text = reference_file(&["a.ts"], &["g.ts", "u1.ts", "u2.ts"], &["z.ts"]);
        let order = parse(&text, Path::new("/p"), &["g.ts".to_string()]);

        let mut expected = order.before.clone();
        expected.extend(order.generated.clone());
        expected.extend(order.unordered.clone());
        expected.extend(order.after.clone());
        assert_eq!(order.all(), expected);
    }

    #[tokio::test]
    async fn test_load_through_filesystem() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/proj/src/reference.ts",
            reference_file(&["a.ts"], &["b.ts"], &["c.ts"]),
        );

        let order = load(
            &fs,
            Path::new("/proj/src/reference.ts"),
            Path::new("/proj/src"),
            &[],
        )
        .await
        .unwrap();
        assert_eq!(order.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let fs = MockFileSystem::new();
        let err = load(&fs, Path::new("/nope.ts"), Path::new("/"), &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read reference file"));
    }
}
