//! AMD loader generation.
//!
//! The loader is a single `define` whose body nests `require` calls so that
//! modules load in reference-file order:
//!
//! ```text
//! define(function (require) {
//!   require(before[0]) -> require(before[1]) -> ...
//!     require(generated...) -> require(unordered...)
//!       require(after[0]) -> require(after[1]) -> ...
//! });
//! ```
//!
//! A sibling `.bin.js` module lists every file in one flat dependency array
//! for bundlers that only need the complete set.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::reference::{Bucket, ReferenceOrder};
use crate::core::task::LineEnding;
use crate::util::fs::{write_string, FileSystem};
use crate::util::paths;

/// Suffix of the flat manifest written next to the loader.
pub const BINARY_SUFFIX: &str = ".bin.js";

/// Generated loader text, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderArtifacts {
    /// Nested-require loader module
    pub loader: String,
    /// Flat dependency-list module
    pub manifest: String,
}

/// Generate loader artifacts for `order`.
///
/// `loader_path` and `out_dir` must be absolute. Source paths are mapped
/// into `out_dir` by replacing their common directory, stripped of their
/// extension, and made relative to the loader's directory. Declaration
/// files are dropped. Returns `None` when there is no output directory.
pub fn generate(
    order: &ReferenceOrder,
    loader_path: &Path,
    out_dir: Option<&Path>,
    new_line: LineEnding,
) -> Option<LoaderArtifacts> {
    let out_dir = out_dir?;
    let loader_dir = loader_path.parent().unwrap_or(Path::new(""));

    let mut files = order.clone();
    for bucket in Bucket::ALL {
        let bucket_paths = files.bucket_mut(bucket);
        bucket_paths.retain(|p| !paths::is_declaration_file(p));
        if !bucket_paths.is_empty() {
            tracing::debug!("{}: {}", capitalize(bucket), display_list(bucket_paths));
        }
    }

    let common = paths::common_dir(&files.all());
    if let Some(ref common) = common {
        tracing::debug!("Found common path: {}", common.display());
    }
    tracing::debug!("Using outDir: {}", out_dir.display());

    let modules = files.map_paths(|file| {
        let relocated = match common.as_deref().map(|c| file.strip_prefix(c)) {
            Some(Ok(rest)) => out_dir.join(rest),
            _ => out_dir.join(&file),
        };
        let module = paths::strip_extension(&relocated);
        PathBuf::from(format!("./{}", paths::relative_slash(loader_dir, &module)))
    });

    let names = |bucket: Bucket| -> Vec<String> {
        modules
            .bucket(bucket)
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    };
    let before = names(Bucket::Before);
    let generated = names(Bucket::Generated);
    let unordered = names(Bucket::Unordered);
    let after = names(Bucket::After);

    let manifest = render_manifest(&modules.all());
    let loader = render_loader(&before, &generated, &unordered, &after, new_line.as_str());

    Some(LoaderArtifacts { loader, manifest })
}

/// Build the nested loader from the innermost block outward.
fn render_loader(
    before: &[String],
    generated: &[String],
    unordered: &[String],
    after: &[String],
    nl: &str,
) -> String {
    let mut body = String::new();

    for file in after.iter().rev() {
        body = require_block(&quote(file), &body, nl);
    }

    // Unordered and generated files each load as one batch.
    if !unordered.is_empty() {
        body = require_block(&quote_batch(unordered, nl), &body, nl);
    }
    body = require_block(&quote_batch(generated, nl), &body, nl);

    for file in before.iter().rev() {
        body = require_block(&quote(file), &body, nl);
    }

    format!("define(function (require) {{ {nl}{body}{nl}}});")
}

fn render_manifest(modules: &[PathBuf]) -> String {
    let names: Vec<String> = modules
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    format!("define([\"{}\"],function () {{}});", names.join("\",\""))
}

fn require_block(names: &str, inner: &str, nl: &str) -> String {
    format!("\t require([{names}],function (){{{nl}{inner}{nl}\t }});")
}

fn quote(file: &str) -> String {
    format!("\"{}\"", file)
}

fn quote_batch(files: &[String], nl: &str) -> String {
    let separator = format!("\",{nl}\t\t  \"");
    format!("\"{}\"", files.join(&separator))
}

fn capitalize(bucket: Bucket) -> String {
    let name = bucket.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

fn display_list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Path of the flat manifest for a loader: `dir/name.js` becomes `dir/name.bin.js`.
pub fn binary_path(loader_path: &Path) -> PathBuf {
    let name = loader_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".js").unwrap_or(&name);
    loader_path.with_file_name(format!("{}{}", stem, BINARY_SUFFIX))
}

/// Write both artifacts, the flat manifest first.
pub async fn write_amd_loader(
    fs: &impl FileSystem,
    loader_path: &Path,
    artifacts: &LoaderArtifacts,
) -> Result<()> {
    let bin_path = binary_path(loader_path);
    write_string(fs, &bin_path, &artifacts.manifest).await?;
    tracing::debug!("Binary AMD loader written {}", bin_path.display());

    write_string(fs, loader_path, &artifacts.loader).await?;
    tracing::info!("AMD loader written {}", loader_path.display());
    Ok(())
}
