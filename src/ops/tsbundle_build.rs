//! Implementation of `tsbundle build`.
//!
//! For each selected target the build:
//! 1. expands the target's source globs into compilation tasks,
//! 2. resolves its tsconfig settings into those tasks and options,
//! 3. generates the AMD loader from its reference file, when asked to.
//!
//! Invoking the compiler on the resolved tasks is left to the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::build_file::{BuildFile, FilesEntry, TargetConfig};
use crate::core::task::{CompilationTask, LineEnding, ResolvedOptions};
use crate::ops::amd_loader::{self, LoaderArtifacts};
use crate::ops::reference_order;
use crate::ops::tsconfig::{self, ResolveContext};
use crate::util::diagnostic::{self, suggestions, Diagnostic};
use crate::util::fs::{glob_files, FileSystem};
use crate::util::paths;
use crate::util::template::TemplateProcessor;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Targets to build (empty = default targets)
    pub targets: Vec<String>,

    /// Targets used when none are named
    pub default_targets: Vec<String>,

    /// Resolve and report only; write nothing
    pub emit_plan: bool,

    /// Line ending when neither compiler options nor the build file set one
    pub line_ending: Option<LineEnding>,

    /// Color warnings printed as diagnostics
    pub color: bool,
}

/// What a target resolved to.
#[derive(Debug, Clone, Serialize)]
pub struct TargetOutcome {
    /// Target name
    pub target: String,

    /// Options after tsconfig resolution
    pub options: ResolvedOptions,

    /// Loader path, when one was generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<PathBuf>,
}

/// Choose which targets to build.
pub fn select_targets(build_file: &BuildFile, opts: &BuildOptions) -> Result<Vec<String>> {
    let requested = if !opts.targets.is_empty() {
        &opts.targets
    } else if !opts.default_targets.is_empty() {
        &opts.default_targets
    } else {
        return Ok(build_file.target_names());
    };

    for name in requested {
        build_file.target(name)?;
    }
    Ok(requested.clone())
}

/// Build the selected targets of a build file rooted at `root`.
pub async fn build(
    fs: &impl FileSystem,
    templates: &dyn TemplateProcessor,
    build_file: &BuildFile,
    root: &Path,
    opts: &BuildOptions,
) -> Result<Vec<TargetOutcome>> {
    let mut outcomes = Vec::new();
    for name in select_targets(build_file, opts)? {
        outcomes.push(build_target(fs, templates, build_file, &name, root, opts).await?);
    }
    Ok(outcomes)
}

/// Build one target.
pub async fn build_target(
    fs: &impl FileSystem,
    templates: &dyn TemplateProcessor,
    build_file: &BuildFile,
    name: &str,
    root: &Path,
    opts: &BuildOptions,
) -> Result<TargetOutcome> {
    let target = build_file.target(name)?;
    tracing::debug!("Building target `{}`", name);

    let tasks = compilation_tasks(root, target).await?;
    let options = ResolvedOptions::new(build_file.compiler_options_for(target), tasks);

    let ctx = ResolveContext::new(fs, templates, root);
    let options = tsconfig::resolve(
        &ctx,
        options,
        build_file.options.tsconfig.as_ref(),
        target.options.tsconfig.as_ref(),
    )
    .await
    .with_context(|| format!("failed to resolve tsconfig for target `{}`", name))?;

    let mut loader = None;
    if let Some(loader_file) = &target.amdloader {
        let loader_path = paths::resolve(root, loader_file);
        let new_line = options
            .new_line()
            .or_else(|| build_file.new_line_for(target))
            .or(opts.line_ending)
            .unwrap_or_default();

        if let Some(artifacts) =
            loader_artifacts(fs, target, &options, root, &loader_path, new_line, opts.color)
                .await?
        {
            if !opts.emit_plan {
                amd_loader::write_amd_loader(fs, &loader_path, &artifacts).await?;
            }
            loader = Some(loader_path);
        }
    }

    Ok(TargetOutcome {
        target: name.to_string(),
        options,
        loader,
    })
}

/// Expand a target's source globs into compilation tasks.
///
/// The target's own `src`/`out`/`out_dir` form the first task when any of
/// them is set; each `[[files]]` entry adds another. Globs are walked on
/// the blocking pool.
pub async fn compilation_tasks(
    root: &Path,
    target: &TargetConfig,
) -> Result<Vec<CompilationTask>> {
    let primary = FilesEntry {
        src: target.src.clone(),
        out: target.out.clone(),
        out_dir: target.out_dir.clone(),
    };
    let has_primary =
        !primary.src.is_empty() || primary.out.is_some() || primary.out_dir.is_some();

    let mut tasks = Vec::new();
    for entry in has_primary.then_some(&primary).into_iter().chain(&target.files) {
        let base = root.to_path_buf();
        let patterns = entry.src.clone();
        let matched = tokio::task::spawn_blocking(move || glob_files(&base, &patterns))
            .await
            .context("source glob task failed")??;

        let src = matched
            .iter()
            .map(|p| paths::relative_slash(root, p))
            .collect();
        tasks.push(CompilationTask {
            src,
            out: entry.out.clone(),
            out_dir: entry.out_dir.clone(),
        });
    }
    Ok(tasks)
}

/// Read the reference file and generate loader text, or explain why not.
async fn loader_artifacts(
    fs: &impl FileSystem,
    target: &TargetConfig,
    options: &ResolvedOptions,
    root: &Path,
    loader_path: &Path,
    new_line: LineEnding,
    color: bool,
) -> Result<Option<LoaderArtifacts>> {
    let Some(reference) = &target.reference else {
        tracing::warn!("Cannot generate amd loader unless a reference file is present");
        return Ok(None);
    };
    let reference_path = paths::resolve(root, reference);
    if !fs.exists(&reference_path).await {
        tracing::warn!("Cannot generate amd loader unless a reference file is present");
        return Ok(None);
    }

    // tsconfig resolution may have moved the compiler's output; follow it.
    let out_dir = options
        .compilation_tasks
        .first()
        .and_then(|t| t.out_dir.as_deref())
        .or(target.out_dir.as_deref());
    let Some(out_dir) = out_dir else {
        diagnostic::emit(
            &Diagnostic::warning("amdloader is set but no outDir is configured; skipping")
                .with_location(loader_path)
                .with_suggestion(suggestions::LOADER_NEEDS_OUT_DIR),
            color,
        );
        return Ok(None);
    };
    let out_dir = paths::resolve(root, out_dir);

    tracing::debug!(
        "Generating amdloader from reference file {}",
        reference_path.display()
    );
    let reference_dir = reference_path.parent().unwrap_or(root);
    let order =
        reference_order::load(fs, &reference_path, reference_dir, &target.generated).await?;

    if order.is_empty() {
        tracing::warn!("No files in reference file: {}", reference_path.display());
    } else {
        let files: Vec<String> = order.all().iter().map(|p| p.display().to_string()).collect();
        tracing::debug!("Files: {}", files.join(", "));
    }

    Ok(amd_loader::generate(
        &order,
        loader_path,
        Some(&out_dir),
        new_line,
    ))
}
