//! Resolving a target's tsconfig.json into its options and file list.
//!
//! Resolution runs in three steps:
//! 1. Task- and target-level `tsconfig` settings are reduced to one
//!    [`TsConfigDescriptor`] (see [`settings`]).
//! 2. Unless the descriptor is in pass-through mode, the project file is
//!    read and parsed.
//! 3. Its compiler options and file list are merged into the caller's
//!    [`ResolvedOptions`], with the caller's own values always winning.

pub mod errors;
pub mod settings;

use std::path::Path;

use crate::core::task::{CompilationTask, ResolvedOptions};
use crate::core::tsconfig::{ProjectFile, TsConfigSetting, COMPILER_OPTION_NAMES};
use crate::util::fs::FileSystem;
use crate::util::paths;
use crate::util::template::TemplateProcessor;

pub use errors::TsConfigError;
pub use settings::{descriptor_from_setting, merge_descriptors};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Capabilities resolution runs against.
pub struct ResolveContext<'a, F> {
    /// File access
    pub fs: &'a F,
    /// Interpolation for `tsconfig` paths
    pub templates: &'a dyn TemplateProcessor,
    /// Directory relative paths are resolved from and reported against
    pub cwd: &'a Path,
}

impl<'a, F: FileSystem> ResolveContext<'a, F> {
    pub fn new(fs: &'a F, templates: &'a dyn TemplateProcessor, cwd: &'a Path) -> Self {
        ResolveContext { fs, templates, cwd }
    }
}

/// Resolve tsconfig settings and merge the project file into `options`.
///
/// Any failure aborts the whole resolution; `options` is only returned
/// once every step has succeeded.
pub async fn resolve<F: FileSystem>(
    ctx: &ResolveContext<'_, F>,
    mut options: ResolvedOptions,
    task_setting: Option<&TsConfigSetting>,
    target_setting: Option<&TsConfigSetting>,
) -> Result<ResolvedOptions, TsConfigError> {
    let task = descriptor_from_setting(ctx, task_setting).await?;
    let target = descriptor_from_setting(ctx, target_setting).await?;
    options.tsconfig = merge_descriptors(task, target, ctx.templates)?;

    let Some(descriptor) = options.tsconfig.as_mut() else {
        return Ok(options);
    };

    if descriptor.is_pass_through() {
        if descriptor.tsconfig.is_none() {
            descriptor.tsconfig = Some(".".to_string());
        }
        tracing::debug!("tsconfig pass-through, project file not read");
        if options.compilation_tasks.is_empty() {
            options.compilation_tasks.push(CompilationTask::default());
        }
        return Ok(options);
    }

    let Some(project_file) = descriptor.tsconfig.clone() else {
        return Err(TsConfigError::invalid_setting("no tsconfig path given", None));
    };
    let project_path = paths::resolve(ctx.cwd, &project_file);

    let text = ctx
        .fs
        .read_to_string(&project_path)
        .await
        .map_err(|e| TsConfigError::from_read(&project_file, &e))?;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);

    let project: ProjectFile = serde_json::from_str(text).map_err(|_| TsConfigError::Parse {
        path: project_file.clone(),
    })?;
    tracing::debug!("Using tsconfig {}", project_path.display());

    apply_compiler_options(&mut options, &project);
    apply_files(&mut options, &project, &project_path, ctx.cwd);
    apply_out_and_out_dir(&mut options, &project);

    Ok(options)
}

/// Copy allow-listed compiler options the caller has not set.
fn apply_compiler_options(options: &mut ResolvedOptions, project: &ProjectFile) {
    let ignore = options
        .tsconfig
        .as_ref()
        .is_some_and(|d| d.ignores_settings());
    let Some(project_options) = project.compiler_options() else {
        return;
    };
    if ignore {
        return;
    }

    for name in COMPILER_OPTION_NAMES {
        let Some(value) = project_options.get(*name) else {
            continue;
        };
        if !options.compiler_options.contains_key(*name) {
            tracing::debug!("tsconfig sets {} = {}", name, value);
            options.compiler_options.insert(name.to_string(), value.clone());
        }
    }
}

/// Append project files to the first task, skipping any already listed.
fn apply_files(options: &mut ResolvedOptions, project: &ProjectFile, project_path: &Path, cwd: &Path) {
    let project_dir = project_path.parent().unwrap_or(cwd);
    let src = &mut options.first_task_mut().src;

    for file in project.unique_files() {
        let absolute = paths::resolve(project_dir, file);
        let absolute_str = absolute.to_string_lossy();
        let relative = paths::relative_slash(cwd, &absolute);

        if !src.iter().any(|s| *s == absolute_str || *s == relative) {
            src.push(relative);
        }
    }
}

/// Copy the project's `out` and `outDir` onto every task.
fn apply_out_and_out_dir(options: &mut ResolvedOptions, project: &ProjectFile) {
    if project.compiler_options().is_none() {
        return;
    }
    let out = project.compiler_option_str("out");
    let out_dir = project.compiler_option_str("outDir");

    for task in &mut options.compilation_tasks {
        if let Some(out) = out {
            task.out = Some(out.to_string());
        }
        if let Some(out_dir) = out_dir {
            task.out_dir = Some(out_dir.to_string());
        }
    }
}
