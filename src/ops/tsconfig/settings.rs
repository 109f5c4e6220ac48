//! Turning raw `tsconfig` settings into one canonical descriptor.

use std::path::Path;

use crate::core::tsconfig::{TsConfigDescriptor, TsConfigSetting, TSCONFIG_FILE_NAME};
use crate::util::fs::FileSystem;
use crate::util::paths;
use crate::util::template::TemplateProcessor;

use super::errors::TsConfigError;
use super::ResolveContext;

/// Interpret one task- or target-level setting.
///
/// `true` means `tsconfig.json` in the working directory. A string is
/// interpolated and then stat'ed; a directory gets `tsconfig.json`
/// appended. `false`, an empty string, or no setting at all mean there is
/// no project file.
pub async fn descriptor_from_setting<F: FileSystem>(
    ctx: &ResolveContext<'_, F>,
    setting: Option<&TsConfigSetting>,
) -> Result<Option<TsConfigDescriptor>, TsConfigError> {
    match setting {
        None | Some(TsConfigSetting::Enabled(false)) => Ok(None),
        Some(TsConfigSetting::Enabled(true)) => {
            let path = ctx.cwd.join(TSCONFIG_FILE_NAME);
            Ok(Some(TsConfigDescriptor::at(path.to_string_lossy())))
        }
        Some(TsConfigSetting::Path(raw)) if raw.is_empty() => Ok(None),
        Some(TsConfigSetting::Path(raw)) => {
            let name = ctx
                .templates
                .process(raw)
                .map_err(|e| TsConfigError::invalid_setting(format!("{:#}", e), None))?;

            let on_disk = paths::resolve(ctx.cwd, &name);
            let is_dir = ctx.fs.is_dir(&on_disk).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TsConfigError::SettingNotFound {
                        path: name.clone(),
                        source: e,
                    }
                } else {
                    TsConfigError::invalid_setting(&e, Some(&e))
                }
            })?;

            let name = if is_dir {
                Path::new(&name)
                    .join(TSCONFIG_FILE_NAME)
                    .to_string_lossy()
                    .into_owned()
            } else {
                name
            };
            Ok(Some(TsConfigDescriptor::at(name)))
        }
        Some(TsConfigSetting::Descriptor(descriptor)) => Ok(Some(descriptor.clone())),
    }
}

/// Merge task- and target-level descriptors.
///
/// The task descriptor is the baseline. A target descriptor replaces it
/// when there is none, and otherwise overrides exactly `tsconfig`,
/// `ignore_settings`, `overwrite_files_glob`, `update_files` and
/// `pass_through` wherever it sets them. A target `tsconfig` path is
/// interpolated before use.
pub fn merge_descriptors(
    task: Option<TsConfigDescriptor>,
    target: Option<TsConfigDescriptor>,
    templates: &dyn TemplateProcessor,
) -> Result<Option<TsConfigDescriptor>, TsConfigError> {
    let Some(target) = target else {
        return Ok(task);
    };
    let mut merged = task.unwrap_or_else(|| target.clone());

    if let Some(path) = &target.tsconfig {
        let path = templates
            .process(path)
            .map_err(|e| TsConfigError::invalid_setting(format!("{:#}", e), None))?;
        merged.tsconfig = Some(path);
    }
    if target.ignore_settings.is_some() {
        merged.ignore_settings = target.ignore_settings;
    }
    if target.overwrite_files_glob.is_some() {
        merged.overwrite_files_glob = target.overwrite_files_glob;
    }
    if target.update_files.is_some() {
        merged.update_files = target.update_files;
    }
    if target.pass_through.is_some() {
        merged.pass_through = target.pass_through;
    }

    Ok(Some(merged))
}
