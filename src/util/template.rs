//! Template interpolation for settings values.
//!
//! The tsconfig location in a build file may contain template expressions
//! (`{{ vars.conf_dir }}/tsconfig.json`). Resolution receives the processor
//! explicitly instead of reaching for shared state.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use minijinja::{context, Environment, UndefinedBehavior};

/// Interpolates dynamic values into a string template.
pub trait TemplateProcessor {
    /// Render `template`, returning the interpolated string.
    fn process(&self, template: &str) -> Result<String>;
}

/// Returns every template unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TemplateProcessor for Verbatim {
    fn process(&self, template: &str) -> Result<String> {
        Ok(template.to_string())
    }
}

/// Renders templates with MiniJinja.
///
/// Expressions see the build file's `[vars]` table as `vars` and the
/// process environment as `env`. Undefined variables are an error.
pub struct JinjaTemplates {
    env: Environment<'static>,
    vars: BTreeMap<String, String>,
    process_env: BTreeMap<String, String>,
}

impl JinjaTemplates {
    /// Create a processor over the given variables.
    pub fn new(vars: BTreeMap<String, String>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        JinjaTemplates {
            env,
            vars,
            process_env: std::env::vars().collect(),
        }
    }

    /// Replace the environment snapshot (used by tests).
    pub fn with_process_env(mut self, process_env: BTreeMap<String, String>) -> Self {
        self.process_env = process_env;
        self
    }
}

impl TemplateProcessor for JinjaTemplates {
    fn process(&self, template: &str) -> Result<String> {
        // Plain paths are by far the common case.
        if !template.contains("{{") && !template.contains("{%") {
            return Ok(template.to_string());
        }
        self.env
            .render_str(
                template,
                context! { vars => &self.vars, env => &self.process_env },
            )
            .with_context(|| format!("failed to render template `{}`", template))
    }
}
