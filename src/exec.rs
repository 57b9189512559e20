//! Execution steps.
//!
//! Detectors contribute [`ExecStep`]s, each one owning a disjoint part of the
//! destination tree. Steps are produced once and run exactly once, all of
//! them concurrently against the same frozen [`Metadata`].

use crate::error::{Error, Result};
use crate::fs::TemplateFs;
use crate::generate::{remove_path, Generator, Options};
use crate::handler::Handler;
use crate::metadata::Metadata;
use crate::renderer::TemplateRenderer;
use log::info;
use std::path::PathBuf;

/// Everything a step may read while running.
pub struct StepContext<'a> {
    pub fs: &'a dyn TemplateFs,
    pub renderer: &'a dyn TemplateRenderer,
    pub handlers: &'a [Handler],
    pub metadata: &'a Metadata,
    pub options: &'a Options,
}

/// An independent unit of generation or removal.
pub trait ExecStep: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Sub-generator rendered by this step, if any.
    fn generator(&self) -> Option<&str> {
        None
    }

    fn exec(&self, ctx: &StepContext<'_>) -> Result<()>;
}

impl std::fmt::Debug for dyn ExecStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExecStep({})", self.name())
    }
}

/// Renders the template tree for one sub-generator.
#[derive(Debug, Clone)]
pub struct GenerateStep {
    generator: String,
}

impl GenerateStep {
    pub fn new<S: Into<String>>(generator: S) -> Self {
        Self { generator: generator.into() }
    }
}

impl ExecStep for GenerateStep {
    fn name(&self) -> &str {
        &self.generator
    }

    fn generator(&self) -> Option<&str> {
        Some(&self.generator)
    }

    fn exec(&self, ctx: &StepContext<'_>) -> Result<()> {
        Generator::new(&self.generator, ctx.fs, ctx.renderer, ctx.handlers, ctx.metadata, ctx.options)?
            .run()
    }
}

/// Removes a whole destination subtree, e.g. a disabled feature's directory.
#[derive(Debug, Clone)]
pub struct RemoveStep {
    name: String,
    path: PathBuf,
}

impl RemoveStep {
    /// `path` is relative to the destination directory.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self { name: format!("remove {}", path.display()), path }
    }
}

impl ExecStep for RemoveStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn exec(&self, ctx: &StepContext<'_>) -> Result<()> {
        let target = ctx.options.destdir.join(&self.path);
        if remove_path(&target).map_err(|e: Error| e.at(&target))? {
            info!("Removed '{}'", target.display());
        }
        Ok(())
    }
}
