//! Pipeline orchestration.
//!
//! The pipeline runs in two phases:
//! 1. detection: detectors enrich the metadata sequentially and contribute steps,
//! 2. execution: every step runs concurrently against the frozen metadata.
//!
//! A failing step never cancels the others; each one owns an independent
//! part of the destination tree, so partial output is kept and all errors
//! are reported together.

use crate::config::{Config, Platform};
use crate::constants::{GENERIC_GENERATOR, LANGUAGE_GENERATORS};
use crate::detector::{Detector, Detectors, Steps};
use crate::error::{Error, Result};
use crate::exec::{GenerateStep, StepContext};
use crate::fs::TemplateFs;
use crate::generate::Options;
use crate::handler::Handler;
use crate::metadata::Metadata;
use crate::renderer::TemplateRenderer;
use log::{debug, error, warn};
use rayon::prelude::*;
use std::path::Path;

/// Everything needed to scaffold a destination directory.
pub struct Pipeline<'a> {
    pub detectors: &'a Detectors,
    pub handlers: &'a [Handler],
    pub fs: &'a dyn TemplateFs,
    pub renderer: &'a dyn TemplateRenderer,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        detectors: &'a Detectors,
        handlers: &'a [Handler],
        fs: &'a dyn TemplateFs,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { detectors, handlers, fs, renderer }
    }

    /// Runs every detector and returns the enriched metadata with the steps
    /// to execute.
    ///
    /// A detector failing is logged and treated as having found nothing:
    /// its metadata changes and steps are discarded.
    pub fn detect(&self, destdir: &Path, config: Config) -> (Metadata, Steps) {
        let mut metadata = Metadata::new(config);
        let mut steps: Steps = Vec::new();

        for detector in self.detectors.general.iter().chain(&self.detectors.overriding) {
            apply(detector.as_ref(), destdir, &mut metadata, &mut steps);
        }

        // overriding detectors may have cancelled a language
        steps.retain(|step| match step.generator() {
            Some(generator) if LANGUAGE_GENERATORS.contains(&generator) => {
                metadata.languages.contains_key(generator)
            }
            _ => true,
        });

        if metadata.config.platform.is_none() {
            metadata.config.platform = Platform::from_host(&metadata.project_host);
        }

        if metadata.languages.is_empty() {
            debug!("No language detected, using the generic generator");
            steps.push(Box::new(GenerateStep::new(GENERIC_GENERATOR)));
        }
        (metadata, steps)
    }

    /// Runs all steps concurrently and joins their errors.
    pub fn execute(&self, steps: &Steps, metadata: &Metadata, options: &Options) -> Result<()> {
        let ctx = StepContext {
            fs: self.fs,
            renderer: self.renderer,
            handlers: self.handlers,
            metadata,
            options,
        };

        let errors: Vec<Error> = steps
            .par_iter()
            .filter_map(|step| {
                debug!("Running step '{}'", step.name());
                let err = step.exec(&ctx).err()?;
                error!("Step '{}' failed", step.name());
                Some(err)
            })
            .collect();

        Error::join(errors)
    }

    /// Runs the whole pipeline against `options.destdir`.
    ///
    /// Returns the configuration as patched by detectors, along with the
    /// joined errors of all steps.
    pub fn run(&self, config: Config, options: &Options) -> (Config, Result<()>) {
        let (metadata, steps) = self.detect(&options.destdir, config);
        let result = self.execute(&steps, &metadata, options);
        (metadata.config, result)
    }
}

fn apply(detector: &dyn Detector, destdir: &Path, metadata: &mut Metadata, steps: &mut Steps) {
    let mut candidate = metadata.clone();
    match detector.detect(destdir, &mut candidate) {
        Ok(found) => {
            *metadata = candidate;
            steps.extend(found);
        }
        Err(err) => warn!("Ignoring detector '{}': {err}", detector.name()),
    }
}
