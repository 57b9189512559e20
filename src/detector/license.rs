use super::{Detector, Steps};
use crate::constants::{GENERATOR_NAME, LICENSE_FILE};
use crate::error::{Error, Result};
use crate::exec::{ExecStep, StepContext};
use crate::generate::write_file;
use crate::metadata::Metadata;
use chrono::Datelike;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::path::Path;

/// GitHub licenses API.
pub const LICENSES_API: &str = "https://api.github.com/licenses";

/// Schedules the retrieval of the configured license text.
pub struct LicenseDetector;

impl Detector for LicenseDetector {
    fn name(&self) -> &'static str {
        "license"
    }

    fn detect(&self, _: &Path, metadata: &mut Metadata) -> Result<Steps> {
        match &metadata.config.license {
            Some(license) => Ok(vec![Box::new(LicenseStep::new(license.clone()))]),
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LicenseResponse {
    body: String,
}

/// Fetches a license text and writes it to `LICENSE`.
///
/// An existing `LICENSE` is kept unless forced. Failures are reported as
/// regular step errors, without retry.
#[derive(Debug, Clone)]
pub struct LicenseStep {
    license: String,
    base_url: String,
}

impl LicenseStep {
    pub fn new<S: Into<String>>(license: S) -> Self {
        Self { license: license.into(), base_url: LICENSES_API.to_string() }
    }

    /// Uses another licenses API, e.g. a mirror.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn fetch(&self) -> Result<String> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.license);
        debug!("Fetching license from {url}");

        let client = Client::builder().user_agent(GENERATOR_NAME).build()?;
        let response: LicenseResponse = client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.body)
    }
}

/// Fills the usual placeholders of a license text.
pub fn fill_license(body: &str, year: i32, holder: &str) -> String {
    body.replace("[year]", &year.to_string()).replace("[fullname]", holder)
}

impl ExecStep for LicenseStep {
    fn name(&self) -> &str {
        "license"
    }

    fn exec(&self, ctx: &StepContext<'_>) -> Result<()> {
        let dest = ctx.options.destdir.join(LICENSE_FILE);
        if dest.exists() && !ctx.options.is_forced(LICENSE_FILE) {
            debug!("Keeping existing '{}'", dest.display());
            return Ok(());
        }

        let body = self.fetch().map_err(|e: Error| e.at(&dest))?;
        let holder = ctx
            .metadata
            .config
            .maintainers
            .first()
            .map(|m| m.name.as_str())
            .unwrap_or(ctx.metadata.project_name.as_str());

        let text = fill_license(&body, chrono::Utc::now().year(), holder);
        write_file(&dest, text.as_bytes()).map_err(|e| e.at(&dest))?;
        info!("Generated '{}'", dest.display());
        Ok(())
    }
}
