use super::{Detector, Steps};
use crate::constants::CHART_DIR;
use crate::error::Result;
use crate::exec::{GenerateStep, RemoveStep};
use crate::metadata::Metadata;
use std::path::Path;

/// Schedules the Helm chart generation, or its removal once disabled.
pub struct HelmDetector;

impl Detector for HelmDetector {
    fn name(&self) -> &'static str {
        "helm"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        if !metadata.config.no_chart {
            return Ok(vec![Box::new(GenerateStep::new(self.name()))]);
        }
        if destdir.join(CHART_DIR).exists() {
            return Ok(vec![Box::new(RemoveStep::new(CHART_DIR))]);
        }
        Ok(Vec::new())
    }
}
