use super::{Detector, Steps};
use crate::error::{Error, Result};
use crate::exec::GenerateStep;
use crate::metadata::{Language, Metadata, NodeFacts};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_PACKAGE_MANAGER: &str = "npm";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    package_manager: Option<String>,
    #[serde(default)]
    private: bool,
}

/// Detects a Node package through its `package.json`.
pub struct NodeDetector;

impl Detector for NodeDetector {
    fn name(&self) -> &'static str {
        "node"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        let manifest = destdir.join("package.json");
        if !manifest.is_file() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&manifest)?;
        let package: PackageJson =
            serde_json::from_str(&content).map_err(|e| Error::DetectorError {
                detector: self.name().to_string(),
                message: format!("{}: {e}", manifest.display()),
            })?;

        let (package_manager, manager_version) = match package.package_manager.as_deref() {
            Some(spec) => match spec.split_once('@') {
                Some((manager, version)) => (manager.to_string(), Some(version.to_string())),
                None => (spec.to_string(), None),
            },
            None => (DEFAULT_PACKAGE_MANAGER.to_string(), None),
        };

        // scoped packages are named after their last segment
        let short_name = package.name.rsplit('/').next().unwrap_or_default().to_string();
        if metadata.project_name.is_empty() {
            metadata.project_name = short_name.clone();
        }
        if package.main.is_some() && !short_name.is_empty() {
            metadata.add_binary(short_name);
        }

        metadata.add_language(Language::Node(NodeFacts {
            name: package.name,
            package_manager,
            manager_version,
            private: package.private,
        }));
        Ok(vec![Box::new(GenerateStep::new(self.name()))])
    }
}
