use super::{Detector, Steps};
use crate::config::CiOption;
use crate::error::{Error, Result};
use crate::exec::GenerateStep;
use crate::metadata::{HugoFacts, Language, Metadata};
use log::{debug, info};
use std::path::Path;

/// Site configuration files, in lookup order.
const CONFIG_FILES: [&str; 4] = ["hugo.toml", "hugo.yaml", "hugo.yml", "config.toml"];

/// CI options that make no sense for a static site.
const UNSUPPORTED_OPTIONS: [CiOption; 2] = [CiOption::Codecov, CiOption::Sonar];

/// Detects a Hugo site.
///
/// A Hugo site usually is a Go module as well (for Hugo modules), this
/// detector therefore runs after the general ones and replaces the Go
/// language when it finds a site.
pub struct HugoDetector;

impl Detector for HugoDetector {
    fn name(&self) -> &'static str {
        "hugo"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        let Some(config_path) =
            CONFIG_FILES.iter().map(|name| destdir.join(name)).find(|path| path.is_file())
        else {
            return Ok(Vec::new());
        };
        if !destdir.join("content").is_dir() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let theme = read_theme(&config_path, &content).map_err(|message| Error::DetectorError {
            detector: self.name().to_string(),
            message: format!("{}: {message}", config_path.display()),
        })?;
        let Some(theme) = theme else {
            debug!("'{}' sets no theme, not a Hugo site", config_path.display());
            return Ok(Vec::new());
        };

        if metadata.languages.shift_remove("golang").is_some() {
            info!("Hugo site detected, it will not be scaffolded as a Go module");
        }
        for option in UNSUPPORTED_OPTIONS {
            if metadata.config.remove_ci_option(option) {
                info!("Disabling CI option {option:?}, unsupported for a Hugo site");
            }
        }

        metadata.add_language(Language::Hugo(HugoFacts { theme }));
        Ok(vec![Box::new(GenerateStep::new(self.name()))])
    }
}

fn read_theme(path: &Path, content: &str) -> std::result::Result<Option<String>, String> {
    let is_yaml = path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml");

    let theme = if is_yaml {
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        value.get("theme").and_then(|t| t.as_str()).map(str::to_string)
    } else {
        let value: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
        value.get("theme").and_then(|t| t.as_str()).map(str::to_string)
    };
    Ok(theme.filter(|theme| !theme.is_empty()))
}
