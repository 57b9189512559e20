//! Configuration handling for craft.
//! The configuration lives in a `.craft` YAML document at the destination root.
//! It is validated against an embedded JSON Schema before being deserialized,
//! so that invalid combinations are rejected before anything is written.

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON Schema the configuration must satisfy.
pub const SCHEMA: &str = include_str!("../schemas/craft.schema.json");

/// User-declared options describing the desired shape of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<Bot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<Ci>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<Docker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<Maintainer>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub no_chart: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub no_goreleaser: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub no_makefile: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Dependency update bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bot {
    Dependabot,
    Renovate,
}

/// Continuous integration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ci {
    pub name: CiName,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CiOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,

    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_site: Option<StaticSite>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiName {
    Github,
    Gitlab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiOption {
    Codecov,
    Codeql,
    Labeler,
    Sonar,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub auto: bool,

    #[serde(default)]
    pub backmerge: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSite {
    pub name: StaticName,

    #[serde(default)]
    pub auto: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticName {
    Pages,
    Netlify,
}

/// Container image settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Git hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Bitbucket,
    Gitea,
    Github,
    Gitlab,
}

impl Platform {
    /// Guesses the platform from a repository host name.
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.to_lowercase();
        if host.contains("github") {
            Some(Platform::Github)
        } else if host.contains("gitlab") {
            Some(Platform::Gitlab)
        } else if host.contains("bitbucket") {
            Some(Platform::Bitbucket)
        } else if host.contains("gitea") {
            Some(Platform::Gitea)
        } else {
            None
        }
    }
}

impl Config {
    /// Whether the CI provider is the given one.
    pub fn is_ci(&self, name: CiName) -> bool {
        self.ci.as_ref().is_some_and(|ci| ci.name == name)
    }

    /// Whether the CI is set and carries the given option.
    pub fn has_ci_option(&self, option: CiOption) -> bool {
        self.ci.as_ref().is_some_and(|ci| ci.options.contains(&option))
    }

    /// Removes a CI option, returning whether it was present.
    pub fn remove_ci_option(&mut self, option: CiOption) -> bool {
        match self.ci.as_mut() {
            Some(ci) => {
                let before = ci.options.len();
                ci.options.retain(|o| *o != option);
                before != ci.options.len()
            }
            None => false,
        }
    }
}

/// Validates a raw configuration document against [`SCHEMA`].
///
/// Every violation is reported, each prefixed with the JSON pointer of the
/// offending value.
pub fn validate(instance: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value = serde_json::from_str(SCHEMA)
        .map_err(|e| Error::ConfigError(format!("invalid embedded schema: {e}")))?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| Error::ConfigError(format!("invalid embedded schema: {e}")))?;

    let mut messages: Vec<String> = validator
        .iter_errors(instance)
        .map(|error| {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            format!("{path}: {error}")
        })
        .collect();

    if messages.is_empty() {
        return Ok(());
    }
    messages.sort();
    Err(Error::ValidationError(messages.join("; ")))
}

/// Parses and validates configuration content.
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: serde_json::Value = serde_yaml::from_str(content)
        .map_err(|e| Error::ConfigError(format!("invalid configuration format: {e}")))?;

    // an empty document is an empty configuration
    let raw = if raw.is_null() { serde_json::Value::Object(Default::default()) } else { raw };

    validate(&raw)?;
    serde_json::from_value(raw).map_err(|e| Error::ConfigError(format!("invalid schema: {e}")))
}

/// Loads the configuration stored in `dir`.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist or cannot be parsed
/// * `Error::ValidationError` if the document violates the schema
pub fn load<P: AsRef<Path>>(dir: P) -> Result<Config> {
    let config_path = dir.as_ref().join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(Error::ConfigError(format!(
            "no configuration found at '{}', run 'craft init' first",
            config_path.display()
        )));
    }

    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(&config_path)?;
    parse_config(&content)
}

/// Writes the configuration back to `dir`.
pub fn save<P: AsRef<Path>>(dir: P, config: &Config) -> Result<()> {
    let config_path = dir.as_ref().join(CONFIG_FILE);
    let content = serde_yaml::to_string(config)
        .map_err(|e| Error::ConfigError(format!("failed to serialize configuration: {e}")))?;

    debug!("Saving configuration to {}", config_path.display());
    std::fs::write(config_path, format!("# craft configuration file\n{content}"))?;
    Ok(())
}

/// Writes `patched` back to `dir` only when it differs from `original`,
/// leaving a hand-edited file untouched otherwise.
///
/// Returns whether the file was written.
pub fn save_if_changed<P: AsRef<Path>>(dir: P, original: &Config, patched: &Config) -> Result<bool> {
    if original == patched {
        debug!("Configuration unchanged, not writing it back");
        return Ok(false);
    }
    save(dir, patched)?;
    Ok(true)
}
