//! Metadata threaded through the generation pipeline.
//!
//! A [`Metadata`] is seeded from the configuration, enriched by detectors
//! during the sequential detection phase, then shared read-only with every
//! concurrently running step.

use crate::config::Config;
use crate::constants::GENERIC_GENERATOR;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// Facts gathered about a Go module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GoFacts {
    pub module: String,
    pub go_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain: Option<String>,
}

/// Facts gathered about a Node package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeFacts {
    pub name: String,
    pub package_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_version: Option<String>,
    pub private: bool,
}

/// Facts gathered about a Cargo package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RustFacts {
    pub name: String,
    pub edition: String,
    pub channel: String,
}

/// Facts gathered about a Hugo site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HugoFacts {
    pub theme: String,
}

/// Per-language fact bundle.
///
/// Serialized untagged so templates access fields directly,
/// e.g. `languages.golang.go_version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Language {
    Golang(GoFacts),
    Hugo(HugoFacts),
    Node(NodeFacts),
    Rust(RustFacts),
}

impl Language {
    /// Name under which the language is registered and its sub-generator lives.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Golang(_) => "golang",
            Language::Hugo(_) => "hugo",
            Language::Node(_) => "node",
            Language::Rust(_) => "rust",
        }
    }
}

/// Configuration plus everything detectors discovered about the destination.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    #[serde(flatten)]
    pub config: Config,

    /// Detected languages, in detection order.
    pub languages: IndexMap<String, Language>,

    pub project_host: String,
    pub project_name: String,
    pub project_path: String,

    /// Number of executable targets.
    pub binaries: usize,

    pub clis: BTreeSet<String>,
    pub crons: BTreeSet<String>,
    pub jobs: BTreeSet<String>,
    pub workers: BTreeSet<String>,
}

impl Metadata {
    pub fn new(config: Config) -> Self {
        Self { config, ..Default::default() }
    }

    /// Registers a detected language under its own name.
    pub fn add_language(&mut self, language: Language) {
        self.languages.insert(language.name().to_string(), language);
    }

    /// Registers an executable, classified by its name prefix.
    pub fn add_binary<S: Into<String>>(&mut self, name: S) {
        let name = name.into();
        let set = if name.starts_with("cron-") {
            &mut self.crons
        } else if name.starts_with("job-") {
            &mut self.jobs
        } else if name.starts_with("worker-") {
            &mut self.workers
        } else {
            &mut self.clis
        };
        if set.insert(name) {
            self.binaries += 1;
        }
    }

    /// Sub-generator owning the shared, root-level files of the template tree.
    ///
    /// It is the first detected language, or the generic generator when none.
    pub fn primary_generator(&self) -> &str {
        self.languages.keys().next().map(String::as_str).unwrap_or(GENERIC_GENERATOR)
    }

    /// Builds the template context for a given sub-generator.
    ///
    /// The serialized metadata is extended with `generator` and, when the
    /// generator is a detected language, `lang` holding its facts.
    pub fn template_context(&self, generator: &str) -> Result<serde_json::Value> {
        let mut context = serde_json::to_value(self)
            .map_err(|e| Error::TemplateError(format!("failed to serialize metadata: {e}")))?;

        if let serde_json::Value::Object(map) = &mut context {
            map.insert("generator".to_string(), generator.into());
            if let Some(language) = self.languages.get(generator) {
                let facts = serde_json::to_value(language).map_err(|e| {
                    Error::TemplateError(format!("failed to serialize language facts: {e}"))
                })?;
                map.insert("lang".to_string(), facts);
            }
        }
        Ok(context)
    }
}
