use super::{Detector, Steps};
use crate::error::{Error, Result};
use crate::exec::GenerateStep;
use crate::metadata::{GoFacts, Language, Metadata};
use log::debug;
use std::path::Path;
use walkdir::WalkDir;

/// Detects a Go module through its `go.mod` and the binaries under `cmd/`.
pub struct GolangDetector;

impl Detector for GolangDetector {
    fn name(&self) -> &'static str {
        "golang"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        let gomod = destdir.join("go.mod");
        if !gomod.is_file() {
            return Ok(Vec::new());
        }

        debug!("Reading '{}'", gomod.display());
        let content = std::fs::read_to_string(&gomod)?;
        let facts = parse_go_mod(&content).map_err(|message| Error::DetectorError {
            detector: self.name().to_string(),
            message: format!("{}: {message}", gomod.display()),
        })?;

        let segments: Vec<&str> = facts.module.split('/').collect();
        if segments.len() > 1 {
            metadata.project_host = segments[0].to_string();
            metadata.project_path = segments[1..].join("/");
        }
        metadata.project_name = segments
            .iter()
            .rev()
            .find(|segment| !is_major_version(segment))
            .unwrap_or(&facts.module.as_str())
            .to_string();

        let cmd = destdir.join("cmd");
        if cmd.is_dir() {
            for entry in WalkDir::new(&cmd).min_depth(1).max_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| Error::IoError(e.into()))?;
                if entry.file_type().is_dir() {
                    metadata.add_binary(entry.file_name().to_string_lossy());
                }
            }
        }

        metadata.add_language(Language::Golang(facts));
        Ok(vec![Box::new(GenerateStep::new(self.name()))])
    }
}

fn is_major_version(segment: &str) -> bool {
    segment.strip_prefix('v').is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Extracts the module path, go version and toolchain from a `go.mod`.
pub fn parse_go_mod(content: &str) -> std::result::Result<GoFacts, String> {
    let mut facts = GoFacts::default();

    for line in content.lines() {
        let line = line.split("//").next().unwrap_or_default().trim();
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some("module"), Some(module)) => facts.module = module.trim_matches('"').to_string(),
            (Some("go"), Some(version)) => facts.go_version = version.to_string(),
            (Some("toolchain"), Some(toolchain)) => {
                facts.toolchain = Some(toolchain.trim_start_matches("go").to_string())
            }
            _ => {}
        }
    }

    if facts.module.is_empty() {
        return Err("missing module statement".to_string());
    }
    if facts.go_version.is_empty() {
        return Err("missing go statement".to_string());
    }
    Ok(facts)
}
