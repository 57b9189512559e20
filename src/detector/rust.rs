use super::{Detector, Steps};
use crate::error::{Error, Result};
use crate::exec::GenerateStep;
use crate::metadata::{Language, Metadata, RustFacts};
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<Package>,
    #[serde(default)]
    bin: Vec<Bin>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    #[serde(default)]
    edition: Option<Edition>,
}

/// An edition set in the package, or inherited with `edition.workspace = true`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Edition {
    Value(String),
    Inherited { workspace: bool },
}

#[derive(Debug, Deserialize)]
struct Bin {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Toolchain {
    #[serde(default)]
    toolchain: ToolchainSection,
}

#[derive(Debug, Default, Deserialize)]
struct ToolchainSection {
    channel: Option<String>,
}

/// Detects a Cargo package through its `Cargo.toml`.
pub struct RustDetector;

impl Detector for RustDetector {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        let manifest_path = destdir.join("Cargo.toml");
        if !manifest_path.is_file() {
            return Ok(Vec::new());
        }

        let detector_error = |path: &Path, e: toml::de::Error| Error::DetectorError {
            detector: self.name().to_string(),
            message: format!("{}: {e}", path.display()),
        };

        let manifest: Manifest = toml::from_str(&std::fs::read_to_string(&manifest_path)?)
            .map_err(|e| detector_error(&manifest_path, e))?;

        let toolchain_path = destdir.join("rust-toolchain.toml");
        let toolchain: Toolchain = if toolchain_path.is_file() {
            toml::from_str(&std::fs::read_to_string(&toolchain_path)?)
                .map_err(|e| detector_error(&toolchain_path, e))?
        } else {
            Toolchain::default()
        };

        let name = match &manifest.package {
            Some(package) => package.name.clone(),
            None => destdir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        };
        if metadata.project_name.is_empty() {
            metadata.project_name = name.clone();
        }

        if manifest.package.is_some() && destdir.join("src/main.rs").is_file() {
            metadata.add_binary(name.clone());
        }
        for bin in &manifest.bin {
            if let Some(bin_name) = &bin.name {
                metadata.add_binary(bin_name.clone());
            }
        }

        metadata.add_language(Language::Rust(RustFacts {
            name,
            edition: manifest
                .package
                .and_then(|p| match p.edition {
                    Some(Edition::Value(edition)) => Some(edition),
                    Some(Edition::Inherited { workspace }) => {
                        debug!("{} inherits its edition, workspace = {workspace}", manifest_path.display());
                        None
                    }
                    None => None,
                })
                .unwrap_or_else(|| "2021".to_string()),
            channel: toolchain.toolchain.channel.unwrap_or_else(|| "stable".to_string()),
        }));
        Ok(vec![Box::new(GenerateStep::new(self.name()))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"tool\"\nedition = \"2024\"\n\n[[bin]]\nname = \"tool-admin\"\npath = \"src/admin.rs\"\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        std::fs::write(dir.path().join("rust-toolchain.toml"), "[toolchain]\nchannel = \"1.85\"\n")
            .unwrap();

        let mut metadata = Metadata::default();
        let steps = RustDetector.detect(dir.path(), &mut metadata).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(metadata.binaries, 2);
        assert_eq!(
            metadata.languages.get("rust"),
            Some(&Language::Rust(RustFacts {
                name: "tool".to_string(),
                edition: "2024".to_string(),
                channel: "1.85".to_string(),
            }))
        );
    }

    #[test]
    fn test_workspace_edition() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"member\"\nedition.workspace = true\nversion.workspace = true\n",
        )
        .unwrap();

        let mut metadata = Metadata::default();
        RustDetector.detect(dir.path(), &mut metadata).unwrap();
        assert_eq!(
            metadata.languages.get("rust"),
            Some(&Language::Rust(RustFacts {
                name: "member".to_string(),
                edition: "2021".to_string(),
                channel: "stable".to_string(),
            }))
        );
    }
}
