use super::MatchResult;
use std::path::Path;

/// Handles the goreleaser configuration, only relevant with CLIs to release.
pub fn goreleaser(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if name != ".goreleaser.yml" {
        return None;
    }

    Some(MatchResult::new(src, dest).with_remove(|metadata| {
        metadata.config.no_goreleaser || metadata.clis.is_empty()
    }))
}
