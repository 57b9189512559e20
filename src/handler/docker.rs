use super::MatchResult;
use std::path::Path;

/// Handles the container image files.
///
/// Nothing is built without an executable, and the launcher script only
/// makes sense when the image has to choose between several of them.
pub fn docker(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    match name {
        "Dockerfile" | ".dockerignore" => Some(
            MatchResult::new(src, dest).with_remove(|metadata| {
                metadata.config.docker.is_none() || metadata.binaries == 0
            }),
        ),
        "launcher.sh" => Some(MatchResult::new(src, dest).with_remove(|metadata| {
            metadata.config.docker.is_none() || metadata.binaries <= 1
        })),
        _ => None,
    }
}
