use super::{is_inside, MatchResult};
use std::path::Path;

/// Handles the Makefile and its includes.
///
/// The Makefile is composed of a primary template and one fragment per
/// language (`Makefile-<lang>.part.tmpl`). Includes under `scripts/mk` are
/// owned by craft and regenerated on every run.
pub fn makefile(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    let remove = |metadata: &crate::metadata::Metadata| metadata.config.no_makefile;

    if name == "Makefile" {
        return Some(MatchResult::new(src, dest).with_glob("Makefile-*.part.tmpl").with_remove(remove));
    }
    if is_inside(src, "scripts/mk") && name.ends_with(".mk") {
        return Some(MatchResult::new(src, dest).always().with_remove(remove));
    }
    None
}
