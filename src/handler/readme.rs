use super::{absent_guard, MatchResult};
use std::path::Path;

/// Handles the README, only ever written when the project has none.
pub fn readme(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if name != "README.md" {
        return None;
    }

    Some(MatchResult::new(src, dest).with_generate(absent_guard(dest)))
}
