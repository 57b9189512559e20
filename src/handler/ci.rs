use super::{is_inside, MatchResult};
use crate::config::{Bot, CiName, CiOption};
use crate::metadata::Metadata;
use crate::renderer::Delimiters;
use std::path::Path;

const WORKFLOWS: &str = ".github/workflows";

/// Handles codecov's configuration.
pub fn codecov(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if name != ".codecov.yml" {
        return None;
    }
    Some(
        MatchResult::new(src, dest)
            .with_remove(|metadata| !metadata.config.has_ci_option(CiOption::Codecov)),
    )
}

/// Handles sonar's configuration.
pub fn sonar(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if name != "sonar.properties" {
        return None;
    }
    Some(
        MatchResult::new(src, dest)
            .with_remove(|metadata| !metadata.config.has_ci_option(CiOption::Sonar)),
    )
}

/// Handles every file under `.github`.
///
/// Workflows use `${{ }}` expressions, hence chevron delimiters. Specific
/// files are checked before the catch-all so that each one has a single
/// owner. The workflows directory itself is left alone, it may hold
/// workflows craft knows nothing about.
pub fn github(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if !is_inside(src, ".github") || src == Path::new(WORKFLOWS) {
        return None;
    }

    let not_github = |metadata: &Metadata| !metadata.config.is_ci(CiName::Github);
    let in_workflows = is_inside(src, WORKFLOWS);

    let result = MatchResult::new(src, dest).with_delimiters(Delimiters::chevron());
    let result = match (in_workflows, name) {
        (true, "release.yml") => result.with_remove(move |metadata| {
            not_github(metadata)
                || metadata.config.ci.as_ref().is_some_and(|ci| ci.release.is_none())
        }),
        (true, "codeql.yml") => result.with_remove(move |metadata| {
            not_github(metadata) || !metadata.config.has_ci_option(CiOption::Codeql)
        }),
        (_, "labeler.yml") => result.with_remove(move |metadata| {
            not_github(metadata) || !metadata.config.has_ci_option(CiOption::Labeler)
        }),
        (false, "dependabot.yml") => result.with_remove(move |metadata| {
            not_github(metadata) || metadata.config.bot != Some(Bot::Dependabot)
        }),
        _ => result.with_remove(not_github),
    };
    Some(result)
}

/// Handles GitLab CI files.
pub fn gitlab(src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    if name != ".gitlab-ci.yml" && !is_inside(src, ".gitlab") {
        return None;
    }
    Some(
        MatchResult::new(src, dest)
            .with_remove(|metadata| !metadata.config.is_ci(CiName::Gitlab)),
    )
}
