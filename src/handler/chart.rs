use super::MatchResult;
use crate::renderer::Delimiters;
use std::path::Path;

/// Template directory of the Helm chart.
const CHART_TEMPLATES: &str = "helm/chart";

/// Handles the Helm chart, the chart directory itself included so that
/// disabling the chart removes the whole destination subtree.
///
/// Chart files use Helm's own `{{ }}` syntax, hence chevron delimiters.
pub fn chart(src: &Path, dest: &Path, _: &str) -> Option<MatchResult> {
    if !src.starts_with(CHART_TEMPLATES) {
        return None;
    }

    Some(
        MatchResult::new(src, dest)
            .with_delimiters(Delimiters::chevron())
            .with_remove(|metadata| metadata.config.no_chart),
    )
}
