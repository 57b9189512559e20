//! Common constants used throughout craft.

/// Configuration file name, looked up at the destination root.
pub const CONFIG_FILE: &str = ".craft";

/// Suffix carried by every file that must be rendered.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Suffix of template fragments composed into a primary template.
pub const PART_SUFFIX: &str = ".part.tmpl";

/// Name of the tool as written in generated-file markers.
pub const GENERATOR_NAME: &str = "craft";

/// Template roots owned by a single sub-generator.
///
/// Recursion into these is gated by the generator a step runs for,
/// and entering them does not add a destination path component.
pub const RESERVED_GENERATORS: [&str; 6] = ["generic", "golang", "helm", "hugo", "node", "rust"];

/// Sub-generators that correspond to a detected language.
pub const LANGUAGE_GENERATORS: [&str; 5] = ["generic", "golang", "hugo", "node", "rust"];

/// Fallback generator used when no language was detected.
pub const GENERIC_GENERATOR: &str = "generic";

/// Destination directory of the Helm chart.
pub const CHART_DIR: &str = "chart";

/// Destination file of the license text.
pub const LICENSE_FILE: &str = "LICENSE";
