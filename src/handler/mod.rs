//! File handlers.
//!
//! A handler classifies a candidate file of the template tree: it decides
//! whether the destination must be removed or (re)generated, which
//! delimiters apply and which template files compose it. Handlers are tried
//! in order and resolution stops at the first one claiming the file.

use crate::marker::is_generated;
use crate::metadata::Metadata;
use crate::renderer::Delimiters;
use std::path::{Path, PathBuf};

mod chart;
mod ci;
mod docker;
mod makefile;
mod release;
mod readme;

pub use chart::chart;
pub use ci::{codecov, github, gitlab, sonar};
pub use docker::docker;
pub use makefile::makefile;
pub use readme::readme;
pub use release::goreleaser;

/// Decision taken against the frozen metadata.
pub type Predicate = Box<dyn Fn(&Metadata) -> bool + Send + Sync>;

/// Classifies `(src, dest, name)`.
///
/// `src` is the template path relative to the template root, `dest` the
/// destination path and `name` the logical file name (template suffix
/// stripped). Returns `None` when the handler does not claim the file.
pub type Handler = fn(src: &Path, dest: &Path, name: &str) -> Option<MatchResult>;

/// Outcome of a handler claiming a file.
pub struct MatchResult {
    /// Delimiters of the template syntax.
    pub delimiters: Delimiters,

    /// File name globs, relative to the source directory, composing the file.
    /// The first glob names the primary template.
    pub globs: Vec<String>,

    /// `None` means always generate.
    pub should_generate: Option<Predicate>,

    /// `None` means never remove.
    pub should_remove: Option<Predicate>,
}

impl std::fmt::Debug for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchResult")
            .field("delimiters", &self.delimiters)
            .field("globs", &self.globs)
            .field("should_generate", &self.should_generate.is_some())
            .field("should_remove", &self.should_remove.is_some())
            .finish()
    }
}

impl MatchResult {
    /// Result for a single template file, guarded by the generated marker.
    pub fn new(src: &Path, dest: &Path) -> Self {
        let primary = src
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_default();

        Self {
            delimiters: Delimiters::default(),
            globs: vec![primary],
            should_generate: Some(generated_guard(dest)),
            should_remove: None,
        }
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Adds a glob of fragments composed into the primary template.
    pub fn with_glob<S: Into<String>>(mut self, glob: S) -> Self {
        self.globs.push(glob.into());
        self
    }

    pub fn with_remove<F>(mut self, remove: F) -> Self
    where
        F: Fn(&Metadata) -> bool + Send + Sync + 'static,
    {
        self.should_remove = Some(Box::new(remove));
        self
    }

    pub fn with_generate<F>(mut self, generate: F) -> Self
    where
        F: Fn(&Metadata) -> bool + Send + Sync + 'static,
    {
        self.should_generate = Some(Box::new(generate));
        self
    }

    /// Drops the generation predicate, the file is regenerated on every run.
    pub fn always(mut self) -> Self {
        self.should_generate = None;
        self
    }

    pub fn should_remove(&self, metadata: &Metadata) -> bool {
        self.should_remove.as_ref().is_some_and(|remove| remove(metadata))
    }

    pub fn should_generate(&self, metadata: &Metadata) -> bool {
        self.should_generate.as_ref().map_or(true, |generate| generate(metadata))
    }
}

/// Predicate accepting regeneration only when `dest` carries the generated
/// marker (or does not exist).
pub fn generated_guard(dest: &Path) -> Predicate {
    let dest: PathBuf = dest.to_path_buf();
    Box::new(move |_| is_generated(&dest))
}

/// Predicate accepting generation only when `dest` does not exist yet.
pub fn absent_guard(dest: &Path) -> Predicate {
    let dest: PathBuf = dest.to_path_buf();
    Box::new(move |_| !dest.exists())
}

/// Handlers in resolution order.
pub fn defaults() -> Vec<Handler> {
    vec![chart, codecov, docker, github, gitlab, goreleaser, makefile, readme, sonar]
}

/// Returns the result of the first handler claiming the file.
pub fn resolve(handlers: &[Handler], src: &Path, dest: &Path, name: &str) -> Option<MatchResult> {
    handlers.iter().find_map(|handler| handler(src, dest, name))
}

/// Whether `src` lies strictly inside the template directory `dir`.
pub(crate) fn is_inside(src: &Path, dir: &str) -> bool {
    src.starts_with(dir) && src != Path::new(dir)
}
