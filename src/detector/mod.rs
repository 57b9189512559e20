//! Detectors inspect the destination tree, enrich the [`Metadata`] with what
//! they find and contribute the steps generating (or removing) the matching
//! parts of the tree.
//!
//! Detectors run sequentially in two explicit phases: general detectors
//! first, then overriding ones which may cancel a general detector's choice
//! (a Hugo site is also a Go module, but must not be scaffolded as one).

use crate::error::Result;
use crate::exec::ExecStep;
use crate::metadata::Metadata;
use std::path::Path;

mod git;
mod golang;
mod helm;
mod hugo;
mod license;
mod node;
mod rust;

pub use git::{parse_remote, GitDetector};
pub use golang::{parse_go_mod, GolangDetector};
pub use helm::HelmDetector;
pub use hugo::HugoDetector;
pub use license::{LicenseDetector, LicenseStep};
pub use node::NodeDetector;
pub use rust::RustDetector;

/// Steps contributed by detectors.
pub type Steps = Vec<Box<dyn ExecStep>>;

/// Inspects a destination directory.
///
/// A detector finding no evidence of its subject returns no step and leaves
/// the metadata untouched.
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps>;
}

/// Ordered detectors, split in phases.
pub struct Detectors {
    pub general: Vec<Box<dyn Detector>>,
    pub overriding: Vec<Box<dyn Detector>>,
}

impl Detectors {
    pub fn new(general: Vec<Box<dyn Detector>>, overriding: Vec<Box<dyn Detector>>) -> Self {
        Self { general, overriding }
    }
}

impl Default for Detectors {
    fn default() -> Self {
        Self {
            general: vec![
                Box::new(GitDetector),
                Box::new(GolangDetector),
                Box::new(NodeDetector),
                Box::new(RustDetector),
                Box::new(HelmDetector),
                Box::new(LicenseDetector),
            ],
            overriding: vec![Box::new(HugoDetector)],
        }
    }
}
