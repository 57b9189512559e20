//! Template source filesystems.
//! Templates are read either from the asset tree compiled into the binary
//! or from a directory on disk, both behind the same [`TemplateFs`] surface.

use crate::error::{Error, Result};
use include_dir::{include_dir, Dir, DirEntry};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Template tree embedded at compile time.
static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// A single entry of a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

/// Minimal read-only filesystem holding templates.
///
/// Paths are relative to the template root, the empty path being the root.
pub trait TemplateFs: Send + Sync {
    /// Opens a file for reading.
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>>;

    /// Lists a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>>;

    /// Reads a whole file.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.open(path)?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Template filesystem backed by the compiled-in asset tree.
pub struct EmbedFs {
    root: &'static Dir<'static>,
}

impl EmbedFs {
    /// Returns the filesystem over craft's own templates.
    pub fn new() -> Self {
        Self { root: &TEMPLATES }
    }

    fn dir(&self, path: &Path) -> Result<&'static Dir<'static>> {
        if path.as_os_str().is_empty() {
            return Ok(self.root);
        }
        self.root.get_dir(path).ok_or_else(|| not_found(path))
    }
}

impl Default for EmbedFs {
    fn default() -> Self {
        EmbedFs::new()
    }
}

impl TemplateFs for EmbedFs {
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>> {
        let file = self.root.get_file(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(file.contents()))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self
            .dir(path)?
            .entries()
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_str()?.to_string();
                let is_dir = matches!(entry, DirEntry::Dir(_));
                Some(Entry { name, is_dir })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Template filesystem backed by an OS directory.
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateFs for OsFs {
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>> {
        let file = std::fs::File::open(self.root.join(path)).map_err(Error::IoError)?;
        Ok(Box::new(file))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.root.join(path))? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            entries.push(Entry { name, is_dir: entry.file_type()?.is_dir() });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn not_found(path: &Path) -> Error {
    Error::IoError(io::Error::new(
        io::ErrorKind::NotFound,
        format!("'{}' does not exist in embedded templates", path.display()),
    ))
}
