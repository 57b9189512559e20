//! Directory-walk and render engine.
//!
//! A [`Generator`] mirrors the template tree onto the destination directory
//! for one sub-generator. Each candidate file goes through handler
//! resolution, then the removal and generation decisions, then rendering
//! (or verbatim copy for static assets).

use crate::constants::{PART_SUFFIX, RESERVED_GENERATORS, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use crate::fs::TemplateFs;
use crate::handler::{resolve, Handler, MatchResult};
use crate::metadata::Metadata;
use crate::renderer::{Delimiters, Part, TemplateRenderer};
use globset::{Glob, GlobSetBuilder};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Run options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Destination directory.
    pub destdir: PathBuf,

    /// Delimiters of template files no handler claims.
    pub delimiters: Delimiters,

    /// File names regenerated regardless of their generated marker.
    pub force: Vec<String>,

    /// Regenerate every file regardless of its generated marker.
    pub force_all: bool,
}

impl Options {
    pub fn new<P: Into<PathBuf>>(destdir: P) -> Self {
        Self {
            destdir: destdir.into(),
            delimiters: Delimiters::default(),
            force: Vec::new(),
            force_all: false,
        }
    }

    /// Whether `name` must be regenerated regardless of its marker.
    pub fn is_forced(&self, name: &str) -> bool {
        self.force_all || self.force.iter().any(|forced| forced == name)
    }
}

/// Strips the template suffix from a file name.
///
/// Returns the logical file name and whether the file must be rendered.
pub fn logical_name(file_name: &str) -> (&str, bool) {
    match file_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(name) if !name.is_empty() => (name, true),
        _ => (file_name, false),
    }
}

/// Whether a file is a fragment only meant to be composed into another one.
pub fn is_part(file_name: &str) -> bool {
    file_name.ends_with(PART_SUFFIX)
}

/// Permissions of a generated file, shell scripts being executable.
pub fn file_mode(name: &str) -> u32 {
    if Path::new(name).extension().is_some_and(|ext| ext == "sh") {
        0o755
    } else {
        0o644
    }
}

/// Walks and renders the template tree for one sub-generator.
pub struct Generator<'a> {
    fs: &'a dyn TemplateFs,
    renderer: &'a dyn TemplateRenderer,
    handlers: &'a [Handler],
    metadata: &'a Metadata,
    options: &'a Options,
    name: &'a str,
    owns_shared: bool,
    context: serde_json::Value,
}

impl<'a> Generator<'a> {
    pub fn new(
        name: &'a str,
        fs: &'a dyn TemplateFs,
        renderer: &'a dyn TemplateRenderer,
        handlers: &'a [Handler],
        metadata: &'a Metadata,
        options: &'a Options,
    ) -> Result<Self> {
        let context = metadata.template_context(name)?;
        let owns_shared = metadata.primary_generator() == name;
        Ok(Self { fs, renderer, handlers, metadata, options, name, owns_shared, context })
    }

    /// Renders the whole template tree into the destination directory.
    ///
    /// Errors of individual files are collected, they do not prevent
    /// sibling files from being generated.
    pub fn run(&self) -> Result<()> {
        debug!("Running generator '{}'", self.name);
        self.walk(Path::new(""), &self.options.destdir)
    }

    fn walk(&self, src_dir: &Path, dest_dir: &Path) -> Result<()> {
        let is_root = src_dir.as_os_str().is_empty();
        let mut errors = Vec::new();

        for entry in self.fs.read_dir(src_dir)? {
            let src = src_dir.join(&entry.name);

            if entry.is_dir && RESERVED_GENERATORS.contains(&entry.name.as_str()) {
                if entry.name == self.name {
                    if let Err(err) = self.walk(&src, dest_dir) {
                        errors.push(err);
                    }
                }
                continue;
            }

            // shared files belong to the primary generator only
            if is_root && !self.owns_shared {
                continue;
            }

            let result = if entry.is_dir {
                self.handle_dir(&src, &dest_dir.join(&entry.name), &entry.name)
            } else {
                self.handle_file(&src, dest_dir, &entry.name)
            };
            if let Err(err) = result {
                errors.push(err);
            }
        }

        Error::join(errors)
    }

    fn handle_dir(&self, src: &Path, dest: &Path, name: &str) -> Result<()> {
        if let Some(result) = resolve(self.handlers, src, dest, name) {
            if result.should_remove(self.metadata) {
                if remove_path(dest).map_err(|e| e.at(dest))? {
                    info!("Removed '{}'", dest.display());
                }
                return Ok(());
            }
        }
        self.walk(src, dest)
    }

    fn handle_file(&self, src: &Path, dest_dir: &Path, file_name: &str) -> Result<()> {
        if is_part(file_name) {
            return Ok(());
        }

        let (name, is_template) = logical_name(file_name);
        let dest = dest_dir.join(name);

        let result = resolve(self.handlers, src, &dest, name).unwrap_or_else(|| {
            MatchResult::new(src, &dest).with_delimiters(self.options.delimiters.clone())
        });

        if result.should_remove(self.metadata) {
            if remove_path(&dest).map_err(|e| e.at(&dest))? {
                info!("Removed '{}'", dest.display());
            }
            return Ok(());
        }

        if !self.options.is_forced(name) && !result.should_generate(self.metadata) {
            debug!("Skipping '{}'", dest.display());
            return Ok(());
        }

        let content = if is_template {
            let parts = self.compose(src, &result.globs).map_err(|e| e.at(&dest))?;
            self.renderer
                .render_parts(&parts, &result.delimiters, &self.context)
                .map_err(|e| e.at(&dest))?
                .into_bytes()
        } else {
            self.fs.read_file(src).map_err(|e| e.at(&dest))?
        };

        write_file(&dest, &content).map_err(|e| e.at(&dest))?;
        info!("Generated '{}'", dest.display());
        Ok(())
    }

    /// Collects the primary template and the fragments matched by the
    /// remaining globs, the latter sorted by name.
    fn compose(&self, src: &Path, globs: &[String]) -> Result<Vec<Part>> {
        let primary = src
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::TemplateError(format!("invalid template path '{}'", src.display())))?;
        let dir = src.parent().unwrap_or_else(|| Path::new(""));

        let mut parts = vec![self.read_part(dir, primary)?];
        if globs.len() <= 1 {
            return Ok(parts);
        }

        let mut builder = GlobSetBuilder::new();
        for glob in &globs[1..] {
            builder.add(
                Glob::new(glob)
                    .map_err(|e| Error::TemplateError(format!("invalid glob '{glob}': {e}")))?,
            );
        }
        let matcher = builder
            .build()
            .map_err(|e| Error::TemplateError(format!("invalid globs: {e}")))?;

        for entry in self.fs.read_dir(dir)? {
            if !entry.is_dir && entry.name != primary && matcher.is_match(&entry.name) {
                parts.push(self.read_part(dir, &entry.name)?);
            }
        }
        Ok(parts)
    }

    fn read_part(&self, dir: &Path, name: &str) -> Result<Part> {
        let bytes = self.fs.read_file(&dir.join(name))?;
        let source = String::from_utf8(bytes)
            .map_err(|e| Error::TemplateError(format!("'{name}' is not valid UTF-8: {e}")))?;
        Ok(Part { name: name.to_string(), source })
    }
}

/// Replaces the destination file: parents are created on demand, any
/// previous file is deleted, then the content is written with the
/// permissions matching its extension.
pub fn write_file(dest: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    if fs::symlink_metadata(dest).is_ok_and(|m| m.is_dir()) {
        return Err(io::Error::other(format!("'{}' is a directory", dest.display())).into());
    }
    remove_path(dest)?;
    fs::write(dest, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let name = dest.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        fs::set_permissions(dest, fs::Permissions::from_mode(file_mode(name)))?;
    }
    Ok(())
}

/// Removes a file or a whole directory.
///
/// Returns whether something was removed; a missing path is not an error.
pub fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let removed = if metadata.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };
    match removed {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
