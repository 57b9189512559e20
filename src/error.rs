//! Error handling for craft.
//! Defines the crate-wide error type, result alias and the error-join used
//! to aggregate per-file and per-step failures.

use std::io;
use thiserror::Error;

/// Custom error types for craft operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while assembling a template
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors raised by the template engine itself
    #[error("Template rendering error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur while reading or writing the configuration
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents schema violations in the configuration file
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents a detector that could not inspect the destination tree
    #[error("Detector '{detector}' failed: {message}.")]
    DetectorError { detector: String, message: String },

    /// Wraps an error with the destination path it happened on
    #[error("Failed to process '{path}': {source}")]
    ProcessError { path: String, source: Box<Error> },

    /// Represents errors that occur while reading repository information
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Represents errors of outbound HTTP calls
    #[error("HTTP error: {0}.")]
    HttpError(#[from] reqwest::Error),

    /// Several errors joined together, one per line
    #[error("{}", join_messages(.0))]
    Multiple(Vec<Error>),
}

fn join_messages(errors: &[Error]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

impl Error {
    /// Joins a list of errors into a single result.
    ///
    /// An empty list is a success, a single error is returned as is and
    /// anything else becomes [`Error::Multiple`]. Nested joins are flattened.
    pub fn join(errors: Vec<Error>) -> Result<()> {
        let mut flat = Vec::with_capacity(errors.len());
        for err in errors {
            match err {
                Error::Multiple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Ok(()),
            1 => Err(flat.remove(0)),
            _ => Err(Error::Multiple(flat)),
        }
    }

    /// Wraps the error with the path it relates to.
    pub fn at<P: AsRef<std::path::Path>>(self, path: P) -> Self {
        Error::ProcessError { path: path.as_ref().display().to_string(), source: Box::new(self) }
    }

    /// Number of leaf errors carried by this error.
    pub fn count(&self) -> usize {
        match self {
            Error::Multiple(inner) => inner.iter().map(Error::count).sum(),
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with craft's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
