//! craft is a project-scaffolding engine.
//! From a declarative configuration it generates the boilerplate of a
//! repository (CI pipelines, Dockerfile, Makefile, release configuration,
//! Helm chart) and keeps it synchronized across runs without overwriting
//! files edited by hand.

/// Command-line interface
pub mod cli;

/// `.craft` configuration file, validated against a JSON Schema
pub mod config;

/// Common constants
pub mod constants;

/// Detectors enriching the metadata from the destination tree
pub mod detector;

/// Error types and the error-join
pub mod error;

/// Execution steps run concurrently by the pipeline
pub mod exec;

/// Template source filesystems (embedded or on disk)
pub mod fs;

/// Directory-walk and render engine
pub mod generate;

/// Handlers deciding removal, generation and composition of each file
pub mod handler;

pub mod logger;

/// Generated-file marker detection
pub mod marker;

/// Configuration plus discovered facts
pub mod metadata;

/// Detection and concurrent execution
pub mod pipeline;

/// Interactive configuration wizard
pub mod prompt;

/// MiniJinja rendering with configurable delimiters
pub mod renderer;
