/// Handles argument parsing and the end-to-end run.
pub mod cli;

/// Axis schema, raw answers and the resolved configuration.
pub mod config;

/// Constants shared across the crate.
pub mod constants;

/// Env file parsing and marker-aware merging.
pub mod envfile;

/// Defines custom error types.
pub mod error;

/// Ordered in-memory set of generated files.
pub mod fileset;

/// Per-axis file generators.
pub mod generators;

/// Dependency installation after generation.
pub mod installer;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Output path conventions shared by generators.
pub mod layout;

/// Package manifest assembly.
pub mod manifest;

/// Runs the generators and layers their output.
pub mod orchestrator;

/// User input and interaction handling.
pub mod prompt;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Embedded template sources.
pub mod templates;

/// Writes a generated file set to disk.
pub mod writer;
