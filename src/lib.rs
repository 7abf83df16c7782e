/// Background check for a newer published release.
pub mod advisory;

/// Handles argument parsing.
pub mod cli;

/// Constants used throughout the application.
pub mod constants;

/// Execution-context object bundling prompts, environment lookups,
/// subprocess invocation, and the module-name registry.
pub mod context;

/// Defines custom error types.
pub mod error;

/// Renders the file manifest into the target directory.
pub mod generator;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// The fixed list of files each generator variant produces.
pub mod manifest;

/// Application and module name derivation.
pub mod names;

/// Post-generation orchestration: cache copy, git init, dependency install.
pub mod postgen;

/// The resolved project descriptor and its bindings.
pub mod project;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Embedded project templates.
pub mod templates;

/// Descriptor validation.
pub mod validation;
