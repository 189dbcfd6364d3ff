//! Error types for the harness.
//!
//! Every variant is fatal at the harness level. Nothing is retried because each
//! step has already mutated the live target.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while driving the config engine.
#[derive(Debug, Error)]
pub enum HarnessError {
  /// The external command exited non-zero.
  #[error("{program} exited with code {code:?}")]
  ProcessFailure {
    program: String,
    code: Option<i32>,
    /// De-colorized combined output of the failed command.
    output: String,
  },

  /// The external command could not be started.
  #[error("failed to spawn {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// A resource binds its identity to a concrete target instead of the placeholder.
  #[error("resource {manifest_id} does not use the target placeholder in resource_uuids")]
  Portability { manifest_id: String },

  #[error("resource at index {index} has an unknown uc_terraform_type \"{type_suffix}\"")]
  UnknownResourceType { index: usize, type_suffix: String },

  #[error("resource at index {index} is missing a manifest_id")]
  MissingManifestId { index: usize },

  /// Required configuration (usually an environment value) is absent or malformed.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// A dry-run apply reported changes where none were expected.
  #[error("got an unexpected diff applying {}", manifest.display())]
  UnexpectedDiff { manifest: PathBuf },

  /// A cataloged resource type never showed up with the expected outcome.
  #[error("did not see resource type {suffix} {expected} in the output, please add test coverage")]
  MissingCoverage { suffix: String, expected: String },

  /// gen-manifest did not reproduce the manifest and its value files.
  #[error("gen-manifest produced a differing manifest and/or external value files ({discrepancies} discrepancies)")]
  RoundTripMismatch { discrepancies: usize },

  #[error("unsupported manifest format: {}", path.display())]
  UnsupportedFormat { path: PathBuf },

  #[error("failed to parse {}: {message}", path.display())]
  Parse { path: PathBuf, message: String },

  #[error("invalid pattern: {0}")]
  Pattern(#[from] regex::Error),

  #[error("io error at {}: {source}", path.display())]
  Io { path: PathBuf, source: std::io::Error },
}

impl HarnessError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    HarnessError::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
