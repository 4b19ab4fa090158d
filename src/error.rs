//! Error types for loading naming rules and plan inputs.
//!
//! Name resolution itself never fails; only the I/O surfaces around it do.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading rule files or plan inputs from disk.
#[derive(Debug, Error)]
pub enum NamingError {
  /// Failed to read a file.
  #[error("failed to read {}: {source}", path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },
  /// Failed to parse a JSON document.
  #[error("failed to parse {}: {source}", path.display())]
  Json {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
  /// Failed to parse a YAML document.
  #[error("failed to parse {}: {source}", path.display())]
  Yaml {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_yaml::Error,
  },
  /// The file extension maps to no known document format.
  #[error("unsupported rules format for {} (expected .json, .yaml or .yml)", path.display())]
  UnsupportedFormat {
    /// Path that caused the error.
    path: PathBuf,
  },
}

/// Result alias used by the loading helpers.
pub type NamingResult<T> = Result<T, NamingError>;
