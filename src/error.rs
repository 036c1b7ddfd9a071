//! Error types for envspec operations

use envspec_core::{CombineError, InvalidEnv};
use thiserror::Error;

/// The main error type for envspec operations
///
/// Entry-level problems (a missing variable, a parser that rejects a value)
/// are not errors at this level: they are reported through the printable
/// mapping of a [`Validation`](envspec_core::Validation). This enum covers
/// everything around that pass.
#[derive(Error, Debug)]
pub enum EnvSpecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(
        "Unsupported envspec revision '{0}'. This version of envspec only supports revision '1.0'"
    )]
    UnsupportedRevision(String),
    #[error("Dotenv error: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("No envspec.toml found at {0}")]
    NoManifest(String),
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),
    #[error("Invalid manifest: {0}")]
    Validation(String),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
    #[error("Parser '{0}' not found")]
    ParserNotFound(String),
    #[error("Variable '{name}': {reason}")]
    InvalidVariable { name: String, reason: String },
    #[error(transparent)]
    Invalid(#[from] InvalidEnv),
    #[error(transparent)]
    Combine(#[from] CombineError),
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// A type alias for `Result<T, EnvSpecError>`
pub type Result<T> = std::result::Result<T, EnvSpecError>;
