//! Error types for the evaluation pass

use crate::aggregate::Printable;
use thiserror::Error;

/// Why a single entry did not resolve.
///
/// These never abort the pass; they only turn the overall result into a
/// failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("variable is not set and has no default")]
    Missing,
    #[error("parser failed: {0}")]
    Parse(String),
    #[error("mask failed: {0}")]
    Mask(String),
}

/// A group of variables that must be set together was only partly set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Expected all or none of the grouped variables to be set, but {} {} set and {} {} not",
    .present.join(", "),
    verb(.present),
    .absent.join(", "),
    verb(.absent)
)]
pub struct CombineError {
    /// Names that had a value, in input order
    pub present: Vec<String>,
    /// Names that were unset or null, in input order
    pub absent: Vec<String>,
}

fn verb(names: &[String]) -> &'static str {
    if names.len() == 1 { "was" } else { "were" }
}

/// The environment failed validation.
///
/// Carries the complete printable mapping so the caller can report every
/// variable, not only the broken ones.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid environment variables:\n{}", .printable.to_lines())]
pub struct InvalidEnv {
    pub printable: Printable,
}
