//! # Parser Registry
//!
//! Manifests refer to parsers by name (`parser = "port"`). This module maps
//! those names to [`Parser`] values from `envspec_core::parsers`.
//!
//! Parsers register themselves with the [`register_parser!`] macro into a
//! link-time registry, so listing and lookup never go out of sync with what
//! is actually compiled in.
//!
//! ```rust,ignore
//! use envspec::parser;
//!
//! let port = parser::lookup("port")?;
//! assert!(port.parse("8080").is_ok());
//!
//! for info in parser::parsers() {
//!     println!("{}", info.display_with_examples());
//! }
//! ```

use crate::{EnvSpecError, Result};
use envspec_core::Parser;

#[macro_use]
pub mod macros;
mod builtin;

/// Information about a registered parser.
///
/// Used for listing parsers to users.
#[derive(Debug, Clone)]
pub struct ParserInfo {
    /// The name used in manifests (e.g., "int", "url").
    pub name: &'static str,
    /// A human-readable description of what the parser accepts.
    pub description: &'static str,
    /// Example raw values the parser accepts.
    pub examples: &'static [&'static str],
}

impl ParserInfo {
    /// Formats the parser information for display, including examples if available.
    ///
    /// - Without examples: "name: description"
    /// - With examples: "name: description (e.g., example1, example2)"
    pub fn display_with_examples(&self) -> String {
        if self.examples.is_empty() {
            format!("{}: {}", self.name, self.description)
        } else {
            format!(
                "{}: {} (e.g., {})",
                self.name,
                self.description,
                self.examples.join(", ")
            )
        }
    }
}

/// Macro support types
pub use macros::{PARSER_REGISTRY, ParserRegistration};

/// Returns every registered parser, sorted by name.
pub fn parsers() -> Vec<ParserInfo> {
    let mut infos: Vec<ParserInfo> = PARSER_REGISTRY
        .iter()
        .map(|reg| reg.info.clone())
        .collect();
    infos.sort_by_key(|info| info.name);
    infos
}

/// Looks up a parser by name.
///
/// # Errors
///
/// Returns [`EnvSpecError::ParserNotFound`] if no parser with that name is
/// registered.
pub fn lookup(name: &str) -> Result<Parser> {
    PARSER_REGISTRY
        .iter()
        .find(|reg| reg.info.name == name)
        .map(|reg| (reg.factory)())
        .ok_or_else(|| EnvSpecError::ParserNotFound(name.to_string()))
}
