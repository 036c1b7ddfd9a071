//! envspec - Declarative environment variables for programs that refuse to
//! start half-configured
//!
//! A manifest (`envspec.toml`) declares every variable a program reads, how
//! to parse it, what to fall back to, and how to print it. At startup the
//! whole environment is checked in one pass: either every variable resolves
//! to a typed value, or you get a complete, safely masked report of what is
//! wrong.
//!
//! # Features
//!
//! - **Declarative Configuration**: Define variables in `envspec.toml`
//! - **Typed Values**: Built-in parsers for integers, ports, URLs, JSON, ...
//! - **Masking**: Hide secrets, or only the password of a connection URL
//! - **Profile Support**: Different variables for development and production
//! - **Complete Reports**: Every variable is evaluated, even after a failure
//!
//! # Example
//!
//! ```ignore
//! use envspec::{EnvSpec, Snapshot};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let spec = EnvSpec::load("envspec.toml")?.with_profile(std::env::var("APP_ENV").ok());
//!     let snapshot = Snapshot::from_process().with_dotenv(Path::new(".env"))?;
//!
//!     let validation = spec.check(&snapshot)?;
//!     println!("{}", validation.printable());
//!     let env = validation.into_result()?;
//!
//!     let port = env.get("PORT").and_then(|v| v.as_i64()).unwrap_or(8080);
//!     println!("listening on {port}");
//!     Ok(())
//! }
//! ```
//!
//! The evaluation pass itself lives in [`envspec_core`] and can be used
//! without a manifest:
//!
//! ```
//! use envspec::{Entry, Schema, aggregate, parsers};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new().var("WORKERS", Entry::new().parser(parsers::int()).with_default(4));
//! let validation = aggregate(&schema, &HashMap::<String, String>::new());
//! assert_eq!(validation.printable().to_inline(), "WORKERS=4 (default)");
//! ```

// Internal modules
mod config;
mod env_spec;
mod error;
mod snapshot;

pub mod parser;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, DEFAULT_PROFILE, MANIFEST_FILE, MaskConfig, Profile, Project, Var};
pub use env_spec::EnvSpec;
pub use error::{EnvSpecError, Result};
pub use snapshot::Snapshot;

// Re-export the evaluation core
pub use envspec_core::{
    BoxError, CombineError, DEFAULT_SUFFIX, Entry, EntryError, Env, InvalidEnv, MASKED, MISSING,
    Mask, Opaque, Outcome, PLACEHOLDER, Parser, Printable, Schema, Source, UrlPart, Validation,
    Value, aggregate, aggregate_names, combine, evaluate, mask_url, parsers,
};
