//! # envspec-core
//!
//! The evaluation pass behind `envspec`: a [`Schema`] describes every expected
//! variable (how to parse it, what to fall back to, how to print it) and
//! [`aggregate`] resolves all of them against a [`Source`] in one pass.
//!
//! The pass never stops at the first problem. Every variable is evaluated and
//! rendered, so the [`Printable`] mapping always shows the full picture, which
//! is what you want to log when a service refuses to start.
//!
//! ```
//! use envspec_core::{Entry, Schema, Value, aggregate, mask_url, parsers, UrlPart};
//! use std::collections::HashMap;
//!
//! let schema = Schema::new()
//!     .var("DATABASE_URL", Entry::new().mask(mask_url([UrlPart::Password])))
//!     .var("PORT", Entry::new().parser(parsers::port()).with_default(8080))
//!     .var("API_KEY", Entry::new().mask(true));
//!
//! let source = HashMap::from([
//!     ("DATABASE_URL".to_string(), "postgres://app:hunter2@db/app".to_string()),
//!     ("API_KEY".to_string(), "sk-123".to_string()),
//! ]);
//!
//! let validation = aggregate(&schema, &source);
//! assert!(validation.is_success());
//! assert_eq!(validation.env().unwrap().get("PORT"), Some(&Value::Int(8080)));
//! assert_eq!(
//!     validation.printable().to_inline(),
//!     r#"DATABASE_URL=<masked: "postgres://app:*****@db/app">, PORT=8080 (default), API_KEY=<masked>"#
//! );
//! ```

mod aggregate;
mod combine;
mod entry;
mod error;
mod evaluate;
mod mask;
pub mod parsers;
mod value;

pub use aggregate::{Env, Printable, Source, Validation, aggregate, aggregate_names};
pub use combine::combine;
pub use entry::{BoxError, Entry, Mask, MaskFn, Parser, Schema};
pub use error::{CombineError, EntryError, InvalidEnv};
pub use evaluate::{DEFAULT_SUFFIX, MASKED, MISSING, Outcome, evaluate};
pub use mask::{PLACEHOLDER, UrlPart, mask_url};
pub use value::{Opaque, Value};

#[cfg(test)]
mod tests;
