//! Per-variable configuration: parser, default and mask.

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Error type returned by caller-supplied parsers and masks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Turns the raw string of a variable into a typed [`Value`].
///
/// Parsers are cheap to clone and can be shared between entries.
///
/// ```
/// use envspec_core::{Parser, Value};
///
/// let even = Parser::new(|raw: &str| match raw.parse::<i64>() {
///     Ok(n) if n % 2 == 0 => Ok(n),
///     _ => Err("not an even number"),
/// });
/// assert_eq!(even.parse("4").unwrap(), Value::Int(4));
/// assert_eq!(even.parse("3").unwrap_err().to_string(), "not an even number");
/// ```
#[derive(Clone)]
pub struct Parser(Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>);

impl Parser {
    pub fn new<F, T, E>(f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: Into<BoxError>,
    {
        Self(Arc::new(move |raw| f(raw).map(Into::into).map_err(Into::into)))
    }

    pub fn parse(&self, raw: &str) -> Result<Value, BoxError> {
        (self.0)(raw)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Parser(..)")
    }
}

/// Caller-supplied rendering of a value for the printable mapping.
pub type MaskFn = Arc<dyn Fn(&Value) -> Result<String, BoxError> + Send + Sync>;

/// How a resolved value is shown in the printable mapping.
///
/// Masking only affects the printed form; the typed value is untouched.
#[derive(Clone, Default)]
pub enum Mask {
    /// Print the canonical literal.
    #[default]
    Off,
    /// Print `<masked>`.
    Hide,
    /// Print `<masked: "...">` with whatever the function returns.
    With(MaskFn),
}

impl Mask {
    pub fn with<F, E>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Mask::With(Arc::new(move |value| f(value).map_err(Into::into)))
    }
}

impl From<bool> for Mask {
    fn from(hide: bool) -> Self {
        if hide { Mask::Hide } else { Mask::Off }
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Off => f.write_str("Off"),
            Mask::Hide => f.write_str("Hide"),
            Mask::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Configuration for a single variable.
///
/// Without a parser the value is the raw string. A default is only used when
/// the variable is absent (or blank) and is never passed through the parser.
#[derive(Debug, Clone, Default)]
pub struct Entry {
    parser: Option<Parser>,
    default: Option<Value>,
    mask: Mask,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser(mut self, parser: Parser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Shorthand for `parser(Parser::new(f))`.
    pub fn parse_with<F, T, E>(self, f: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Into<Value>,
        E: Into<BoxError>,
    {
        self.parser(Parser::new(f))
    }

    /// Configures a default. `Value::Null` counts as configured.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn mask(mut self, mask: impl Into<Mask>) -> Self {
        self.mask = mask.into();
        self
    }

    pub fn get_parser(&self) -> Option<&Parser> {
        self.parser.as_ref()
    }

    pub fn get_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_mask(&self) -> &Mask {
        &self.mask
    }
}

/// An ordered set of named entries.
///
/// Order only matters for the printable mapping, which follows it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, Entry)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for plain string variables with no default and no mask.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|name| (name, Entry::new())).collect()
    }

    /// Builder form of [`insert`](Schema::insert).
    pub fn var(mut self, name: impl Into<String>, entry: Entry) -> Self {
        self.insert(name, entry);
        self
    }

    /// Adds an entry. Re-inserting a name replaces the entry in place.
    pub fn insert(&mut self, name: impl Into<String>, entry: Entry) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Entry)> for Schema {
    fn from_iter<I: IntoIterator<Item = (S, Entry)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, entry) in iter {
            schema.insert(name, entry);
        }
        schema
    }
}
