//! The evaluation pass over a whole [`Schema`].

use crate::combine::combine;
use crate::entry::Schema;
use crate::error::{CombineError, InvalidEnv};
use crate::evaluate::{Outcome, evaluate};
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// Where raw values come from.
///
/// Implemented for closures, string maps and, in the `envspec` crate, for
/// environment snapshots. A source is read once per variable per pass.
pub trait Source {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> Source for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

impl<S: BuildHasher> Source for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

/// Resolved values by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    values: HashMap<String, Value>,
}

impl Env {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Checks that the named variables are either all set or all unset.
    ///
    /// Unset, `null` and `undefined` count as unset. Returns `Ok(None)` when
    /// none are set and the values in `names` order when all are.
    pub fn group(&self, names: &[&str]) -> Result<Option<Vec<(String, Value)>>, CombineError> {
        combine(names.iter().map(|name| {
            let value = self.get(name).filter(|value| !value.is_nullish()).cloned();
            (name.to_string(), value)
        }))
    }

    pub fn into_inner(self) -> HashMap<String, Value> {
        self.values
    }

    fn insert(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }
}

/// Printed form of every variable, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Printable {
    entries: Vec<(String, String)>,
}

impl Printable {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, printable)| printable.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, printable)| (name.as_str(), printable.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `A="a", B=<masked>`
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(name, printable)| format!("{name}={printable}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One `A = "a"` line per variable.
    pub fn to_lines(&self) -> String {
        self.iter()
            .map(|(name, printable)| format!("{name} = {printable}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, name: String, printable: String) {
        self.entries.push((name, printable));
    }
}

impl fmt::Display for Printable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines())
    }
}

/// Outcome of a full pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Every variable resolved.
    Success { env: Env, printable: Printable },
    /// At least one variable is missing or failed to parse or print.
    Failure { printable: Printable },
}

impl Validation {
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success { .. })
    }

    pub fn printable(&self) -> &Printable {
        match self {
            Validation::Success { printable, .. } | Validation::Failure { printable } => printable,
        }
    }

    pub fn env(&self) -> Option<&Env> {
        match self {
            Validation::Success { env, .. } => Some(env),
            Validation::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<Env, InvalidEnv> {
        match self {
            Validation::Success { env, .. } => Ok(env),
            Validation::Failure { printable } => Err(InvalidEnv { printable }),
        }
    }
}

/// Evaluates every entry of `schema` against `source`.
///
/// All entries are evaluated and rendered, even after a failure, so the
/// printable mapping is always complete.
pub fn aggregate<S: Source + ?Sized>(schema: &Schema, source: &S) -> Validation {
    let mut env = Env::default();
    let mut printable = Printable::default();
    let mut failed = false;

    for (name, entry) in schema.iter() {
        let raw = source.get(name);
        let (outcome, shown) = evaluate(entry, raw.as_deref());
        match outcome {
            Outcome::Resolved { value, .. } => env.insert(name.to_string(), value),
            Outcome::Failed(_) => failed = true,
        }
        printable.push(name.to_string(), shown);
    }

    if failed {
        Validation::Failure { printable }
    } else {
        Validation::Success { env, printable }
    }
}

/// [`aggregate`] over plain, required string variables.
pub fn aggregate_names<I, N, S>(names: I, source: &S) -> Validation
where
    I: IntoIterator<Item = N>,
    N: Into<String>,
    S: Source + ?Sized,
{
    aggregate(&Schema::from_names(names), source)
}
