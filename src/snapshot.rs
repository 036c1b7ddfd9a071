//! A frozen copy of the environment the evaluation pass reads from.

use crate::Result;
use envspec_core::Source;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use tracing::{debug, trace};

/// An immutable view of environment variables.
///
/// Taking a snapshot once, before the pass, means every variable is read from
/// the same state and nothing the program does afterwards can change what was
/// validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: HashMap<String, String>,
}

impl Snapshot {
    /// Captures the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let vars: HashMap<String, String> = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        debug!(vars = vars.len(), "captured process environment");
        Self { vars }
    }

    /// Builds a snapshot from explicit pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Merges the variables of a `.env` file.
    ///
    /// Variables already in the snapshot win over the file. A missing file
    /// leaves the snapshot unchanged.
    pub fn with_dotenv(mut self, path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no dotenv file");
            return Ok(self);
        }

        let mut added = 0usize;
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            if self.vars.contains_key(&key) {
                trace!(%key, "keeping process value over dotenv");
                continue;
            }
            self.vars.insert(key, value);
            added += 1;
        }
        debug!(path = %path.display(), added, "merged dotenv file");
        Ok(self)
    }

    /// Returns the value of a variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Source for Snapshot {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
