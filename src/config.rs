//! # Manifest Configuration Types
//!
//! `envspec.toml` declares every variable a program expects, per profile:
//!
//! ```toml
//! [project]
//! name = "my-app"
//! revision = "1.0"
//! extends = ["../shared"]  # Optional inheritance
//!
//! [profiles.default]
//! DATABASE_URL = { parser = "url", mask = { url = ["password"] } }
//! PORT = { parser = "port", default = 8080 }
//! API_KEY = { description = "External API key", mask = true }
//!
//! [profiles.production]
//! PORT = { parser = "port" }
//! ```
//!
//! Every profile inherits the variables of `default` and may override them.
//! [`Config::schema`] turns the selected profile into an
//! [`envspec_core::Schema`].

use crate::parser;
use crate::{EnvSpecError, Result};
use envspec_core::{Entry, Mask, Schema, UrlPart, Value, mask_url};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// The file name looked up in each extended directory.
pub const MANIFEST_FILE: &str = "envspec.toml";

/// Name of the profile every other profile inherits from.
pub const DEFAULT_PROFILE: &str = "default";

/// The root configuration structure of an `envspec.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project metadata including name, revision, and optional inheritance
    pub project: Project,
    /// Map of profile names to their variables
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Ensures that:
    /// - Project name is not empty
    /// - At least one profile is defined
    /// - Variable names are valid identifiers
    /// - Parsers, defaults and masks are well formed
    pub fn validate(&self) -> Result<()> {
        if self.project.name.is_empty() {
            return Err(EnvSpecError::Validation(
                "Project name cannot be empty".into(),
            ));
        }

        if self.profiles.is_empty() {
            return Err(EnvSpecError::Validation(
                "At least one profile must be defined".into(),
            ));
        }

        for (profile_name, profile) in &self.profiles {
            profile.validate().map_err(|e| {
                EnvSpecError::Validation(format!("Profile '{}': {}", profile_name, e))
            })?;
        }

        Ok(())
    }

    /// Names of all defined profiles, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves the variables of a profile, `default` included.
    ///
    /// Variables of the named profile override those of `default`. A manifest
    /// without a `default` profile resolves `default` to no variables.
    pub fn resolve_profile(&self, profile: &str) -> Result<BTreeMap<String, Var>> {
        let mut vars = self
            .profiles
            .get(DEFAULT_PROFILE)
            .map(|p| p.vars.clone())
            .unwrap_or_default();

        if profile != DEFAULT_PROFILE {
            let overrides = self.profiles.get(profile).ok_or_else(|| {
                EnvSpecError::InvalidProfile(format!(
                    "'{}' is not defined (available: {})",
                    profile,
                    self.profile_names().join(", ")
                ))
            })?;
            vars.extend(overrides.vars.clone());
        }

        debug!(profile, vars = vars.len(), "resolved profile");
        Ok(vars)
    }

    /// Builds the evaluation schema for a profile.
    ///
    /// Variables are ordered by name.
    pub fn schema(&self, profile: &str) -> Result<Schema> {
        self.resolve_profile(profile)?
            .iter()
            .map(|(name, var)| -> Result<(String, Entry)> {
                Ok((name.clone(), var.to_entry(name)?))
            })
            .collect()
    }

    /// Merge another configuration into this one.
    ///
    /// The current configuration takes precedence - values from `other`
    /// are only used if not already present.
    pub fn merge_with(&mut self, other: Config) {
        for (profile_name, profile) in other.profiles {
            match self.profiles.get_mut(&profile_name) {
                Some(existing) => existing.merge_with(profile),
                None => {
                    self.profiles.insert(profile_name, profile);
                }
            }
        }
    }

    fn from_path_with_visited(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Self> {
        let canonical_path = path.canonicalize().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                EnvSpecError::NoManifest(path.display().to_string())
            } else {
                EnvSpecError::Io(e)
            }
        })?;

        if !visited.insert(canonical_path.clone()) {
            return Err(EnvSpecError::CircularDependency(format!(
                "Configuration file {} is part of a circular dependency chain",
                canonical_path.display()
            )));
        }

        debug!(path = %canonical_path.display(), "loading manifest");
        let content = fs::read_to_string(path)?;
        let config = Self::from_str_with_visited(&content, Some(path), visited)?;

        // `visited` holds the chain of manifests still being loaded.
        visited.remove(&canonical_path);
        Ok(config)
    }

    fn from_str_with_visited(
        content: &str,
        base_path: Option<&Path>,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;

        if config.project.revision != "1.0" {
            return Err(EnvSpecError::UnsupportedRevision(config.project.revision));
        }

        if let Some(extends_paths) = config.project.extends.clone() {
            if let Some(base) = base_path {
                let base_dir = base.parent().unwrap_or(Path::new("."));
                config = Self::merge_extended_configs(config, &extends_paths, base_dir, visited)?;
            }
        }

        Ok(config)
    }

    fn merge_extended_configs(
        mut base_config: Config,
        extends_paths: &[String],
        base_dir: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<Config> {
        for extend_path in extends_paths {
            let full_path = base_dir.join(extend_path).join(MANIFEST_FILE);
            debug!(path = %full_path.display(), "extending manifest");

            if !full_path.exists() {
                return Err(EnvSpecError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Extended config file not found: {}", full_path.display()),
                )));
            }

            let extended_config = Self::from_path_with_visited(&full_path, visited)?;
            base_config.merge_with(extended_config);
        }

        Ok(base_config)
    }
}

impl FromStr for Config {
    type Err = EnvSpecError;

    /// Parse configuration from a TOML string.
    ///
    /// `extends` is ignored here since there is no base path to resolve it
    /// against.
    fn from_str(s: &str) -> Result<Self> {
        let mut visited = HashSet::new();
        Self::from_str_with_visited(s, None, &mut visited)
    }
}

impl TryFrom<&Path> for Config {
    type Error = EnvSpecError;

    /// Load configuration from a file path, following `extends`.
    fn try_from(path: &Path) -> Result<Self> {
        let mut visited = HashSet::new();
        Self::from_path_with_visited(path, &mut visited)
    }
}

/// Project metadata and inheritance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// The name of the project
    pub name: String,
    /// Configuration format revision (currently must be "1.0")
    pub revision: String,
    /// Optional list of directories, relative to this manifest, whose
    /// `envspec.toml` is merged under this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Vec<String>>,
}

/// The variables of one profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Variables by name, flattened in TOML for cleaner syntax
    #[serde(flatten)]
    pub vars: BTreeMap<String, Var>,
}

impl Profile {
    /// Validate the profile configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, var) in &self.vars {
            if !is_valid_identifier(name) {
                return Err(format!(
                    "Invalid variable name '{}': must be a valid identifier (ASCII letters, digits and underscores, not starting with a digit)",
                    name
                ));
            }
            var.to_entry(name).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// Merge another profile into this one. Existing variables win.
    pub fn merge_with(&mut self, other: Profile) {
        for (name, var) in other.vars {
            self.vars.entry(name).or_insert(var);
        }
    }
}

/// Declaration of a single variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Var {
    /// Human-readable description of the variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of a registered parser; the raw string is kept when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<String>,
    /// Value used when the variable is absent or blank
    ///
    /// Defaults never go through the parser: `default = "a,b"` on a `list`
    /// variable resolves to the string `"a,b"`, not a list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<toml::Value>,
    /// How the value is printed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskConfig>,
}

impl Var {
    /// Converts the declaration into an evaluation entry.
    pub fn to_entry(&self, name: &str) -> Result<Entry> {
        let mut entry = Entry::new();
        if let Some(parser_name) = &self.parser {
            entry = entry.parser(parser::lookup(parser_name)?);
        }
        if let Some(default) = &self.default {
            entry = entry.with_default(default_value(name, default)?);
        }
        if let Some(mask) = &self.mask {
            entry = entry.mask(mask.to_mask(name)?);
        }
        Ok(entry)
    }
}

/// `mask = true` or `mask = { url = ["password", "port"] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaskConfig {
    Hide(bool),
    Url { url: Vec<String> },
}

impl MaskConfig {
    fn to_mask(&self, name: &str) -> Result<Mask> {
        match self {
            MaskConfig::Hide(hide) => Ok(Mask::from(*hide)),
            MaskConfig::Url { url } => {
                let parts = url
                    .iter()
                    .map(|part| part.parse::<UrlPart>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|reason| EnvSpecError::InvalidVariable {
                        name: name.to_string(),
                        reason,
                    })?;
                Ok(mask_url(parts))
            }
        }
    }
}

fn default_value(name: &str, value: &toml::Value) -> Result<Value> {
    match value {
        toml::Value::String(s) => Ok(Value::from(s.as_str())),
        toml::Value::Integer(i) => Ok(Value::Int(*i)),
        toml::Value::Float(f) => Ok(Value::Float(*f)),
        toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
        other => Err(EnvSpecError::InvalidVariable {
            name: name.to_string(),
            reason: format!("default must be a string, number or boolean, not {}", other.type_str()),
        }),
    }
}

/// Check if a string is a valid variable name.
fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
