//! Loading a manifest and checking an environment against it

use crate::config::{Config, DEFAULT_PROFILE};
use crate::error::{EnvSpecError, Result};
use crate::snapshot::Snapshot;
use envspec_core::{Schema, Source, Validation, aggregate};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// The main entry point for the envspec library
///
/// `EnvSpec` holds a validated manifest and the selected profile.
///
/// # Example
///
/// ```no_run
/// use envspec::{EnvSpec, Snapshot};
///
/// let spec = EnvSpec::load("envspec.toml").unwrap().with_profile(Some("production"));
/// let env = spec.check(&Snapshot::from_process()).unwrap().into_result().unwrap();
/// let port = env.get("PORT").and_then(|port| port.as_i64());
/// ```
pub struct EnvSpec {
    /// The manifest
    config: Config,
    /// Profile used to build the schema
    profile: String,
}

impl EnvSpec {
    /// Creates a new `EnvSpec` using the `default` profile
    pub fn new(config: Config) -> Self {
        Self {
            config,
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    /// Loads and validates a manifest, following `extends`
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, is not valid TOML, uses an
    /// unsupported revision, or declares an invalid variable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::try_from(path.as_ref())?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Selects a profile. `None` keeps the current one.
    pub fn with_profile(mut self, profile: Option<impl Into<String>>) -> Self {
        if let Some(profile) = profile {
            self.profile = profile.into();
        }
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// The evaluation schema of the selected profile
    pub fn schema(&self) -> Result<Schema> {
        self.config.schema(&self.profile)
    }

    /// Runs the evaluation pass against `source`
    ///
    /// Entry-level problems are part of the returned [`Validation`]; only
    /// manifest problems (for example an unknown profile) are errors.
    pub fn check<S: Source + ?Sized>(&self, source: &S) -> Result<Validation> {
        let schema = self.schema()?;
        let validation = aggregate(&schema, source);
        info!(
            project = %self.config.project.name,
            profile = %self.profile,
            vars = schema.len(),
            success = validation.is_success(),
            "checked environment"
        );
        Ok(validation)
    }

    /// Validates `snapshot` and runs `command` with it as the environment
    ///
    /// Returns the exit code of the command.
    ///
    /// # Errors
    ///
    /// Returns [`EnvSpecError::Invalid`] without running anything if the
    /// environment does not validate.
    pub fn run(&self, command: &[String], snapshot: &Snapshot) -> Result<i32> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| EnvSpecError::CommandFailed("No command specified".into()))?;

        self.check(snapshot)?.into_result()?;

        debug!(%program, "running command");
        let status = Command::new(program)
            .args(args)
            .env_clear()
            .envs(snapshot.iter())
            .status()
            .map_err(|e| EnvSpecError::CommandFailed(format!("{}: {}", program, e)))?;

        Ok(status.code().unwrap_or(1))
    }
}
