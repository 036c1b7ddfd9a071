#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary project directory holding manifests and dotenv files
pub struct TestFixture {
    _temp_dir: TempDir,
    pub base_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            base_path,
        }
    }

    /// Writes `envspec.toml` into `dir` (relative to the fixture) and returns its path
    pub fn write_manifest(&self, dir: &str, content: &str) -> PathBuf {
        let dir = self.base_path.join(dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("envspec.toml");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.base_path.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// A service manifest extending a shared one
    ///
    /// ```text
    /// shared/envspec.toml   LOG_LEVEL, REDIS_URL
    /// service/envspec.toml  DATABASE_URL, PORT, API_KEY, ALLOWED_HOSTS
    /// ```
    pub fn create_service(&self) -> PathBuf {
        self.write_manifest(
            "shared",
            r#"
[project]
name = "shared"
revision = "1.0"

[profiles.default]
LOG_LEVEL = { description = "Log verbosity", default = "info" }
REDIS_URL = { parser = "url", default = "redis://localhost:6379", mask = { url = ["password"] } }

[profiles.production]
LOG_LEVEL = { description = "Log verbosity", default = "warn" }
"#,
        );

        self.write_manifest(
            "service",
            r#"
[project]
name = "service"
revision = "1.0"
extends = ["../shared"]

[profiles.default]
DATABASE_URL = { parser = "url", mask = { url = ["password"] } }
PORT = { parser = "port", default = 8080 }
API_KEY = { mask = true }
ALLOWED_HOSTS = { parser = "list", default = "localhost" }

[profiles.production]
PORT = { parser = "port" }
"#,
        )
    }
}
