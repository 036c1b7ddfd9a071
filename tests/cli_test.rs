// Runs the `envspec` binary against manifests in a temporary directory.

mod common;

use common::TestFixture;
use std::process::{Command, Output};

const MANIFEST: &str = r#"
[project]
name = "cli-test"
revision = "1.0"

[profiles.default]
ENVSPEC_TEST_DATABASE_URL = { parser = "url", mask = { url = ["password"] } }
ENVSPEC_TEST_PORT = { parser = "port", default = 8080 }

[profiles.production]
ENVSPEC_TEST_PORT = { parser = "port" }
"#;

fn envspec(fixture: &TestFixture, args: &[&str], vars: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_envspec"));
    command
        .args(args)
        .current_dir(&fixture.base_path)
        .env("NO_COLOR", "1")
        .env_remove("ENVSPEC_FILE")
        .env_remove("ENVSPEC_PROFILE")
        .env_remove("ENVSPEC_TEST_DATABASE_URL")
        .env_remove("ENVSPEC_TEST_PORT");
    for (key, value) in vars {
        command.env(key, value);
    }
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_check_success() {
    let fixture = TestFixture::new();
    fixture.write_manifest(".", MANIFEST);

    let output = envspec(
        &fixture,
        &["check"],
        &[("ENVSPEC_TEST_DATABASE_URL", "postgres://app:pw@db/app")],
    );
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains(r#"ENVSPEC_TEST_DATABASE_URL = <masked: "postgres://app:*****@db/app">"#));
    assert!(out.contains("ENVSPEC_TEST_PORT = 8080 (default)"));
    assert!(out.contains("2 variables, profile 'default'"));
    assert!(!out.contains("pw@"));
}

#[test]
fn test_check_failure_exits_with_one() {
    let fixture = TestFixture::new();
    fixture.write_manifest(".", MANIFEST);

    let output = envspec(
        &fixture,
        &["check", "--profile", "production", "--inline"],
        &[("ENVSPEC_TEST_DATABASE_URL", "postgres://app:pw@db/app")],
    );
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains(
        r#"ENVSPEC_TEST_DATABASE_URL=<masked: "postgres://app:*****@db/app">, ENVSPEC_TEST_PORT=<missing>"#
    ));
    assert!(out.contains("Invalid environment"));
}

#[test]
fn test_check_reads_dotenv() {
    let fixture = TestFixture::new();
    fixture.write_manifest(".", MANIFEST);
    fixture.write_file(".env", "ENVSPEC_TEST_DATABASE_URL=postgres://dev@localhost/dev\n");

    let output = envspec(&fixture, &["check"], &[]);
    assert!(output.status.success());

    let output = envspec(&fixture, &["check", "--no-dotenv"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("ENVSPEC_TEST_DATABASE_URL = <missing>"));
}

#[test]
fn test_check_manifest_from_env() {
    let fixture = TestFixture::new();
    fixture.write_manifest("config", MANIFEST);

    let output = envspec(
        &fixture,
        &["check"],
        &[
            ("ENVSPEC_FILE", "config/envspec.toml"),
            ("ENVSPEC_PROFILE", "production"),
            ("ENVSPEC_TEST_DATABASE_URL", "postgres://db/app"),
            ("ENVSPEC_TEST_PORT", "5432"),
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("profile 'production'"));
}

#[test]
fn test_check_missing_manifest() {
    let fixture = TestFixture::new();

    let output = envspec(&fixture, &["check"], &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No envspec.toml found"));
}

#[test]
fn test_run_passes_environment_and_exit_code() {
    let fixture = TestFixture::new();
    fixture.write_manifest(".", MANIFEST);
    fixture.write_file(".env", "ENVSPEC_TEST_PORT=9090\n");

    let output = envspec(
        &fixture,
        &[
            "run",
            "--",
            "sh",
            "-c",
            "echo \"port=$ENVSPEC_TEST_PORT\"; exit 3",
        ],
        &[("ENVSPEC_TEST_DATABASE_URL", "postgres://db/app")],
    );
    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).contains("port=9090"));
}

#[test]
fn test_run_refuses_invalid_environment() {
    let fixture = TestFixture::new();
    fixture.write_manifest(".", MANIFEST);

    let output = envspec(&fixture, &["run", "--", "sh", "-c", "echo ran"], &[]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("ran"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ENVSPEC_TEST_DATABASE_URL = <missing>"));
}

#[test]
fn test_parsers_lists_builtins() {
    let fixture = TestFixture::new();

    let output = envspec(&fixture, &["parsers"], &[]);
    assert!(output.status.success());
    let out = stdout(&output);
    for name in ["bool", "float", "int", "json", "list", "port", "string", "url"] {
        assert!(out.contains(name), "missing parser {name}");
    }
}
