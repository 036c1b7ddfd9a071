use crate::parser::parsers;
use crate::{EnvSpec, Snapshot, Validation};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use std::path::PathBuf;

/// Main CLI structure for the envspec application.
#[derive(Parser)]
#[command(name = "envspec")]
#[command(about = "Declarative environment variables: validate, parse and print them safely", long_about = None)]
#[command(version)]
struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the envspec CLI.
#[derive(Subcommand)]
enum Commands {
    /// Check the environment against the manifest and print every variable
    Check {
        #[command(flatten)]
        target: Target,
        /// Print all variables on a single line
        #[arg(long)]
        inline: bool,
    },
    /// Run a command once the environment checks out
    Run {
        #[command(flatten)]
        target: Target,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
    /// List the parsers available to manifests
    Parsers,
}

/// Which manifest, profile and environment to check.
#[derive(Args)]
struct Target {
    /// Path to the manifest
    #[arg(short, long, env = "ENVSPEC_FILE", default_value = "envspec.toml")]
    file: PathBuf,
    /// Profile to use
    #[arg(short = 'P', long, env = "ENVSPEC_PROFILE")]
    profile: Option<String>,
    /// Dotenv file merged under the process environment
    #[arg(long, default_value = ".env")]
    dotenv: PathBuf,
    /// Ignore the dotenv file
    #[arg(long)]
    no_dotenv: bool,
}

impl Target {
    fn load(&self) -> Result<(EnvSpec, Snapshot)> {
        let spec = EnvSpec::load(&self.file)
            .wrap_err_with(|| format!("Failed to load {}", self.file.display()))?
            .with_profile(self.profile.clone());

        let snapshot = Snapshot::from_process();
        let snapshot = if self.no_dotenv {
            snapshot
        } else {
            snapshot
                .with_dotenv(&self.dotenv)
                .wrap_err_with(|| format!("Failed to read {}", self.dotenv.display()))?
        };

        Ok((spec, snapshot))
    }
}

/// Prints the printable mapping followed by a one-line verdict.
fn report(spec: &EnvSpec, validation: &Validation, inline: bool) {
    let printable = validation.printable();
    if inline {
        println!("{}", printable.to_inline());
    } else {
        for (name, shown) in printable.iter() {
            println!("{} = {}", name.bold(), shown);
        }
    }

    let summary = format!(
        "{} variables, profile '{}'",
        printable.len(),
        spec.profile()
    );
    if validation.is_success() {
        println!("\n{} {}", "✓".green(), summary);
    } else {
        println!("\n{} {}", "✗ Invalid environment:".red(), summary);
    }
}

/// Main entry point for the envspec CLI application.
///
/// Exits with status 1 when the environment does not validate, and with the
/// command's status for `run`.
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { target, inline } => {
            let (spec, snapshot) = target.load()?;
            let validation = spec
                .check(&snapshot)
                .wrap_err("Failed to check environment")?;
            report(&spec, &validation, inline);
            if !validation.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Run { target, command } => {
            let (spec, snapshot) = target.load()?;
            let code = spec
                .run(&command, &snapshot)
                .wrap_err("Refusing to run command")?;
            std::process::exit(code);
        }
        Commands::Parsers => {
            println!("Available parsers:");
            for info in parsers() {
                println!("  {}", info.display_with_examples());
            }
            Ok(())
        }
    }
}
