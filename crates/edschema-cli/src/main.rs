//! # edschema CLI entry point
//!
//! Parses command-line arguments, loads the layered configuration,
//! installs logging and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use edschema_cli::attributes::{run_attributes, AttributesArgs};
use edschema_cli::config::CliConfig;
use edschema_cli::schema::{
    run_defaults, run_resolve, run_type, DefaultsArgs, ResolveArgs, TypeArgs,
};

/// edschema: editor schema and script attribute toolchain.
///
/// Derives editor type tags from schema paths, materializes defaults for
/// new records, and validates scanned script attribute declarations.
#[derive(Parser, Debug)]
#[command(name = "edschema", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the derived type tag of a schema path.
    Type(TypeArgs),

    /// Print the schema node at a path.
    Resolve(ResolveArgs),

    /// Print the default data of a schema object.
    Defaults(DefaultsArgs),

    /// Validate script attribute batch files.
    Attributes(AttributesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    init_tracing(cli.verbose, config.log_filter.as_deref(), cli.log_json);
    tracing::debug!(?config, "edschema starting");

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Type(args) => run_type(&args, &config, &mut stdout),
        Commands::Resolve(args) => run_resolve(&args, &config, &mut stdout),
        Commands::Defaults(args) => run_defaults(&args, &config, &mut stdout),
        Commands::Attributes(args) => run_attributes(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

/// Pick the log filter: `-v` flags first, then `RUST_LOG`, then the
/// configured filter, then `warn`.
fn init_tracing(verbose: u8, configured: Option<&str>, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .ok()
            .or_else(|| configured.and_then(|f| EnvFilter::try_new(f).ok()))
            .unwrap_or_else(|| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
