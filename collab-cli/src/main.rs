use std::path::PathBuf;

use clap::Parser;

use collab_core::error::{ConfigError, DocumentError, GraphError};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "collab",
    version,
    about = "Query, export and record employee collaboration graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: collab.toml next to the data file, if present)
    #[arg(long, global = true, env = "COLLAB_CONFIG")]
    config: Option<PathBuf>,
}

/// Classify an error into a process exit code.
///
/// Exit codes:
///   0: success
///   1: general/unknown error
///   2: configuration error
///   3: input file not found
///   4: malformed snapshot document
///   5: unknown employee or chat identity
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if cause.downcast_ref::<ConfigError>().is_some() {
            return 2;
        }
        if cause.downcast_ref::<DocumentError>().is_some() {
            return 4;
        }
        if let Some(graph_err) = cause.downcast_ref::<GraphError>() {
            return match graph_err {
                GraphError::UnknownEmployee(_) | GraphError::UnknownIdentity(_) => 5,
                GraphError::DuplicateKey { .. } => 1,
            };
        }
    }

    let lower = format!("{err:#}").to_lowercase();
    if lower.contains("data file not found") {
        3
    } else if lower.contains("config") {
        2
    } else {
        1
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match commands::run(cli.command, cli.config.as_deref()) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn exit_code_missing_data_file() {
        let err = anyhow::anyhow!("Data file not found: /tmp/nope.json. Run `collab demo` first.");
        assert_eq!(classify_exit_code(&err), 3);
    }

    #[test]
    fn exit_code_config() {
        let err = anyhow::Error::new(ConfigError::Parse("bad toml".to_string()))
            .context("Cannot load config");
        assert_eq!(classify_exit_code(&err), 2);
    }

    #[test]
    fn exit_code_malformed_document() {
        let err: anyhow::Result<()> =
            Err(DocumentError::MalformedDocument("not an object".to_string()))
                .context("Cannot load /tmp/x.json");
        assert_eq!(classify_exit_code(&err.unwrap_err()), 4);
    }

    #[test]
    fn exit_code_unknown_employee() {
        let err = anyhow::Error::new(GraphError::UnknownEmployee("E-9".to_string()));
        assert_eq!(classify_exit_code(&err), 5);
        let err = anyhow::Error::new(GraphError::UnknownIdentity("U9".to_string()));
        assert_eq!(classify_exit_code(&err), 5);
    }

    #[test]
    fn exit_code_general() {
        let err = anyhow::anyhow!("Something unexpected happened");
        assert_eq!(classify_exit_code(&err), 1);
    }
}
