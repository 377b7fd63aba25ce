//! Command-line entry point for runvisor.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use runvisor::{Config, Supervisor};

/// Run a program and reload it interactively with a keypress.
#[derive(Parser, Debug)]
#[command(name = "runvisor", version, about)]
struct Cli {
    /// Executable to run and supervise.
    script: String,

    /// Arguments passed through verbatim to the child.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Child stdout/stderr pass through untouched; our own logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Missing argument exits with code 1, not clap's default 2. Help and
    // version requests stay on clap's display path (stdout, exit 0).
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_display_request(err.kind()) => err.exit(),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let sup = Supervisor::new(Config::default(), cli.script, cli.args);
    if let Err(err) = sup.run().await {
        tracing::error!(label = err.as_label(), error = %err, "fatal");
        std::process::exit(1);
    }
}

/// `--help`/`--version` are requests, not usage errors.
fn is_display_request(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_script_is_a_usage_error() {
        let err = Cli::try_parse_from(["runvisor"]).unwrap_err();
        assert!(!is_display_request(err.kind()));
    }

    #[test]
    fn help_and_version_are_display_requests() {
        let err = Cli::try_parse_from(["runvisor", "--help"]).unwrap_err();
        assert!(is_display_request(err.kind()));

        let err = Cli::try_parse_from(["runvisor", "--version"]).unwrap_err();
        assert!(is_display_request(err.kind()));
    }

    #[test]
    fn child_flags_pass_through_verbatim() {
        let cli = Cli::try_parse_from(["runvisor", "serve.sh", "--port", "8080"]).unwrap();
        assert_eq!(cli.script, "serve.sh");
        assert_eq!(cli.args, vec!["--port", "8080"]);
    }
}
