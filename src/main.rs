use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use fr24rs::response::print_envelope;
use fr24rs::{
    build_client, fetch_payload, AuthMode, Cli, FetchError, FilterSpec, HttpTransport,
    ResultEnvelope,
};

const EXIT_REQUEST_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Validate everything before touching the network.
    let setup = cli
        .filter_spec()
        .and_then(|filter| Ok((filter, AuthMode::from_env(cli.use_env_key)?)));
    let (filter, auth) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&cli, &filter, &auth).await {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(failure)) => {
            print_hints(&failure);
            ExitCode::from(EXIT_REQUEST_FAILED)
        }
        Err(e) => {
            eprintln!("\n{} {}\n", "Error:".red().bold(), e);
            ExitCode::from(EXIT_REQUEST_FAILED)
        }
    }
}

/// Prints the envelope and hands back the request failure, if any.
async fn run(cli: &Cli, filter: &FilterSpec, auth: &AuthMode) -> Result<Option<FetchError>> {
    let client = build_client(cli.timeout)?;
    let transport = HttpTransport::new(client);

    let outcome = fetch_payload(&transport, filter, auth, cli.endpoint.as_deref()).await;
    let failure = outcome.as_ref().err().cloned();
    let envelope = ResultEnvelope::from_outcome(outcome, filter);
    log::info!("Returning {} aircraft", envelope.count);

    let highlight = !cli.plain && std::io::stdout().is_terminal();
    print_envelope(&envelope, highlight)?;
    Ok(failure)
}

fn init_logging(verbose: bool) {
    let default_directives = if verbose {
        format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        "warn".to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_hints(failure: &FetchError) {
    let hints = failure.hints();
    if hints.is_empty() {
        return;
    }
    eprintln!("{}", "💡 Possible causes:".yellow());
    for hint in hints {
        eprintln!("   - {}", hint);
    }
}
