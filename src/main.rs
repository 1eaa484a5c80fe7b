// tcping - ping a host over TCP.
//
// Exit codes: 0 on help, version and any finished run (including an
// interrupted one); 1 on bad arguments or resolution failures.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tcping::cli::Cli;
use tcping::output::{self, Reporter};
use tcping::{resolver, session, shutdown};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
            let _ = e.print();
            return code;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let invocation = cli.validate()?;

    let target = resolver::resolve(
        &invocation.host,
        invocation.port,
        invocation.options.family,
    )
    .await?;

    let options = invocation.options;
    let reporter = Reporter::stdout(options.color, options.verbose);
    session::run(target, &options, reporter, shutdown::os_interrupt()).await;

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
