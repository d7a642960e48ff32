mod cli;
mod error;
mod http;
mod report;

use std::io;
use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let config = cli::parse_args(args);
    debug!(?config, "parsed arguments");

    let outcome = http::client::execute(&config).await;

    let stdout = io::stdout();
    let stderr = io::stderr();
    match report::emit(outcome, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            debug!("failed to write report: {err}");
            ExitCode::from(report::EXIT_FAILURE)
        }
    }
}

/// Diagnostics go to stderr and stay off unless `RUST_LOG` asks for them, so
/// stderr normally carries nothing but the failure report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
