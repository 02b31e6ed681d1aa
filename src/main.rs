//! dvcs binary entry point.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use dvcswrap::cli::{self, Cli};
use dvcswrap::ui::output;

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(cli::commands::Exit(code)) = err.downcast_ref::<cli::commands::Exit>() {
                return ExitCode::from(*code);
            }
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
