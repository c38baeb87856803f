use clap::Parser;
use std::fs::File;
use std::sync::Mutex;
use termfireworks::AppError;
use termfireworks::cli::Cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// The alternate screen owns the terminal, so logs only go to a file.
fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.clone(),
        source,
    })?;

    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    termfireworks::terminal::run(cli.settings())
}
