//! # Hexaframe demo server
//!
//! Serves example use cases over HTTP.
//!
//! ## Startup sequence
//!
//! 1. Load `.env` if present.
//! 2. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 3. Load configuration (defaults, file, env, flags).
//! 4. Initialise the tracing subscriber in the configured format.
//! 5. Build the router and serve until Ctrl-C.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Clean shutdown          |
//! |  1   | Internal / I/O error    |
//! |  2   | Usage error             |
//! |  4   | Configuration error     |

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use hexaframe_adapters::ports::{RandomUuid, SystemClock, TracingLogger};
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};

use crate::{
    cli::Cli,
    config::{AppConfig, Overrides},
    error::{ServerError, ServerResult},
    logging::init_logging,
    routes::Ports,
};

mod cli;
mod config;
mod error;
mod logging;
mod routes;
mod use_cases;

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; real deployments use the environment directly.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with a zero exit code.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    let overrides = Overrides {
        config_file: cli.global.config.as_deref(),
        bind: cli.bind.as_deref(),
    };
    // No subscriber yet, so config failures go straight to stderr.
    let config = match AppConfig::load(&overrides) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = ServerError::config(&e);
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(e) = init_logging(&cli.global, config.logging.format) {
        let err = ServerError::Logging {
            message: e.to_string(),
        };
        eprintln!("{err}");
        return ExitCode::from(err.exit_code());
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        format = ?config.logging.format,
        "Configuration loaded"
    );

    match run(config).await {
        Ok(()) => {
            info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log();
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[instrument(skip_all, fields(bind = %config.server.bind))]
async fn run(config: AppConfig) -> ServerResult<()> {
    let addr = config.bind_addr().map_err(|e| ServerError::config(&e))?;

    let ports = Ports {
        clock: Arc::new(SystemClock::new()),
        ids: Arc::new(RandomUuid),
        logger: Arc::new(TracingLogger::new()),
    };
    let app = routes::router(&ports)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::io(format!("failed to bind {addr}"), e))?;
    let local = listener
        .local_addr()
        .map_err(|e| ServerError::io("failed to read local address", e))?;
    info!(addr = %local, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::io("server error", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown requested");
}
