//! `dupguard` - duplicate-entry checks for YAML configuration files

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use clap::Parser;
use tokio_util::sync::CancellationToken;

use dupguard::cli::{Cli, run};
use dupguard::error::ExitCode;
use dupguard::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();
    let signal_code = Arc::new(AtomicI32::new(ExitCode::INTERRUPTED));

    // Spawn signal handler for graceful shutdown
    {
        let cancel = cancel.clone();
        let signal_code = Arc::clone(&signal_code);
        tokio::spawn(async move {
            let code = wait_for_signal().await;
            signal_code.store(code, Ordering::SeqCst);
            cancel.cancel();

            eprintln!("\nInterrupted, finishing up... (press Ctrl+C again to force)");

            let code = wait_for_signal().await;
            std::process::exit(code);
        });
    }

    let result = run(&cli, cancel.clone()).await;

    // The partial report has already been written; only the code differs
    if cancel.is_cancelled() {
        std::process::exit(signal_code.load(Ordering::SeqCst));
    }

    match result {
        Ok(summary) => std::process::exit(summary.exit_code()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// Waits for SIGINT or SIGTERM and returns the matching exit code.
#[cfg(unix)]
async fn wait_for_signal() -> i32 {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = tokio::signal::ctrl_c() => ExitCode::INTERRUPTED,
            _ = sigterm.recv() => ExitCode::TERMINATED,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to register SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            ExitCode::INTERRUPTED
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> i32 {
    let _ = tokio::signal::ctrl_c().await;
    ExitCode::INTERRUPTED
}
